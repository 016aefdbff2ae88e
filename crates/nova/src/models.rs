//! These models represent the entries shown to the user.
//!
//! Capability payloads have their own shapes (see `capabilities`); the renderer
//! converts every one of them, errors included, into plain `Message` values before
//! they reach the transcript.
pub mod message;
