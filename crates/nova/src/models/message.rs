use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// Styling class of an entry. Errors are ordinary transcript content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Body {
    Text { text: String },
    Link { title: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single rendered entry of the conversation
pub struct Message {
    pub sender: Sender,
    pub kind: MessageKind,
    pub created: i64,
    pub body: Body,
}

impl Message {
    fn new(sender: Sender, kind: MessageKind, body: Body) -> Self {
        Message {
            sender,
            kind,
            created: Utc::now().timestamp(),
            body,
        }
    }

    /// Create a new user message with the current timestamp
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::new(Sender::User, MessageKind::User, Body::Text { text: text.into() })
    }

    /// Create a new assistant message with the current timestamp
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self::new(
            Sender::Assistant,
            MessageKind::Assistant,
            Body::Text { text: text.into() },
        )
    }

    pub fn link<S: Into<String>, T: Into<String>>(title: S, url: T) -> Self {
        Self::new(
            Sender::Assistant,
            MessageKind::Assistant,
            Body::Link {
                title: title.into(),
                url: url.into(),
            },
        )
    }

    pub fn error<S: Into<String>>(text: S) -> Self {
        Self::new(
            Sender::Assistant,
            MessageKind::Error,
            Body::Text { text: text.into() },
        )
    }

    /// Get the text if the body is plain text
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            Body::Text { text } => Some(text),
            Body::Link { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors_set_sender_and_kind() {
        let user = Message::user("hi");
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.kind, MessageKind::User);
        assert_eq!(user.as_text(), Some("hi"));

        let error = Message::error("⚠️ boom");
        assert_eq!(error.sender, Sender::Assistant);
        assert!(error.is_error());

        let link = Message::link("Rust", "https://www.rust-lang.org");
        assert_eq!(link.as_text(), None);
        assert!(!link.is_error());
    }

    #[test]
    fn test_link_serialization() -> anyhow::Result<()> {
        let message = Message::link("Rust", "https://www.rust-lang.org");
        let value = serde_json::to_value(&message)?;

        assert_eq!(value["sender"], json!("assistant"));
        assert_eq!(value["kind"], json!("assistant"));
        assert_eq!(
            value["body"],
            json!({"type": "link", "title": "Rust", "url": "https://www.rust-lang.org"})
        );
        Ok(())
    }
}
