use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::message::Message;

/// Ordered record of the conversation.
///
/// Entries are only ever appended. The pending marker is not an entry: it is a
/// single slot shown after the last entry while at least one response is
/// outstanding. Every `show_pending` is balanced by one `clear_pending`, so a
/// finished call cannot hide the marker of a call that is still in flight.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Message>,
    outstanding: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.entries.push(message);
    }

    pub fn extend<I: IntoIterator<Item = Message>>(&mut self, messages: I) {
        self.entries.extend(messages);
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    /// Entries appended at or after `cursor`
    pub fn entries_since(&self, cursor: usize) -> &[Message] {
        self.entries.get(cursor..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn show_pending(&mut self) {
        self.outstanding += 1;
    }

    /// Safe to call with nothing pending
    pub fn clear_pending(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    pub fn is_pending(&self) -> bool {
        self.outstanding > 0
    }
}

/// Transcript shared between concurrent submissions
#[derive(Debug, Clone, Default)]
pub struct SharedTranscript(Arc<Mutex<Transcript>>);

impl SharedTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock is never held across an await point, so a poisoned lock still
    /// holds a consistent transcript.
    pub fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().entries().to_vec()
    }
}
