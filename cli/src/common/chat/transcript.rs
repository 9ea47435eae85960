//! # Chat Transcript
//!
//! File: cli/src/common/chat/transcript.rs
//!
//! Session-scoped, append-only record of chat messages. Order is insertion
//! order; timestamps are kept for display only.
//!
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Who authored a message. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "You"),
            Sender::Bot => write!(f, "SoftSell"),
        }
    }
}

/// One entry in a transcript.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    id: String,
    content: String,
    sender: Sender,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new(content: &str, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            sender,
            timestamp: Local::now(),
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Hour and minute, as shown under each bubble.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Ordered message log. Messages can be appended but never edited or removed.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns it. Returns `None` for blank content,
    /// which never becomes a message.
    pub fn push(&mut self, content: &str, sender: Sender) -> Option<&ChatMessage> {
        if content.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(content, sender));
        self.messages.last()
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)] // Pairs with `len`; only tests ask for it today.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.push("first", Sender::User);
        transcript.push("second", Sender::Bot);
        transcript.push("third", Sender::User);

        let contents: Vec<&str> = transcript.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(transcript.messages()[1].sender(), Sender::Bot);
    }

    #[test]
    fn test_blank_content_is_rejected() {
        let mut transcript = Transcript::new();
        assert!(transcript.push("", Sender::User).is_none());
        assert!(transcript.push("  \t", Sender::User).is_none());
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_content_is_stored_as_typed() {
        let mut transcript = Transcript::new();
        let message = transcript.push("  Hello there ", Sender::User).unwrap();
        assert_eq!(message.content(), "  Hello there ");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut transcript = Transcript::new();
        for i in 0..50 {
            transcript.push(&format!("message {}", i), Sender::User);
        }
        let ids: HashSet<&str> = transcript.messages().iter().map(|m| m.id()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_display_time_format() {
        let mut transcript = Transcript::new();
        let message = transcript.push("hi", Sender::Bot).unwrap();
        let shown = message.display_time();
        assert_eq!(shown.len(), 5);
        assert_eq!(&shown[2..3], ":");
    }
}
