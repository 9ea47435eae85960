//! # Chat Session
//!
//! File: cli/src/common/chat/session.rs
//!
//! Per-widget state: the transcript plus the simulated typing delay. The reply
//! is computed as soon as the user message is accepted; the delay only holds
//! back when it is appended, so a given input always yields the same reply no
//! matter how long the timer runs.
//!
use super::responder::Responder;
use super::transcript::{ChatMessage, Sender, Transcript};
use crate::core::config::ChatConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Example questions shown under the input box.
pub const SUGGESTED_PROMPTS: [&str; 2] = [
    "How do I sell my license?",
    "What types of licenses do you buy?",
];

/// One chat widget instance. Not shared between sessions.
#[derive(Debug)]
pub struct ChatSession {
    responder: Arc<Responder>,
    transcript: Transcript,
    typing_delay: Duration,
}

impl ChatSession {
    /// Starts a session whose transcript opens with `welcome` from the bot.
    pub fn new(responder: Arc<Responder>, welcome: &str, typing_delay: Duration) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(welcome, Sender::Bot);
        Self {
            responder,
            transcript,
            typing_delay,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(
            Arc::new(Responder::from_config(config)),
            &config.welcome_message,
            Duration::from_millis(config.typing_delay_ms),
        )
    }

    /// Sends `input` as the user and returns the bot's reply message.
    ///
    /// Blank input is ignored and yields `None`; nothing is appended.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        if self.transcript.push(input, Sender::User).is_none() {
            debug!("Ignoring blank chat input");
            return None;
        }

        let reply = self.responder.respond(input).to_owned();

        if !self.typing_delay.is_zero() {
            debug!(delay_ms = self.typing_delay.as_millis() as u64, "Bot is typing");
            tokio::time::sleep(self.typing_delay).await;
        }

        self.transcript.push(&reply, Sender::Bot)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn session(delay: Duration) -> ChatSession {
        ChatSession::new(Arc::new(Responder::default()), "Welcome!", delay)
    }

    #[test]
    fn test_new_session_starts_with_welcome() {
        let session = session(Duration::ZERO);
        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender(), Sender::Bot);
        assert_eq!(messages[0].content(), "Welcome!");
    }

    #[tokio::test]
    async fn test_send_appends_user_then_bot() {
        let mut session = session(Duration::ZERO);
        let reply = session
            .send("How long does the process take?")
            .await
            .expect("reply expected")
            .content()
            .to_string();

        assert!(reply.starts_with("Our process typically takes 3-5 business days"));
        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender(), Sender::User);
        assert_eq!(messages[1].content(), "How long does the process take?");
        assert_eq!(messages[2].sender(), Sender::Bot);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut session = session(Duration::ZERO);
        assert!(session.send("   ").await.is_none());
        assert!(session.send("").await.is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_typing_delay_does_not_change_reply() {
        let mut instant = session(Duration::ZERO);
        let mut delayed = session(Duration::from_millis(30));

        let start = Instant::now();
        let slow = delayed.send("thanks").await.unwrap().content().to_string();
        assert!(start.elapsed() >= Duration::from_millis(30));

        let fast = instant.send("thanks").await.unwrap().content().to_string();
        assert_eq!(slow, fast);
    }

    #[test]
    fn test_from_config_uses_settings() {
        let config = ChatConfig {
            typing_delay_ms: 5,
            welcome_message: "Hello from config".into(),
            ..ChatConfig::default()
        };
        let session = ChatSession::from_config(&config);
        assert_eq!(session.typing_delay(), Duration::from_millis(5));
        assert_eq!(session.transcript().messages()[0].content(), "Hello from config");
    }
}
