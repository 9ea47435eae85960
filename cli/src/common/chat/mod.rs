//! # SoftSell Chat Widget Logic (`common::chat`)
//!
//! File: cli/src/common/chat/mod.rs
//!
//! ## Overview
//!
//! Everything the support chat widget needs apart from rendering:
//!
//! - **`responder`**: `Responder` and `KeywordRule`, the canned-reply lookup.
//! - **`transcript`**: `ChatMessage`, `Sender` and the append-only `Transcript`.
//! - **`session`**: `ChatSession`, one widget instance with its typing delay.
//!
//! The responder is pure and can be shared (`Arc<Responder>`); transcripts and
//! sessions are owned by a single conversation.
//!

/// Canned-reply lookup over an ordered keyword knowledge base.
pub mod responder;
/// Per-widget session state.
pub mod session;
/// Append-only message log.
pub mod transcript;

pub use responder::Responder;
pub use session::{ChatSession, SUGGESTED_PROMPTS};
pub use transcript::{ChatMessage, Sender};
