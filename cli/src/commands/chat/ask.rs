//! # Chat Ask Command
//!
//! File: cli/src/commands/chat/ask.rs
//!
//! `softsell chat ask <QUESTION...>` prints the canned reply for one question.
//! There is no typing delay here; the answer is printed as soon as it is known.
//!
use crate::common::chat::Responder;
use crate::core::config::Config;
use crate::core::error::{Result, SoftsellError};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question. Multiple words are joined with single spaces.
    #[arg(value_name = "QUESTION")]
    words: Vec<String>,

    /// Print `{"question": ..., "reply": ...}` instead of plain text.
    #[arg(long)]
    json: bool,
}

impl AskArgs {
    pub fn query(&self) -> String {
        self.words.join(" ")
    }
}

pub fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    let responder = Responder::from_config(&config.chat);
    let query = args.query();
    if query.trim().is_empty() {
        return Err(SoftsellError::ArgumentParsing(
            "`chat ask` needs a question, e.g. softsell chat ask \"How do I get paid?\"".to_string(),
        )
        .into());
    }
    let reply = responder.respond(&query);
    debug!(query = %query, "Answered chat question");

    if args.json {
        let body = serde_json::json!({ "question": query, "reply": reply });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", reply);
    }
    Ok(())
}
