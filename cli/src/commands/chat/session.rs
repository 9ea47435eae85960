//! # Chat Session Command
//!
//! File: cli/src/commands/chat/session.rs
//!
//! `softsell chat session` runs the chat widget in the terminal. Each line read
//! from stdin is one message; blank lines are ignored, and `exit`, `quit` or
//! end of input closes the session.
//!
use crate::common::chat::{ChatMessage, ChatSession, Sender, SUGGESTED_PROMPTS};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Show replies immediately instead of simulating the agent typing.
    #[arg(long)]
    pub no_delay: bool,
}

pub async fn handle_session(args: SessionArgs, config: &Config) -> Result<()> {
    let mut chat_config = config.chat.clone();
    if args.no_delay {
        chat_config.typing_delay_ms = 0;
    }
    let mut session = ChatSession::from_config(&chat_config);

    println!("SoftSell Support - ask us anything about selling your licenses");
    println!(
        "Try asking: \"{}\" or \"{}\" (type 'exit' to leave)\n",
        SUGGESTED_PROMPTS[0], SUGGESTED_PROMPTS[1]
    );
    if let Some(welcome) = session.transcript().last() {
        print_message(welcome);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read from stdin")? else {
            break;
        };
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        if !session.typing_delay().is_zero() {
            println!("SoftSell is typing...");
        }
        if let Some(reply) = session.send(&line).await {
            print_message(reply);
        }
    }

    info!(
        messages = session.transcript().len(),
        "Chat session closed"
    );
    println!("\nGoodbye!");
    Ok(())
}

// User lines are already on screen as typed; only bot messages are echoed.
fn print_message(message: &ChatMessage) {
    if message.sender() == Sender::Bot {
        println!(
            "{} [{}]: {}",
            message.sender(),
            message.display_time(),
            message.content()
        );
    }
}
