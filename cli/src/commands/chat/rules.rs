//! # Chat Rules Command
//!
//! File: cli/src/commands/chat/rules.rs
//!
//! `softsell chat rules` lists the knowledge base in precedence order, followed
//! by the reply used when nothing matches.
//!
use crate::common::chat::Responder;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Also print each rule's full response text.
    #[arg(long, short)]
    long: bool,
}

pub fn handle_rules(args: RulesArgs, config: &Config) -> Result<()> {
    let responder = Responder::from_config(&config.chat);

    println!("Keyword rules (first match wins):");
    for (index, rule) in responder.rules().iter().enumerate() {
        println!("{:>3}. \"{}\"", index + 1, rule.pattern());
        if args.long {
            println!("     -> {}", rule.response());
        }
    }
    println!("\nFallbacks: price/cost/value -> pricing factors; thank -> acknowledgment");
    println!("Default: {}", responder.default_reply());
    Ok(())
}
