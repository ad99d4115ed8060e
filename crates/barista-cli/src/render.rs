//! Terminal rendering of the conversation.
//!
//! Rendering is purely a function of the message data; all formatting
//! lives here, scoped to this module.

use colored::Colorize;

use barista_core::insights::{CartSummary, InsightsReport};
use barista_core::message::{Author, ContentBlock, Message};
use barista_core::session::AgentMode;

/// Prints one transcript turn.
pub fn message(msg: &Message, agent_mode: AgentMode) {
    match msg.author {
        Author::User => {
            println!("{} {}", "you>".bold().yellow(), msg.text);
        }
        Author::Agent => {
            println!("{}", "barista>".bold().green());
            if msg.content_blocks.is_empty() {
                println!("{}", msg.text);
            } else {
                for block in &msg.content_blocks {
                    content_block(block);
                }
            }
            // The workflow agent classifies the request; show it.
            if agent_mode == AgentMode::Workflow {
                if let Some(intent) = &msg.intent {
                    let pct = (msg.confidence.unwrap_or(0.0) * 100.0).round() as u32;
                    println!(
                        "{}",
                        format!("  intent: {intent} ({pct}%)").dimmed()
                    );
                }
            }
        }
    }
    println!();
}

fn content_block(block: &ContentBlock) {
    match block {
        ContentBlock::Reasoning { explanation } => {
            println!("{}", "  [reasoning]".blue().bold());
            for line in explanation.lines() {
                println!("{}", format!("  {line}").blue());
            }
        }
        ContentBlock::ToolCall { payload } => {
            println!("{}", "  [tool]".cyan().bold());
            println!("{}", format!("  {payload}").cyan());
        }
        ContentBlock::Text { text } => {
            println!("{text}");
        }
    }
}

/// Prints the insights panel, or its explicit empty state.
pub fn insights(report: Option<&InsightsReport>) {
    println!("{}", "── insights ──".magenta().bold());

    let Some(report) = report else {
        println!("{}", "No structured output available".dimmed());
        return;
    };

    println!("agent type: {}", report.agent_type.magenta());
    if let Some(pct) = report.confidence_pct {
        println!("confidence: {}%", pct.to_string().green());
    }
    if !report.features.is_empty() {
        println!("active features: {}", report.features.join(", "));
    }
    match &report.cart {
        CartSummary::Empty => println!("cart: {}", "empty".dimmed()),
        CartSummary::Items { count, total } => {
            println!("cart: {count} item(s), total ${total}");
        }
    }
}

/// Prints a user-facing notice (voice errors and the like).
pub fn notice(text: &str) {
    println!("{}", text.red());
}
