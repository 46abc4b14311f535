//! Output formatting helpers for CLI commands

use crate::routing::{NormalizedReply, ReplySource};
use colored::Colorize;
use serde_json::json;

fn source_tag(source: ReplySource) -> String {
    let tag = format!("[{}]", source);
    match source {
        ReplySource::Primary => tag.green().to_string(),
        ReplySource::Fallback => tag.yellow().to_string(),
        ReplySource::Error => tag.red().to_string(),
    }
}

/// Human-readable rendering of one turn's replies.
pub fn format_replies(session_id: &str, replies: &[NormalizedReply]) -> String {
    let mut out = format!("{} {}\n", "session".dimmed(), session_id);

    for reply in replies {
        out.push_str(&format!("{} {}\n", source_tag(reply.source()), reply.text));

        if let Some(reason) = reply.custom.fallback_reason {
            out.push_str(&format!("  {} {}\n", "reason:".dimmed(), reason.as_str()));
        }
        for item in &reply.custom.menu_items {
            out.push_str(&format!(
                "  {} {} {}\n",
                "•".cyan(),
                item.name.bold(),
                format!("${:.2}", item.price).dimmed()
            ));
        }
        for button in &reply.buttons {
            out.push_str(&format!("  {} {}\n", "▸".cyan(), button.title));
        }
        if let Some(image) = &reply.image {
            out.push_str(&format!("  {} {}\n", "image:".dimmed(), image));
        }
    }

    out.trim_end().to_string()
}

/// JSON rendering of one turn's replies.
pub fn format_replies_json(session_id: &str, replies: &[NormalizedReply]) -> String {
    let output = json!({
        "session_id": session_id,
        "replies": replies,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
