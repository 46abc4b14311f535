//! Chat command implementation

use crate::cli::output::{format_replies, format_replies_json};
use crate::cli::{load_config, ChatArgs};
use crate::routing::{Orchestrator, Turn};
use reqwest::Client;
use std::sync::Arc;
use uuid::Uuid;

/// Handle `brick chat`: run one turn through the full orchestrator and
/// return the rendered replies.
pub async fn handle_chat(args: &ChatArgs) -> anyhow::Result<String> {
    let config = load_config(&args.config)?;
    config.validate()?;

    let orchestrator = Orchestrator::from_config(&config, Arc::new(Client::new()));
    let session_id = args
        .session
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let turn = Turn::new(&args.message, &session_id).with_locale(&args.locale);
    let replies = orchestrator.respond(turn).await;

    Ok(if args.json {
        format_replies_json(&session_id, &replies)
    } else {
        format_replies(&session_id, &replies)
    })
}
