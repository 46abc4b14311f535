//! End-to-end routing tests against scripted backends.

mod common;

use brick::agent::{AgentError, EntityValue, IntentRanking, PrimaryCustom};
use brick::conversation::{EventKind, Sender};
use brick::health::HealthCheckConfig;
use brick::routing::{FallbackReason, ReplySource, Turn, TROUBLE_CONNECTING};
use common::{
    fallback_only, primary_reply, with_primary, CountingCompletion, PrimaryScript,
    ScriptedPrimary,
};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_primary_success_never_calls_fallback() {
    let primary = ScriptedPrimary::replying("What can I get you?");
    let completion = CountingCompletion::new("unused");
    let orchestrator = with_primary(primary.clone(), completion.clone());

    let replies = orchestrator.respond(Turn::new("hello", "s1")).await;

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "What can I get you?");
    assert_eq!(replies[0].source(), ReplySource::Primary);
    assert!(!replies[0].custom.fallback);
    assert_eq!(primary.send_calls(), 1);
    assert_eq!(completion.calls(), 0);
}

#[tokio::test]
async fn test_unhealthy_primary_uses_fallback_once() {
    let primary = ScriptedPrimary::new(false, PrimaryScript::Reply(vec![primary_reply("x")]));
    let completion = CountingCompletion::new("Here is what we have.");
    let orchestrator = with_primary(primary.clone(), completion.clone());

    let replies = orchestrator.respond(Turn::new("what's good?", "s1")).await;

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].source(), ReplySource::Fallback);
    assert_eq!(replies[0].custom.fallback_reason, Some(FallbackReason::Unhealthy));
    assert_eq!(primary.send_calls(), 0);
    assert_eq!(completion.calls(), 1);
}

#[tokio::test]
async fn test_empty_primary_reply_falls_back() {
    let primary = ScriptedPrimary::new(true, PrimaryScript::Reply(vec![]));
    let completion = CountingCompletion::new("Let me help with that.");
    let orchestrator = with_primary(primary.clone(), completion.clone());

    let replies = orchestrator.respond(Turn::new("hmm", "s1")).await;

    assert_eq!(replies[0].source(), ReplySource::Fallback);
    assert_eq!(
        replies[0].custom.fallback_reason,
        Some(FallbackReason::EmptyResponse)
    );
    assert_eq!(primary.send_calls(), 1);
    assert_eq!(completion.calls(), 1);
}

#[tokio::test]
async fn test_primary_errors_map_to_fallback_reasons() {
    let cases = [
        (
            AgentError::InvalidResponse("not json".into()),
            FallbackReason::MalformedResponse,
        ),
        (
            AgentError::Upstream {
                status: 500,
                message: "boom".into(),
            },
            FallbackReason::PrimaryError,
        ),
        (AgentError::Timeout(10_000), FallbackReason::PrimaryError),
    ];

    for (error, reason) in cases {
        let primary = ScriptedPrimary::new(true, PrimaryScript::Fail(error));
        let orchestrator = with_primary(primary, CountingCompletion::new("ok"));
        let replies = orchestrator.respond(Turn::new("hi", "s1")).await;
        assert_eq!(replies[0].custom.fallback_reason, Some(reason));
        assert_eq!(replies[0].source(), ReplySource::Fallback);
    }
}

#[tokio::test]
async fn test_dosa_fallback_names_dish_and_attaches_item() {
    let completion = CountingCompletion::new("Coming right up.");
    let orchestrator = fallback_only(completion.clone());

    let replies = orchestrator.respond(Turn::new("I want a dosa", "s1")).await;

    let reply = &replies[0];
    assert_eq!(reply.source(), ReplySource::Fallback);
    assert!(reply.custom.fallback);
    assert_eq!(
        reply.custom.fallback_reason,
        Some(FallbackReason::MissingConfiguration)
    );
    assert!(reply.text.contains("Masala Dosa"));
    assert!(reply.text.ends_with("Coming right up."));
    assert!(reply
        .custom
        .menu_items
        .iter()
        .any(|item| item.name == "Masala Dosa"));
}

#[tokio::test]
async fn test_disabled_health_check_never_probes() {
    let primary = ScriptedPrimary::replying("Sure.");
    let orchestrator = common::fallback_only(CountingCompletion::new("unused")).with_primary(
        primary.clone(),
        HealthCheckConfig {
            enabled: false,
            ..HealthCheckConfig::default()
        },
    );

    orchestrator.respond(Turn::new("one", "s1")).await;
    orchestrator.respond(Turn::new("two", "s1")).await;

    assert_eq!(primary.health_calls(), 0);
    assert_eq!(primary.send_calls(), 2);
}

#[tokio::test]
async fn test_health_verdict_reused_within_interval() {
    let primary = ScriptedPrimary::replying("Sure.");
    let orchestrator = with_primary(primary.clone(), CountingCompletion::new("unused"));

    for i in 0..5 {
        orchestrator.respond(Turn::new(format!("message {}", i), "s1")).await;
    }

    assert_eq!(primary.health_calls(), 1);
    assert_eq!(primary.send_calls(), 5);
    assert_eq!(orchestrator.primary_status().healthy, Some(true));
}

#[tokio::test]
async fn test_primary_receives_context_and_request_id() {
    let primary = ScriptedPrimary::replying("Noted.");
    let orchestrator = with_primary(primary.clone(), CountingCompletion::new("unused"));

    orchestrator.respond(Turn::new("first", "s1")).await;
    let mut turn = Turn::new("second", "s1").with_locale("es");
    turn.request_id = Some("req-7".to_string());
    let replies = orchestrator.respond(turn).await;

    let request = primary.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.sender, "s1");
    assert_eq!(request.metadata.language, "es");
    assert_eq!(request.metadata.request_id, "req-7");
    let context: Vec<_> = request
        .metadata
        .context
        .iter()
        .map(|m| (m.role.as_str(), m.content.as_str()))
        .collect();
    assert_eq!(context, vec![("user", "first"), ("assistant", "Noted.")]);
    assert_eq!(replies[0].custom.request_id, "req-7");
}

#[tokio::test]
async fn test_history_and_state_recorded() {
    let mut reply = primary_reply("Two masala dosas, that'll be 25.98.");
    reply.custom = Some(PrimaryCustom {
        intent: Some(IntentRanking {
            name: "order_food".to_string(),
            confidence: 0.92,
        }),
        entities: vec![EntityValue {
            entity: "size".to_string(),
            value: json!("large"),
            confidence: None,
        }],
        action: Some("request_payment".to_string()),
        amount: Some(25.98),
        context: None,
    });
    let primary = ScriptedPrimary::new(true, PrimaryScript::Reply(vec![reply]));
    let orchestrator = with_primary(primary, CountingCompletion::new("unused"));

    orchestrator
        .respond(Turn::new("2 dosas please", "s1").with_user("u1"))
        .await;

    assert_eq!(orchestrator.history().len("s1"), 2);

    let state = orchestrator.tracker().load("s1").await.unwrap();
    assert_eq!(state.user_id, "u1");
    assert_eq!(state.slot("dish"), Some(&json!("Masala Dosa")));
    assert_eq!(state.slot("quantity"), Some(&json!(2)));
    assert_eq!(state.slot("size"), Some(&json!("large")));
    assert_eq!(state.last_action.as_deref(), Some("request_payment"));
    let kinds: Vec<_> = state.events.iter().map(|e| e.event).collect();
    assert_eq!(kinds, vec![EventKind::User, EventKind::Bot, EventKind::Action]);
}

#[tokio::test]
async fn test_panicking_backend_yields_trouble_connecting() {
    let primary = ScriptedPrimary::new(true, PrimaryScript::Panic);
    let orchestrator = with_primary(primary, CountingCompletion::new("unused"));

    let replies = orchestrator.respond(Turn::new("hello", "s1")).await;

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, TROUBLE_CONNECTING);
    assert_eq!(replies[0].source(), ReplySource::Error);

    let history = orchestrator.history().messages("s1");
    assert_eq!(orchestrator.history().len("s1"), 2);
    assert_eq!(history[0].content, "hello");
    assert_eq!(history[1].sender, Sender::Assistant);
    assert_eq!(history[1].content, TROUBLE_CONNECTING);
}

#[tokio::test]
async fn test_turn_past_deadline_is_answered_and_recorded() {
    let primary = ScriptedPrimary::new(true, PrimaryScript::Stall);
    let completion = CountingCompletion::new("unused");
    let orchestrator = with_primary(primary.clone(), completion.clone());

    let replies = orchestrator
        .respond_within(Turn::new("hello", "s1"), Some(Duration::from_millis(50)))
        .await;

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, TROUBLE_CONNECTING);
    assert_eq!(replies[0].custom.error.as_deref(), Some("request timed out"));
    assert_eq!(primary.send_calls(), 1);
    assert_eq!(completion.calls(), 0);

    let history = orchestrator.history().messages("s1");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].content, TROUBLE_CONNECTING);
}

#[tokio::test]
async fn test_dosa_with_unhealthy_primary_falls_back_with_item() {
    let primary = ScriptedPrimary::new(false, PrimaryScript::Reply(vec![primary_reply("unused")]));
    let completion = CountingCompletion::new("Coming right up.");
    let orchestrator = with_primary(primary.clone(), completion.clone());

    let replies = orchestrator.respond(Turn::new("I want a dosa", "s1")).await;

    let reply = &replies[0];
    assert_eq!(reply.source(), ReplySource::Fallback);
    assert_eq!(reply.custom.fallback_reason, Some(FallbackReason::Unhealthy));
    assert!(reply.text.contains("Masala Dosa"));
    assert!(!reply.custom.menu_items.is_empty());
    assert!(reply
        .custom
        .menu_items
        .iter()
        .any(|item| item.name == "Masala Dosa"));
    assert_eq!(primary.health_calls(), 1);
    assert_eq!(primary.send_calls(), 0);
    assert_eq!(completion.calls(), 1);
}
