//! Routing against real HTTP clients talking to wiremock servers.

use brick::agent::OpenAIAgent;
use brick::cache::CacheConfig;
use brick::config::{BrickConfig, FallbackConfig};
use brick::fallback::{FallbackRequest, GenerativeFallback, CONNECTION_APOLOGY, RATE_LIMIT_APOLOGY};
use brick::menu::MenuCatalog;
use brick::nlp::{EmotionAnalysis, Extractor};
use brick::routing::{FallbackReason, Orchestrator, ReplySource, Turn};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(text: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    })
}

fn fallback_against(server: &MockServer) -> GenerativeFallback {
    let catalog = Arc::new(MenuCatalog::builtin());
    let extractor = Arc::new(Extractor::new(&catalog));
    let agent = OpenAIAgent::new(
        server.uri(),
        Some("sk-test".to_string()),
        Arc::new(reqwest::Client::new()),
    );
    let cache = CacheConfig {
        enabled: false,
        ..CacheConfig::default()
    };
    GenerativeFallback::new(
        Arc::new(agent),
        catalog,
        extractor,
        FallbackConfig::default(),
        &cache,
    )
}

async fn ask(fallback: &GenerativeFallback, message: &str) -> String {
    let emotion = EmotionAnalysis::neutral();
    fallback
        .send(&FallbackRequest {
            message,
            context: "",
            emotion: &emotion,
            locale: "en",
            session_id: "s1",
            restaurant: None,
            business_testing: None,
        })
        .await
        .content
}

#[tokio::test]
async fn test_rate_limit_after_quota_gets_rate_limit_apology() {
    const QUOTA: u64 = 45;
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Enjoy!")))
        .up_to_n_times(QUOTA)
        .expect(QUOTA)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "Rate limit reached for requests",
                "type": "requests",
                "code": "rate_limit_exceeded"
            }
        })))
        .mount(&server)
        .await;

    let fallback = fallback_against(&server);
    let mut answers = Vec::new();
    for i in 0..60 {
        answers.push(ask(&fallback, &format!("question number {}", i)).await);
    }

    assert!(answers[..QUOTA as usize].iter().all(|a| a == "Enjoy!"));
    assert!(answers[QUOTA as usize..]
        .iter()
        .all(|a| a == RATE_LIMIT_APOLOGY));
}

#[tokio::test]
async fn test_server_error_gets_connection_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let answer = ask(&fallback_against(&server), "anything spicy?").await;

    assert_eq!(answer, CONNECTION_APOLOGY);
    assert_ne!(answer, RATE_LIMIT_APOLOGY);
}

#[tokio::test]
async fn test_malformed_completion_gets_popular_dishes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let answer = ask(&fallback_against(&server), "what do you recommend?").await;

    assert!(answer.contains("most popular dishes"));
}

fn config_for(primary: &MockServer, model: &MockServer, key_env: &str) -> BrickConfig {
    let mut config = BrickConfig::default();
    config.primary.url = Some(primary.uri());
    config.primary.token = Some("primary-token".to_string());
    config.primary.retry_delay_ms = 0;
    config.fallback.base_url = model.uri();
    config.fallback.api_key_env = key_env.to_string();
    config
}

#[tokio::test]
async fn test_primary_over_http_tags_replies() {
    let primary = MockServer::start().await;
    let model = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&primary)
        .await;
    Mock::given(method("POST"))
        .and(path("/webhooks/rest/webhook"))
        .and(header("authorization", "Bearer primary-token"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"recipient_id": "s1", "text": "One butter chicken coming up."},
            {"recipient_id": "s1", "text": "Anything to drink?", "buttons": [
                {"title": "Mango Lassi", "payload": "/order{\"dish\":\"mango lassi\"}"}
            ]}
        ])))
        .mount(&primary)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&model)
        .await;

    let config = config_for(&primary, &model, "BRICK_TEST_KEY_PRIMARY_OK");
    let orchestrator = Orchestrator::from_config(&config, Arc::new(reqwest::Client::new()));

    let replies = orchestrator
        .respond(Turn::new("one butter chicken", "s1"))
        .await;
    let second = orchestrator.respond(Turn::new("thanks", "s1")).await;

    assert_eq!(replies.len(), 2);
    assert!(replies.iter().all(|r| r.source() == ReplySource::Primary));
    assert_eq!(replies[1].buttons[0].title, "Mango Lassi");
    assert_eq!(second[0].source(), ReplySource::Primary);
}

#[tokio::test]
async fn test_empty_webhook_answer_goes_to_model() {
    let primary = MockServer::start().await;
    let model = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&primary)
        .await;
    Mock::given(method("POST"))
        .and(path("/webhooks/rest/webhook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&primary)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Happy to help.")))
        .expect(1)
        .mount(&model)
        .await;

    let key_env = "BRICK_TEST_KEY_EMPTY_WEBHOOK";
    std::env::set_var(key_env, "sk-test");
    let config = config_for(&primary, &model, key_env);
    let orchestrator = Orchestrator::from_config(&config, Arc::new(reqwest::Client::new()));

    let replies = orchestrator.respond(Turn::new("what's good", "s1")).await;

    assert_eq!(replies[0].text, "Happy to help.");
    assert_eq!(
        replies[0].custom.fallback_reason,
        Some(FallbackReason::EmptyResponse)
    );
}

#[tokio::test]
async fn test_failing_health_probe_skips_webhook() {
    let primary = MockServer::start().await;
    let model = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&primary)
        .await;
    Mock::given(method("POST"))
        .and(path("/webhooks/rest/webhook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"text": "unused"}])))
        .expect(0)
        .mount(&primary)
        .await;

    // No key in the environment: the model is never reached either
    let config = config_for(&primary, &model, "BRICK_TEST_KEY_UNSET");
    let orchestrator = Orchestrator::from_config(&config, Arc::new(reqwest::Client::new()));

    let replies = orchestrator.respond(Turn::new("hi", "s1")).await;

    assert_eq!(replies[0].custom.fallback_reason, Some(FallbackReason::Unhealthy));
    assert!(replies[0].text.contains("most popular dishes"));
    assert_eq!(replies[0].custom.menu_items.len(), 3);
}
