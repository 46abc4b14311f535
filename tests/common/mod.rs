//! Shared test utilities: scripted backends and an orchestrator builder.

#![allow(dead_code)]

use async_trait::async_trait;
use brick::agent::types::Choice;
use brick::agent::{
    AgentError, ChatCompletionRequest, ChatCompletionResponse, CompletionBackend,
    CompletionMessage, DialogueBackend, DialogueRequest, HealthStatus, PrimaryReply,
};
use brick::cache::CacheConfig;
use brick::config::FallbackConfig;
use brick::conversation::{ConversationTracker, MemoryStore, SessionHistory};
use brick::fallback::GenerativeFallback;
use brick::health::HealthCheckConfig;
use brick::menu::MenuCatalog;
use brick::nlp::Extractor;
use brick::routing::Orchestrator;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// What the scripted dialogue service answers to `send`.
#[derive(Clone)]
pub enum PrimaryScript {
    Reply(Vec<PrimaryReply>),
    Fail(AgentError),
    Panic,
    /// Never answers
    Stall,
}

/// Dialogue service fake that counts probes and sends.
pub struct ScriptedPrimary {
    healthy: AtomicBool,
    script: Mutex<PrimaryScript>,
    pub health_calls: AtomicU32,
    pub send_calls: AtomicU32,
    pub last_request: Mutex<Option<DialogueRequest>>,
}

impl ScriptedPrimary {
    pub fn new(healthy: bool, script: PrimaryScript) -> Arc<Self> {
        Arc::new(Self {
            healthy: AtomicBool::new(healthy),
            script: Mutex::new(script),
            health_calls: AtomicU32::new(0),
            send_calls: AtomicU32::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(true, PrimaryScript::Reply(vec![primary_reply(text)]))
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn health_calls(&self) -> u32 {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn send_calls(&self) -> u32 {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DialogueBackend for ScriptedPrimary {
    fn name(&self) -> &str {
        "scripted-primary"
    }

    async fn health_check(&self) -> Result<HealthStatus, AgentError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        Ok(if self.healthy.load(Ordering::SeqCst) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        })
    }

    async fn send(&self, request: &DialogueRequest) -> Result<Vec<PrimaryReply>, AgentError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        let script = self.script.lock().unwrap().clone();
        match script {
            PrimaryScript::Reply(replies) => Ok(replies),
            PrimaryScript::Fail(e) => Err(e),
            PrimaryScript::Panic => panic!("scripted primary panicked"),
            PrimaryScript::Stall => std::future::pending().await,
        }
    }
}

/// Completion model fake that always answers `text` and counts calls.
pub struct CountingCompletion {
    text: String,
    pub calls: AtomicU32,
    pub last_request: Mutex<Option<ChatCompletionRequest>>,
}

impl CountingCompletion {
    pub fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            calls: AtomicU32::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for CountingCompletion {
    fn name(&self) -> &str {
        "counting-completion"
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        Ok(ChatCompletionResponse {
            choices: vec![Choice {
                message: CompletionMessage {
                    role: "assistant".to_string(),
                    content: self.text.clone(),
                },
                finish_reason: Some("stop".to_string()),
            }],
        })
    }
}

pub fn primary_reply(text: &str) -> PrimaryReply {
    PrimaryReply {
        recipient_id: Some("session".to_string()),
        text: Some(text.to_string()),
        image: None,
        buttons: Vec::new(),
        custom: None,
    }
}

/// Orchestrator over in-memory collaborators, with completion caching off so
/// every fallback turn reaches `completion`.
pub fn fallback_only(completion: Arc<dyn CompletionBackend>) -> Orchestrator {
    let catalog = Arc::new(MenuCatalog::builtin());
    let extractor = Arc::new(Extractor::new(&catalog));
    let cache = CacheConfig {
        enabled: false,
        ..CacheConfig::default()
    };
    let fallback = GenerativeFallback::new(
        completion,
        catalog,
        extractor.clone(),
        FallbackConfig::default(),
        &cache,
    );

    Orchestrator::new(
        fallback,
        extractor,
        ConversationTracker::new(Arc::new(MemoryStore::new())),
        SessionHistory::new(100),
    )
}

/// Orchestrator with `primary` behind a health monitor using the default
/// 30s probe interval.
pub fn with_primary(
    primary: Arc<ScriptedPrimary>,
    completion: Arc<dyn CompletionBackend>,
) -> Orchestrator {
    fallback_only(completion).with_primary(primary, HealthCheckConfig::default())
}
