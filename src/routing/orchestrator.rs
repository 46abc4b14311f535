//! Per-turn decision between the dialogue service and the fallback.

use super::reply::{FallbackReason, NormalizedReply, ReplyCustom, ReplySource};
use crate::agent::{
    AgentError, ContextMessage, DialogueBackend, DialogueMetadata, DialogueRequest, OpenAIAgent,
    PrimaryClient,
};
use crate::config::{BrickConfig, RestaurantProfile};
use crate::conversation::{
    store_from_config, ChatMessage, ConversationEvent, ConversationState, ConversationTracker,
    SessionHistory,
};
use crate::fallback::{FallbackRequest, GenerativeFallback};
use crate::health::{HealthCheckConfig, HealthMonitor, HealthVerdict};
use crate::logging::{generate_request_id, truncate_for_log};
use crate::menu::MenuCatalog;
use crate::nlp::{ExtractedEntities, Extractor};
use chrono::Utc;
use futures::FutureExt;
use reqwest::Client;
use serde_json::json;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Events kept in a session's stored event log.
pub const EVENT_LOG_LIMIT: usize = 200;

/// One incoming customer message.
#[derive(Debug, Clone)]
pub struct Turn {
    pub message: String,
    pub session_id: String,
    pub user_id: Option<String>,
    pub locale: String,
    /// Correlation id; generated when absent
    pub request_id: Option<String>,
}

impl Turn {
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
            user_id: None,
            locale: "en".to_string(),
            request_id: None,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

struct PrimaryRoute {
    backend: Arc<dyn DialogueBackend>,
    health: HealthMonitor,
}

/// Health of the dialogue service as last observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryStatus {
    pub configured: bool,
    pub healthy: Option<bool>,
    pub checked_ago: Option<Duration>,
}

/// Routes each turn to the dialogue service when it is configured and
/// healthy, and to the generative fallback otherwise or when the dialogue
/// service fails. Always produces at least one reply.
pub struct Orchestrator {
    primary: Option<PrimaryRoute>,
    fallback: GenerativeFallback,
    extractor: Arc<Extractor>,
    history: SessionHistory,
    tracker: ConversationTracker,
    restaurant: Option<RestaurantProfile>,
    context_window: usize,
    content_logging: bool,
}

impl Orchestrator {
    pub fn new(
        fallback: GenerativeFallback,
        extractor: Arc<Extractor>,
        tracker: ConversationTracker,
        history: SessionHistory,
    ) -> Self {
        Self {
            primary: None,
            fallback,
            extractor,
            history,
            tracker,
            restaurant: None,
            context_window: 5,
            content_logging: false,
        }
    }

    /// Wire every collaborator from configuration.
    pub fn from_config(config: &BrickConfig, client: Arc<Client>) -> Self {
        let catalog = Arc::new(MenuCatalog::builtin());
        let extractor = Arc::new(Extractor::new(&catalog));

        let completion = Arc::new(OpenAIAgent::new(
            config.fallback.base_url.clone(),
            config.fallback.api_key(),
            client.clone(),
        ));
        let fallback = GenerativeFallback::new(
            completion,
            catalog,
            extractor.clone(),
            config.fallback.clone(),
            &config.cache,
        );

        let tracker = ConversationTracker::new(store_from_config(&config.persistence, client.clone()));
        let history = SessionHistory::new(config.history.max_messages);

        let mut orchestrator = Self::new(fallback, extractor, tracker, history)
            .with_context_window(config.history.context_window)
            .with_content_logging(config.logging.enable_content_logging);

        if let Some((url, token)) = config.primary.endpoint() {
            let backend = PrimaryClient::new(url, token, client)
                .with_timeout(config.primary.timeout())
                .with_probe_timeout(config.health_check.timeout())
                .with_retry(config.primary.retry_policy());
            orchestrator = orchestrator.with_primary(Arc::new(backend), config.health_check.clone());
        }
        if let Some(restaurant) = &config.restaurant {
            orchestrator = orchestrator.with_restaurant(restaurant.clone());
        }
        orchestrator
    }

    pub fn with_primary(
        mut self,
        backend: Arc<dyn DialogueBackend>,
        health: HealthCheckConfig,
    ) -> Self {
        self.primary = Some(PrimaryRoute {
            health: HealthMonitor::new(backend.clone(), health),
            backend,
        });
        self
    }

    pub fn with_restaurant(mut self, restaurant: RestaurantProfile) -> Self {
        self.restaurant = Some(restaurant);
        self
    }

    pub fn with_context_window(mut self, messages: usize) -> Self {
        self.context_window = messages;
        self
    }

    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.content_logging = enabled;
        self
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn tracker(&self) -> &ConversationTracker {
        &self.tracker
    }

    pub fn fallback_backend(&self) -> &str {
        self.fallback.backend_name()
    }

    pub fn fallback_configured(&self) -> bool {
        self.fallback.is_configured()
    }

    pub fn primary_status(&self) -> PrimaryStatus {
        match &self.primary {
            None => PrimaryStatus {
                configured: false,
                healthy: None,
                checked_ago: None,
            },
            Some(route) => {
                let verdict: Option<HealthVerdict> = route.health.last_verdict();
                PrimaryStatus {
                    configured: true,
                    healthy: verdict.map(|v| v.healthy),
                    checked_ago: verdict.map(|v| v.checked_at.elapsed()),
                }
            }
        }
    }

    /// Answer one turn.
    ///
    /// A panic anywhere in the turn is caught and answered with a single
    /// "trouble connecting" reply, so callers always receive replies.
    pub async fn respond(&self, turn: Turn) -> Vec<NormalizedReply> {
        self.respond_within(turn, None).await
    }

    /// Like [`respond`](Self::respond), but a turn still running after
    /// `deadline` is dropped and answered with a "trouble connecting" reply.
    /// That reply is recorded in the session history like any other.
    pub async fn respond_within(
        &self,
        turn: Turn,
        deadline: Option<Duration>,
    ) -> Vec<NormalizedReply> {
        let request_id = turn.request_id.clone().unwrap_or_else(generate_request_id);
        let span = tracing::info_span!(
            "turn",
            session_id = %turn.session_id,
            request_id = %request_id,
        );

        let guarded = AssertUnwindSafe(self.handle_turn(&turn, &request_id))
            .catch_unwind()
            .instrument(span);

        let failure = match deadline {
            Some(limit) => match tokio::time::timeout(limit, guarded).await {
                Ok(Ok(replies)) => return replies,
                Ok(Err(_)) => "unexpected failure",
                Err(_) => "request timed out",
            },
            None => match guarded.await {
                Ok(replies) => return replies,
                Err(_) => "unexpected failure",
            },
        };
        self.record_failure(&turn, &request_id, failure)
    }

    fn record_failure(&self, turn: &Turn, request_id: &str, failure: &str) -> Vec<NormalizedReply> {
        tracing::error!(
            session_id = %turn.session_id,
            request_id = %request_id,
            failure,
            "Turn failed unexpectedly"
        );
        metrics::counter!("brick_replies_total", "source" => ReplySource::Error.as_str())
            .increment(1);

        let reply = NormalizedReply::trouble_connecting(request_id, failure);
        self.history
            .append(&turn.session_id, history_entry(&reply, &turn.locale));
        vec![reply]
    }

    async fn handle_turn(&self, turn: &Turn, request_id: &str) -> Vec<NormalizedReply> {
        let started = Instant::now();
        tracing::info!(
            locale = %turn.locale,
            preview = truncate_for_log(&turn.message, self.content_logging).as_deref(),
            "Turn received"
        );

        let entities = self.extractor.extract(&turn.message);
        let context = self.history.recent(&turn.session_id, self.context_window);
        self.history.append(
            &turn.session_id,
            ChatMessage::user(&turn.message, &turn.locale),
        );

        let replies = match self.try_primary(turn, &entities, &context, request_id).await {
            Ok(replies) => replies,
            Err(reason) => {
                self.answer_with_fallback(turn, &entities, &context, request_id, reason)
                    .await
            }
        };

        let source = replies
            .first()
            .map(NormalizedReply::source)
            .unwrap_or(ReplySource::Error);
        for reply in &replies {
            self.history.append(&turn.session_id, history_entry(reply, &turn.locale));
        }
        self.record_state(turn, &entities, &replies, request_id).await;

        metrics::counter!("brick_replies_total", "source" => source.as_str())
            .increment(replies.len() as u64);
        metrics::histogram!("brick_turn_duration_seconds", "source" => source.as_str())
            .record(started.elapsed().as_secs_f64());
        tracing::info!(
            source = %source,
            replies = replies.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Turn answered"
        );
        replies
    }

    async fn try_primary(
        &self,
        turn: &Turn,
        entities: &ExtractedEntities,
        context: &[ChatMessage],
        request_id: &str,
    ) -> Result<Vec<NormalizedReply>, FallbackReason> {
        let Some(route) = &self.primary else {
            tracing::debug!("Dialogue service not configured, using fallback");
            return Err(FallbackReason::MissingConfiguration);
        };

        if !route.health.is_healthy().await {
            tracing::info!("Dialogue service unhealthy, using fallback");
            return Err(FallbackReason::Unhealthy);
        }

        let request = DialogueRequest {
            sender: turn.session_id.clone(),
            message: turn.message.clone(),
            metadata: DialogueMetadata {
                context: context
                    .iter()
                    .map(|m| ContextMessage {
                        role: role_of(m).to_string(),
                        content: m.content.clone(),
                    })
                    .collect(),
                restaurant: self.restaurant.clone(),
                business_testing: entities.business_testing.clone(),
                language: turn.locale.clone(),
                timestamp: Utc::now(),
                request_id: request_id.to_string(),
            },
        };

        let outcome = route.backend.send(&request).await.and_then(|replies| {
            if replies.is_empty() {
                Err(AgentError::EmptyResponse)
            } else {
                Ok(replies)
            }
        });

        match outcome {
            Ok(replies) => Ok(replies
                .into_iter()
                .map(|reply| {
                    NormalizedReply::from_primary(
                        reply,
                        request_id,
                        self.restaurant.as_ref(),
                        entities.business_testing.as_ref(),
                    )
                })
                .collect()),
            Err(AgentError::EmptyResponse) => {
                tracing::warn!(backend = route.backend.name(), "Empty response from dialogue service");
                Err(FallbackReason::EmptyResponse)
            }
            Err(AgentError::InvalidResponse(detail)) => {
                tracing::warn!(
                    backend = route.backend.name(),
                    error = %detail,
                    "Malformed response from dialogue service"
                );
                Err(FallbackReason::MalformedResponse)
            }
            Err(e) => {
                tracing::warn!(
                    backend = route.backend.name(),
                    error = %e,
                    kind = e.kind(),
                    "Dialogue service error"
                );
                Err(FallbackReason::PrimaryError)
            }
        }
    }

    async fn answer_with_fallback(
        &self,
        turn: &Turn,
        entities: &ExtractedEntities,
        context: &[ChatMessage],
        request_id: &str,
        reason: FallbackReason,
    ) -> Vec<NormalizedReply> {
        metrics::counter!("brick_fallbacks_total", "reason" => reason.as_str()).increment(1);

        let context_text = context
            .iter()
            .map(ChatMessage::context_line)
            .collect::<Vec<_>>()
            .join("\n");

        let reply = self
            .fallback
            .send(&FallbackRequest {
                message: &turn.message,
                context: &context_text,
                emotion: &entities.emotion,
                locale: &turn.locale,
                session_id: &turn.session_id,
                restaurant: self.restaurant.as_ref(),
                business_testing: entities.business_testing.as_ref(),
            })
            .await;

        let mut custom = ReplyCustom::new(ReplySource::Fallback, request_id);
        custom.fallback_reason = Some(reason);
        custom.menu_items = reply.menu_items;
        custom.error = reply.failure.map(|f| f.as_str().to_string());
        custom.restaurant = self.restaurant.clone();
        custom.business_testing = entities.business_testing.clone();

        vec![NormalizedReply {
            text: reply.content,
            image: None,
            buttons: Vec::new(),
            custom,
        }]
    }

    async fn record_state(
        &self,
        turn: &Turn,
        entities: &ExtractedEntities,
        replies: &[NormalizedReply],
        request_id: &str,
    ) {
        let user_id = turn.user_id.as_deref().unwrap_or(&turn.session_id);
        let mut state = self
            .tracker
            .load(&turn.session_id)
            .await
            .unwrap_or_else(|| ConversationState::new(user_id, &turn.session_id));

        state.language = turn.locale.clone();
        if let Some(dish) = entities.dishes.first() {
            state.set_slot("dish", dish.as_str());
        }
        if let Some(quantity) = entities.orders.first().and_then(|o| o.quantity) {
            state.set_slot("quantity", quantity);
        }

        state.events.push(ConversationEvent::user(&turn.message));
        for reply in replies {
            for entity in &reply.custom.entities {
                state.set_slot(&entity.entity, entity.value.clone());
            }
            state.events.push(ConversationEvent::bot(&reply.text));
            if let Some(action) = &reply.custom.action {
                state.events.push(ConversationEvent::action(action));
                state.last_action = Some(action.clone());
            }
        }
        let overflow = state.events.len().saturating_sub(EVENT_LOG_LIMIT);
        state.events.drain(..overflow);

        state.last_response_text = replies.last().map(|r| r.text.clone());
        state.context = Some(json!({
            "source": replies.first().map(|r| r.custom.source),
            "emotion": entities.emotion.primary,
            "requestId": request_id,
        }));

        if let Err(e) = self.tracker.save(state).await {
            tracing::warn!(
                store = self.tracker.store_name(),
                error = %e,
                "Failed to save conversation state"
            );
        }
    }
}

fn role_of(message: &ChatMessage) -> &'static str {
    match message.sender {
        crate::conversation::Sender::User => "user",
        crate::conversation::Sender::Assistant => "assistant",
    }
}

fn history_entry(reply: &NormalizedReply, locale: &str) -> ChatMessage {
    let mut message = ChatMessage::assistant(&reply.text, locale)
        .with_items(reply.custom.menu_items.clone())
        .with_metadata("source", json!(reply.custom.source))
        .with_metadata("requestId", json!(reply.custom.request_id));
    if let Some(intent) = &reply.custom.intent {
        message = message.with_metadata("intent", json!(intent.name));
    }
    if let Some(error) = &reply.custom.error {
        message = message.with_metadata("error", json!(error));
    }
    message
}
