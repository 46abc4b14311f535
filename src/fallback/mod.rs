//! Generative fallback.
//!
//! Answers a turn with the completion service when the dialogue service is
//! unconfigured, unhealthy or unhelpful. [`GenerativeFallback::send`] never
//! fails: every error is turned into a user-facing reply, with the popular
//! dishes as default content when nothing more specific applies.

mod prompt;
mod replies;

pub use prompt::{system_prompt, tone_rule, PromptContext, PERSONA};
pub use replies::{
    apology, apply_flourishes, popular_dishes_reply, FallbackFailure, CONNECTION_APOLOGY,
    RATE_LIMIT_APOLOGY, TIMEOUT_APOLOGY,
};

use crate::agent::{AgentError, ChatCompletionRequest, CompletionBackend, CompletionMessage};
use crate::cache::{CacheConfig, TtlCache};
use crate::config::{FallbackConfig, RestaurantProfile};
use crate::menu::{MenuCatalog, MenuItem};
use crate::nlp::{BusinessTestingIntent, EmotionAnalysis, ExtractedEntities, Extractor};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Menu items attached to a reply at most.
pub const MAX_MENU_ITEMS: usize = 3;

/// One fallback turn.
#[derive(Debug, Clone)]
pub struct FallbackRequest<'a> {
    pub message: &'a str,
    /// Recent conversation, oldest first, one line per message
    pub context: &'a str,
    pub emotion: &'a EmotionAnalysis,
    pub locale: &'a str,
    pub session_id: &'a str,
    pub restaurant: Option<&'a RestaurantProfile>,
    pub business_testing: Option<&'a BusinessTestingIntent>,
}

/// What the fallback produced. `failure` is set when `content` is an apology
/// or the popular-dishes recovery text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackReply {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FallbackFailure>,
}

/// Map a completion error onto the user-facing failure class.
pub fn classify(error: &AgentError) -> FallbackFailure {
    match error {
        AgentError::RateLimited(_) => FallbackFailure::RateLimited,
        AgentError::Upstream { status: 429, .. } => FallbackFailure::RateLimited,
        AgentError::Upstream { .. } => FallbackFailure::ApiError,
        AgentError::Timeout(_) => FallbackFailure::Timeout,
        AgentError::Network(_)
        | AgentError::EmptyResponse
        | AgentError::InvalidResponse(_)
        | AgentError::Configuration(_) => FallbackFailure::Other,
    }
}

/// Items to show alongside a reply: the detected category if any, otherwise
/// items whose name or description mentions a detected dish.
pub fn select_menu_items(catalog: &MenuCatalog, entities: &ExtractedEntities) -> Vec<MenuItem> {
    if let Some(category) = entities.category {
        return catalog
            .by_category(category)
            .into_iter()
            .take(MAX_MENU_ITEMS)
            .cloned()
            .collect();
    }

    let dishes: Vec<String> = entities.dishes.iter().map(|d| d.to_lowercase()).collect();
    if dishes.is_empty() {
        return Vec::new();
    }
    catalog
        .items()
        .iter()
        .filter(|item| {
            let name = item.name.to_lowercase();
            let description = item.description.to_lowercase();
            dishes
                .iter()
                .any(|d| name.contains(d.as_str()) || description.contains(d.as_str()))
        })
        .take(MAX_MENU_ITEMS)
        .cloned()
        .collect()
}

/// Completion-backed responder with memoization of successful completions.
pub struct GenerativeFallback {
    backend: Arc<dyn CompletionBackend>,
    catalog: Arc<MenuCatalog>,
    extractor: Arc<Extractor>,
    config: FallbackConfig,
    cache: Option<Mutex<TtlCache<String>>>,
}

impl GenerativeFallback {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        catalog: Arc<MenuCatalog>,
        extractor: Arc<Extractor>,
        config: FallbackConfig,
        cache: &CacheConfig,
    ) -> Self {
        Self {
            backend,
            catalog,
            extractor,
            config,
            cache: cache
                .enabled
                .then(|| Mutex::new(TtlCache::from_config(cache))),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_configured()
    }

    pub async fn send(&self, request: &FallbackRequest<'_>) -> FallbackReply {
        let entities = self.extractor.extract(request.message);
        let key = cache_key(request);

        let completion = match self.cached(&key) {
            Some(text) => {
                metrics::counter!("brick_cache_hits_total").increment(1);
                tracing::debug!(session_id = request.session_id, "Fallback cache hit");
                Ok(text)
            }
            None => self.complete(request).await,
        };

        match completion {
            Ok(text) => {
                self.remember(key, &text);
                FallbackReply {
                    content: apply_flourishes(&request.message.to_lowercase(), &entities, &text),
                    menu_items: select_menu_items(&self.catalog, &entities),
                    failure: None,
                }
            }
            Err(e) => {
                let failure = classify(&e);
                tracing::warn!(
                    session_id = request.session_id,
                    backend = self.backend.name(),
                    error = %e,
                    failure = failure.as_str(),
                    "Completion failed"
                );
                self.recovery_reply(failure)
            }
        }
    }

    fn recovery_reply(&self, failure: FallbackFailure) -> FallbackReply {
        match apology(failure) {
            Some(text) => FallbackReply {
                content: text.to_string(),
                menu_items: Vec::new(),
                failure: Some(failure),
            },
            None => {
                let popular = self.catalog.popular(MAX_MENU_ITEMS);
                FallbackReply {
                    content: popular_dishes_reply(&popular),
                    menu_items: popular,
                    failure: Some(failure),
                }
            }
        }
    }

    async fn complete(&self, request: &FallbackRequest<'_>) -> Result<String, AgentError> {
        let system = system_prompt(&PromptContext {
            emotion: request.emotion,
            locale: request.locale,
            restaurant: request.restaurant,
            business_testing: request.business_testing,
            catalog: &self.catalog,
        });

        let mut messages = vec![CompletionMessage::system(system)];
        if !request.context.trim().is_empty() {
            messages.push(CompletionMessage::system(format!(
                "Recent conversation:\n{}",
                request.context
            )));
        }
        messages.push(CompletionMessage::user(request.message));

        let completion = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            presence_penalty: self.config.presence_penalty,
            frequency_penalty: self.config.frequency_penalty,
        };

        let timeout = self.config.timeout();
        // Dropping the call on timeout tears down the underlying request
        let response = tokio::time::timeout(timeout, self.backend.chat_completion(completion))
            .await
            .map_err(|_| AgentError::Timeout(timeout.as_millis() as u64))??;

        response
            .first_content()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(AgentError::EmptyResponse)
    }

    fn cached(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let mut guard = cache.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(key)
    }

    fn remember(&self, key: String, text: &str) {
        if let Some(cache) = &self.cache {
            let mut guard = cache.lock().unwrap_or_else(|e| e.into_inner());
            guard.set(key, text.to_string(), None);
        }
    }
}

fn cache_key(request: &FallbackRequest<'_>) -> String {
    format!(
        "{}\u{1f}{}\u{1f}{}\u{1f}{}",
        request.locale, request.emotion.primary, request.message, request.context
    )
}
