//! One reply shape for both backends.

use crate::agent::{Button, EntityValue, IntentRanking, PrimaryReply};
use crate::config::RestaurantProfile;
use crate::menu::MenuItem;
use crate::nlp::BusinessTestingIntent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown when a turn fails in a way nothing else absorbed.
pub const TROUBLE_CONNECTING: &str =
    "I apologize, but I'm having trouble connecting right now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Primary,
    Fallback,
    Error,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Primary => "primary",
            ReplySource::Fallback => "fallback",
            ReplySource::Error => "error",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a turn was answered by the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    MissingConfiguration,
    Unhealthy,
    EmptyResponse,
    MalformedResponse,
    PrimaryError,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::MissingConfiguration => "missing_configuration",
            FallbackReason::Unhealthy => "unhealthy",
            FallbackReason::EmptyResponse => "empty_response",
            FallbackReason::MalformedResponse => "malformed_response",
            FallbackReason::PrimaryError => "primary_error",
        }
    }
}

/// Structured payload attached to every reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyCustom {
    pub source: ReplySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentRanking>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<RestaurantProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_testing: Option<BusinessTestingIntent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub request_id: String,
}

impl ReplyCustom {
    pub fn new(source: ReplySource, request_id: impl Into<String>) -> Self {
        Self {
            source,
            intent: None,
            entities: Vec::new(),
            action: None,
            amount: None,
            context: None,
            restaurant: None,
            business_testing: None,
            menu_items: Vec::new(),
            fallback: source == ReplySource::Fallback,
            fallback_reason: None,
            error: None,
            request_id: request_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    pub custom: ReplyCustom,
}

impl NormalizedReply {
    /// Tag a dialogue-service reply and merge in turn-level context.
    pub fn from_primary(
        reply: PrimaryReply,
        request_id: &str,
        restaurant: Option<&RestaurantProfile>,
        business_testing: Option<&BusinessTestingIntent>,
    ) -> Self {
        let mut custom = ReplyCustom::new(ReplySource::Primary, request_id);
        if let Some(primary) = reply.custom {
            custom.intent = primary.intent;
            custom.entities = primary.entities;
            custom.action = primary.action;
            custom.amount = primary.amount;
            custom.context = primary.context;
        }
        custom.restaurant = restaurant.cloned();
        custom.business_testing = business_testing.cloned();

        Self {
            text: reply.text.unwrap_or_default(),
            image: reply.image,
            buttons: reply.buttons,
            custom,
        }
    }

    /// Last-resort reply for a turn that failed outright.
    pub fn trouble_connecting(request_id: &str, error: impl Into<String>) -> Self {
        let mut custom = ReplyCustom::new(ReplySource::Error, request_id);
        custom.error = Some(error.into());
        Self {
            text: TROUBLE_CONNECTING.to_string(),
            image: None,
            buttons: Vec::new(),
            custom,
        }
    }

    pub fn source(&self) -> ReplySource {
        self.custom.source
    }
}
