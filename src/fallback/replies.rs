//! Canned text: persona flourishes and failure apologies.

use crate::menu::MenuItem;
use crate::nlp::{contains_any, ExtractedEntities};
use serde::{Deserialize, Serialize};

const WINE_WORDS: &[&str] = &["wine", "pairing", "pair with", "sommelier"];
const ALLERGY_WORDS: &[&str] = &["allerg", "intoleran", "dairy", "nut free", "nut-free"];

pub const GREETING_FLOURISH: &str = "Hey there, I'm Brick!";
pub const WINE_FLOURISH: &str = "Ooh, a fellow wine lover.";
pub const DIETARY_FLOURISH: &str = "Noted, I'll keep your dietary needs in mind.";

pub const RATE_LIMIT_APOLOGY: &str =
    "I'm getting a lot of orders right now! Please try again shortly.";
pub const CONNECTION_APOLOGY: &str =
    "Sorry, I'm having trouble connecting to my kitchen brain. Please try again in a moment.";
pub const TIMEOUT_APOLOGY: &str =
    "Sorry for the delay, that took longer than expected. Could you ask me again?";

/// Why the completion call did not produce text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackFailure {
    RateLimited,
    ApiError,
    Timeout,
    Other,
}

impl FallbackFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackFailure::RateLimited => "rate_limited",
            FallbackFailure::ApiError => "api_error",
            FallbackFailure::Timeout => "timeout",
            FallbackFailure::Other => "other",
        }
    }
}

fn dish_flourish(dish: &str) -> String {
    format!("Great pick, the {} is a favourite here.", dish)
}

/// Prepend persona flourishes to `text`.
///
/// Triggers are checked in a fixed order (greeting, dish, wine, dietary) and
/// each one that fires prepends its own line, so later triggers end up first.
pub fn apply_flourishes(message_lower: &str, entities: &ExtractedEntities, text: &str) -> String {
    let mut out = text.to_string();
    let mut prepend = |line: &str| out = format!("{} {}", line, out);

    if entities.is_greeting {
        prepend(GREETING_FLOURISH);
    }
    if let Some(dish) = entities.dishes.first() {
        prepend(&dish_flourish(dish));
    }
    if contains_any(message_lower, WINE_WORDS) {
        prepend(WINE_FLOURISH);
    }
    if !entities.dietary_preferences.is_empty()
        || contains_any(message_lower, ALLERGY_WORDS)
    {
        prepend(DIETARY_FLOURISH);
    }
    out
}

/// Recovery text offered with the popular items when nothing else fits.
pub fn popular_dishes_reply(popular: &[MenuItem]) -> String {
    let names: Vec<&str> = popular.iter().map(|i| i.name.as_str()).collect();
    if names.is_empty() {
        return format!("{} What can I get started for you?", GREETING_FLOURISH);
    }
    format!(
        "{} While I warm up, here are our most popular dishes: {}. What can I get started for you?",
        GREETING_FLOURISH,
        names.join(", ")
    )
}

pub fn apology(failure: FallbackFailure) -> Option<&'static str> {
    match failure {
        FallbackFailure::RateLimited => Some(RATE_LIMIT_APOLOGY),
        FallbackFailure::ApiError => Some(CONNECTION_APOLOGY),
        FallbackFailure::Timeout => Some(TIMEOUT_APOLOGY),
        FallbackFailure::Other => None,
    }
}
