//! Lightweight entity and intent extraction.
//!
//! Turns free text into structured signals used to enrich outgoing requests
//! and pick reply content:
//!
//! - mentioned dishes (fuzzy-matched against the menu) and order entities
//! - menu category, cuisine and dietary preferences (ordered keyword tables)
//! - emotional tone (keyword counts)
//! - business-evaluation and staff-operation signals
//! - an aggregate confidence score
//!
//! Extraction is pure: no I/O, bounded by the size of the keyword tables and
//! the menu, and deterministic for a given catalog.
//!
//! # Example
//!
//! ```
//! use brick::nlp::Extractor;
//!
//! let extractor = Extractor::default();
//! let entities = extractor.extract("2 burgers please");
//! assert_eq!(entities.orders[0].quantity, Some(2));
//! assert_eq!(entities.dishes, vec!["Classic Burger".to_string()]);
//! ```

mod business;
mod dishes;
mod emotion;
mod tables;

pub use business::{BusinessTestingIntent, BusinessType, OperatorIntent, TestType};
pub use dishes::{DishIndex, OrderEntity, DISH_MATCH_THRESHOLD};
pub use emotion::{Emotion, EmotionAnalysis, INTENSITY_DIVISOR};
pub use tables::contains_any;

use crate::menu::{MenuCatalog, MenuCategory};
use serde::{Deserialize, Serialize};

/// Confidence reported when no signal fires.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

const ORDER_WEIGHT: f64 = 0.8;
const DIETARY_WEIGHT: f64 = 0.7;
const BUSINESS_WEIGHT: f64 = 0.9;
const CUISINE_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Indian,
    Mexican,
    American,
    Italian,
    Chinese,
}

impl Cuisine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Indian => "indian",
            Cuisine::Mexican => "mexican",
            Cuisine::American => "american",
            Cuisine::Italian => "italian",
            Cuisine::Chinese => "chinese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    GlutenFree,
    Halal,
    Kosher,
    Jain,
}

/// Everything the extractor found in one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntities {
    /// Canonical menu names, first mention order, no duplicates
    pub dishes: Vec<String>,
    pub orders: Vec<OrderEntity>,
    pub category: Option<MenuCategory>,
    pub cuisine: Option<Cuisine>,
    pub dietary_preferences: Vec<DietaryPreference>,
    pub emotion: EmotionAnalysis,
    pub business_intent: Option<OperatorIntent>,
    pub business_testing: Option<BusinessTestingIntent>,
    pub is_greeting: bool,
    pub confidence: f64,
}

impl ExtractedEntities {
    /// Result for a message with no recognizable content.
    pub fn empty() -> Self {
        Self {
            dishes: Vec::new(),
            orders: Vec::new(),
            category: None,
            cuisine: None,
            dietary_preferences: Vec::new(),
            emotion: EmotionAnalysis::neutral(),
            business_intent: None,
            business_testing: None,
            is_greeting: false,
            confidence: NEUTRAL_CONFIDENCE,
        }
    }
}

/// Mean weight of the signal groups that fired, or the neutral default.
pub fn confidence(
    has_orders: bool,
    has_dietary: bool,
    has_business_intent: bool,
    has_cuisine: bool,
) -> f64 {
    let (score, factors) = [
        (has_orders, ORDER_WEIGHT),
        (has_dietary, DIETARY_WEIGHT),
        (has_business_intent, BUSINESS_WEIGHT),
        (has_cuisine, CUISINE_WEIGHT),
    ]
    .iter()
    .filter(|(fired, _)| *fired)
    .fold((0.0, 0u32), |(sum, n), (_, weight)| (sum + weight, n + 1));

    if factors > 0 {
        score / factors as f64
    } else {
        NEUTRAL_CONFIDENCE
    }
}

/// Message classifier bound to one menu.
#[derive(Debug, Clone)]
pub struct Extractor {
    dishes: DishIndex,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&MenuCatalog::builtin())
    }
}

impl Extractor {
    pub fn new(catalog: &MenuCatalog) -> Self {
        Self {
            dishes: DishIndex::new(catalog),
        }
    }

    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let lower = text.to_lowercase();
        let tokens = tokenize(&lower);

        let (dishes, orders) = self.dishes.scan(&tokens);
        let category = tables::first_match(tables::CATEGORIES, &lower);
        let cuisine = tables::first_match(tables::CUISINES, &lower);
        let dietary_preferences = tables::all_matches(tables::DIETARY, &lower);
        let business_intent = business::detect_operator_intent(&lower);

        let confidence = confidence(
            !orders.is_empty(),
            !dietary_preferences.is_empty(),
            business_intent.is_some(),
            cuisine.is_some(),
        );

        ExtractedEntities {
            dishes,
            orders,
            category,
            cuisine,
            dietary_preferences,
            emotion: emotion::analyze(&lower),
            business_intent,
            business_testing: business::detect_testing(&lower),
            is_greeting: is_greeting(&lower, &tokens),
            confidence,
        }
    }
}

/// Whitespace split with surrounding punctuation trimmed from each token.
fn tokenize(lower: &str) -> Vec<&str> {
    lower
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_greeting(lower: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| tables::GREETING_WORDS.contains(t))
        || tables::contains_any(lower, tables::GREETING_PHRASES)
}
