//! Business-side signals: restaurant operators evaluating the assistant, and
//! staff asking about operations.

use super::tables::{
    self, BUSINESS_NOUNS, BUSINESS_TYPES, CUSTOMIZATION_VERBS, EVALUATION_VERBS, FEATURES,
    OPERATOR_INTENTS, SIMULATION_NOUNS, TARGET_LANGUAGES, TESTING_CUISINES, TESTING_VERBS,
    TEST_TYPES,
};
use super::Cuisine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Simulation,
    Evaluation,
    Customization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Restaurant,
    FoodTruck,
    Cafe,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "restaurant",
            BusinessType::FoodTruck => "food truck",
            BusinessType::Cafe => "cafe",
        }
    }
}

/// The sender looks like a prospective business trying the assistant out
/// rather than a customer ordering food. Every field is optional and filled
/// from its own keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessTestingIntent {
    pub is_business_owner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_type: Option<TestType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<Cuisine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// Staff-side operations a message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorIntent {
    Menu,
    Inventory,
    Analytics,
    Settings,
    Help,
}

/// Detect business-evaluation traffic in lowercased text.
///
/// The gate is deliberately loose: a hit in any of the five vocabulary
/// families (testing, evaluation, customization, business nouns, simulation
/// nouns) is enough, so ordinary messages such as "can I order" pass it.
pub fn detect_testing(lower: &str) -> Option<BusinessTestingIntent> {
    let families = [
        TESTING_VERBS,
        EVALUATION_VERBS,
        CUSTOMIZATION_VERBS,
        BUSINESS_NOUNS,
        SIMULATION_NOUNS,
    ];
    if !families.iter().any(|f| tables::contains_any(lower, f)) {
        return None;
    }

    Some(BusinessTestingIntent {
        is_business_owner: true,
        test_type: tables::first_match(TEST_TYPES, lower),
        language: tables::first_match(TARGET_LANGUAGES, lower).map(String::from),
        cuisine: tables::first_match(TESTING_CUISINES, lower),
        business_type: tables::first_match(BUSINESS_TYPES, lower),
        features: tables::all_matches(FEATURES, lower)
            .into_iter()
            .map(String::from)
            .collect(),
    })
}

pub fn detect_operator_intent(lower: &str) -> Option<OperatorIntent> {
    tables::first_match(OPERATOR_INTENTS, lower)
}
