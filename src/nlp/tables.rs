//! Fixed keyword tables.
//!
//! Every table is an ordered slice of `(tag, keywords)` pairs. Classifiers walk
//! them in declaration order, so reordering an entry changes which tag wins a
//! tie.

use super::{BusinessType, Cuisine, DietaryPreference, Emotion, OperatorIntent, TestType};
use crate::menu::MenuCategory;

pub type KeywordTable<T> = &'static [(T, &'static [&'static str])];

pub const EMOTIONS: KeywordTable<Emotion> = &[
    (
        Emotion::Excited,
        &["cant wait", "excited", "looking forward", "!"],
    ),
    (
        Emotion::Happy,
        &["love", "great", "amazing", "wonderful", "perfect"],
    ),
    (
        Emotion::Frustrated,
        &["wrong", "bad", "terrible", "annoying", "slow"],
    ),
    (
        Emotion::Confused,
        &["dont understand", "what do you mean", "unclear", "?"],
    ),
    (
        Emotion::Hungry,
        &["starving", "hungry", "craving", "really want"],
    ),
    (Emotion::Rushed, &["quick", "hurry", "fast", "soon", "now"]),
];

pub const CATEGORIES: KeywordTable<MenuCategory> = &[
    (MenuCategory::Starters, &["starter", "appetizer", "snack"]),
    (MenuCategory::Curries, &["curry", "curries"]),
    (MenuCategory::Tacos, &["taco"]),
    (MenuCategory::Burgers, &["burger"]),
    (MenuCategory::Pizza, &["pizza"]),
    (MenuCategory::Pasta, &["pasta", "spaghetti", "noodle"]),
    (MenuCategory::Desserts, &["dessert", "sweet"]),
    (
        MenuCategory::Beverages,
        &["drink", "beverage", "juice", "soda"],
    ),
];

pub const CUISINES: KeywordTable<Cuisine> = &[
    (
        Cuisine::Indian,
        &["indian", "desi", "curry", "masala", "biryani", "dosa", "tandoori"],
    ),
    (
        Cuisine::Mexican,
        &["mexican", "tacos", "burrito", "quesadilla", "enchilada"],
    ),
    (
        Cuisine::American,
        &["american", "burger", "fries", "wings", "hot dog"],
    ),
    (
        Cuisine::Italian,
        &["italian", "pasta", "pizza", "risotto", "lasagna"],
    ),
    (
        Cuisine::Chinese,
        &["chinese", "dimsum", "noodles", "stir fry", "dumpling"],
    ),
];

pub const DIETARY: KeywordTable<DietaryPreference> = &[
    (DietaryPreference::Vegetarian, &["vegetarian", "no meat", "veg"]),
    (DietaryPreference::Vegan, &["vegan", "plant-based", "dairy-free"]),
    (
        DietaryPreference::GlutenFree,
        &["gluten-free", "no gluten", "celiac"],
    ),
    (DietaryPreference::Halal, &["halal", "zabiha"]),
    (DietaryPreference::Kosher, &["kosher", "pareve"]),
    (DietaryPreference::Jain, &["jain", "no onion no garlic"]),
];

pub const OPERATOR_INTENTS: KeywordTable<OperatorIntent> = &[
    (
        OperatorIntent::Menu,
        &["menu", "items", "dishes", "specials", "pricing"],
    ),
    (
        OperatorIntent::Inventory,
        &["inventory", "stock", "supplies", "ingredients", "ordering"],
    ),
    (
        OperatorIntent::Analytics,
        &["sales", "revenue", "trends", "reports", "performance"],
    ),
    (
        OperatorIntent::Settings,
        &["settings", "configuration", "setup", "preferences"],
    ),
    (
        OperatorIntent::Help,
        &["help", "support", "guide", "tutorial", "assistance"],
    ),
];

// Business-evaluation vocabulary. Any hit in any family opens the gate.
pub const TESTING_VERBS: &[&str] = &[
    "test", "try", "simulate", "mock", "pretend", "demo", "example",
];
pub const EVALUATION_VERBS: &[&str] = &[
    "evaluate", "assess", "review", "check", "see how", "look like",
];
pub const CUSTOMIZATION_VERBS: &[&str] = &[
    "make it",
    "change",
    "customize",
    "adapt",
    "sound like",
    "feel like",
];
pub const BUSINESS_NOUNS: &[&str] = &[
    "my restaurant",
    "my food truck",
    "my business",
    "my cafe",
    "my team",
];
pub const SIMULATION_NOUNS: &[&str] = &[
    "customer",
    "order",
    "interaction",
    "conversation",
    "scenario",
];

pub const TEST_TYPES: KeywordTable<TestType> = &[
    (TestType::Simulation, SIMULATION_NOUNS),
    (TestType::Evaluation, EVALUATION_VERBS),
    (TestType::Customization, CUSTOMIZATION_VERBS),
];

pub const TESTING_CUISINES: KeywordTable<Cuisine> = &[
    (Cuisine::Mexican, &["mexican", "taco", "burrito"]),
    (Cuisine::Indian, &["indian", "curry", "biryani"]),
    (Cuisine::Italian, &["italian", "pizza", "pasta"]),
    (Cuisine::American, &["american", "burger", "diner"]),
];

pub const BUSINESS_TYPES: KeywordTable<BusinessType> = &[
    (BusinessType::FoodTruck, &["food truck"]),
    (BusinessType::Cafe, &["cafe", "café"]),
    (BusinessType::Restaurant, &["restaurant"]),
];

pub const TARGET_LANGUAGES: KeywordTable<&'static str> = &[
    ("es", &["spanish", "español"]),
    ("en", &["english"]),
];

pub const FEATURES: KeywordTable<&'static str> = &[
    ("ordering", &["order", "menu", "items"]),
    ("payments", &["payment", "transactions", "billing"]),
    ("analytics", &["analytics", "reports", "insights"]),
    ("inventory", &["inventory", "stock", "supplies"]),
];

pub const GREETING_WORDS: &[&str] = &[
    "hello", "hi", "hey", "hiya", "howdy", "hola", "namaste", "greetings",
];
pub const GREETING_PHRASES: &[&str] = &["good morning", "good afternoon", "good evening"];

pub const MODIFIERS: &[&str] = &["extra", "less", "no", "with", "without"];

/// First tag whose keyword list has any substring hit in `text`.
pub fn first_match<T: Copy>(table: KeywordTable<T>, text: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(tag, _)| *tag)
}

/// Every tag with at least one hit, in declaration order.
pub fn all_matches<T: Copy>(table: KeywordTable<T>, text: &str) -> Vec<T> {
    table
        .iter()
        .filter(|(_, keywords)| contains_any(text, keywords))
        .map(|(tag, _)| *tag)
        .collect()
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_uses_declaration_order() {
        // "curry" is listed under Indian; "pizza" under Italian, which is declared later
        assert_eq!(
            first_match(CUISINES, "curry or pizza"),
            Some(Cuisine::Indian)
        );
        assert_eq!(first_match(CUISINES, "pizza or curry"), Some(Cuisine::Indian));
    }

    #[test]
    fn test_all_matches_preserves_order() {
        let prefs = all_matches(DIETARY, "vegan and halal please");
        // "veg" is a substring of "vegan", so vegetarian fires as well
        assert_eq!(
            prefs,
            vec![
                DietaryPreference::Vegetarian,
                DietaryPreference::Vegan,
                DietaryPreference::Halal
            ]
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(first_match(CATEGORIES, "hello there"), None);
    }
}
