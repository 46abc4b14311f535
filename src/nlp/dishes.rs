//! Fuzzy dish matching and order-entity assembly.

use super::tables::MODIFIERS;
use crate::menu::MenuCatalog;
use serde::{Deserialize, Serialize};

/// Maximum normalized edit distance (0 = identical, 1 = nothing in common)
/// for a token to count as a dish mention. Fixed for all name lengths; short
/// names tolerate proportionally fewer typos than long ones.
pub const DISH_MATCH_THRESHOLD: f64 = 0.4;

/// Tokens shorter than this never match a dish.
const MIN_TOKEN_LEN: usize = 3;

/// Single name words shorter than this are not indexed on their own.
const MIN_NAME_WORD_LEN: usize = 4;

/// How many tokens after a dish are scanned for modifiers.
const MODIFIER_LOOKAHEAD: usize = 3;

/// One dish the customer asked for, with any quantity and modifiers found
/// around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntity {
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone)]
struct Candidate {
    text: String,
    words: usize,
    dish: usize,
}

/// Precomputed lowercase search terms for every dish in a catalog.
#[derive(Debug, Clone)]
pub struct DishIndex {
    names: Vec<String>,
    candidates: Vec<Candidate>,
}

impl DishIndex {
    pub fn new(catalog: &MenuCatalog) -> Self {
        let mut names = Vec::with_capacity(catalog.len());
        let mut candidates = Vec::new();

        for (dish, item) in catalog.items().iter().enumerate() {
            names.push(item.name.clone());

            let full = item.name.to_lowercase();
            for word in full.split_whitespace() {
                if word.len() >= MIN_NAME_WORD_LEN {
                    candidates.push(Candidate {
                        text: word.to_string(),
                        words: 1,
                        dish,
                    });
                }
            }
            candidates.push(Candidate {
                words: full.split_whitespace().count(),
                text: full,
                dish,
            });

            for alias in &item.aliases {
                let alias = alias.to_lowercase();
                candidates.push(Candidate {
                    words: alias.split_whitespace().count(),
                    text: alias,
                    dish,
                });
            }
        }

        Self { names, candidates }
    }

    /// Best dish for `phrase` among candidates of the given word count.
    fn best_match(&self, phrase: &str, words: usize) -> Option<usize> {
        self.candidates
            .iter()
            .filter(|c| c.words == words)
            .map(|c| (c.dish, distance(phrase, &c.text)))
            .filter(|(_, score)| *score < DISH_MATCH_THRESHOLD)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(dish, _)| dish)
    }

    /// Scan tokens left to right, preferring a two-token window over a single
    /// token so multi-word names are matched once.
    pub fn scan(&self, tokens: &[&str]) -> (Vec<String>, Vec<OrderEntity>) {
        let mut dishes: Vec<String> = Vec::new();
        let mut orders = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];
            if token.len() < MIN_TOKEN_LEN || is_number(token) {
                i += 1;
                continue;
            }

            let window = tokens
                .get(i + 1)
                .and_then(|next| self.best_match(&format!("{} {}", token, next), 2));
            let (dish, span) = match window {
                Some(dish) => (Some(dish), 2),
                None => (self.best_match(token, 1), 1),
            };

            if let Some(dish) = dish {
                let name = self.names[dish].clone();
                let quantity = i
                    .checked_sub(1)
                    .and_then(|prev| tokens[prev].parse::<u32>().ok());
                let modifiers = tokens
                    .iter()
                    .skip(i + span)
                    .take(MODIFIER_LOOKAHEAD)
                    .filter(|w| MODIFIERS.contains(w))
                    .map(|w| w.to_string())
                    .collect();

                if !dishes.contains(&name) {
                    dishes.push(name.clone());
                }
                orders.push(OrderEntity {
                    item: name,
                    quantity,
                    modifiers,
                });
            }

            i += span;
        }

        (dishes, orders)
    }
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn distance(a: &str, b: &str) -> f64 {
    1.0 - strsim::normalized_levenshtein(a, b)
}
