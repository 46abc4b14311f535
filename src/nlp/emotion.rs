//! Keyword-count emotion detection.

use super::tables::EMOTIONS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hits needed for an intensity of 1.0. Intensity is `hits / 3` and is not
/// clamped, so four matching keywords yield 1.33.
pub const INTENSITY_DIVISOR: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Excited,
    Happy,
    Frustrated,
    Confused,
    Hungry,
    Rushed,
    #[default]
    Neutral,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Excited => "excited",
            Emotion::Happy => "happy",
            Emotion::Frustrated => "frustrated",
            Emotion::Confused => "confused",
            Emotion::Hungry => "hungry",
            Emotion::Rushed => "rushed",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EmotionAnalysis {
    pub primary: Emotion,
    pub intensity: f64,
    /// Keywords that fired for the winning emotion
    pub context: Vec<String>,
}

impl EmotionAnalysis {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Pick the emotion with the most distinct keyword hits in `lower`.
///
/// Only a strictly larger count displaces the current leader, so the
/// emotion declared first wins a tie.
pub fn analyze(lower: &str) -> EmotionAnalysis {
    let mut best = EmotionAnalysis::neutral();
    let mut best_count = 0usize;

    for (emotion, keywords) in EMOTIONS {
        let hits: Vec<&str> = keywords
            .iter()
            .copied()
            .filter(|k| lower.contains(k))
            .collect();
        if hits.len() > best_count {
            best_count = hits.len();
            best = EmotionAnalysis {
                primary: *emotion,
                intensity: hits.len() as f64 / INTENSITY_DIVISOR,
                context: hits.into_iter().map(String::from).collect(),
            };
        }
    }

    best
}
