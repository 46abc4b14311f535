//! System prompt for the generative fallback.

use crate::config::RestaurantProfile;
use crate::menu::MenuCatalog;
use crate::nlp::{BusinessTestingIntent, Emotion, EmotionAnalysis, TestType};

pub const PERSONA: &str = "Brick";

/// Tone instruction for the customer's detected mood.
pub fn tone_rule(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Excited => "Match their energy and celebrate their choices.",
        Emotion::Happy => "Keep the mood warm and upbeat.",
        Emotion::Frustrated => {
            "Stay calm, acknowledge the problem in one sentence and go straight to a fix."
        }
        Emotion::Confused => "Explain simply, one step at a time, and offer at most three clear options.",
        Emotion::Hungry => "Be quick and suggest filling dishes first.",
        Emotion::Rushed => "Be brief and lead with the fastest options.",
        Emotion::Neutral => "Be friendly and helpful.",
    }
}

fn business_preamble(intent: &BusinessTestingIntent) -> String {
    let venue = intent
        .business_type
        .map(|t| t.as_str())
        .unwrap_or("food business");

    let mut text = format!(
        "The person writing is a business owner trying out {} for their own {}.",
        PERSONA, venue
    );
    match intent.test_type {
        Some(TestType::Simulation) => {
            text.push_str(" Play along with their simulated customer conversation.")
        }
        Some(TestType::Evaluation) => {
            text.push_str(" Show what you can do and answer questions about your capabilities.")
        }
        Some(TestType::Customization) => {
            text.push_str(" Explain how menu, tone and language can be tailored to their venue.")
        }
        None => {}
    }
    if let Some(cuisine) = intent.cuisine {
        text.push_str(&format!(" Their kitchen is {}.", cuisine.as_str()));
    }
    if !intent.features.is_empty() {
        text.push_str(&format!(
            " They are interested in: {}.",
            intent.features.join(", ")
        ));
    }
    text
}

/// Inputs that shape the system prompt.
pub struct PromptContext<'a> {
    pub emotion: &'a EmotionAnalysis,
    pub locale: &'a str,
    pub restaurant: Option<&'a RestaurantProfile>,
    pub business_testing: Option<&'a BusinessTestingIntent>,
    pub catalog: &'a MenuCatalog,
}

pub fn system_prompt(ctx: &PromptContext<'_>) -> String {
    let mut sections = Vec::with_capacity(5);

    sections.push(format!(
        "You are {}, a friendly food ordering assistant. Keep replies short, \
         only recommend dishes from the menu below and never make up prices.",
        PERSONA
    ));

    if let Some(restaurant) = ctx.restaurant {
        sections.push(restaurant.flavor_text());
    }

    sections.push(format!(
        "The customer seems {} (intensity {:.2}). {}",
        ctx.emotion.primary,
        ctx.emotion.intensity,
        tone_rule(ctx.emotion.primary)
    ));

    sections.push(format!(
        "Reply in the language of locale \"{}\".",
        ctx.locale
    ));

    if let Some(intent) = ctx.business_testing {
        sections.push(business_preamble(intent));
    }

    // Serializing a Vec of plain structs cannot fail
    let menu = serde_json::to_string(ctx.catalog.items()).unwrap_or_default();
    sections.push(format!("Menu (JSON):\n{}", menu));

    sections.join("\n\n")
}
