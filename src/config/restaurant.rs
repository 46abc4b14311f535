//! Restaurant profile

use serde::{Deserialize, Serialize};

/// Describes the venue the assistant speaks for. Shared with both backends
/// so replies can mention specialties and opening hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    pub name: String,
    #[serde(default = "default_business_type")]
    pub business_type: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
}

fn default_business_type() -> String {
    "restaurant".to_string()
}

impl RestaurantProfile {
    /// Prompt flavor, e.g. "You work at Spice Route, a restaurant serving indian food."
    pub fn flavor_text(&self) -> String {
        let mut text = format!("You work at {}, a {}", self.name, self.business_type);
        if let Some(cuisine) = &self.cuisine {
            text.push_str(&format!(" serving {} food", cuisine));
        }
        if !self.specialties.is_empty() {
            text.push_str(&format!(" known for {}", self.specialties.join(", ")));
        }
        text.push('.');
        if let Some(description) = &self.description {
            text.push(' ');
            text.push_str(description);
        }
        if let Some(hours) = &self.business_hours {
            text.push_str(&format!(" Opening hours: {}.", hours));
        }
        text
    }
}
