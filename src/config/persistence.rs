//! Conversation state storage configuration

use serde::{Deserialize, Serialize};

/// Where conversation state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// PostgREST-compatible table API
    Postgrest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub backend: StoreBackend,
    /// Base URL of the table API, e.g. `https://db.example.com/rest/v1`
    pub url: Option<String>,
    /// Environment variable holding the service key
    pub api_key_env: String,
    pub table: String,
    pub timeout_seconds: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            url: None,
            api_key_env: "BRICK_STORE_KEY".to_string(),
            table: "conversations".to_string(),
            timeout_seconds: 5,
        }
    }
}

impl PersistenceConfig {
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        let config: PersistenceConfig = toml::from_str(
            r#"
            backend = "postgrest"
            url = "http://localhost:3000"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, StoreBackend::Postgrest);
        assert_eq!(config.table, "conversations");
    }
}
