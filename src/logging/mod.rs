//! Structured logging helpers
//!
//! Filter construction, per-turn correlation ids and privacy-safe previews of
//! chat content.

pub mod fields;
pub mod middleware;

pub use fields::{truncate_for_log, PREVIEW_CHARS};
pub use middleware::{generate_request_id, propagate_request_id, REQUEST_ID_HEADER};

/// `EnvFilter` directives for the configured levels: the base level, then
/// one `brick::<component>=<level>` directive per override in name order.
///
/// # Examples
///
/// ```
/// use brick::config::LoggingConfig;
/// use brick::logging::build_filter_directives;
///
/// let mut config = LoggingConfig::default();
/// config.components.insert("routing".to_string(), "debug".to_string());
///
/// assert_eq!(build_filter_directives(&config), "info,brick::routing=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    config
        .components
        .iter()
        .fold(config.level.clone(), |mut directives, (component, level)| {
            directives.push_str(&format!(",brick::{}={}", component, level));
            directives
        })
}
