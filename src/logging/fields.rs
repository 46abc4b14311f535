//! Field helpers for structured logging

/// Characters of chat content kept in a log preview.
pub const PREVIEW_CHARS: usize = 100;

/// Privacy-safe preview of chat content.
///
/// Returns `None` unless content logging is enabled. The preview is cut on a
/// character boundary and marked with `...` when shortened.
///
/// # Examples
///
/// ```
/// use brick::logging::truncate_for_log;
///
/// assert_eq!(truncate_for_log("I want a dosa", false), None);
/// assert_eq!(truncate_for_log("I want a dosa", true).as_deref(), Some("I want a dosa"));
/// ```
pub fn truncate_for_log(text: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging || text.is_empty() {
        return None;
    }

    match text.char_indices().nth(PREVIEW_CHARS) {
        None => Some(text.to_string()),
        Some((cut, _)) => Some(format!("{}...", &text[..cut])),
    }
}
