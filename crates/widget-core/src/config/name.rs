//! Widget name rules

use crate::error::GeneratorError;
use regex::Regex;
use std::sync::OnceLock;

/// Name suggested by the interactive prompt
pub const DEFAULT_WIDGET_NAME: &str = "happeo-widget";

/// Pattern every widget name must match (the empty string is allowed)
const WIDGET_NAME_PATTERN: &str = r"^[a-z0-9_-]*$";

fn widget_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WIDGET_NAME_PATTERN).expect("widget name pattern is valid"))
}

/// Check a widget name against `[a-z0-9_-]*`
pub fn validate_widget_name(input: &str) -> Result<(), GeneratorError> {
    if widget_name_regex().is_match(input) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidWidgetName(input.to_string()))
    }
}

/// Folder name derived from a widget name: lowercased, spaces become hyphens
pub fn folder_name(widget_name: &str) -> String {
    widget_name.to_lowercase().replace(' ', "-")
}
