//! Product configuration trait for CLI binaries
//!
//! This trait defines what a generator binary must provide to brand and
//! configure the widget scaffolding flow.

use crate::config::WidgetConfig;
use std::path::Path;

/// Configuration trait for widget generator products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name, welcome banner)
/// - Template URL override
/// - Package manager used for dependency installation
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Banner printed when a run starts
    fn welcome_message(&self) -> String {
        format!("Welcome to the {}!", self.display_name())
    }

    /// Environment variable that points template loading at a remote URL
    fn template_url_env(&self) -> &'static str;

    /// Package manager binary used for `<pm> install`
    fn package_manager(&self) -> &'static str {
        "npm"
    }

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after the widget was created
    fn next_steps(&self, dir: &Path, config: &WidgetConfig, installed: bool) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
