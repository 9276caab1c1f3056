//! Typed errors for the widget generator

use std::path::PathBuf;
use thiserror::Error;

/// Domain failures that callers may want to match on.
///
/// I/O and process glue uses `anyhow` with context instead; these variants cover
/// the cases where the generator itself rejects the input.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Unknown widget type '{label}'. Valid types: {valid}")]
    UnknownWidgetType { label: String, valid: String },

    #[error("Unknown folder mode '{0}'. Use 'current' or 'subdir'")]
    UnknownFolderMode(String),

    #[error("Your widget name doesn't match the pattern.")]
    InvalidWidgetName(String),

    #[error("Cannot create a subfolder named '{0}'. Give the widget a name")]
    InvalidFolderName(String),

    #[error("Missing value for option '{0}'")]
    MissingOption(&'static str),

    #[error("Template '{template}' has no file '{path}'")]
    MissingTemplateFile { template: String, path: String },

    #[error("Manifest template for '{0}' is not a JSON object")]
    InvalidManifest(String),

    #[error("Dependency installation failed in {dir} (exit code {code})")]
    InstallFailed { dir: PathBuf, code: i32 },
}
