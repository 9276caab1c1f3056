//! Widget Core - Shared library for Happeo widget scaffolding CLIs
//!
//! This library asks for a widget name, a target folder, and a project flavor,
//! then materializes the matching template tree and `package.json` on disk and
//! optionally installs dependencies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Option store, destination resolution, template
//!   loading and copying, manifest creation, dependency installation
//! - **Layer 2: Workflow Orchestration** - [`Generator`] drives a run through its
//!   phases; [`ProductConfig`] and [`Prompter`] let binaries brand it and plug in a UI
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use widget_core::{templates, WidgetType};
//!
//! let fetcher = templates::TemplateFetcher::embedded();
//! let bundle = fetcher.fetch(WidgetType::ReactTs).await?;
//! templates::write_manifest_if_absent(&dir, &bundle.manifest, "my-widget").await?;
//! templates::copy_template(&bundle, &dir, false).await?;
//! ```

pub mod config;
pub mod destination;
pub mod error;
pub mod generator;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{CreateFolder, GeneratorFlags, OptionKey, Options, WidgetConfig};
pub use error::GeneratorError;
pub use generator::{Generator, Phase, Prompter, RunReport};
pub use product::ProductConfig;
pub use runtime::{InstallOutcome, Installer, PackageManagerInstaller};
pub use templates::{
    copy_template, write_manifest_if_absent, CopyReport, ManifestOutcome, TemplateBundle,
    TemplateFetcher, TemplateSource, WidgetType,
};

#[cfg(feature = "tui")]
pub use tui::run;
