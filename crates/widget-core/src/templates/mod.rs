//! Widget template selection, loading, and copying
//!
//! This module provides:
//! - The closed set of widget flavors ([`WidgetType`]) and their template pairing
//! - Template loading from the embedded copy, a local directory, or a remote URL
//! - Manifest (package.json) creation
//! - Template tree materialization into the destination

pub mod copier;
pub mod fetcher;
pub mod manifest;

use crate::error::GeneratorError;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use copier::{copy_template, CopyReport};
pub use fetcher::{TemplateBundle, TemplateFetcher, TemplateSource};
pub use manifest::{write_manifest_if_absent, ManifestOutcome, MANIFEST_FILE};

/// Project flavor of the generated widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetType {
    Vanilla,
    ReactJs,
    ReactTs,
    LitJs,
    LitTs,
}

/// Static pairing of a manifest template and a template directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSet {
    /// Path of the manifest template, relative to the templates root
    pub manifest: &'static str,
    /// Directory copied verbatim into the destination, relative to the templates root
    pub directory: &'static str,
}

impl WidgetType {
    pub const ALL: [WidgetType; 5] = [
        WidgetType::Vanilla,
        WidgetType::ReactJs,
        WidgetType::ReactTs,
        WidgetType::LitJs,
        WidgetType::LitTs,
    ];

    /// Label shown to users and stored in the options
    pub fn label(&self) -> &'static str {
        match self {
            WidgetType::Vanilla => "VanillaJS",
            WidgetType::ReactJs => "React - JS",
            WidgetType::ReactTs => "React - TS",
            WidgetType::LitJs => "Lit - JS",
            WidgetType::LitTs => "Lit - TS",
        }
    }

    /// Short identifier, also accepted on the command line
    pub fn id(&self) -> &'static str {
        self.template_set().directory
    }

    pub fn template_set(&self) -> TemplateSet {
        match self {
            WidgetType::Vanilla => TemplateSet {
                manifest: "manifests/vanilla.package.json",
                directory: "vanilla",
            },
            WidgetType::ReactJs => TemplateSet {
                manifest: "manifests/react-js.package.json",
                directory: "react-js",
            },
            WidgetType::ReactTs => TemplateSet {
                manifest: "manifests/react-ts.package.json",
                directory: "react-ts",
            },
            WidgetType::LitJs => TemplateSet {
                manifest: "manifests/lit-js.package.json",
                directory: "lit-js",
            },
            WidgetType::LitTs => TemplateSet {
                manifest: "manifests/lit-ts.package.json",
                directory: "lit-ts",
            },
        }
    }

    fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|t| format!("'{}' ({})", t.label(), t.id()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WidgetType {
    type Err = GeneratorError;

    /// Accepts either the display label (`React - TS`) or the short id (`react-ts`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        WidgetType::ALL
            .into_iter()
            .find(|t| t.label() == wanted || t.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GeneratorError::UnknownWidgetType {
                label: wanted.to_string(),
                valid: Self::valid_labels(),
            })
    }
}

/// Build zip files for every widget template in a directory
pub async fn build_zips(template_dir: &Option<PathBuf>) -> Result<()> {
    let dir = template_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("crates/widget-core/templates"));

    if !dir.exists() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    println!("{}", "Building widget template zips...".cyan().bold());
    println!();

    let mut built = 0;
    for widget_type in WidgetType::ALL {
        let set = widget_type.template_set();
        let template_path = dir.join(set.directory);
        if !template_path.exists() {
            eprintln!(
                "{} Template directory not found: {}",
                "Warning:".yellow(),
                template_path.display()
            );
            continue;
        }

        print!("  {} {}...", "->".blue(), set.directory);

        match fetcher::build_local_zip(&dir, widget_type) {
            Ok(zip_bytes) => {
                let zip_path = dir.join(format!("{}.zip", set.directory));
                tokio::fs::write(&zip_path, &zip_bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", zip_path.display()))?;
                println!(" {} ({} bytes)", "done".green(), zip_bytes.len());
                built += 1;
            }
            Err(e) => {
                println!(" {}", "failed".red());
                eprintln!("    Error: {:#}", e);
            }
        }
    }

    println!();
    println!(
        "{} {} template zip(s) in {}",
        "Built".green().bold(),
        built,
        dir.display()
    );

    Ok(())
}
