//! Package manifest (package.json) creation

use crate::error::GeneratorError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// File name of the package manifest at the destination root
pub const MANIFEST_FILE: &str = "package.json";

/// Result of [`write_manifest_if_absent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    /// A new manifest was written at this path
    Created(PathBuf),
    /// A manifest already existed at this path and was left untouched
    Skipped(PathBuf),
}

impl ManifestOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ManifestOutcome::Created(path) | ManifestOutcome::Skipped(path) => path,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ManifestOutcome::Created(_) => "Creating a new package.json file for the project.",
            ManifestOutcome::Skipped(_) => {
                "The package.json already existed, skipping the creation of a new one."
            }
        }
    }
}

/// Render a manifest template with its `name` replaced by the widget name
pub fn render_manifest(template: &serde_json::Value, widget_name: &str) -> Result<String> {
    let mut manifest = template.clone();
    let object = manifest
        .as_object_mut()
        .ok_or_else(|| GeneratorError::InvalidManifest(widget_name.to_string()))?;
    object.insert(
        "name".to_string(),
        serde_json::Value::String(widget_name.to_string()),
    );

    let mut rendered =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize package.json")?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write `package.json` into `destination` unless one already exists there
pub async fn write_manifest_if_absent(
    destination: &Path,
    template: &serde_json::Value,
    widget_name: &str,
) -> Result<ManifestOutcome> {
    let manifest_path = destination.join(MANIFEST_FILE);

    let exists = fs::try_exists(&manifest_path)
        .await
        .with_context(|| format!("Failed to check {}", manifest_path.display()))?;
    if exists {
        log::debug!("Keeping existing {}", manifest_path.display());
        return Ok(ManifestOutcome::Skipped(manifest_path));
    }

    let rendered = render_manifest(template, widget_name)?;

    fs::create_dir_all(destination)
        .await
        .with_context(|| format!("Failed to create directory: {}", destination.display()))?;
    fs::write(&manifest_path, rendered)
        .await
        .with_context(|| format!("Failed to write file: {}", manifest_path.display()))?;

    Ok(ManifestOutcome::Created(manifest_path))
}
