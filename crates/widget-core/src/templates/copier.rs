//! Template tree copying into the destination root

use crate::templates::fetcher::TemplateBundle;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Files handled by [`copy_template`], as paths relative to the destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub written: Vec<String>,
    /// Files that already existed and were kept because `force` was off
    pub skipped: Vec<String>,
}

impl CopyReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Copy every file of the template tree into `target_dir`
///
/// Existing files are left alone unless `force` is set.
pub async fn copy_template(
    bundle: &TemplateBundle,
    target_dir: &Path,
    force: bool,
) -> Result<CopyReport> {
    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut report = CopyReport::default();

    for (file_path, content) in &bundle.files {
        let target_path = target_dir.join(file_path);

        let exists = fs::try_exists(&target_path)
            .await
            .with_context(|| format!("Failed to check {}", target_path.display()))?;
        if !force && exists {
            log::debug!("Keeping existing file {}", target_path.display());
            report.skipped.push(file_path.clone());
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        report.written.push(file_path.clone());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::WidgetType;
    use std::collections::BTreeMap;

    fn bundle() -> TemplateBundle {
        let mut files = BTreeMap::new();
        files.insert("index.html".to_string(), b"<div></div>".to_vec());
        files.insert("src/index.js".to_string(), b"console.log(1);".to_vec());
        files.insert(".gitignore".to_string(), b"node_modules\n".to_vec());
        TemplateBundle {
            widget_type: WidgetType::Vanilla,
            manifest: serde_json::json!({ "name": "vanilla" }),
            files,
        }
    }

    #[tokio::test]
    async fn test_copies_nested_files() {
        let dir = tempfile::tempdir().unwrap();

        let report = copy_template(&bundle(), dir.path(), false).await.unwrap();

        assert_eq!(report.written.len(), 3);
        assert!(report.skipped.is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("src/index.js")).unwrap(),
            "console.log(1);"
        );
        assert!(dir.path().join(".gitignore").is_file());
    }

    #[tokio::test]
    async fn test_existing_files_are_kept_without_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "mine").unwrap();

        let report = copy_template(&bundle(), dir.path(), false).await.unwrap();

        assert_eq!(report.skipped, vec!["index.html".to_string()]);
        assert_eq!(report.total(), 3);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "mine"
        );
    }

    #[tokio::test]
    async fn test_force_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "mine").unwrap();

        let report = copy_template(&bundle(), dir.path(), true).await.unwrap();

        assert!(report.skipped.is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<div></div>"
        );
    }

    #[tokio::test]
    async fn test_unreadable_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // `src` is a file, so looking up `src/index.js` fails instead of reporting absent
        std::fs::write(dir.path().join("src"), "not a directory").unwrap();

        let err = copy_template(&bundle(), dir.path(), false).await.unwrap_err();

        assert!(
            err.to_string().starts_with("Failed to check"),
            "unexpected error: {:#}",
            err
        );
        assert!(err.to_string().contains("index.js"));
    }

    #[tokio::test]
    async fn test_creates_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/widget");

        copy_template(&bundle(), &target, false).await.unwrap();

        assert!(target.join("src/index.js").is_file());
    }
}
