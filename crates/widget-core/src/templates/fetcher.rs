//! Template loading from the embedded copy, a local directory, or a remote URL
//!
//! Local and remote templates both go through zip archives:
//! - Remote: Fetches pre-built `<dir>.zip` archives from a base URL
//! - Local: Builds the zip in memory from the template folder, then extracts it
//!
//! The embedded copy is compiled into the binary and read directly.

use super::WidgetType;
use crate::error::GeneratorError;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

static EMBEDDED_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Where widget templates are read from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Templates compiled into the binary
    Embedded,
    Local(PathBuf),
    Remote(Url),
}

impl TemplateSource {
    /// Pick the source for a product: explicit directory, then the URL override
    /// environment variable, then the embedded templates
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = template_dir {
            return Ok(Self::Local(path));
        }

        match std::env::var(config.template_url_env()) {
            Ok(url_str) if !url_str.trim().is_empty() => {
                let url = Url::parse(url_str.trim())
                    .with_context(|| format!("Invalid template URL: {}", url_str))?;
                Ok(Self::Remote(url))
            }
            _ => Ok(Self::Embedded),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded => "built-in templates".to_string(),
            TemplateSource::Local(path) => format!("local templates from {}", path.display()),
            TemplateSource::Remote(url) => format!("remote templates from {}", url),
        }
    }
}

/// Everything needed to generate one widget flavor
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    pub widget_type: WidgetType,
    /// Parsed manifest template (package.json contents)
    pub manifest: serde_json::Value,
    /// Template tree, keyed by `/`-separated path relative to the template directory
    pub files: BTreeMap<String, Vec<u8>>,
}

/// Template fetcher - resolves a [`WidgetType`] to its [`TemplateBundle`]
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<Self> {
        let source = TemplateSource::from_config(config, template_dir)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Fetcher over the templates compiled into the binary
    pub fn embedded() -> Self {
        Self::new(TemplateSource::Embedded, "widget-core")
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::Local(path), user_agent)
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Load the manifest template and template tree for a widget type
    pub async fn fetch(&self, widget_type: WidgetType) -> Result<TemplateBundle> {
        let set = widget_type.template_set();
        log::debug!(
            "Loading template '{}' from {}",
            set.directory,
            self.source.describe()
        );

        let (manifest_bytes, files) = match &self.source {
            TemplateSource::Embedded => {
                let manifest = EMBEDDED_TEMPLATES
                    .get_file(set.manifest)
                    .ok_or_else(|| GeneratorError::MissingTemplateFile {
                        template: set.directory.to_string(),
                        path: set.manifest.to_string(),
                    })?
                    .contents()
                    .to_vec();
                (manifest, embedded_files(set.directory)?)
            }
            TemplateSource::Local(path) => {
                let manifest_path = path.join(set.manifest);
                let manifest = fs::read(&manifest_path)
                    .await
                    .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
                let zip_bytes = build_local_zip(path, widget_type)?;
                (manifest, extract_zip(&zip_bytes, set.directory)?)
            }
            TemplateSource::Remote(base_url) => {
                let manifest_url = build_url(base_url, set.manifest)?;
                let manifest = self.download(&manifest_url).await?;
                let zip_url = build_url(base_url, &format!("{}.zip", set.directory))?;
                let zip_bytes = self.download(&zip_url).await?;
                (manifest, extract_zip(&zip_bytes, set.directory)?)
            }
        };

        let manifest: serde_json::Value = serde_json::from_slice(&manifest_bytes)
            .with_context(|| format!("Failed to parse manifest template {}", set.manifest))?;
        if !manifest.is_object() {
            return Err(GeneratorError::InvalidManifest(set.directory.to_string()).into());
        }

        log::debug!("Template '{}' has {} files", set.directory, files.len());

        Ok(TemplateBundle {
            widget_type,
            manifest,
            files,
        })
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch {}: HTTP {}", url, response.status());
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Build a URL by appending a relative path, preserving query parameters
fn build_url(base: &Url, relative: &str) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?;
        segments.pop_if_empty();
        for segment in relative.split('/') {
            segments.push(segment);
        }
    }
    Ok(url)
}

/// Collect the embedded template tree for a directory
fn embedded_files(directory: &str) -> Result<BTreeMap<String, Vec<u8>>> {
    let root = EMBEDDED_TEMPLATES
        .get_dir(directory)
        .ok_or_else(|| anyhow::anyhow!("Built-in template '{}' not found", directory))?;

    let mut files = BTreeMap::new();
    collect_embedded(root, Path::new(directory), &mut files);
    Ok(files)
}

fn collect_embedded(dir: &Dir<'_>, root: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    for file in dir.files() {
        if let Ok(relative) = file.path().strip_prefix(root) {
            files.insert(to_slash_path(relative), file.contents().to_vec());
        }
    }
    for child in dir.dirs() {
        collect_embedded(child, root, files);
    }
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a zip archive for a local template directory
///
/// Entries are stored as `<dir>/<relative path>`, matching the archives served
/// from a remote template URL.
pub fn build_local_zip(template_dir: &Path, widget_type: WidgetType) -> Result<Vec<u8>> {
    let directory = widget_type.template_set().directory;
    let template_path = template_dir.join(directory);
    if !template_path.is_dir() {
        anyhow::bail!("Template directory not found: {}", template_path.display());
    }

    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for entry in WalkDir::new(&template_path).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to walk {}", template_path.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&template_path)
                .context("Template file outside template directory")?;
            let content = std::fs::read(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;

            zip.start_file(format!("{}/{}", directory, to_slash_path(relative)), options)?;
            zip.write_all(&content)?;
        }

        zip.finish()?;
    }

    Ok(zip_buffer)
}

/// Extract a template zip, stripping the `<dir>/` prefix from entry names
pub(crate) fn extract_zip(
    zip_bytes: &[u8],
    directory: &str,
) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))
        .with_context(|| format!("Failed to read zip archive for template '{}'", directory))?;

    let prefix = format!("{}/", directory);
    let mut files = BTreeMap::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        // Reject entries that would escape the destination
        let Some(enclosed) = file.enclosed_name() else {
            log::warn!("Skipping unsafe zip entry '{}'", file.name());
            continue;
        };
        let full_path = to_slash_path(&enclosed);
        let relative_path = full_path
            .strip_prefix(&prefix)
            .map(str::to_string)
            .unwrap_or(full_path);

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        files.insert(relative_path, contents);
    }

    Ok(files)
}
