//! Generator options
//!
//! Options are collected progressively (flags first, then prompt answers) in an
//! [`Options`] store and frozen into an immutable [`WidgetConfig`] before any file
//! is written. Every later step receives the frozen config by reference.

pub mod name;

use crate::error::GeneratorError;
use crate::templates::WidgetType;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub use name::{folder_name, validate_widget_name, DEFAULT_WIDGET_NAME};

/// Keys understood by the option store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    WidgetName,
    WidgetType,
    CreateFolder,
    Subdir,
}

impl OptionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::WidgetName => "name",
            OptionKey::WidgetType => "type",
            OptionKey::CreateFolder => "createFolder",
            OptionKey::Subdir => "subdir",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the generated files should land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateFolder {
    /// Use the current working directory
    #[default]
    Current,
    /// Create a subfolder named after the widget
    Subdir,
}

impl CreateFolder {
    pub const ALL: [CreateFolder; 2] = [CreateFolder::Current, CreateFolder::Subdir];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreateFolder::Current => "current",
            CreateFolder::Subdir => "subdir",
        }
    }

    /// Label shown in the interactive select
    pub fn description(&self) -> &'static str {
        match self {
            CreateFolder::Current => "Use the current folder",
            CreateFolder::Subdir => "Create a subfolder with solution name",
        }
    }
}

impl fmt::Display for CreateFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreateFolder {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "current" => Ok(CreateFolder::Current),
            "subdir" => Ok(CreateFolder::Subdir),
            other => Err(GeneratorError::UnknownFolderMode(other.to_string())),
        }
    }
}

/// Flag values as supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct GeneratorFlags {
    pub name: Option<String>,
    pub create_folder: Option<CreateFolder>,
    pub widget_type: Option<WidgetType>,
    pub skip_install: bool,
    pub force: bool,
}

/// Mutable key/value store used while options are still being gathered
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: HashMap<OptionKey, String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from command-line flags
    pub fn from_flags(flags: &GeneratorFlags) -> Self {
        let mut options = Self::new();
        if let Some(name) = &flags.name {
            options.set(OptionKey::WidgetName, name.clone());
        }
        if let Some(widget_type) = flags.widget_type {
            options.set(OptionKey::WidgetType, widget_type.label());
        }
        if let Some(create_folder) = flags.create_folder {
            options.set(OptionKey::CreateFolder, create_folder.as_str());
        }
        options
    }

    pub fn set(&mut self, key: OptionKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: OptionKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Freeze the store into a [`WidgetConfig`]
    pub fn build(&self) -> Result<WidgetConfig, GeneratorError> {
        let widget_name = self
            .get(OptionKey::WidgetName)
            .ok_or(GeneratorError::MissingOption(OptionKey::WidgetName.as_str()))?
            .to_string();
        let widget_type = self
            .get(OptionKey::WidgetType)
            .ok_or(GeneratorError::MissingOption(OptionKey::WidgetType.as_str()))?
            .parse::<WidgetType>()?;
        let create_folder = match self.get(OptionKey::CreateFolder) {
            Some(value) => value.parse::<CreateFolder>()?,
            None => CreateFolder::default(),
        };
        let subdir = match create_folder {
            CreateFolder::Subdir => self.get(OptionKey::Subdir).map(str::to_string),
            CreateFolder::Current => None,
        };

        Ok(WidgetConfig {
            widget_name,
            widget_type,
            create_folder,
            subdir,
        })
    }
}

/// Immutable configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub widget_name: String,
    pub widget_type: WidgetType,
    pub create_folder: CreateFolder,
    /// Resolved subdirectory name, only set in `subdir` mode
    pub subdir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut options = Options::new();
        assert_eq!(options.get(OptionKey::WidgetName), None);

        options.set(OptionKey::WidgetName, "demo");
        assert_eq!(options.get(OptionKey::WidgetName), Some("demo"));

        options.set(OptionKey::WidgetName, "other");
        assert_eq!(options.get(OptionKey::WidgetName), Some("other"));
    }

    #[test]
    fn test_from_flags_only_sets_supplied_values() {
        let flags = GeneratorFlags {
            name: Some("demo-widget".to_string()),
            widget_type: Some(WidgetType::ReactTs),
            ..Default::default()
        };
        let options = Options::from_flags(&flags);

        assert_eq!(options.get(OptionKey::WidgetName), Some("demo-widget"));
        assert_eq!(options.get(OptionKey::WidgetType), Some("React - TS"));
        assert!(!options.contains(OptionKey::CreateFolder));
    }

    #[test]
    fn test_build_config() {
        let mut options = Options::new();
        options.set(OptionKey::WidgetName, "my-widget");
        options.set(OptionKey::WidgetType, "Lit - JS");
        options.set(OptionKey::CreateFolder, "subdir");
        options.set(OptionKey::Subdir, "my-widget");

        let config = options.build().unwrap();
        assert_eq!(config.widget_name, "my-widget");
        assert_eq!(config.widget_type, WidgetType::LitJs);
        assert_eq!(config.create_folder, CreateFolder::Subdir);
        assert_eq!(config.subdir.as_deref(), Some("my-widget"));
    }

    #[test]
    fn test_build_drops_subdir_in_current_mode() {
        let mut options = Options::new();
        options.set(OptionKey::WidgetName, "my-widget");
        options.set(OptionKey::WidgetType, "VanillaJS");
        options.set(OptionKey::Subdir, "leftover");

        let config = options.build().unwrap();
        assert_eq!(config.create_folder, CreateFolder::Current);
        assert_eq!(config.subdir, None);
    }

    #[test]
    fn test_build_missing_type() {
        let mut options = Options::new();
        options.set(OptionKey::WidgetName, "my-widget");

        let err = options.build().unwrap_err();
        assert!(matches!(err, GeneratorError::MissingOption("type")));
    }

    #[test]
    fn test_build_unknown_type() {
        let mut options = Options::new();
        options.set(OptionKey::WidgetName, "my-widget");
        options.set(OptionKey::WidgetType, "Angular");

        let err = options.build().unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownWidgetType { .. }));
    }

    #[test]
    fn test_create_folder_parse() {
        assert_eq!("current".parse::<CreateFolder>().unwrap(), CreateFolder::Current);
        assert_eq!("subdir".parse::<CreateFolder>().unwrap(), CreateFolder::Subdir);
        assert!("elsewhere".parse::<CreateFolder>().is_err());
    }
}
