//! Destination directory resolution

use crate::config::{folder_name, CreateFolder, OptionKey, Options};
use crate::error::GeneratorError;
use std::path::{Component, Path, PathBuf};

/// Resolve where generated files go
///
/// In `subdir` mode the widget folder is appended to `root` and recorded under
/// [`OptionKey::Subdir`]. In `current` mode `root` is returned unchanged.
///
/// A folder name that does not name a single new directory under `root`
/// (empty, `.`, `..`, or containing a separator) is rejected.
pub fn resolve(
    root: &Path,
    create_folder: CreateFolder,
    widget_name: &str,
    options: &mut Options,
) -> Result<PathBuf, GeneratorError> {
    match create_folder {
        CreateFolder::Subdir => {
            let folder = folder_name(widget_name);
            if !is_single_folder(&folder) {
                return Err(GeneratorError::InvalidFolderName(folder));
            }
            let destination = root.join(&folder);
            log::debug!("Using subfolder {}", destination.display());
            options.set(OptionKey::Subdir, folder);
            Ok(destination)
        }
        CreateFolder::Current => Ok(root.to_path_buf()),
    }
}

fn is_single_folder(folder: &str) -> bool {
    let mut components = Path::new(folder).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !folder.contains(|c| c == '/' || c == '\\')
}

/// Normalize an already resolved destination
///
/// Only cleans up `.` and `..` components, so running it again on its own
/// output gives the same path.
pub fn fixup(destination: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in destination.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdir_appends_folder() {
        let mut options = Options::new();
        let root = PathBuf::from("/work");

        let destination =
            resolve(&root, CreateFolder::Subdir, "My Widget", &mut options).unwrap();

        assert_eq!(destination, PathBuf::from("/work/my-widget"));
        assert_eq!(options.get(OptionKey::Subdir), Some("my-widget"));
    }

    #[test]
    fn test_current_keeps_root() {
        let mut options = Options::new();
        let root = PathBuf::from("/work");

        let destination =
            resolve(&root, CreateFolder::Current, "demo-widget", &mut options).unwrap();

        assert_eq!(destination, root);
        assert_eq!(options.get(OptionKey::Subdir), None);
    }

    #[test]
    fn test_fixup_does_not_append_folder_again() {
        let mut options = Options::new();
        let destination = resolve(
            Path::new("/work"),
            CreateFolder::Subdir,
            "demo-widget",
            &mut options,
        )
        .unwrap();

        let once = fixup(&destination);
        let twice = fixup(&once);

        assert_eq!(once, PathBuf::from("/work/demo-widget"));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_subdir_rejects_empty_folder_name() {
        let mut options = Options::new();

        let err =
            resolve(Path::new("/work"), CreateFolder::Subdir, "", &mut options).unwrap_err();

        assert!(matches!(err, GeneratorError::InvalidFolderName(ref f) if f.is_empty()));
        assert_eq!(options.get(OptionKey::Subdir), None);
    }

    #[test]
    fn test_subdir_rejects_names_leaving_root() {
        for name in [".", "..", "a/b", "../up", "a\\b"] {
            let mut options = Options::new();
            assert!(
                resolve(Path::new("/work"), CreateFolder::Subdir, name, &mut options).is_err(),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_current_accepts_empty_name() {
        let mut options = Options::new();
        let destination =
            resolve(Path::new("/work"), CreateFolder::Current, "", &mut options).unwrap();
        assert_eq!(destination, PathBuf::from("/work"));
    }

    #[test]
    fn test_fixup_normalizes_dots() {
        assert_eq!(
            fixup(Path::new("/work/./a/../demo-widget")),
            PathBuf::from("/work/demo-widget")
        );
        assert_eq!(fixup(Path::new("./")), PathBuf::from("."));
    }
}
