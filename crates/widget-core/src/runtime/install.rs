//! Dependency installation through the package manager
//!
//! The install step is the only place the generator spawns an external
//! process. It goes through the [`Installer`] trait so the run can be driven
//! without a real package manager.

use crate::config::{CreateFolder, WidgetConfig};
use crate::error::GeneratorError;
use anyhow::{Context, Result};
use colored::Colorize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Something that can install a project's dependencies in a directory
pub trait Installer {
    /// Command line shown to the user, e.g. `npm install`
    fn command_line(&self) -> String;

    /// Run the install in `working_dir` and wait for it to finish
    fn install(&self, working_dir: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Runs `<package manager> install` as a child process
#[derive(Debug, Clone)]
pub struct PackageManagerInstaller {
    program: String,
    args: Vec<String>,
}

impl PackageManagerInstaller {
    /// `<program> install`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["install".to_string()],
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Installer for PackageManagerInstaller {
    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn install(&self, working_dir: &Path) -> Result<()> {
        let cmd = self.command_line();
        println!();
        println!(
            "{} {} {}",
            "Running:".dimmed(),
            cmd.yellow(),
            format!("(in {})", working_dir.display()).dimmed()
        );
        println!();

        let status = TokioCommand::new(&self.program)
            .args(&self.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to run `{}`. Is {} installed?", cmd, self.program))?;

        println!();
        if status.success() {
            Ok(())
        } else {
            Err(GeneratorError::InstallFailed {
                dir: working_dir.to_path_buf(),
                code: status.code().unwrap_or(-1),
            }
            .into())
        }
    }
}

/// What the install step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// `--skip-install` was given
    Skipped,
    /// Files were generated into the current folder, so nothing was installed
    NotInSubdir,
    /// Dependencies were installed in this directory
    Installed(PathBuf),
}

impl InstallOutcome {
    pub fn installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed(_))
    }
}

/// Install dependencies for a freshly generated widget
///
/// Installation only happens when the widget got its own subfolder.
pub async fn install_dependencies<I: Installer>(
    installer: &I,
    config: &WidgetConfig,
    destination: &Path,
    skip_install: bool,
) -> Result<InstallOutcome> {
    if skip_install {
        return Ok(InstallOutcome::Skipped);
    }

    match config.create_folder {
        CreateFolder::Subdir => {
            log::debug!(
                "Running `{}` in {}",
                installer.command_line(),
                destination.display()
            );
            installer.install(destination).await?;
            Ok(InstallOutcome::Installed(destination.to_path_buf()))
        }
        CreateFolder::Current => {
            log::debug!("Not installing dependencies into the current folder");
            Ok(InstallOutcome::NotInSubdir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::WidgetType;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingInstaller {
        calls: Mutex<Vec<PathBuf>>,
    }

    impl Installer for RecordingInstaller {
        fn command_line(&self) -> String {
            "fake install".to_string()
        }

        async fn install(&self, working_dir: &Path) -> Result<()> {
            self.calls.lock().unwrap().push(working_dir.to_path_buf());
            Ok(())
        }
    }

    fn config(create_folder: CreateFolder) -> WidgetConfig {
        WidgetConfig {
            widget_name: "demo-widget".to_string(),
            widget_type: WidgetType::Vanilla,
            create_folder,
            subdir: match create_folder {
                CreateFolder::Subdir => Some("demo-widget".to_string()),
                CreateFolder::Current => None,
            },
        }
    }

    #[tokio::test]
    async fn test_skip_install_spawns_nothing() {
        for mode in CreateFolder::ALL {
            let installer = RecordingInstaller::default();
            let outcome =
                install_dependencies(&installer, &config(mode), Path::new("/work"), true)
                    .await
                    .unwrap();

            assert_eq!(outcome, InstallOutcome::Skipped);
            assert!(installer.calls.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_current_folder_spawns_nothing() {
        let installer = RecordingInstaller::default();
        let outcome = install_dependencies(
            &installer,
            &config(CreateFolder::Current),
            Path::new("/work"),
            false,
        )
        .await
        .unwrap();

        assert_eq!(outcome, InstallOutcome::NotInSubdir);
        assert!(installer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subdir_installs_in_destination() {
        let installer = RecordingInstaller::default();
        let destination = Path::new("/work/demo-widget");
        let outcome = install_dependencies(
            &installer,
            &config(CreateFolder::Subdir),
            destination,
            false,
        )
        .await
        .unwrap();

        assert!(outcome.installed());
        assert_eq!(
            *installer.calls.lock().unwrap(),
            vec![destination.to_path_buf()]
        );
    }

    #[test]
    fn test_package_manager_command_line() {
        let installer = PackageManagerInstaller::new("npm");
        assert_eq!(installer.command_line(), "npm install");
        assert_eq!(installer.program(), "npm");
    }

    #[tokio::test]
    async fn test_missing_package_manager_fails() {
        let dir = tempfile::tempdir().unwrap();
        let installer = PackageManagerInstaller::new("definitely-not-a-package-manager-xyz");

        let err = installer.install(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to run"));
    }
}
