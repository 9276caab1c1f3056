//! External process handling
//!
//! This module provides dependency installation through the project's package
//! manager.

pub mod install;

pub use install::{install_dependencies, InstallOutcome, Installer, PackageManagerInstaller};
