//! Widget generation run
//!
//! A run moves through a fixed sequence of phases:
//!
//! `Init -> Prompting -> Configuring -> WritingFiles -> FolderFixup -> Installing -> Done`
//!
//! There is no branching back and no retry. Steps that have nothing to do
//! (manifest already present, install skipped) still advance the phase.

use crate::config::{
    validate_widget_name, CreateFolder, GeneratorFlags, OptionKey, Options, WidgetConfig,
    DEFAULT_WIDGET_NAME,
};
use crate::destination;
use crate::product::ProductConfig;
use crate::runtime::install::{install_dependencies, InstallOutcome, Installer};
use crate::templates::{copy_template, write_manifest_if_absent, CopyReport, ManifestOutcome};
use crate::templates::{TemplateFetcher, WidgetType};
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Message printed when a run finishes
pub const DONE_MESSAGE: &str = "All done! You can start building your widget!";

/// Phase of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Init,
    Prompting,
    Configuring,
    WritingFiles,
    FolderFixup,
    Installing,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::Prompting => "prompting",
            Phase::Configuring => "configuring",
            Phase::WritingFiles => "writing files",
            Phase::FolderFixup => "folder fixup",
            Phase::Installing => "installing",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// User interaction used by a run
///
/// The `tui` module implements this with cliclack. Questions are only asked
/// for values that were not supplied as flags.
pub trait Prompter {
    fn intro(&mut self, message: &str) -> Result<()>;

    fn outro(&mut self, message: &str) -> Result<()>;

    fn info(&mut self, message: &str) -> Result<()>;

    fn warning(&mut self, message: &str) -> Result<()>;

    /// Ask for the widget name; the answer is validated by the caller
    fn ask_widget_name(&mut self, default: &str) -> Result<String>;

    fn ask_create_folder(&mut self, default: CreateFolder) -> Result<CreateFolder>;

    fn ask_widget_type(&mut self) -> Result<WidgetType>;
}

/// Ask the questions whose answers are still missing from `options`
///
/// Invalid widget names are reported through [`Prompter::warning`] and asked
/// again until a valid one is entered.
pub fn prompt_missing<P: Prompter>(prompter: &mut P, options: &mut Options) -> Result<()> {
    if !options.contains(OptionKey::WidgetName) {
        let name = loop {
            let input = prompter.ask_widget_name(DEFAULT_WIDGET_NAME)?;
            match validate_widget_name(&input) {
                Ok(()) => break input,
                Err(e) => prompter.warning(&e.to_string())?,
            }
        };
        options.set(OptionKey::WidgetName, name);
    }

    if !options.contains(OptionKey::CreateFolder) {
        let create_folder = prompter.ask_create_folder(CreateFolder::default())?;
        options.set(OptionKey::CreateFolder, create_folder.as_str());
    }

    if !options.contains(OptionKey::WidgetType) {
        let widget_type = prompter.ask_widget_type()?;
        options.set(OptionKey::WidgetType, widget_type.label());
    }

    Ok(())
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub config: WidgetConfig,
    pub destination: PathBuf,
    pub manifest: ManifestOutcome,
    pub files: CopyReport,
    pub install: InstallOutcome,
    pub phase: Phase,
}

/// Drives one widget generation run
pub struct Generator<'a, C, P, I> {
    product: &'a C,
    fetcher: &'a TemplateFetcher,
    prompter: &'a mut P,
    installer: &'a I,
    phase: Phase,
}

impl<'a, C, P, I> Generator<'a, C, P, I>
where
    C: ProductConfig,
    P: Prompter,
    I: Installer,
{
    pub fn new(
        product: &'a C,
        fetcher: &'a TemplateFetcher,
        prompter: &'a mut P,
        installer: &'a I,
    ) -> Self {
        Self {
            product,
            fetcher,
            prompter,
            installer,
            phase: Phase::Init,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!("{} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Generate a widget under `root` (normally the current directory)
    pub async fn run(&mut self, root: &Path, flags: &GeneratorFlags) -> Result<RunReport> {
        self.prompter.intro(&self.product.welcome_message())?;
        let mut options = Options::from_flags(flags);

        self.enter(Phase::Prompting);
        prompt_missing(self.prompter, &mut options)?;

        // The destination is fixed here, before anything is written
        let create_folder = options
            .get(OptionKey::CreateFolder)
            .map(str::parse::<CreateFolder>)
            .transpose()?
            .unwrap_or_default();
        let widget_name = options
            .get(OptionKey::WidgetName)
            .unwrap_or(DEFAULT_WIDGET_NAME)
            .to_string();
        let destination = destination::resolve(root, create_folder, &widget_name, &mut options)?;
        let config = options.build()?;

        self.enter(Phase::Configuring);
        let bundle = self.fetcher.fetch(config.widget_type).await?;
        let manifest =
            write_manifest_if_absent(&destination, &bundle.manifest, &config.widget_name).await?;
        self.prompter.info(manifest.message())?;

        self.enter(Phase::WritingFiles);
        self.prompter
            .info(&format!("Creating widget files in {}", destination.display()))?;
        let files = copy_template(&bundle, &destination, flags.force).await?;
        if !files.skipped.is_empty() {
            self.prompter.warning(&format!(
                "Kept {} existing file(s): {} (use --force to overwrite)",
                files.skipped.len(),
                files.skipped.join(", ")
            ))?;
        }

        self.enter(Phase::FolderFixup);
        let destination = match config.create_folder {
            CreateFolder::Subdir => destination::fixup(&destination),
            CreateFolder::Current => destination,
        };

        self.enter(Phase::Installing);
        if flags.skip_install {
            self.prompter.info("Skipping dependency installation")?;
        } else {
            self.prompter.info("Installing dependencies")?;
        }
        let install =
            install_dependencies(self.installer, &config, &destination, flags.skip_install)
                .await?;
        if install == InstallOutcome::NotInSubdir {
            self.prompter.info(&format!(
                "Run `{}` in {} to install dependencies",
                self.installer.command_line(),
                destination.display()
            ))?;
        }

        self.enter(Phase::Done);
        let steps = self
            .product
            .next_steps(&destination, &config, install.installed());
        if !steps.is_empty() {
            let numbered: Vec<String> = steps
                .iter()
                .enumerate()
                .map(|(i, step)| format!("  {}.  {}", i + 1, step))
                .collect();
            self.prompter
                .info(&format!("Next steps\n{}", numbered.join("\n")))?;
        }
        self.prompter.outro(DONE_MESSAGE)?;

        Ok(RunReport {
            config,
            destination,
            manifest,
            files,
            install,
            phase: self.phase,
        })
    }
}
