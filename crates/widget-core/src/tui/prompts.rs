//! Charm-style CLI prompts using cliclack

use crate::config::{validate_widget_name, CreateFolder, GeneratorFlags};
use crate::generator::{Generator, Prompter, RunReport};
use crate::product::ProductConfig;
use crate::runtime::install::PackageManagerInstaller;
use crate::templates::{TemplateFetcher, WidgetType};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the built-in ones
    pub template_dir: Option<PathBuf>,

    /// Values already supplied on the command line
    pub flags: GeneratorFlags,
}

/// [`Prompter`] backed by cliclack
#[derive(Debug, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn intro(&mut self, message: &str) -> Result<()> {
        cliclack::intro(message)?;
        Ok(())
    }

    fn outro(&mut self, message: &str) -> Result<()> {
        cliclack::outro(message)?;
        Ok(())
    }

    fn info(&mut self, message: &str) -> Result<()> {
        cliclack::log::info(message)?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        cliclack::log::warning(message)?;
        Ok(())
    }

    fn ask_widget_name(&mut self, default: &str) -> Result<String> {
        let name: String = cliclack::input("What is the name of your widget to create? ([a-z0-9_-])")
            .placeholder(default)
            .default_input(default)
            .required(false)
            .validate(|input: &String| {
                validate_widget_name(input).map_err(|e| e.to_string())
            })
            .interact()?;
        Ok(name)
    }

    fn ask_create_folder(&mut self, default: CreateFolder) -> Result<CreateFolder> {
        let mut select = cliclack::select("Where do you want to place the files?");
        for mode in CreateFolder::ALL {
            select = select.item(mode, mode.description(), mode.as_str());
        }
        let mode: CreateFolder = select.initial_value(default).interact()?;
        Ok(mode)
    }

    fn ask_widget_type(&mut self) -> Result<WidgetType> {
        let mut select = cliclack::select("Which project type would you like to use?");
        for widget_type in WidgetType::ALL {
            select = select.item(widget_type, widget_type.label(), widget_type.id());
        }
        let widget_type: WidgetType = select.interact()?;
        Ok(widget_type)
    }
}

/// Run the generator with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<RunReport> {
    let fetcher = TemplateFetcher::from_config(config, args.template_dir)?;
    log::info!("Using {}", fetcher.source().describe());

    let root = std::env::current_dir().context("Failed to read current directory")?;
    let installer = PackageManagerInstaller::new(config.package_manager());
    let mut prompter = ClackPrompter;

    let mut generator = Generator::new(config, &fetcher, &mut prompter, &installer);
    generator.run(&root, &args.flags).await
}
