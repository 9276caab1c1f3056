//! Happeo Widget CLI - Project scaffolding for Happeo custom widgets

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use widget_core::tui::CreateArgs;
use widget_core::{CreateFolder, GeneratorFlags, ProductConfig, WidgetConfig, WidgetType};

/// Happeo product configuration
#[derive(Clone)]
pub struct HappeoConfig;

impl ProductConfig for HappeoConfig {
    fn name(&self) -> &'static str {
        "happeo-widget"
    }

    fn display_name(&self) -> &'static str {
        "Happeo Widget Generator"
    }

    fn template_url_env(&self) -> &'static str {
        "HAPPEO_WIDGET_TEMPLATE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/happeo/widgets-sdk"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding Happeo custom widgets"
    }

    fn next_steps(&self, dir: &Path, _config: &WidgetConfig, installed: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        if !installed {
            steps.push(format!("{} install", self.package_manager()));
        }

        steps.push(format!("{} start", self.package_manager()));
        steps.push(format!("Widget SDK docs: {}", self.docs_url()));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "happeo-widget")]
#[command(about = "CLI for scaffolding Happeo custom widgets")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new widget project
    Create(CliCreateArgs),
    /// Build zip files for all templates in the template directory (for development use)
    BuildZips(BuildZipsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CliCreateArgs {
    /// The name of the widget to create
    #[arg(short, long)]
    pub name: Option<String>,

    /// Where to place the files: current or subdir
    #[arg(short = 'c', long = "create-folder", alias = "createFolder", value_parser = parse_create_folder)]
    pub create_folder: Option<CreateFolder>,

    /// Which project type to use (e.g. "React - TS" or react-ts)
    #[arg(short = 't', long = "type", value_parser = parse_widget_type)]
    pub widget_type: Option<WidgetType>,

    /// Do not automatically install dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Overwrite template files that already exist in the destination
    #[arg(long)]
    pub force: bool,

    /// Local directory to use for templates instead of the built-in ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            flags: GeneratorFlags {
                name: args.name,
                create_folder: args.create_folder,
                widget_type: args.widget_type,
                skip_install: args.skip_install,
                force: args.force,
            },
        }
    }
}

#[derive(Parser, Debug)]
pub struct BuildZipsArgs {
    /// Local directory containing templates to build zips from (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

fn parse_create_folder(value: &str) -> Result<CreateFolder, String> {
    value.parse().map_err(|e: widget_core::GeneratorError| e.to_string())
}

fn parse_widget_type(value: &str) -> Result<WidgetType, String> {
    value.parse().map_err(|e: widget_core::GeneratorError| e.to_string())
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

async fn create(config: &HappeoConfig, args: CliCreateArgs) -> Result<()> {
    let result = widget_core::run(config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    let report = result?;
    log::debug!(
        "Generated {} widget in {} ({} files written, {} kept, install: {:?})",
        report.config.widget_type,
        report.destination.display(),
        report.files.written.len(),
        report.files.skipped.len(),
        report.install
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let verbose = match &args.command {
        Some(Command::Create(create_args)) => create_args.verbose.max(args.create.verbose),
        _ => args.create.verbose,
    };
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .format_timestamp(None)
        .init();

    let config = HappeoConfig;

    // Handle subcommands
    match args.command {
        Some(Command::Create(create_args)) => create(&config, create_args).await,
        Some(Command::BuildZips(build_args)) => {
            widget_core::templates::build_zips(&build_args.template_dir).await
        }
        // No subcommand provided, default to create behavior
        None => create(&config, args.create).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_flags_without_subcommand() {
        let args = Args::parse_from([
            "happeo-widget",
            "--name",
            "demo-widget",
            "--createFolder",
            "current",
            "--type",
            "VanillaJS",
            "--skip-install",
        ]);

        assert!(args.command.is_none());
        assert_eq!(args.create.name.as_deref(), Some("demo-widget"));
        assert_eq!(args.create.create_folder, Some(CreateFolder::Current));
        assert_eq!(args.create.widget_type, Some(WidgetType::Vanilla));
        assert!(args.create.skip_install);
    }

    #[test]
    fn test_create_subcommand_short_flags() {
        let args = Args::parse_from([
            "happeo-widget",
            "create",
            "-n",
            "demo",
            "-c",
            "subdir",
            "-t",
            "lit-ts",
        ]);

        match args.command {
            Some(Command::Create(create)) => {
                assert_eq!(create.create_folder, Some(CreateFolder::Subdir));
                assert_eq!(create.widget_type, Some(WidgetType::LitTs));
                assert!(!create.skip_install);
            }
            other => panic!("expected create subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = Args::try_parse_from(["happeo-widget", "--type", "Angular"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(log_level(0), log::LevelFilter::Warn);
        assert_eq!(log_level(2), log::LevelFilter::Debug);
        assert_eq!(log_level(9), log::LevelFilter::Trace);
    }

    #[test]
    fn test_next_steps_when_not_installed() {
        let config = WidgetConfig {
            widget_name: "demo".to_string(),
            widget_type: WidgetType::Vanilla,
            create_folder: CreateFolder::Subdir,
            subdir: Some("demo".to_string()),
        };
        let steps = HappeoConfig.next_steps(Path::new("/nowhere/demo"), &config, false);

        assert_eq!(steps[0], "cd /nowhere/demo");
        assert!(steps.contains(&"npm install".to_string()));
        assert!(steps.contains(&"npm start".to_string()));
    }
}
