//! kiln CLI - Scaffolding for extension module projects

use anyhow::Result;
use clap::{Parser, Subcommand};
use kiln_core::tui::{AddModuleArgs, CreateArgs};
use kiln_core::ProductConfig;
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// kiln product configuration
#[derive(Clone)]
pub struct KilnConfig;

impl ProductConfig for KilnConfig {
    fn name(&self) -> &'static str {
        "kiln"
    }

    fn display_name(&self) -> &'static str {
        "kiln"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding extension module projects"
    }

    fn config_file_name(&self) -> &'static str {
        ".kiln.json"
    }

    fn default_group_id(&self) -> &'static str {
        "com.example"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/kiln-dev/kiln"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install kiln-tools --force"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&dir.to_path_buf()) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push("mvn clean install".to_string());
        steps.push("Add more modules with `kiln add-module`".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(about = "CLI for scaffolding extension module projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new extension project
    Create(CliCreateArgs),
    /// Add a module to an existing project
    AddModule(CliAddModuleArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use as the template pack instead of the built-in one (for pack development)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Maven group id
    #[arg(short, long)]
    pub group_id: Option<String>,

    /// Maven artifact id
    #[arg(short, long)]
    pub artifact_id: Option<String>,

    /// Project version
    #[arg(long)]
    pub version: Option<String>,

    /// Root Java package
    #[arg(short, long)]
    pub package: Option<String>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Print every staged file before flushing
    #[arg(long = "dump-files")]
    pub dump_files: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            group_id: args.group_id,
            artifact_id: args.artifact_id,
            version: args.version,
            package: args.package,
            directory: args.directory,
            dump_files: args.dump_files,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliAddModuleArgs {
    /// Local directory to use as the template pack instead of the built-in one (for pack development)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Artifact id of the new module
    #[arg(short, long)]
    pub artifact_id: Option<String>,

    /// Module version (defaults to the project version)
    #[arg(long)]
    pub version: Option<String>,

    /// Module packaging: amp or jar
    #[arg(long)]
    pub packaging: Option<String>,

    /// Target webapp: repo or share
    #[arg(long)]
    pub war: Option<String>,

    /// Module location: source, local or remote
    #[arg(long)]
    pub location: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Print every staged file before flushing
    #[arg(long = "dump-files")]
    pub dump_files: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliAddModuleArgs> for AddModuleArgs {
    fn from(args: CliAddModuleArgs) -> Self {
        AddModuleArgs {
            template_dir: args.template_dir,
            artifact_id: args.artifact_id,
            version: args.version,
            packaging: args.packaging,
            war: args.war,
            location: args.location,
            directory: args.directory,
            dump_files: args.dump_files,
            yes: args.yes,
        }
    }
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
    let config = KilnConfig;

    // Handle subcommands
    match args.command {
        Some(Command::Create(create_args)) => {
            let result = kiln_core::run_create(&config, create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::AddModule(add_args)) => {
            let result = kiln_core::run_add_module(&config, add_args.into(), CLI_VERSION).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let create_args = CreateArgs::default();
            let result = kiln_core::run_create(&config, create_args, CLI_VERSION).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
