//! Setup RN CLI - Interactive React Native project setup

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use setup_rn_core::tui::CreateArgs;
use setup_rn_core::{Editor, FeatureId, FrameworkVariant, LanguageVariant};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Plain-text log written by `--log`
const LOG_FILE: &str = "setup-rn-cli.log";

#[derive(Parser, Debug)]
#[command(name = "setup-rn")]
#[command(about = "Interactive CLI to set up a React Native project with Expo or the React Native CLI")]
#[command(version)]
pub struct Args {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to setup-rn-cli.log
    #[arg(long, global = true)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new React Native project
    Create(CliCreateArgs),
    /// List the feature packages and what they install
    Features {
        /// Only show the packages for this framework
        #[arg(short, long, value_enum)]
        framework: Option<FrameworkVariant>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct CliCreateArgs {
    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long, value_enum)]
    pub framework: Option<FrameworkVariant>,

    #[arg(short, long, value_enum)]
    pub language: Option<LanguageVariant>,

    /// Feature packages (comma-separated, see `setup-rn features`)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub features: Option<Vec<FeatureId>>,

    /// Initialize a Git repository
    #[arg(long, conflicts_with = "no_git")]
    pub git: bool,

    /// Skip Git initialization
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Install dependencies after setup
    #[arg(long, conflicts_with = "no_install")]
    pub install: bool,

    /// Skip dependency installation
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Editor to open the project in
    #[arg(short, long, value_enum)]
    pub editor: Option<Editor>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Save the chosen options as defaults in .setuprc.json
    #[arg(long = "save-defaults")]
    pub save_defaults: bool,
}

/// Collapse a `--flag/--no-flag` pair into an optional answer
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            framework: args.framework,
            language: args.language,
            features: args.features,
            git: flag_pair(args.git, args.no_git),
            install: flag_pair(args.install, args.no_install),
            editor: args.editor,
            yes: args.yes,
            save_defaults: args.save_defaults,
        }
    }
}

fn init_logging(verbose: bool, log_to_file: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let file_layer = if log_to_file {
        let file = File::create(LOG_FILE).with_context(|| format!("Failed to create {LOG_FILE}"))?;
        Some(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(filter()),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

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
    init_logging(args.verbose, args.log)?;
    tracing::debug!(version = CLI_VERSION, command = ?args.command, "starting");

    match args.command {
        Some(Command::Features { framework }) => {
            setup_rn_core::tui::list_features(framework);
            Ok(())
        }
        command => {
            // No subcommand provided, default to create behavior (interactive mode)
            let create_args = match command {
                Some(Command::Create(create_args)) => create_args.into(),
                _ => CreateArgs::default(),
            };
            let result = setup_rn_core::run(create_args, CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
