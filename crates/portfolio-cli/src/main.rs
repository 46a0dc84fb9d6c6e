mod cmd;
mod html;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "portfoliodb",
    about = "Keep track of a directory of personal projects and their descriptions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file (default: ~/.config/portfoliodb/config.yaml)
    #[arg(long, global = true, env = "PORTFOLIODB_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// GitHub token used for repository lookups
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Never contact GitHub
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which description fields and languages each project has
    Dash {
        /// Projects directory (default: from config)
        dir: Option<PathBuf>,

        /// Include projects with no description or no filled-in field
        #[arg(long)]
        show_all: bool,
    },

    /// Create a template description for every project without one
    Fill {
        /// Projects directory (default: from config)
        dir: Option<PathBuf>,

        /// Project names to skip (repeatable or comma-separated)
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<String>,
    },

    /// Delete descriptions that fill in no field at all
    Prune {
        /// Projects directory (default: from config)
        dir: Option<PathBuf>,

        /// Project names to skip (repeatable or comma-separated)
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<String>,
    },

    /// Open a project's description in $EDITOR
    Edit {
        /// Project folder name
        project: String,

        /// Projects directory (default: from config)
        #[arg(long)]
        directory: Option<PathBuf>,
    },

    /// Build the full project report (state, progress, versions)
    Report {
        /// Projects directory (default: from config)
        dir: Option<PathBuf>,

        /// Write a static HTML dashboard to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Report { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = root::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Dash { dir, show_all } => cmd::dash::run(&config, dir.as_deref(), show_all, cli.json),
        Commands::Fill { dir, ignore } => cmd::fill::run(&config, dir.as_deref(), &ignore, cli.json),
        Commands::Prune { dir, ignore } => cmd::prune::run(&config, dir.as_deref(), &ignore, cli.json),
        Commands::Edit { project, directory } => {
            cmd::edit::run(&config, directory.as_deref(), &project)
        }
        Commands::Report { dir, html } => {
            let token = if cli.offline { None } else { cli.github_token };
            cmd::report::run(&config, dir.as_deref(), token, html.as_deref(), cli.json)
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
