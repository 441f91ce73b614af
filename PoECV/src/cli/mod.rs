//! `PoECV` CLI - Command-line interface for browsing and searching conversations

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

use crate::{Viewer, ViewerConfig};

#[derive(Parser)]
#[command(name = "poecv")]
#[command(about = "PoECV: Pillars of Eternity conversation viewer", long_about = None)]
#[command(version)]
struct Cli {
    /// Folder containing the `.conversation` files
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Config file (defaults to the user config folder)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// String table language
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Config file merged with command-line overrides
    fn viewer_config(&self) -> anyhow::Result<ViewerConfig> {
        let mut config = match self.config.clone().or_else(ViewerConfig::default_path) {
            Some(path) => ViewerConfig::load_or_default(&path)?,
            None => ViewerConfig::default(),
        };
        if let Some(root) = &self.root {
            config.corpus_root = Some(root.clone());
        }
        if let Some(language) = &self.language {
            config.language.clone_from(language);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Run the `PoECV` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut viewer = Viewer::open(cli.viewer_config()?)?;
    cli.command.execute(&mut viewer)?;

    Ok(())
}
