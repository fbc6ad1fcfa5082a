//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{pull_cmd, push_cmd};
use crate::backend::DefaultsBackend;
use crate::storage::{EntryFile, Settings};

#[derive(Parser)]
#[command(name = "mdefaults")]
#[command(author, version, about = "Sync a plain-text list of macOS defaults with the system")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Automatically confirm prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Entry file (defaults to ~/.mdefaults)
    #[arg(long, global = true, env = "MDEFAULTS_FILE")]
    pub file: Option<PathBuf>,

    /// Program used to read and write preferences
    #[arg(long, global = true, hide = true, env = "MDEFAULTS_BACKEND")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read current system values into the entry file
    Pull,

    /// Write entry file values into the system
    Push,

    /// Show resolved settings
    Debug,
}

/// Options for a single run, resolved from flags, environment and settings
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub entries_path: PathBuf,
    pub backend_program: String,
    pub assume_yes: bool,
}

impl RunOptions {
    /// Merges command-line flags over loaded settings
    pub fn resolve(cli: &Cli, settings: Settings) -> Result<Self> {
        let entries_path = match &cli.file {
            Some(path) => path.clone(),
            None => settings.entries_path()?,
        };

        Ok(Self {
            entries_path,
            backend_program: cli
                .backend
                .clone()
                .unwrap_or(settings.backend_program),
            assume_yes: cli.yes || settings.assume_yes,
        })
    }

    pub fn entry_file(&self) -> EntryFile {
        EntryFile::new(&self.entries_path)
    }

    pub fn backend(&self) -> DefaultsBackend {
        DefaultsBackend::new(&self.backend_program)
    }
}

fn setup_logging(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if !cfg!(target_os = "macos") {
        tracing::warn!(
            "mdefaults drives the macOS `defaults` program and may not work on this platform"
        );
    }

    let settings = Settings::load().context("Failed to load settings")?;
    let options = RunOptions::resolve(&cli, settings)?;
    let output = Output::new(cli.format);

    tracing::debug!("Using entry file {}", options.entries_path.display());

    match cli.command {
        Commands::Pull => pull_cmd::run(&options, &output, &options.backend())?,
        Commands::Push => push_cmd::run(&options, &output, &options.backend())?,
        Commands::Debug => debug(&options, &output),
    }

    Ok(())
}

fn debug(options: &RunOptions, output: &Output) {
    let config_path = Settings::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "entries_file": options.entries_path.display().to_string(),
            "backend": options.backend_program,
            "config_file": config_path,
            "assume_yes": options.assume_yes,
        }));
    } else {
        println!("Version:      {}", env!("CARGO_PKG_VERSION"));
        println!("Platform:     {}/{}", std::env::consts::OS, std::env::consts::ARCH);
        println!("Entry file:   {}", options.entries_path.display());
        println!("Backend:      {}", options.backend_program);
        println!("Config file:  {}", config_path);
        println!("Assume yes:   {}", options.assume_yes);
    }
}
