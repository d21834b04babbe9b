//! # toolfs Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the entry point of the `toolfs` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and building the `Tools` dispatcher
//! - Routing execution to the command handlers and printing their outcome
//!
//! ## Architecture
//!
//! Every subcommand maps to exactly one operation on `Tools`. The global
//! options decide how that dispatcher is built:
//!
//! - `-C/--dir`: the directory relative paths are resolved against (and where
//!   configuration discovery starts). Defaults to the working directory.
//! - `--shell`: overrides the shell flavor from the configuration.
//! - `--downloader`: overrides the fetch tool (`wget` or `curl`).
//! - `--config`: loads one explicit file instead of the user/project lookup.
//! - `--dry-run`: records the commands instead of running them and prints
//!   them, one per line.
//!
//! Probes print `true`/`false` and exit with status 1 on `false`, so they can
//! be used directly in shell conditionals. Errors print `Error: <message>` to
//! stderr and exit with status 1.
//!
//! ## Examples
//!
//! ```bash
//! toolfs -C /srv/build download https://example.com/pkg-1.0.tar.gz
//! toolfs -C /srv/build unpack pkg-1.0.tar.gz
//! toolfs --dry-run --shell cmd copy a.txt C:/dest/
//! toolfs -vv find /srv/build/pkg-1.0
//! ```
//!
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use toolfs::commands::{self, Outcome};
use toolfs::common::fs::Tools;
use toolfs::common::process::{DryRunExecutor, Executor, SystemExecutor};
use toolfs::common::shell::ShellFlavor;
use toolfs::core::config::{self, Downloader};
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "toolfs",
    about = "Filesystem and archive operations through the host's command-line tools",
    long_about = "Checks, creates, copies, deletes and lists paths, downloads files and\n\
                  unpacks archives by running the external tools of the host shell.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Directory that relative paths are resolved against.
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Shell family to build command lines for.
    #[arg(long, value_enum, global = true, env = "TOOLFS_SHELL")]
    shell: Option<ShellFlavor>,
    /// Fetch tool used by `download`, overriding the configuration.
    #[arg(long, value_enum, global = true, env = "TOOLFS_DOWNLOADER")]
    downloader: Option<Downloader>,
    /// Configuration file to use instead of the user and project files.
    #[arg(long, global = true, env = "TOOLFS_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the commands instead of running them.
    #[arg(long, global = true)]
    dry_run: bool,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Fs(commands::fs::FsCommand),
    #[command(flatten)]
    Archive(commands::archive::ArchiveCommand),
    /// Downloads a URL into the working directory.
    Download(commands::download::DownloadArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Builds the dispatcher, runs the command and prints its result.
/// Returns the process exit status.
fn run(cli: Cli) -> anyhow::Result<i32> {
    let work_dir = resolve_work_dir(cli.dir.as_deref())?;
    let mut config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&work_dir)?,
    };
    if let Some(downloader) = cli.downloader {
        config.downloader = downloader;
    }
    let flavor = cli.shell.unwrap_or_else(|| config.shell_flavor());
    let current_dir = work_dir.to_string_lossy().into_owned();

    if cli.dry_run {
        let tools = Tools::new(&config, current_dir, DryRunExecutor::new(flavor));
        dispatch(cli.command, &tools)?;
        for line in tools.executor().rendered() {
            println!("{}", line);
        }
        return Ok(0);
    }

    let tools = Tools::new(&config, current_dir, SystemExecutor::new(flavor));
    let outcome = dispatch(cli.command, &tools)?;
    report(&outcome);
    Ok(outcome.exit_code())
}

fn dispatch<E: Executor>(command: Commands, tools: &Tools<E>) -> anyhow::Result<Outcome> {
    match command {
        Commands::Fs(cmd) => commands::fs::handle_fs(cmd, tools),
        Commands::Archive(cmd) => commands::archive::handle_archive(cmd, tools),
        Commands::Download(args) => commands::download::handle_download(args, tools),
    }
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Flag(flag) => println!("{}", flag),
        Outcome::Lines(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Outcome::Done => {}
    }
}

/// The absolute working directory, `-C` taken relative to the process's own.
fn resolve_work_dir(dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}
