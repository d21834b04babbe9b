//! # toolfs Download Command
//!
//! File: cli/src/commands/download.rs
//! Author: Christi Mahu
//!
//! ```bash
//! toolfs download https://example.com/pkg-1.0.tar.gz
//! toolfs download --output pkg.tgz https://example.com/latest
//! ```
//!
use super::Outcome;
use crate::common::fs::Tools;
use crate::common::process::Executor;
use crate::core::error::Result;
use clap::Parser;

/// Arguments for the `download` subcommand.
#[derive(Parser, Debug, PartialEq, Eq)]
pub struct DownloadArgs {
    /// URL to fetch.
    pub url: String,
    /// File name to write instead of the one derived from the URL.
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn handle_download<E: Executor>(args: DownloadArgs, tools: &Tools<E>) -> Result<Outcome> {
    Ok(Outcome::Flag(
        tools.download(&args.url, args.output.as_deref()),
    ))
}
