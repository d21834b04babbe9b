//! # toolfs Archive Commands
//!
//! File: cli/src/commands/archive.rs
//! Author: Christi Mahu
//!
//! ```bash
//! toolfs unpack -C /srv/build luasocket-3.0.tar.gz
//! toolfs zip rock.zip src doc
//! ```
//!
use super::Outcome;
use crate::common::fs::Tools;
use crate::common::process::Executor;
use crate::core::error::Result;
use clap::Subcommand;

/// Archive subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ArchiveCommand {
    /// Extracts an archive into the current directory.
    Unpack { archive: String },
    /// Creates a zip archive from files and directories.
    Zip {
        zipfile: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
}

pub fn handle_archive<E: Executor>(command: ArchiveCommand, tools: &Tools<E>) -> Result<Outcome> {
    match command {
        ArchiveCommand::Unpack { archive } => tools.unpack_archive(&archive)?,
        ArchiveCommand::Zip { zipfile, files } => {
            let files: Vec<&str> = files.iter().map(String::as_str).collect();
            tools.zip(&zipfile, &files)?
        }
    }
    Ok(Outcome::Done)
}
