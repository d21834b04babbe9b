//! # toolfs Command Handlers (`commands`)
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The clap definitions and handlers behind the `toolfs` binary. Each handler
//! takes its parsed arguments and a `Tools` dispatcher, performs exactly one
//! library operation, and returns an `Outcome` for `main` to print.
//!
//! - **`fs`**: `exists`, `is-dir`, `is-file`, `mkdir`, `rmdir`, `copy`,
//!   `copy-contents`, `delete`, `ls`, `find`, `chmod`.
//! - **`archive`**: `unpack`, `zip`.
//! - **`download`**: `download`.
//!
//! Handlers are generic over the executor so `--dry-run` goes through exactly
//! the same code as a real run.
//!

/// Archive subcommands (`unpack`, `zip`).
pub mod archive;
/// The `download` subcommand.
pub mod download;
/// Filesystem subcommands.
pub mod fs;

/// What a command produced, for `main` to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A probe or boolean operation; `false` makes the process exit with status 1.
    Flag(bool),
    /// One entry per output line.
    Lines(Vec<String>),
    /// Completed with nothing to print.
    Done,
}

impl Outcome {
    /// Exit status the binary should end with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Flag(false) => 1,
            _ => 0,
        }
    }
}
