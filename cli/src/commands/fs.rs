//! # toolfs Filesystem Commands
//!
//! File: cli/src/commands/fs.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrappers exposing the `Tools` filesystem operations on the command
//! line. Relative paths are resolved against the dispatcher's current
//! directory (the `-C` flag, or the working directory of the process).
//!
//! ```bash
//! toolfs exists ./deps
//! toolfs mkdir deps/lua/5.4
//! toolfs copy build/module.so /usr/local/lib/lua/5.4/
//! toolfs find -C /srv/rocks
//! toolfs delete /tmp/stale-build
//! ```
//!
use super::Outcome;
use crate::common::fs::Tools;
use crate::common::process::Executor;
use crate::core::error::Result;
use clap::Subcommand;
use tracing::debug;

/// Filesystem subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum FsCommand {
    /// Checks whether a path exists.
    Exists { path: String },
    /// Checks whether a path is a directory.
    IsDir { path: String },
    /// Checks whether a path is a regular file.
    IsFile { path: String },
    /// Creates a directory and any missing parents.
    Mkdir { directory: String },
    /// Removes a directory if it is empty (never fails).
    Rmdir {
        directory: String,
        /// Also remove parents that become empty.
        #[arg(long)]
        tree: bool,
    },
    /// Copies a file.
    Copy { src: String, dest: String },
    /// Recursively copies the contents of a directory into another.
    CopyContents { src: String, dest: String },
    /// Recursively deletes an absolute path.
    Delete { path: String },
    /// Lists the entries of a directory.
    Ls { at: Option<String> },
    /// Lists every path below a directory.
    Find { at: Option<String> },
    /// Changes the permissions of a path.
    Chmod { mode: String, path: String },
}

/// Runs one filesystem subcommand.
pub fn handle_fs<E: Executor>(command: FsCommand, tools: &Tools<E>) -> Result<Outcome> {
    debug!("Handling filesystem command: {:?}", command);
    let outcome = match command {
        FsCommand::Exists { path } => Outcome::Flag(tools.exists(&path)),
        FsCommand::IsDir { path } => Outcome::Flag(tools.is_dir(&path)),
        FsCommand::IsFile { path } => Outcome::Flag(tools.is_file(&path)),
        FsCommand::Mkdir { directory } => {
            tools.make_dir(&directory)?;
            Outcome::Done
        }
        FsCommand::Rmdir { directory, tree } => {
            if tree {
                tools.remove_dir_tree_if_empty(&directory);
            } else {
                tools.remove_dir_if_empty(&directory);
            }
            Outcome::Done
        }
        FsCommand::Copy { src, dest } => {
            tools.copy(&src, &dest)?;
            Outcome::Done
        }
        FsCommand::CopyContents { src, dest } => {
            tools.copy_contents(&src, &dest)?;
            Outcome::Done
        }
        FsCommand::Delete { path } => Outcome::Flag(tools.delete(&path)?),
        FsCommand::Ls { at } => Outcome::Lines(tools.list_dir(at.as_deref())),
        FsCommand::Find { at } => Outcome::Lines(tools.find(at.as_deref())),
        FsCommand::Chmod { mode, path } => {
            tools.set_permissions(&path, &mode)?;
            Outcome::Done
        }
    };
    Ok(outcome)
}
