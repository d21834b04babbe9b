//! # toolfs Directory-Scoped Command Builder (`common::shell::scope`)
//!
//! File: cli/src/common/shell/scope.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Several tools (`ls`, `find`, `tar -x`, `unzip`, `wget` without an output
//! name) take no directory argument and always work relative to the current
//! directory of the shell that runs them. Instead of changing the working
//! directory of this process, the directory is established by the command
//! line itself:
//!
//! ```text
//! posix: cd '/work/dir' && ls -1A
//! cmd:   D: & cd "D:\work\dir" && ls -1A
//! ```
//!
//! On `cmd`, `cd` does not switch drives, so a drive identifier at the start
//! of the directory is switched to first. A directory without a drive
//! identifier stays on the current drive. The user command is always chained
//! with the on-success separator so it never runs in the wrong directory.
//!
use super::{quote::quote, ShellFlavor};
use crate::common::process::CommandLine;

/// Builds the command that moves the shell into `directory`.
///
/// On its own this doubles as the "is this a directory" probe: the line
/// succeeds iff the shell can change into the path.
pub fn change_dir(flavor: ShellFlavor, directory: &str) -> String {
    let cd = format!("cd {}", quote(flavor, directory));
    match flavor.drive_of(directory) {
        Some(drive) => format!("{}{}{}", drive, flavor.then(), cd),
        None => cd,
    }
}

/// Prefixes `raw_command` so that it runs inside `directory`.
pub fn scope_to_directory(flavor: ShellFlavor, directory: &str, raw_command: &str) -> CommandLine {
    CommandLine::new(format!(
        "{}{}{}",
        change_dir(flavor, directory),
        flavor.and_then(),
        raw_command
    ))
}
