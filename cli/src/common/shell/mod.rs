//! # toolfs Shell Flavors (`common::shell`)
//!
//! File: cli/src/common/shell/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Every operation in toolfs eventually becomes either a structured program
//! invocation or a textual command line handed to the host shell. The textual
//! form has to respect the rules of *that* shell: how arguments are quoted,
//! how two commands are chained, where diagnostic output is thrown away, and
//! whether paths carry a drive letter.
//!
//! `ShellFlavor` captures those rules for the two shell families toolfs
//! targets:
//!
//! - **`Posix`**: `/bin/sh` and friends (`sh -c <line>`).
//! - **`Cmd`**: the Windows command interpreter (`cmd /C <line>`).
//!
//! The flavor is plain data, so both families are exercised by unit tests on
//! any host. Submodules:
//!
//! - **`quote`**: the Path Quoter.
//! - **`scope`**: the Directory-Scoped Command Builder.
//!

pub mod quote;
pub mod scope;

use serde::Deserialize;
use std::fmt;

/// The shell family whose syntax constructed command lines must follow.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShellFlavor {
    /// POSIX `sh`.
    Posix,
    /// Windows `cmd.exe`.
    Cmd,
}

impl ShellFlavor {
    /// The flavor native to the platform this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(windows) {
            ShellFlavor::Cmd
        } else {
            ShellFlavor::Posix
        }
    }

    /// Program and leading arguments used to run a textual command line.
    pub fn interpreter(self) -> (&'static str, &'static str) {
        match self {
            ShellFlavor::Posix => ("sh", "-c"),
            ShellFlavor::Cmd => ("cmd", "/C"),
        }
    }

    /// Separator that runs the right-hand command only if the left succeeded.
    pub fn and_then(self) -> &'static str {
        " && "
    }

    /// Separator that runs the right-hand command unconditionally.
    pub fn then(self) -> &'static str {
        match self {
            ShellFlavor::Posix => "; ",
            ShellFlavor::Cmd => " & ",
        }
    }

    /// Path separator preferred by the tools running under this shell.
    pub fn separator(self) -> char {
        match self {
            ShellFlavor::Posix => '/',
            ShellFlavor::Cmd => '\\',
        }
    }

    /// Whether `c` separates path components under this shell.
    pub fn is_separator(self, c: char) -> bool {
        match self {
            ShellFlavor::Posix => c == '/',
            ShellFlavor::Cmd => c == '/' || c == '\\',
        }
    }

    /// Appends redirections that discard both stdout and stderr.
    pub fn quiet(self, cmd: &str) -> String {
        match self {
            ShellFlavor::Posix => format!("{} >/dev/null 2>&1", cmd),
            ShellFlavor::Cmd => format!("{} >NUL 2>NUL", cmd),
        }
    }

    /// Appends a redirection that discards stderr only, keeping stdout parseable.
    pub fn quiet_stderr(self, cmd: &str) -> String {
        match self {
            ShellFlavor::Posix => format!("{} 2>/dev/null", cmd),
            ShellFlavor::Cmd => format!("{} 2>NUL", cmd),
        }
    }

    /// Exit status the shell reports when the named program could not be found.
    pub fn not_found_status(self) -> i32 {
        match self {
            ShellFlavor::Posix => 127,
            ShellFlavor::Cmd => 9009,
        }
    }

    /// Returns the drive identifier (`"C:"`) a path starts with, if any.
    ///
    /// Only `Cmd` has drive identifiers; a POSIX path never yields one.
    pub fn drive_of(self, path: &str) -> Option<&str> {
        if self != ShellFlavor::Cmd {
            return None;
        }
        let mut chars = path.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => Some(&path[..2]),
            _ => None,
        }
    }

    /// Recognizes absolute paths: an optional drive letter and colon (`Cmd`
    /// only) followed by a path separator.
    pub fn is_absolute(self, path: &str) -> bool {
        match self {
            ShellFlavor::Posix => path.starts_with('/'),
            ShellFlavor::Cmd => {
                let rest = match self.drive_of(path) {
                    Some(_) => &path[2..],
                    None => path,
                };
                rest.starts_with(|c: char| self.is_separator(c))
            }
        }
    }

    /// Resolves `path` against `base` unless it is already absolute.
    pub fn absolutize(self, base: &str, path: &str) -> String {
        if self.is_absolute(path) {
            return path.to_string();
        }
        let relative = path
            .strip_prefix("./")
            .or_else(|| match self {
                ShellFlavor::Cmd => path.strip_prefix(".\\"),
                ShellFlavor::Posix => None,
            })
            .unwrap_or(path);
        if relative.is_empty() || relative == "." {
            return base.to_string();
        }
        let base = base.trim_end_matches(|c: char| self.is_separator(c));
        format!("{}{}{}", base, self.separator(), relative)
    }
}

impl fmt::Display for ShellFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellFlavor::Posix => write!(f, "posix"),
            ShellFlavor::Cmd => write!(f, "cmd"),
        }
    }
}
