//! # toolfs Directory Listing (`common::fs::listing`)
//!
//! File: cli/src/common/fs/listing.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `list_dir` and `find` enumerate a directory by running `ls`/`find` inside
//! it (via the Directory-Scoped Command Builder) and reading stdout line by
//! line. Both default to the dispatcher's `current_dir`, and both return an
//! empty vector, never an error, when the directory does not exist or the
//! tool cannot be run.
//!
//! `find` output is normalized so callers see the same shape on every host:
//!
//! ```text
//! .            -> dropped (the directory itself)
//! ./a/b.txt    -> a/b.txt
//! .\a\b.txt    -> a/b.txt      (cmd only)
//! ./a\b.txt    -> a\b.txt      (posix: `\` is part of the name)
//! ```
//!
//! Entries come back in the tool's order; nothing is sorted.
//!
use super::Tools;
use crate::common::process::Executor;
use crate::common::shell::ShellFlavor;
use tracing::debug;

impl<E: Executor> Tools<E> {
    /// Names of the entries directly inside `at`.
    ///
    /// Hidden entries are included; `.` and `..` are not.
    ///
    /// # Arguments
    ///
    /// * `at` - Directory to list, absolute or relative to `current_dir`.
    ///   `None` lists `current_dir` itself.
    ///
    /// # Returns
    ///
    /// * `Vec<String>` - One bare entry name per element, in `ls` order.
    ///   Empty when `at` is not a directory or `ls` cannot be run.
    pub fn list_dir(&self, at: Option<&str>) -> Vec<String> {
        let Some(dir) = self.listing_root(at) else {
            return Vec::new();
        };
        let raw = format!("{} -1A", self.q(&self.paths().ls));
        let invocation = self.scoped(&dir, &self.flavor().quiet_stderr(&raw));
        self.run_for_lines(&invocation)
            .into_iter()
            .filter(|entry| !entry.is_empty() && entry != "." && entry != "..")
            .collect()
    }

    /// Every path below `at`, relative to it.
    ///
    /// # Arguments
    ///
    /// * `at` - Directory to walk, absolute or relative to `current_dir`.
    ///   `None` walks `current_dir` itself.
    ///
    /// # Returns
    ///
    /// * `Vec<String>` - Paths with `/` separators on every flavor (see
    ///   [`normalize_find_output`]), in `find` order. Empty when `at` is not a
    ///   directory or `find` cannot be run.
    pub fn find(&self, at: Option<&str>) -> Vec<String> {
        let Some(dir) = self.listing_root(at) else {
            return Vec::new();
        };
        let raw = format!("{} .", self.q(&self.paths().find));
        let invocation = self.scoped(&dir, &self.flavor().quiet_stderr(&raw));
        normalize_find_output(self.flavor(), self.run_for_lines(&invocation))
    }

    /// Absolute directory to enumerate, or `None` if it is not a directory.
    fn listing_root(&self, at: Option<&str>) -> Option<String> {
        let dir = match at {
            Some(path) => self.absolute(path),
            None => self.current_dir().to_string(),
        };
        if self.is_dir(&dir) {
            Some(dir)
        } else {
            debug!("Not listing {}: not a directory", dir);
            None
        }
    }
}

/// Strips the `./` marker, drops the line for the directory itself and
/// rewrites the flavor's native separators to forward slashes.
///
/// Only `cmd` has a separator other than `/`. On POSIX a backslash is an
/// ordinary filename character and is left alone.
///
/// # Arguments
///
/// * `flavor` - The shell family that produced the listing.
/// * `lines` - Raw `find` output, one path per element.
///
/// # Returns
///
/// * `Vec<String>` - Paths relative to the listed directory, in input order.
pub fn normalize_find_output(flavor: ShellFlavor, lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter_map(|line| {
            let line = match flavor {
                ShellFlavor::Cmd => line.replace('\\', "/"),
                ShellFlavor::Posix => line,
            };
            if line.is_empty() || line == "." {
                return None;
            }
            let relative = line.strip_prefix("./").unwrap_or(&line);
            Some(relative.to_string())
        })
        .collect()
}
