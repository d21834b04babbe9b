//! # toolfs Path Probes (`common::fs::probe`)
//!
//! File: cli/src/common/fs/probe.rs
//! Author: Christi Mahu
//!
//! Existence and type checks. All three return a plain `bool`; a missing tool
//! reads as "not there".
//!
//! `exists` on `cmd` uses the `if not exist` builtin. Its literal branch is
//! the *failure* path (absent path runs `exit 1`), so a present path leaves
//! the line with status zero and the probe reports `true`.
//!
use super::Tools; // The dispatcher these probes extend
use crate::common::process::{CommandLine, Executor, Invocation};
use crate::common::shell::{scope::change_dir, ShellFlavor}; // `cd` line reused by `is_dir`

impl<E: Executor> Tools<E> {
    /// `true` iff `path` is present on the filesystem.
    ///
    /// # Arguments
    ///
    /// * `path` - Absolute, or relative to `current_dir`. An empty path is
    ///   never present and runs nothing.
    ///
    /// # Returns
    ///
    /// * `bool` - `false` also when the probing tool itself is missing.
    pub fn exists(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let target = self.absolute(path);
        let invocation = match self.flavor() {
            ShellFlavor::Posix => Invocation::program(&self.paths().test)
                .arg("-e")
                .arg(target)
                .quiet(),
            ShellFlavor::Cmd => Invocation::shell(CommandLine::new(format!(
                "if not exist {} exit 1",
                self.q(&target)
            ))),
        };
        self.run_for_status(&invocation)
    }

    /// `true` iff the shell can change into `path`.
    pub fn is_dir(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let target = self.absolute(path);
        let line = self.flavor().quiet(&change_dir(self.flavor(), &target));
        self.run_for_status(&Invocation::shell(CommandLine::new(line)))
    }

    /// `true` iff `path` is a regular file.
    pub fn is_file(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let invocation = Invocation::program(&self.paths().test)
            .arg("-f")
            .arg(self.absolute(path))
            .quiet();
        self.run_for_status(&invocation)
    }
}
