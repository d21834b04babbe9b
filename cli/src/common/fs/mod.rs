//! # toolfs Filesystem Operations (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module holds the Operation Dispatcher: `Tools`, the value callers hold
//! to perform filesystem operations through external command-line tools.
//! Each operation is a fixed recipe: quote the paths, build a structured
//! invocation (or a directory-scoped command line when shell features are
//! needed), run it, and map the exit status or output to the operation's
//! return contract.
//!
//! ## Architecture
//!
//! `Tools` carries everything an operation needs explicitly:
//!
//! - the shell flavor and the configured tool paths,
//! - the user agent and fetch tool used by `download`,
//! - `current_dir`, the directory relative paths are resolved against and
//!   the default scope of `list_dir`/`find` (the process's own working
//!   directory is never changed),
//! - the `Executor` that actually runs commands,
//! - the cached decompressor choices of the archive pipeline.
//!
//! The operations themselves are split by concern:
//!
//! - **`probe`**: `exists`, `is_dir`, `is_file`.
//! - **`manage`**: `make_dir`, `remove_dir_if_empty`, `remove_dir_tree_if_empty`,
//!   `copy`, `copy_contents`, `delete`, `set_permissions`.
//! - **`listing`**: `list_dir`, `find`.
//!
//! `download` lives in `common::network`, and `unpack_archive`/`zip` in
//! `common::archive`; they are methods on the same `Tools` value.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use toolfs::common::fs::Tools;
//! use toolfs::common::process::SystemExecutor;
//! use toolfs::core::config::Config;
//!
//! let config = Config::default();
//! let tools = Tools::new(&config, "/srv/build", SystemExecutor::new(config.shell_flavor()));
//! tools.make_dir("deps/lua").expect("non-empty directory");
//! for entry in tools.list_dir(Some("deps")) {
//!     println!("{}", entry);
//! }
//! ```
//!

pub mod listing;
pub mod manage;
pub mod probe;

use crate::common::archive::compression::DecompressorCache;
use crate::common::process::{Executor, Invocation, SystemExecutor};
use crate::common::shell::{quote::quote, scope::scope_to_directory, ShellFlavor};
use crate::core::config::{Config, Downloader, ToolPaths};
use crate::core::error::ToolfsError;

/// The Operation Dispatcher.
#[derive(Debug)]
pub struct Tools<E: Executor = SystemExecutor> {
    flavor: ShellFlavor,
    paths: ToolPaths,
    user_agent: String,
    downloader: Downloader,
    current_dir: String,
    executor: E,
    pub(crate) decompressors: DecompressorCache,
}

impl<E: Executor> Tools<E> {
    /// Creates a dispatcher rooted at `current_dir`.
    ///
    /// The shell flavor is taken from the executor, since that is what will
    /// interpret the command lines.
    pub fn new(config: &Config, current_dir: impl Into<String>, executor: E) -> Self {
        Tools {
            flavor: executor.flavor(),
            paths: config.tools.clone(),
            user_agent: config.user_agent.clone(),
            downloader: config.downloader,
            current_dir: current_dir.into(),
            executor,
            decompressors: DecompressorCache::default(),
        }
    }

    /// Returns a dispatcher rooted at another directory, keeping everything else.
    pub fn with_current_dir(mut self, current_dir: impl Into<String>) -> Self {
        self.current_dir = current_dir.into();
        self
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub fn flavor(&self) -> ShellFlavor {
        self.flavor
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub(crate) fn paths(&self) -> &ToolPaths {
        &self.paths
    }

    pub(crate) fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub(crate) fn downloader(&self) -> Downloader {
        self.downloader
    }

    /// Resolves `path` against `current_dir` unless it is absolute.
    pub fn absolute(&self, path: &str) -> String {
        self.flavor.absolutize(&self.current_dir, path)
    }

    pub(crate) fn q(&self, arg: &str) -> String {
        quote(self.flavor, arg)
    }

    /// Runs a shell line inside `directory`.
    pub(crate) fn scoped(&self, directory: &str, raw_command: &str) -> Invocation {
        Invocation::shell(scope_to_directory(self.flavor, directory, raw_command))
    }

    pub(crate) fn run_for_status(&self, invocation: &Invocation) -> bool {
        self.executor.run_for_status(invocation)
    }

    pub(crate) fn run_for_lines(&self, invocation: &Invocation) -> Vec<String> {
        self.executor.run_for_lines(invocation)
    }
}

/// Rejects empty arguments, naming the parameter in the error.
pub(crate) fn require(name: &str, value: &str) -> Result<(), ToolfsError> {
    if value.is_empty() {
        Err(ToolfsError::InvalidArgument(format!(
            "`{}` must not be empty",
            name
        )))
    } else {
        Ok(())
    }
}
