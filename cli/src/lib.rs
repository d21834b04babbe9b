//! # toolfs Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! toolfs presents a uniform set of filesystem and archive operations
//! (existence checks, directory creation and removal, copying, deletion,
//! listing, downloads, archive extraction) and carries each one out by
//! constructing and running an external command-line tool suited to the host
//! shell.
//!
//! - `core`: configuration and error types.
//! - `common`: quoting, directory scoping, process execution, and the
//!   operations themselves (`common::fs::Tools`).
//! - `commands`: the clap front end used by the `toolfs` binary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use toolfs::common::fs::Tools;
//! use toolfs::common::process::SystemExecutor;
//! use toolfs::core::config::Config;
//!
//! let config = Config::default();
//! let tools = Tools::new(&config, "/tmp/build", SystemExecutor::new(config.shell_flavor()));
//! if tools.download("https://example.com/pkg-1.0.tar.gz", None) {
//!     tools.unpack_archive("pkg-1.0.tar.gz").expect("extraction failed");
//! }
//! ```
//!
pub mod commands;
pub mod common;
pub mod core;
