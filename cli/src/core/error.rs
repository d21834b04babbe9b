//! # toolfs Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout toolfs. Two layers
//! coexist:
//!
//! - `ToolfsError`: a `thiserror` enum returned by the library operations
//!   (`copy`, `delete`, `unpack_archive`, ...). Every variant renders to the
//!   human-readable message a caller shows to the user.
//! - `Result<T>`: an alias for `anyhow::Result<T>`, used by application-level
//!   code (configuration loading, CLI handlers) where adding context matters
//!   more than matching on a specific variant.
//!
//! Failures of the external tools themselves are *not* represented here; they
//! live in `common::process::ExecError` and are collapsed into the operation
//! contracts (`bool`, or one of the variants below) by the dispatcher.
//!
//! ## Examples
//!
//! ```rust,ignore
//! match tools.copy("a.txt", "/tmp/dest/") {
//!     Ok(()) => println!("copied"),
//!     Err(ToolfsError::CopyFailed { .. }) => eprintln!("copy tool failed"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use thiserror::Error;

/// Errors reported by the toolfs operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolfsError {
    /// A required argument was empty or otherwise unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `delete` only accepts absolute paths.
    #[error("Refusing to delete relative path '{path}'")]
    RelativeDelete { path: String },

    #[error("Failed copying {src} to {dest}")]
    CopyFailed { src: String, dest: String },

    /// Generic failure of a mutating operation, message names the operands.
    #[error("{0}")]
    OperationFailed(String),

    #[error("Unrecognized filename extension {ext}")]
    UnrecognizedExtension { ext: String },

    #[error("Failed extracting {archive}")]
    ExtractionFailed { archive: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result using anyhow::Error for application-level code.
pub type Result<T> = anyhow::Result<T>;
