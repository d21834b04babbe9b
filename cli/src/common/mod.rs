//! # toolfs Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The operation layer of toolfs. Leaves first:
//!
//! - **`shell`**: shell flavors, the Path Quoter and the Directory-Scoped
//!   Command Builder.
//! - **`process`**: invocations and the executors that run them.
//! - **`fs`**: `Tools`, the Operation Dispatcher, with the probe, mutation and
//!   listing operations.
//! - **`network`**: `Tools::download`.
//! - **`archive`**: the Archive Format Resolver (`Tools::unpack_archive`) and
//!   `Tools::zip`.
//!
//! A call flows from a `Tools` method, through the quoter and builder, to the
//! executor, and back as the operation's return value:
//!
//! ```text
//! tools.copy(src, dest) ─► quote + Invocation ─► Executor::run_for_status ─► Result<(), ToolfsError>
//! ```
//!

/// Archive format resolution, extraction and zip creation.
pub mod archive;
/// The Operation Dispatcher (`Tools`) and its filesystem operations.
pub mod fs;
/// Downloads through wget or curl.
pub mod network;
/// Invocations and executors.
pub mod process;
/// Shell flavors, quoting and directory scoping.
pub mod shell;
