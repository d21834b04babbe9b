//! # toolfs Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Infrastructure shared by the operation layer and the CLI:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the application `Result` alias
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ToolfsError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
