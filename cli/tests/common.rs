//! # toolfs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and drives the compiled `toolfs` binary through
//! `toolfs_cmd()`.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// # Get toolfs Command (`toolfs_cmd`)
///
/// An `assert_cmd::Command` pointing at the `toolfs` binary built for this
/// test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn toolfs_cmd() -> Command {
    Command::cargo_bin("toolfs").expect("Failed to find toolfs binary for testing")
}

/// `toolfs_cmd()` pinned to the POSIX flavor, scoped to `dir`, and using a
/// configuration file written there so host user/project files never leak in.
pub fn toolfs_in(dir: &Path) -> Command {
    let config = write_config(dir, "user_agent = \"toolfs-it/1.0\"\n");
    let mut cmd = toolfs_cmd();
    cmd.env_remove("TOOLFS_SHELL")
        .env_remove("TOOLFS_CONFIG")
        .env_remove("TOOLFS_DOWNLOADER")
        .arg("--shell")
        .arg("posix")
        .arg("--config")
        .arg(config)
        .arg("-C")
        .arg(dir);
    cmd
}

/// Writes `contents` as a toolfs configuration file inside `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("toolfs-test.toml");
    fs::write(&path, contents).expect("Failed to write test configuration");
    path
}
