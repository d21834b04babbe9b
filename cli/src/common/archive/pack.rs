//! # toolfs Zip Creation (`common::archive::pack`)
//!
//! File: cli/src/common/archive/pack.rs
//! Author: Christi Mahu
//!
//! `Tools::zip` is the counterpart of unpacking a `.zip`: it runs `zip -r`
//! inside `current_dir`, so the entries keep the relative names they were
//! given.
//!
use crate::common::fs::{require, Tools};
use crate::common::process::Executor;
use crate::core::error::ToolfsError;
use tracing::info;

impl<E: Executor> Tools<E> {
    /// Creates (or updates) `zipfile` from `files`, recursing into directories.
    ///
    /// # Arguments
    ///
    /// * `zipfile` - Archive to write, relative to `current_dir` or absolute.
    /// * `files` - Entries to add; they keep the names given here.
    ///
    /// # Errors
    ///
    /// - `ToolfsError::InvalidArgument` for an empty `zipfile` or `files`.
    /// - `ToolfsError::OperationFailed` when `zip` fails.
    pub fn zip(&self, zipfile: &str, files: &[&str]) -> Result<(), ToolfsError> {
        require("zipfile", zipfile)?;
        if files.is_empty() {
            return Err(ToolfsError::InvalidArgument(
                "`files` must name at least one entry".to_string(),
            ));
        }
        let mut words = vec![self.q(&self.paths().zip), "-r".to_string(), self.q(zipfile)];
        words.extend(files.iter().map(|f| self.q(f)));
        let line = self.flavor().quiet(&words.join(" "));
        if self.run_for_status(&self.scoped(self.current_dir(), &line)) {
            info!("Created {} from {} entries", zipfile, files.len());
            Ok(())
        } else {
            Err(ToolfsError::OperationFailed(format!(
                "Failed creating {}",
                zipfile
            )))
        }
    }
}
