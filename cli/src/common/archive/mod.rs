//! # toolfs Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module is the Archive Format Resolver. Given an archive filename it
//! decides, from the extension alone, which extraction pipeline applies, and
//! then runs that pipeline through the same executor as every other
//! operation.
//!
//! | extension          | pipeline                          |
//! |--------------------|-----------------------------------|
//! | `.tar.gz`, `.tgz`  | decompress (gzip) → untar         |
//! | `.tar.bz2`         | decompress (bzip2) → untar        |
//! | `.zip`             | unzip                             |
//! | `.lua`, `.c`       | nothing: already unpacked         |
//! | anything else      | error naming the extension        |
//!
//! ## Architecture
//!
//! - **this file**: `ArchiveDescriptor` / `Stage` and `resolve`, a pure
//!   function from filename to ordered stages.
//! - **`compression`**: the ordered decompressor candidates per codec and the
//!   probe-once cache.
//! - **`unpack`**: `Tools::unpack_archive`, which runs the stages in order and
//!   stops at the first failure.
//! - **`pack`**: `Tools::zip`, creating zip archives.
//!
//! ## Usage
//!
//! ```rust
//! use toolfs::common::archive::{resolve, Stage};
//!
//! let descriptor = resolve("luasocket-3.0.tgz").unwrap();
//! assert_eq!(descriptor.stages.len(), 2);
//! assert!(matches!(&descriptor.stages[1], Stage::Untar { tarball } if tarball == "luasocket-3.0.tar"));
//! ```
//!

pub mod compression;
pub mod pack;
pub mod unpack;

use crate::core::error::ToolfsError;
use compression::Codec;

/// One step of an extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Decompress `input` in place; the result is expected at `output`.
    Decompress {
        codec: Codec,
        input: String,
        output: String,
    },
    /// Unpack a tarball into the current directory.
    Untar { tarball: String },
    /// Unpack a zip archive into the current directory.
    Unzip { archive: String },
}

/// The extraction pipeline for one archive, derived from its name.
///
/// An empty stage list means the file needs no extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDescriptor {
    pub stages: Vec<Stage>,
}

/// Maps `archive`'s extension to its extraction pipeline.
///
/// Matching is case-sensitive.
///
/// # Errors
///
/// `ToolfsError::UnrecognizedExtension` carrying the extension (with its
/// leading dot, or empty when the name has none).
pub fn resolve(archive: &str) -> Result<ArchiveDescriptor, ToolfsError> {
    let decompress_then_untar = |codec: Codec, output: String| ArchiveDescriptor {
        stages: vec![
            Stage::Decompress {
                codec,
                input: archive.to_string(),
                output: output.clone(),
            },
            Stage::Untar { tarball: output },
        ],
    };

    if let Some(stem) = archive.strip_suffix(".tar.gz") {
        Ok(decompress_then_untar(Codec::Gzip, format!("{}.tar", stem)))
    } else if let Some(stem) = archive.strip_suffix(".tgz") {
        // The compressed name lacks `.tar`, so it is appended.
        Ok(decompress_then_untar(Codec::Gzip, format!("{}.tar", stem)))
    } else if let Some(stem) = archive.strip_suffix(".tar.bz2") {
        Ok(decompress_then_untar(Codec::Bzip2, format!("{}.tar", stem)))
    } else if archive.ends_with(".zip") {
        Ok(ArchiveDescriptor {
            stages: vec![Stage::Unzip {
                archive: archive.to_string(),
            }],
        })
    } else if archive.ends_with(".lua") || archive.ends_with(".c") {
        Ok(ArchiveDescriptor { stages: Vec::new() })
    } else {
        Err(ToolfsError::UnrecognizedExtension {
            ext: extension_of(archive).to_string(),
        })
    }
}

/// The last `.`-suffix of the final path component, dot included.
fn extension_of(archive: &str) -> &str {
    let name = archive
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(archive);
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}
