//! # toolfs Decompressor Selection (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Decompression is delegated to whichever tool the host has. Each codec has
//! an ordered list of candidates, most specific first:
//!
//! ```text
//! gzip:  gunzip -f   →  gzip -d -f   →  7z -aoa x
//! bzip2: bunzip2 -f  →  bzip2 -d -f  →  7z -aoa x
//! ```
//!
//! Every candidate but the last is probed with a harmless flag; the first
//! that answers is used. The last one is the fallback and is taken unprobed,
//! so a host with none of them fails at the extraction step with the usual
//! "Failed extracting" message rather than a separate probe error.
//!
//! The choice is made once per `Tools` value and cached in a
//! `DecompressorCache`, so a batch of extractions probes at most once per
//! codec.
//!
use crate::common::process::Invocation;
use crate::core::config::ToolPaths;
use std::sync::OnceLock;
use tracing::debug;

/// Compression formats toolfs can strip from a tarball.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Gzip,
    Bzip2,
}

/// One way of decompressing a file in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressor {
    pub program: String,
    /// Arguments placed before the input file.
    pub args: Vec<&'static str>,
    /// Argument that makes the program answer without doing work.
    pub probe: Option<&'static str>,
}

impl Decompressor {
    fn new(program: &str, args: &[&'static str], probe: Option<&'static str>) -> Self {
        Decompressor {
            program: program.to_string(),
            args: args.to_vec(),
            probe,
        }
    }

    /// The quiet invocation that checks whether this tool is usable.
    pub fn probe_invocation(&self) -> Option<Invocation> {
        self.probe
            .map(|flag| Invocation::program(&self.program).arg(flag).quiet())
    }
}

/// The ways of decompressing one codec: probed tools in order of
/// preference, then the tool used when none of them answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub probed: Vec<Decompressor>,
    pub fallback: Decompressor,
}

/// Candidates for `codec`, taking program paths from `paths`.
pub fn candidates(codec: Codec, paths: &ToolPaths) -> Candidates {
    let probed = match codec {
        Codec::Gzip => vec![
            Decompressor::new(&paths.gunzip, &["-f"], Some("--version")),
            Decompressor::new(&paths.gzip, &["-d", "-f"], Some("--version")),
        ],
        Codec::Bzip2 => vec![
            Decompressor::new(&paths.bunzip2, &["-f"], Some("--help")),
            Decompressor::new(&paths.bzip2, &["-d", "-f"], Some("--help")),
        ],
    };
    Candidates {
        probed,
        fallback: Decompressor::new(&paths.sevenz, &["-aoa", "x"], None),
    }
}

/// Picks the first probed candidate that answers, else the fallback.
///
/// # Arguments
///
/// * `candidates` - The codec's candidate list, as built by [`candidates`].
/// * `probe` - Runs a probe invocation and reports whether it succeeded.
///
/// # Returns
///
/// * `Decompressor` - The chosen tool. A candidate without a probe flag is
///   taken as soon as it is reached.
pub fn select(
    candidates: Candidates,
    mut probe: impl FnMut(&Invocation) -> bool,
) -> Decompressor {
    for candidate in candidates.probed {
        match candidate.probe_invocation() {
            Some(check) if probe(&check) => {
                debug!("Using {} for decompression", candidate.program);
                return candidate;
            }
            Some(_) => debug!("{} is not usable", candidate.program),
            None => return candidate,
        }
    }
    debug!("Falling back to {}", candidates.fallback.program);
    candidates.fallback
}

/// Per-codec decompressor choice, bound on first use.
#[derive(Debug, Default)]
pub struct DecompressorCache {
    gzip: OnceLock<Decompressor>,
    bzip2: OnceLock<Decompressor>,
}

impl DecompressorCache {
    pub fn slot(&self, codec: Codec) -> &OnceLock<Decompressor> {
        match codec {
            Codec::Gzip => &self.gzip,
            Codec::Bzip2 => &self.bzip2,
        }
    }
}
