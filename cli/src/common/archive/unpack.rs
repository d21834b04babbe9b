//! # toolfs Archive Extraction (`common::archive::unpack`)
//!
//! File: cli/src/common/archive/unpack.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `Tools::unpack_archive` resolves the archive's pipeline and runs each stage
//! as a quiet command scoped to the dispatcher's `current_dir`, which is where
//! the unpacked files land. Relative archive names are therefore relative to
//! `current_dir` as well.
//!
//! The pipeline is strictly sequential and stops at the first failing stage.
//! Whatever stage failed, the error names the archive the caller passed in,
//! never an intermediate file. A failed decompression may leave partial
//! output behind; nothing is rolled back.
//!
//! ## Architecture
//!
//! ```text
//! resolve(name) ──► [] ─────────────────────────────► Ok(())
//!               ├─► [Unzip] ──► unzip ──────────────► Ok / ExtractionFailed
//!               └─► [Decompress, Untar]
//!                       │ decompressor (probed once)
//!                       ├─ fail ────────────────────► ExtractionFailed
//!                       └─ ok ──► tar -xf ──────────► Ok / ExtractionFailed
//! ```
//!
use super::{resolve, Stage};
use crate::common::archive::compression::{self, Codec, Decompressor};
use crate::common::fs::{require, Tools};
use crate::common::process::{Executor, Invocation};
use crate::core::error::ToolfsError;
use tracing::{debug, info};

impl<E: Executor> Tools<E> {
    /// Extracts `archive` into `current_dir`.
    ///
    /// `.lua` and `.c` files count as already unpacked and succeed without
    /// running anything.
    ///
    /// # Errors
    ///
    /// - `ToolfsError::InvalidArgument` for an empty name.
    /// - `ToolfsError::UnrecognizedExtension` before any tool runs.
    /// - `ToolfsError::ExtractionFailed` naming `archive` when any stage fails.
    pub fn unpack_archive(&self, archive: &str) -> Result<(), ToolfsError> {
        require("archive", archive)?;
        let descriptor = resolve(archive)?;
        if descriptor.stages.is_empty() {
            debug!("{} needs no extraction", archive);
            return Ok(());
        }

        for stage in &descriptor.stages {
            let invocation = self.stage_invocation(stage);
            if !self.run_for_status(&invocation) {
                debug!("Extraction stage {:?} failed", stage);
                return Err(ToolfsError::ExtractionFailed {
                    archive: archive.to_string(),
                });
            }
            if let Stage::Decompress { input, output, .. } = stage {
                debug!("Decompressed {} to {}", input, output);
            }
        }
        info!("Extracted {} into {}", archive, self.current_dir());
        Ok(())
    }

    fn stage_invocation(&self, stage: &Stage) -> Invocation {
        let raw = match stage {
            Stage::Decompress { codec, input, .. } => {
                let tool = self.decompressor(*codec);
                let mut words = vec![self.q(&tool.program)];
                words.extend(tool.args.iter().map(|a| a.to_string()));
                words.push(self.q(input));
                words.join(" ")
            }
            Stage::Untar { tarball } => {
                format!("{} -xf {}", self.q(&self.paths().tar), self.q(tarball))
            }
            Stage::Unzip { archive } => {
                format!("{} -o {}", self.q(&self.paths().unzip), self.q(archive))
            }
        };
        self.scoped(self.current_dir(), &self.flavor().quiet(&raw))
    }

    /// The decompressor for `codec`, probing the candidates on first use.
    ///
    /// The choice is cached on this `Tools` value, so later extractions of the
    /// same codec run no probes.
    pub fn decompressor(&self, codec: Codec) -> &Decompressor {
        self.decompressors.slot(codec).get_or_init(|| {
            let candidates = compression::candidates(codec, self.paths());
            compression::select(candidates, |probe| self.run_for_status(probe))
        })
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use crate::common::fs::Tools;
    use crate::common::process::{DryRunExecutor, Invocation};
    use crate::common::shell::ShellFlavor;
    use crate::core::config::Config;
    use crate::core::error::ToolfsError;

    fn render(inv: &Invocation) -> String {
        inv.render(ShellFlavor::Posix)
    }

    #[test]
    fn test_lua_and_c_run_nothing() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix),
        );
        assert_eq!(tools.unpack_archive("bar.lua"), Ok(()));
        assert_eq!(tools.unpack_archive("lib/bar.c"), Ok(()));
        assert!(tools.executor().invocations().is_empty());
    }

    #[test]
    fn test_unknown_extension_runs_nothing() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix),
        );
        let err = tools.unpack_archive("foo.xyz").unwrap_err();
        assert!(err.to_string().contains(".xyz"));
        assert!(tools.executor().invocations().is_empty());
    }

    #[test]
    fn test_tgz_pipeline_commands() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix),
        );
        tools.unpack_archive("pkg 1.tgz").unwrap();
        assert_eq!(
            tools.executor().rendered(),
            vec![
                "'gunzip' '--version' >/dev/null 2>&1".to_string(),
                "cd '/work' && 'gunzip' -f 'pkg 1.tgz' >/dev/null 2>&1".to_string(),
                "cd '/work' && 'tar' -xf 'pkg 1.tar' >/dev/null 2>&1".to_string(),
            ]
        );
    }

    #[test]
    fn test_failed_decompression_short_circuits() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix)
                .with_outcome(|inv| !render(inv).contains("foo.tgz")),
        );
        assert_eq!(
            tools.unpack_archive("foo.tgz"),
            Err(ToolfsError::ExtractionFailed {
                archive: "foo.tgz".into()
            })
        );
        let rendered = tools.executor().rendered();
        assert!(rendered.iter().all(|line| !line.contains("'tar'")));
    }

    #[test]
    fn test_failed_untar_names_original_archive() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix).with_outcome(|inv| !render(inv).contains("'tar'")),
        );
        let err = tools.unpack_archive("pkg.tar.bz2").unwrap_err();
        assert_eq!(err.to_string(), "Failed extracting pkg.tar.bz2");
    }

    #[test]
    fn test_decompressor_is_probed_once() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix),
        );
        tools.unpack_archive("a.tar.gz").unwrap();
        tools.unpack_archive("b.tgz").unwrap();
        let probes = tools
            .executor()
            .rendered()
            .into_iter()
            .filter(|line| line.contains("--version"))
            .count();
        assert_eq!(probes, 1);
    }

    #[test]
    fn test_zip_is_single_stage_on_cmd() {
        let tools = Tools::new(
            &Config::default(),
            "D:\\build",
            DryRunExecutor::new(ShellFlavor::Cmd),
        );
        tools.unpack_archive("rock.zip").unwrap();
        assert_eq!(
            tools.executor().rendered(),
            vec![r#"D: & cd "D:\build" && "unzip" -o "rock.zip" >NUL 2>NUL"#.to_string()]
        );
    }

    #[cfg(unix)]
    mod on_host {
        use super::*;
        use crate::common::archive::fixtures::{tool_available, write_tar, write_tar_gz};
        use crate::common::process::SystemExecutor;
        use std::fs;
        use std::path::Path;
        use std::process::Command;
        use tempfile::tempdir;

        fn host(dir: &Path) -> Tools {
            Tools::new(
                &Config::default(),
                dir.to_string_lossy(),
                SystemExecutor::new(ShellFlavor::Posix),
            )
        }

        fn sample_content(root: &Path) -> anyhow::Result<()> {
            fs::create_dir_all(root.join("pkg/src"))?;
            fs::write(root.join("pkg/src/init.lua"), "return {}")?;
            fs::write(root.join("pkg/README"), "hi")?;
            Ok(())
        }

        #[test]
        fn test_missing_tgz_fails_without_untar() -> anyhow::Result<()> {
            let dir = tempdir()?;
            let tools = host(dir.path());
            assert_eq!(
                tools.unpack_archive("foo.tgz"),
                Err(ToolfsError::ExtractionFailed {
                    archive: "foo.tgz".into()
                })
            );
            assert!(!dir.path().join("foo.tar").exists());
            Ok(())
        }

        #[test]
        fn test_unpack_real_tar_gz_and_tgz() -> anyhow::Result<()> {
            if !tool_available("tar") || !(tool_available("gunzip") || tool_available("gzip")) {
                eprintln!("skipping: tar/gzip not available");
                return Ok(());
            }
            let content = tempdir()?;
            sample_content(content.path())?;

            for name in ["sample.tar.gz", "sample.tgz"] {
                let work = tempdir()?;
                write_tar_gz(content.path(), &work.path().join(name))?;
                let tools = host(work.path());
                tools.unpack_archive(name)?;
                assert_eq!(
                    fs::read_to_string(work.path().join("pkg/src/init.lua"))?,
                    "return {}"
                );
                assert!(work.path().join("sample.tar").exists());
            }
            Ok(())
        }

        #[test]
        fn test_unpack_real_tar_bz2() -> anyhow::Result<()> {
            if !tool_available("tar") || !tool_available("bzip2") {
                eprintln!("skipping: tar/bzip2 not available");
                return Ok(());
            }
            let content = tempdir()?;
            sample_content(content.path())?;
            let work = tempdir()?;
            write_tar(content.path(), &work.path().join("sample.tar"))?;
            let status = Command::new("bzip2")
                .arg("-f")
                .arg(work.path().join("sample.tar"))
                .status()?;
            assert!(status.success());

            let tools = host(work.path());
            tools.unpack_archive("sample.tar.bz2")?;
            assert_eq!(fs::read_to_string(work.path().join("pkg/README"))?, "hi");
            Ok(())
        }
    }
}
