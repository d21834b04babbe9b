//! # toolfs Mutating Filesystem Operations (`common::fs::manage`)
//!
//! File: cli/src/common/fs/manage.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Creating, copying, deleting and re-permissioning paths through `mkdir`,
//! `cp`, `rm`, `rmdir` and `chmod`.
//!
//! Two operations are best-effort:
//!
//! - `make_dir` reports success whatever `mkdir -p` returns. A failure is only
//!   logged at `warn`; callers that care follow up with `is_dir`.
//! - `remove_dir_if_empty` / `remove_dir_tree_if_empty` never report anything.
//!   A non-empty or already-absent directory is not an error.
//!
//! `delete` refuses relative paths before running anything, then makes the
//! tree writable (result ignored) and removes it recursively.
//!
use super::{require, Tools}; // Dispatcher and the empty-argument check
use crate::common::process::{CommandLine, Executor, Invocation}; // What gets run
use crate::core::error::ToolfsError; // Typed operation errors
use tracing::{debug, info, warn}; // Logging

impl<E: Executor> Tools<E> {
    /// Creates `directory` and any missing parents.
    ///
    /// # Errors
    ///
    /// Only `ToolfsError::InvalidArgument` for an empty `directory`. A failing
    /// `mkdir` is logged and otherwise ignored.
    pub fn make_dir(&self, directory: &str) -> Result<(), ToolfsError> {
        require("directory", directory)?;
        let target = self.absolute(directory);
        let invocation = Invocation::program(&self.paths().mkdir)
            .arg("-p")
            .arg(&target)
            .quiet();
        if self.run_for_status(&invocation) {
            debug!("Ensured directory {}", target);
        } else {
            warn!("mkdir reported failure for {}; continuing", target);
        }
        Ok(())
    }

    /// Removes `directory` if it is empty. Failures are ignored.
    pub fn remove_dir_if_empty(&self, directory: &str) {
        if directory.is_empty() {
            return;
        }
        let invocation = Invocation::program(&self.paths().rmdir)
            .arg(self.absolute(directory))
            .quiet();
        let _ = self.run_for_status(&invocation);
    }

    /// Removes `directory` and then each parent that becomes empty. Failures are ignored.
    pub fn remove_dir_tree_if_empty(&self, directory: &str) {
        if directory.is_empty() {
            return;
        }
        let invocation = Invocation::program(&self.paths().rmdir)
            .arg("-p")
            .arg(self.absolute(directory))
            .quiet();
        let _ = self.run_for_status(&invocation);
    }

    /// Copies the file `src` to `dest`.
    ///
    /// One trailing separator is stripped from `dest`, so `"dest/"` and
    /// `"dest"` behave identically. `src` is passed through untouched.
    ///
    /// # Arguments
    ///
    /// * `src` - File to copy, absolute or relative to `current_dir`.
    /// * `dest` - Target file name, or an existing directory to copy into.
    ///
    /// # Returns
    ///
    /// * `Result<(), ToolfsError>` - `Ok(())` once `cp` exits with status zero.
    ///
    /// # Errors
    ///
    /// - `ToolfsError::InvalidArgument` if either argument is empty.
    /// - `ToolfsError::CopyFailed` naming both paths as the caller gave them
    ///   when `cp` fails or cannot be run.
    pub fn copy(&self, src: &str, dest: &str) -> Result<(), ToolfsError> {
        require("src", src)?;
        require("dest", dest)?;
        let dest_trimmed = self.strip_trailing_separator(dest);
        let invocation = Invocation::program(&self.paths().cp)
            .arg(self.absolute(src))
            .arg(self.absolute(dest_trimmed))
            .quiet();
        if self.run_for_status(&invocation) {
            info!("Copied {} to {}", src, dest);
            Ok(())
        } else {
            Err(ToolfsError::CopyFailed {
                src: src.to_string(),
                dest: dest.to_string(),
            })
        }
    }

    /// Recursively copies every entry of `src` into the existing directory `dest`.
    ///
    /// Runs `cp -pPR <src>/* <dest>` through the shell so the glob expands.
    /// Modes and timestamps are preserved and symlinks are copied as links.
    /// Hidden entries of `src` are not matched by the glob.
    ///
    /// # Errors
    ///
    /// - `ToolfsError::InvalidArgument` if either argument is empty.
    /// - `ToolfsError::CopyFailed` when the copy fails, including when `src`
    ///   is empty or missing and the glob matches nothing.
    pub fn copy_contents(&self, src: &str, dest: &str) -> Result<(), ToolfsError> {
        require("src", src)?;
        require("dest", dest)?;
        let flavor = self.flavor();
        // The glob must stay outside the quotes for the shell to expand it.
        let line = format!(
            "{} -pPR {}{}* {}",
            self.q(&self.paths().cp),
            self.q(&self.absolute(src)),
            flavor.separator(),
            self.q(&self.absolute(dest))
        );
        let invocation = Invocation::shell(CommandLine::new(flavor.quiet(&line)));
        if self.run_for_status(&invocation) {
            info!("Copied contents of {} into {}", src, dest);
            Ok(())
        } else {
            Err(ToolfsError::CopyFailed {
                src: src.to_string(),
                dest: dest.to_string(),
            })
        }
    }

    /// Recursively deletes `path`, which must be absolute.
    ///
    /// Write permission is restored on the whole tree first (`chmod -R u+rwX`,
    /// result ignored) so read-only entries do not stop the removal.
    ///
    /// # Arguments
    ///
    /// * `path` - Absolute path of the file or directory tree to remove.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - Whether `rm -rf` succeeded. A path that is already
    ///   absent counts as success.
    ///
    /// # Errors
    ///
    /// `ToolfsError::RelativeDelete` if `path` is not absolute; nothing is run.
    pub fn delete(&self, path: &str) -> Result<bool, ToolfsError> {
        if !self.flavor().is_absolute(path) {
            return Err(ToolfsError::RelativeDelete {
                path: path.to_string(),
            });
        }
        let unlock = Invocation::program(&self.paths().chmod)
            .args(["-R", "u+rwX", path])
            .quiet();
        let _ = self.run_for_status(&unlock);

        let remove = Invocation::program(&self.paths().rm)
            .args(["-rf", path])
            .quiet();
        let removed = self.run_for_status(&remove);
        if removed {
            info!("Deleted {}", path);
        }
        Ok(removed)
    }

    /// Applies `mode` (octal or symbolic, as `chmod` understands it) to `path`.
    ///
    /// # Errors
    ///
    /// - `ToolfsError::InvalidArgument` if `path` or `mode` is empty.
    /// - `ToolfsError::OperationFailed` when `chmod` fails.
    pub fn set_permissions(&self, path: &str, mode: &str) -> Result<(), ToolfsError> {
        require("path", path)?;
        require("mode", mode)?;
        let invocation = Invocation::program(&self.paths().chmod)
            .arg(mode)
            .arg(self.absolute(path))
            .quiet();
        if self.run_for_status(&invocation) {
            Ok(())
        } else {
            Err(ToolfsError::OperationFailed(format!(
                "Failed setting permissions of {} to {}",
                path, mode
            )))
        }
    }

    fn strip_trailing_separator<'a>(&self, path: &'a str) -> &'a str {
        let mut chars = path.chars();
        match chars.next_back() {
            Some(last) if path.len() > 1 && self.flavor().is_separator(last) => chars.as_str(),
            _ => path,
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use crate::common::fs::Tools;
    use crate::common::process::DryRunExecutor;
    use crate::common::shell::ShellFlavor;
    use crate::core::config::Config;
    use crate::core::error::ToolfsError;

    fn dry(dir: &str) -> Tools<DryRunExecutor> {
        Tools::new(
            &Config::default(),
            dir,
            DryRunExecutor::new(ShellFlavor::Posix),
        )
    }

    #[test]
    fn test_make_dir_reports_success_even_if_mkdir_fails() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix).with_outcome(|_| false),
        );
        assert_eq!(tools.make_dir("a/b"), Ok(()));
        assert_eq!(
            tools.executor().rendered(),
            vec!["'mkdir' '-p' '/work/a/b' >/dev/null 2>&1".to_string()]
        );
    }

    #[test]
    fn test_make_dir_rejects_empty() {
        let tools = dry("/work");
        assert!(matches!(
            tools.make_dir(""),
            Err(ToolfsError::InvalidArgument(_))
        ));
        assert!(tools.executor().invocations().is_empty());
    }

    #[test]
    fn test_copy_strips_one_trailing_separator_from_dest_only() {
        let tools = dry("/work");
        tools.copy("a/b/", "dest/").unwrap();
        tools.copy("a/b", "dest").unwrap();
        tools.copy("a/b", "/").unwrap();
        let rendered = tools.executor().rendered();
        assert_eq!(rendered[0], "'cp' '/work/a/b/' '/work/dest' >/dev/null 2>&1");
        assert_eq!(rendered[1], "'cp' '/work/a/b' '/work/dest' >/dev/null 2>&1");
        assert_eq!(rendered[2], "'cp' '/work/a/b' '/' >/dev/null 2>&1");
    }

    #[test]
    fn test_cmd_copy_strips_backslash() {
        let tools = Tools::new(
            &Config::default(),
            "C:\\work",
            DryRunExecutor::new(ShellFlavor::Cmd),
        );
        tools.copy("a.txt", "D:\\dest\\").unwrap();
        assert_eq!(
            tools.executor().rendered(),
            vec![r#""cp" "C:\work\a.txt" "D:\dest" >NUL 2>NUL"#.to_string()]
        );
    }

    #[test]
    fn test_copy_failure_names_both_paths() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix).with_outcome(|_| false),
        );
        let err = tools.copy("a.txt", "out/").unwrap_err();
        assert_eq!(err.to_string(), "Failed copying a.txt to out/");
        let err = tools.copy_contents("src", "out").unwrap_err();
        assert_eq!(err.to_string(), "Failed copying src to out");
    }

    #[test]
    fn test_copy_contents_globs_outside_quotes() {
        let tools = dry("/work");
        tools.copy_contents("my src", "/dest").unwrap();
        assert_eq!(
            tools.executor().rendered(),
            vec!["'cp' -pPR '/work/my src'/* '/dest' >/dev/null 2>&1".to_string()]
        );
    }

    #[test]
    fn test_delete_refuses_relative_paths() {
        let tools = dry("/work");
        assert_eq!(
            tools.delete("subdir/file.txt"),
            Err(ToolfsError::RelativeDelete {
                path: "subdir/file.txt".into()
            })
        );
        assert!(tools.delete("").is_err());
        assert!(tools.executor().invocations().is_empty());
    }

    #[test]
    fn test_delete_unlocks_then_removes_and_reports_removal_only() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix)
                .with_outcome(|inv| inv.render(ShellFlavor::Posix).starts_with("'rm'")),
        );
        assert_eq!(tools.delete("/work/tree"), Ok(true));
        assert_eq!(
            tools.executor().rendered(),
            vec![
                "'chmod' '-R' 'u+rwX' '/work/tree' >/dev/null 2>&1".to_string(),
                "'rm' '-rf' '/work/tree' >/dev/null 2>&1".to_string(),
            ]
        );
    }

    #[test]
    fn test_cmd_delete_accepts_drive_paths() {
        let tools = Tools::new(
            &Config::default(),
            "C:\\work",
            DryRunExecutor::new(ShellFlavor::Cmd),
        );
        assert_eq!(tools.delete("C:\\work\\tree"), Ok(true));
        assert_eq!(tools.delete("\\tree"), Ok(true));
        assert!(tools.delete("tree").is_err());
    }

    #[test]
    fn test_remove_dir_variants_never_fail() {
        let tools = Tools::new(
            &Config::default(),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix).with_outcome(|_| false),
        );
        tools.remove_dir_if_empty("a");
        tools.remove_dir_tree_if_empty("a/b");
        tools.remove_dir_if_empty("");
        assert_eq!(
            tools.executor().rendered(),
            vec![
                "'rmdir' '/work/a' >/dev/null 2>&1".to_string(),
                "'rmdir' '-p' '/work/a/b' >/dev/null 2>&1".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    mod on_host {
        use super::*;
        use crate::common::process::SystemExecutor;
        use std::fs;
        use std::path::Path;
        use tempfile::tempdir;
        use walkdir::WalkDir;

        fn host(dir: &Path) -> Tools {
            Tools::new(
                &Config::default(),
                dir.to_string_lossy(),
                SystemExecutor::new(ShellFlavor::Posix),
            )
        }

        #[test]
        fn test_make_dir_is_idempotent() -> anyhow::Result<()> {
            let dir = tempdir()?;
            let tools = host(dir.path());
            tools.make_dir("x/y z")?;
            tools.make_dir("x/y z")?;
            assert!(tools.is_dir("x/y z"));
            Ok(())
        }

        #[test]
        fn test_copy_into_directory_with_and_without_slash() -> anyhow::Result<()> {
            let dir = tempdir()?;
            fs::write(dir.path().join("a.txt"), "hello")?;
            fs::create_dir(dir.path().join("dest"))?;
            let tools = host(dir.path());

            tools.copy("a.txt", "dest/")?;
            assert_eq!(fs::read_to_string(dir.path().join("dest/a.txt"))?, "hello");
            fs::remove_file(dir.path().join("dest/a.txt"))?;
            tools.copy("a.txt", "dest")?;
            assert_eq!(fs::read_to_string(dir.path().join("dest/a.txt"))?, "hello");

            assert!(tools.copy("missing.txt", "dest").is_err());
            Ok(())
        }

        #[test]
        fn test_copy_contents_recursive() -> anyhow::Result<()> {
            let dir = tempdir()?;
            fs::create_dir_all(dir.path().join("src dir/nested"))?;
            fs::write(dir.path().join("src dir/top.txt"), "1")?;
            fs::write(dir.path().join("src dir/nested/deep.txt"), "2")?;
            fs::create_dir(dir.path().join("out"))?;
            let tools = host(dir.path());

            tools.copy_contents("src dir", "out")?;

            let copied: Vec<String> = WalkDir::new(dir.path().join("out"))
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| {
                    e.path()
                        .strip_prefix(dir.path().join("out"))
                        .map(|p| p.to_string_lossy().to_string())
                        .unwrap_or_default()
                })
                .collect();
            assert_eq!(copied, vec!["nested", "nested/deep.txt", "top.txt"]);
            Ok(())
        }

        #[test]
        fn test_delete_then_exists_is_false() -> anyhow::Result<()> {
            let dir = tempdir()?;
            let tree = dir.path().join("tree");
            fs::create_dir_all(tree.join("locked"))?;
            fs::write(tree.join("locked/file"), "x")?;
            let tools = host(dir.path());
            tools.set_permissions("tree/locked", "0555")?;

            let tree_str = tree.to_string_lossy().to_string();
            assert!(tools.exists(&tree_str));
            assert_eq!(tools.delete(&tree_str), Ok(true));
            assert!(!tools.exists(&tree_str));
            Ok(())
        }

        #[test]
        fn test_remove_dir_if_empty_leaves_full_dirs() -> anyhow::Result<()> {
            let dir = tempdir()?;
            fs::create_dir(dir.path().join("empty"))?;
            fs::create_dir(dir.path().join("full"))?;
            fs::write(dir.path().join("full/f"), "x")?;
            let tools = host(dir.path());

            tools.remove_dir_if_empty("empty");
            tools.remove_dir_if_empty("full");
            tools.remove_dir_if_empty("never-existed");

            assert!(!dir.path().join("empty").exists());
            assert!(dir.path().join("full/f").exists());
            Ok(())
        }
    }
}
