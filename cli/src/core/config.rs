//! # toolfs Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration consumed by the
//! operation layer: the user-agent string sent by downloads, which fetch tool
//! to use, an optional shell-flavor override, and the paths of every external
//! tool toolfs invokes.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.toolfs.toml` in the starting directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `<config dir>/toolfs/config.toml`
//! 3. Default values defined in the code
//!
//! After merging, tool paths are `~`-expanded and the result is validated.
//!
//! ## Examples
//!
//! ```toml
//! user_agent = "my-installer/2.1"
//! downloader = "curl"
//!
//! [tools]
//! sevenz = "~/bin/7z"
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config(&std::env::current_dir()?)?;
//! let tools = Tools::new(&cfg, cwd, SystemExecutor::new(cfg.shell_flavor()));
//! ```
//!
use crate::common::shell::ShellFlavor;
use crate::core::error::{Result, ToolfsError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// User agent announced by downloads (the fetch tool's name is appended).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Shell family to build command lines for. Defaults to the host's.
    #[serde(default)]
    pub shell: Option<ShellFlavor>,
    /// Which fetch tool `download` drives.
    #[serde(default)]
    pub downloader: Downloader,
    /// Paths (or bare names looked up in PATH) of the external tools.
    #[serde(default)]
    pub tools: ToolPaths,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: default_user_agent(),
            shell: None,
            downloader: Downloader::default(),
            tools: ToolPaths::default(),
        }
    }
}

impl Config {
    /// The configured shell flavor, or the host's when none is set.
    pub fn shell_flavor(&self) -> ShellFlavor {
        self.shell.unwrap_or_else(ShellFlavor::host)
    }
}

/// Fetch tool used by `download`.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Downloader {
    #[default]
    Wget,
    Curl,
}

/// Locations of the external tools, keyed by role.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub mkdir: String,
    pub cp: String,
    pub rm: String,
    pub rmdir: String,
    pub chmod: String,
    pub ls: String,
    pub find: String,
    pub test: String,
    pub wget: String,
    pub curl: String,
    pub tar: String,
    pub unzip: String,
    pub zip: String,
    pub gunzip: String,
    pub gzip: String,
    pub bunzip2: String,
    pub bzip2: String,
    pub sevenz: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        ToolPaths {
            mkdir: "mkdir".into(),
            cp: "cp".into(),
            rm: "rm".into(),
            rmdir: "rmdir".into(),
            chmod: "chmod".into(),
            ls: "ls".into(),
            find: "find".into(),
            test: "test".into(),
            wget: "wget".into(),
            curl: "curl".into(),
            tar: "tar".into(),
            unzip: "unzip".into(),
            zip: "zip".into(),
            gunzip: "gunzip".into(),
            gzip: "gzip".into(),
            bunzip2: "bunzip2".into(),
            bzip2: "bzip2".into(),
            sevenz: "7z".into(),
        }
    }
}

/// Generates by-name accessors over every tool field.
macro_rules! tool_fields {
    ($($field:ident)+) => {
        impl ToolPaths {
            /// Every tool as `(role, path)`, in declaration order.
            pub fn entries(&self) -> Vec<(&'static str, &String)> {
                vec![$((stringify!($field), &self.$field)),+]
            }

            fn entries_mut(&mut self) -> Vec<(&'static str, &mut String)> {
                vec![$((stringify!($field), &mut self.$field)),+]
            }
        }
    };
}

tool_fields!(mkdir cp rm rmdir chmod ls find test wget curl tar unzip zip gunzip gzip bunzip2 bzip2 sevenz);

fn default_user_agent() -> String {
    format!("toolfs/{}", env!("CARGO_PKG_VERSION"))
}

const PROJECT_CONFIG_FILENAME: &str = ".toolfs.toml";

/// Loads the merged configuration for work rooted at `start_dir`.
pub fn load_config(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;
    let merged = merge_configs(user_config.unwrap_or_default(), project_config);
    finalize(merged)
}

/// Loads a single explicit configuration file on top of the defaults.
pub fn load_config_file(path: &Path) -> Result<Config> {
    finalize(load_config_from_path(path)?)
}

fn finalize(mut config: Config) -> Result<Config> {
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("org", "toolfs", "toolfs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.toolfs.toml) found.");
        Ok(None)
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let mut merged = user;

    if project.user_agent != defaults.user_agent {
        merged.user_agent = project.user_agent;
    }
    if project.shell.is_some() {
        merged.shell = project.shell;
    }
    if project.downloader != defaults.downloader {
        merged.downloader = project.downloader;
    }
    let default_tools = defaults.tools;
    let overrides = project.tools.entries().into_iter().zip(default_tools.entries());
    for ((_, slot), ((_, value), (_, default_value))) in
        merged.tools.entries_mut().into_iter().zip(overrides)
    {
        if value != default_value {
            *slot = value.clone();
        }
    }
    merged
}

fn expand_config_paths(config: &mut Config) {
    for (name, value) in config.tools.entries_mut() {
        let expanded = shellexpand::tilde(value.as_str()).into_owned();
        if expanded != *value {
            debug!("Expanded tool path for {}: {}", name, expanded);
            *value = expanded;
        }
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.user_agent.trim().is_empty() {
        return Err(anyhow!(ToolfsError::Config(
            "user_agent cannot be empty".to_string()
        )));
    }
    let empty: Vec<&str> = config
        .tools
        .entries()
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
    if !empty.is_empty() {
        return Err(anyhow!(ToolfsError::Config(format!(
            "Tool paths cannot be empty: {}",
            empty.join(", ")
        ))));
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            user_agent = "installer/2.0"
            shell = "cmd"
            downloader = "curl"

            [tools]
            sevenz = "C:/7-Zip/7z.exe"
            ls = "/opt/bin/ls"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.user_agent, "installer/2.0");
        assert_eq!(config.shell, Some(ShellFlavor::Cmd));
        assert_eq!(config.shell_flavor(), ShellFlavor::Cmd);
        assert_eq!(config.downloader, Downloader::Curl);
        assert_eq!(config.tools.sevenz, "C:/7-Zip/7z.exe");
        assert_eq!(config.tools.ls, "/opt/bin/ls");
        assert_eq!(config.tools.tar, "tar"); // Default
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").expect("Failed to parse TOML");
        assert_eq!(config, Config::default());
        assert!(config.user_agent.starts_with("toolfs/"));
        assert_eq!(config.shell_flavor(), ShellFlavor::host());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(toml::from_str::<Config>("colour = \"blue\"").is_err());
        assert!(toml::from_str::<Config>("[tools]\nfrobnicate = \"x\"").is_err());
    }

    #[test]
    fn test_merge_project_over_user() {
        let mut user = Config::default();
        user.user_agent = "user-agent/1".into();
        user.tools.tar = "/user/tar".into();
        user.tools.cp = "/user/cp".into();

        let mut project = Config::default();
        project.downloader = Downloader::Curl;
        project.tools.tar = "/project/tar".into();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.user_agent, "user-agent/1"); // project left it at default
        assert_eq!(merged.downloader, Downloader::Curl);
        assert_eq!(merged.tools.tar, "/project/tar");
        assert_eq!(merged.tools.cp, "/user/cp");
        assert_eq!(merged.tools.ls, "ls");
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config::default();
        config.tools.sevenz = "~/bin/7z".into();
        config.tools.tar = "/absolute/tar".into();

        expand_config_paths(&mut config);

        assert!(!config.tools.sevenz.starts_with('~'));
        assert!(config.tools.sevenz.ends_with("bin/7z"));
        assert_eq!(config.tools.tar, "/absolute/tar");
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = Config::default();
        config.tools.unzip = " ".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("unzip"));

        let mut config = Config::default();
        config.user_agent = String::new();
        assert!(validate_config(&config).is_err());

        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_project_config_discovery() -> Result<()> {
        let root = tempdir()?;
        fs::create_dir(root.path().join(".git"))?;
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested)?;

        assert_eq!(find_project_config_path(&nested), None);

        fs::write(
            root.path().join(PROJECT_CONFIG_FILENAME),
            "downloader = \"curl\"\n",
        )?;
        let found = find_project_config_path(&nested);
        assert_eq!(found, Some(root.path().join(PROJECT_CONFIG_FILENAME)));

        let loaded = load_config_file(&root.path().join(PROJECT_CONFIG_FILENAME))?;
        assert_eq!(loaded.downloader, Downloader::Curl);
        Ok(())
    }
}
