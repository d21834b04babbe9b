//! # toolfs Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Remote downloads through an external fetch tool. `wget` is the default;
//! `curl` can be selected in the configuration (`downloader = "curl"`).
//!
//! Whatever the tool, a download:
//!
//! - announces the configured user agent, suffixed with ` via <tool>`,
//! - runs quietly,
//! - resumes a partially downloaded file instead of starting over,
//! - writes to `filename` when one is given, otherwise lets the tool derive
//!   the name from the URL,
//! - runs scoped to the dispatcher's `current_dir`, which is where derived
//!   and relative file names end up.
//!
//! ```text
//! cd '/work' && 'wget' --no-check-certificate --no-cache --user-agent='toolfs/0.1.0 via wget' --quiet --continue 'https://host/pkg.tgz'
//! ```
//!
use crate::common::fs::Tools;
use crate::common::process::Executor;
use crate::core::config::Downloader;
use tracing::{info, warn};

impl<E: Executor> Tools<E> {
    /// Fetches `url` into `current_dir`.
    ///
    /// # Arguments
    ///
    /// * `url` - Address to fetch. An empty URL fails without running anything.
    /// * `filename` - Name to write. `None` lets the fetch tool derive it from
    ///   the URL.
    ///
    /// # Returns
    ///
    /// * `bool` - `true` iff the fetch tool exited with status zero. An
    ///   existing partial file is resumed rather than replaced.
    pub fn download(&self, url: &str, filename: Option<&str>) -> bool {
        if url.is_empty() {
            warn!("Refusing to download an empty URL");
            return false;
        }
        let line = self.download_command(url, filename);
        let ok = self.run_for_status(&self.scoped(self.current_dir(), &line));
        if ok {
            info!("Downloaded {}", url);
        } else {
            warn!("Download of {} failed", url);
        }
        ok
    }

    fn download_command(&self, url: &str, filename: Option<&str>) -> String {
        let mut words = Vec::new();
        match self.downloader() {
            Downloader::Wget => {
                let agent = format!("{} via wget", self.user_agent());
                words.push(self.q(&self.paths().wget));
                words.push("--no-check-certificate --no-cache".to_string());
                words.push(format!("--user-agent={}", self.q(&agent)));
                words.push("--quiet --continue".to_string());
                if let Some(name) = filename {
                    words.push(format!("--output-document {}", self.q(name)));
                }
            }
            Downloader::Curl => {
                let agent = format!("{} via curl", self.user_agent());
                words.push(self.q(&self.paths().curl));
                words.push("-f -L --silent".to_string());
                words.push(format!("--user-agent {}", self.q(&agent)));
                words.push("--continue-at -".to_string());
                match filename {
                    Some(name) => words.push(format!("--output {}", self.q(name))),
                    None => words.push("--remote-name".to_string()),
                }
            }
        }
        words.push(self.q(url));
        words.join(" ")
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use crate::common::fs::Tools;
    use crate::common::process::DryRunExecutor;
    use crate::common::shell::ShellFlavor;
    use crate::core::config::{Config, Downloader};

    fn config(downloader: Downloader) -> Config {
        Config {
            user_agent: "toolfs/test".into(),
            downloader,
            ..Config::default()
        }
    }

    #[test]
    fn test_wget_without_filename() {
        let tools = Tools::new(
            &config(Downloader::Wget),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix),
        );
        assert!(tools.download("https://example.com/pkg.tgz", None));
        assert_eq!(
            tools.executor().rendered(),
            vec![
                "cd '/work' && 'wget' --no-check-certificate --no-cache \
                 --user-agent='toolfs/test via wget' --quiet --continue \
                 'https://example.com/pkg.tgz'"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_wget_with_filename_on_cmd() {
        let tools = Tools::new(
            &config(Downloader::Wget),
            "C:\\dl",
            DryRunExecutor::new(ShellFlavor::Cmd),
        );
        assert!(tools.download("https://example.com/a b.zip", Some("out.zip")));
        assert_eq!(
            tools.executor().rendered()[0],
            r#"C: & cd "C:\dl" && "wget" --no-check-certificate --no-cache --user-agent="toolfs/test via wget" --quiet --continue --output-document "out.zip" "https://example.com/a b.zip""#
        );
    }

    #[test]
    fn test_curl_variants() {
        let tools = Tools::new(
            &config(Downloader::Curl),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix),
        );
        tools.download("https://h/x.rock", None);
        tools.download("https://h/x.rock", Some("y.rock"));
        let rendered = tools.executor().rendered();
        assert_eq!(
            rendered[0],
            "cd '/work' && 'curl' -f -L --silent --user-agent 'toolfs/test via curl' \
             --continue-at - --remote-name 'https://h/x.rock'"
        );
        assert!(rendered[1].contains("--output 'y.rock' 'https://h/x.rock'"));
    }

    #[test]
    fn test_failures_and_empty_url() {
        let tools = Tools::new(
            &config(Downloader::Wget),
            "/work",
            DryRunExecutor::new(ShellFlavor::Posix).with_outcome(|_| false),
        );
        assert!(!tools.download("https://example.com/x", None));
        assert!(!tools.download("", None));
        assert_eq!(tools.executor().invocations().len(), 1);
    }
}
