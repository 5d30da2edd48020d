// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Runtime configuration for one setup run
//!
//! Built once at process entry and passed by reference to every stage, so
//! nothing in the pipeline reads the environment on its own.

use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::platform::runner_arch;

/// Name the tool is cached under
pub const TOOL_NAME: &str = "deno";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the runner tool cache
    pub tool_cache_dir: PathBuf,
    /// Scratch space for downloads and extraction
    pub temp_dir: PathBuf,
    /// Host OS name as reported by `std::env::consts::OS`
    pub os: String,
    /// Architecture key used in the tool cache (runner vocabulary)
    pub arch: String,
    /// Document listing published versions
    pub catalog_url: String,
}

impl Config {
    /// Configuration for the current host, with optional directory overrides
    ///
    /// Missing directories fall back to `actions/cache` and `actions/temp`
    /// under a per-OS base location.
    #[must_use]
    pub fn for_host(tool_cache_dir: Option<PathBuf>, temp_dir: Option<PathBuf>) -> Self {
        let os = std::env::consts::OS.to_string();
        let base = default_base_dir(&os);
        Self {
            tool_cache_dir: tool_cache_dir.unwrap_or_else(|| base.join("actions").join("cache")),
            temp_dir: temp_dir.unwrap_or_else(|| base.join("actions").join("temp")),
            arch: runner_arch(std::env::consts::ARCH),
            os,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
        }
    }

    /// Configuration rooted under `root`, mainly for tests and local runs
    #[must_use]
    pub fn rooted_at(root: &Path) -> Self {
        Self::for_host(Some(root.join("tools")), Some(root.join("temp")))
    }

    #[must_use]
    pub fn with_os(mut self, os: &str) -> Self {
        self.os = os.to_string();
        self
    }

    #[must_use]
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }
}

/// Base location used when the runner does not provide directories
///
/// Windows uses the user profile (falling back to `C:\`), macOS `/Users`
/// and everything else `/home`.
#[must_use]
pub fn default_base_dir(os: &str) -> PathBuf {
    match os {
        "windows" => home::home_dir().unwrap_or_else(|| PathBuf::from("C:\\")),
        "macos" => PathBuf::from("/Users"),
        _ => PathBuf::from("/home"),
    }
}
