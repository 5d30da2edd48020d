// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! End-to-end installation: cache probe, resolution, download and commit
//!
//! The sequence is linear. The tool cache is probed with the raw specifier,
//! then with the resolved version, and only then is the archive downloaded,
//! extracted and committed.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::acquire::acquire;
use crate::catalog::RemoteCatalog;
use crate::config::{Config, TOOL_NAME};
use crate::download::build_archive;
use crate::error::{Result, SetupError};
use crate::http::Fetch;
use crate::platform::{PlatformDescriptor, ReleaseEra};
use crate::resolver::resolve;
use crate::tool_cache::ToolCache;
use crate::version::{NIGHTLY, ResolvedVersion};

/// Where an installed directory came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSource {
    Cache,
    Download,
}

/// Outcome of a successful installation
#[derive(Debug, Clone)]
pub struct Installation {
    /// Version string the tool is cached under
    pub version: String,
    /// Directory holding the Deno executable
    pub path: PathBuf,
    pub source: InstallSource,
}

pub struct Installer<'a> {
    config: &'a Config,
    fetcher: &'a dyn Fetch,
    cache: ToolCache,
}

impl<'a> Installer<'a> {
    #[must_use]
    pub fn new(config: &'a Config, fetcher: &'a dyn Fetch) -> Self {
        Self {
            config,
            fetcher,
            cache: ToolCache::new(&config.tool_cache_dir, &config.arch),
        }
    }

    /// Install Deno for `specifier`, reusing the tool cache when possible
    ///
    /// # Errors
    /// Any stage failure is returned unchanged; nothing is committed to the
    /// cache unless the whole acquisition succeeded
    pub fn install(&self, specifier: &str) -> Result<Installation> {
        let specifier = specifier.trim();
        let rolling = specifier == NIGHTLY;

        if !rolling && let Some((version, path)) = self.cache.find_entry(TOOL_NAME, specifier) {
            return Ok(self.cached(&version, path));
        }

        let catalog = RemoteCatalog::new(self.fetcher, &self.config.catalog_url);
        let resolved = resolve(specifier, &catalog)?;
        if resolved.cache_key() != specifier {
            debug!(specifier, resolved = %resolved, "resolved version");
        }

        if !resolved.is_nightly()
            && let Some((version, path)) = self.cache.find_entry(TOOL_NAME, &resolved.cache_key())
        {
            return Ok(self.cached(&version, path));
        }

        let path = self.acquire(&resolved, specifier)?;
        info!(version = %resolved, path = %path.display(), "installed deno");
        Ok(Installation {
            version: resolved.cache_key(),
            path,
            source: InstallSource::Download,
        })
    }

    fn cached(&self, version: &str, path: PathBuf) -> Installation {
        info!(version, path = %path.display(), "using cached deno");
        Installation {
            version: version.to_string(),
            path,
            source: InstallSource::Cache,
        }
    }

    fn acquire(&self, resolved: &ResolvedVersion, specifier: &str) -> Result<PathBuf> {
        let era = ReleaseEra::classify(resolved);
        let platform = PlatformDescriptor::for_era(&self.config.os, era)?;
        let archive = build_archive(resolved, era, &platform);
        debug!(url = %archive.url, ?era, "acquiring archive");

        let extracted = acquire(self.fetcher, self.config, &archive).map_err(|e| match e {
            SetupError::Download(fetch) if fetch.is_not_found() && !resolved.is_nightly() => {
                debug!(error = %fetch, "release archive not found upstream");
                SetupError::VersionNotFound(specifier.to_string())
            }
            other => other,
        })?;

        self.cache
            .commit(&extracted, TOOL_NAME, &resolved.cache_key())
    }
}
