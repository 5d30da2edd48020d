// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Runner tool cache for installed Deno directories
//!
//! Entries follow the CI runner layout `{root}/{tool}/{version}/{arch}`. An
//! entry only counts once its sibling `{arch}.complete` marker exists, which
//! is written after every file is in place, so a crashed install is never
//! mistaken for a finished one.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs_extra::dir::CopyOptions;
use semver::Version;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SetupError};
use crate::version::{VersionSpecifier, strip_tag_prefix};

/// Contents of a completion marker
///
/// Only the marker's presence matters; the record is informational.
#[derive(Debug, Serialize)]
pub struct CompletionMarker {
    pub tool: String,
    pub version: String,
    pub arch: String,
    pub installed_at: DateTime<Utc>,
}

/// Tool cache rooted at one directory, for one architecture
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
    arch: String,
}

impl ToolCache {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, arch: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            arch: arch.into(),
        }
    }

    /// Directory an entry lives in, whether or not it is complete
    #[must_use]
    pub fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root
            .join(tool)
            .join(strip_tag_prefix(version))
            .join(&self.arch)
    }

    fn marker_path(&self, tool: &str, version: &str) -> PathBuf {
        self.root
            .join(tool)
            .join(strip_tag_prefix(version))
            .join(format!("{}.complete", self.arch))
    }

    fn is_complete(&self, tool: &str, version: &str) -> bool {
        self.entry_dir(tool, version).is_dir() && self.marker_path(tool, version).is_file()
    }

    /// Look up a completed entry
    ///
    /// `spec` may be an exact version or a range; a range selects the highest
    /// completed local version that satisfies it. Anything unparseable is a
    /// miss.
    #[must_use]
    pub fn find(&self, tool: &str, spec: &str) -> Option<PathBuf> {
        self.find_entry(tool, spec).map(|(_, path)| path)
    }

    /// Like [`ToolCache::find`], also returning the version that matched
    #[must_use]
    pub fn find_entry(&self, tool: &str, spec: &str) -> Option<(String, PathBuf)> {
        let version = match VersionSpecifier::parse(spec).ok()? {
            VersionSpecifier::Exact(version) => version.to_string(),
            VersionSpecifier::Range(range) => self
                .list_versions(tool)
                .into_iter()
                .rev()
                .find(|v| range.matches(v))?
                .to_string(),
            VersionSpecifier::Nightly => spec.trim().to_string(),
        };

        if self.is_complete(tool, &version) {
            let path = self.entry_dir(tool, &version);
            debug!(tool, spec, path = %path.display(), "tool cache hit");
            Some((version, path))
        } else {
            debug!(tool, spec, "tool cache miss");
            None
        }
    }

    /// Completed semantic versions of `tool`, ascending
    #[must_use]
    pub fn list_versions(&self, tool: &str) -> Vec<Version> {
        let Ok(entries) = fs::read_dir(self.root.join(tool)) else {
            return Vec::new();
        };

        let mut versions: Vec<Version> = entries
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.is_complete(tool, name))
            .filter_map(|name| Version::parse(&name).ok())
            .collect();
        versions.sort();
        versions
    }

    /// Register the contents of `source_dir` as `tool` at `version`
    ///
    /// Any previous entry is replaced. The marker is written last, after the
    /// copy has fully succeeded.
    ///
    /// # Errors
    /// Returns `Cache` if the entry cannot be cleared, copied or marked
    pub fn commit(&self, source_dir: &Path, tool: &str, version: &str) -> Result<PathBuf> {
        let version = strip_tag_prefix(version);
        let dest = self.entry_dir(tool, version);
        let marker = self.marker_path(tool, version);
        let cache_err = |action: &str, e: &dyn std::fmt::Display| {
            SetupError::Cache(format!("{action} {}: {e}", dest.display()))
        };

        if marker.exists() {
            fs::remove_file(&marker).map_err(|e| cache_err("failed to clear marker for", &e))?;
        }
        if dest.exists() {
            fs::remove_dir_all(&dest).map_err(|e| cache_err("failed to clear", &e))?;
        }
        fs::create_dir_all(&dest).map_err(|e| cache_err("failed to create", &e))?;

        let options = CopyOptions::new().content_only(true).overwrite(true);
        fs_extra::dir::copy(source_dir, &dest, &options)
            .map_err(|e| cache_err("failed to copy into", &e))?;

        let record = CompletionMarker {
            tool: tool.to_string(),
            version: version.to_string(),
            arch: self.arch.clone(),
            installed_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&record)
            .map_err(|e| cache_err("failed to serialize marker for", &e))?;
        fs::write(&marker, content).map_err(|e| cache_err("failed to mark", &e))?;

        debug!(tool, version, path = %dest.display(), "committed to tool cache");
        Ok(dest)
    }
}
