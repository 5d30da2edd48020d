// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Catalog of published Deno versions
//!
//! The catalog is read from a plain-text document (the upstream
//! `Releases.md` by default) by pattern matching on version-like tokens, so
//! it also accepts a git tag listing. It is fetched fresh for every range
//! resolution and never persisted.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use tracing::debug;

use crate::error::{Result, SetupError};
use crate::http::Fetch;

/// Default catalog document
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/denoland/deno/main/Releases.md";

/// Placeholder that denotes "no release", never a real version
const PLACEHOLDER_VERSION: Version = Version::new(0, 0, 0);

/// Release-note headings ("### v1.2.3 / 2020.01.01") and tag references
/// ("refs/tags/v1.2.3", `"name": "v1.2.3"`)
static VERSION_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?m)^#{2,3}\s+v?(\d+\.\d+\.\d+)\b").expect("static regex"),
        Regex::new(r#"(?:refs/tags/|"(?:tag_)?name"\s*:\s*")v?(\d+\.\d+\.\d+)\b"#)
            .expect("static regex"),
    ]
});

/// Published versions, deduplicated and sorted ascending
///
/// An empty catalog is valid data: the fetch succeeded but found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    versions: Vec<Version>,
}

impl Catalog {
    #[must_use]
    pub fn from_versions(versions: impl IntoIterator<Item = Version>) -> Self {
        let unique: BTreeSet<Version> = versions
            .into_iter()
            .filter(|v| *v != PLACEHOLDER_VERSION)
            .collect();
        Self {
            versions: unique.into_iter().collect(),
        }
    }

    /// Extract every version-like token from a document body
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let found = VERSION_PATTERNS.iter().flat_map(|pattern| {
            pattern
                .captures_iter(body)
                .filter_map(|caps| Version::parse(&caps[1]).ok())
        });
        Self::from_versions(found)
    }

    /// Versions in ascending order
    #[must_use]
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Version> {
        self.versions.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Source of the version catalog
pub trait CatalogSource {
    /// Fetch the complete list of published versions
    ///
    /// # Errors
    /// Returns `CatalogFetch` if the listing cannot be retrieved
    fn list_available(&self) -> Result<Catalog>;
}

/// Catalog read from a remote document through a [`Fetch`] implementation
pub struct RemoteCatalog<'a> {
    fetcher: &'a dyn Fetch,
    url: String,
}

impl<'a> RemoteCatalog<'a> {
    #[must_use]
    pub fn new(fetcher: &'a dyn Fetch, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
        }
    }
}

impl CatalogSource for RemoteCatalog<'_> {
    fn list_available(&self) -> Result<Catalog> {
        let body = self
            .fetcher
            .fetch_text(&self.url)
            .map_err(|e| SetupError::CatalogFetch {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let catalog = Catalog::parse(&body);
        debug!(url = %self.url, count = catalog.len(), "fetched version catalog");
        Ok(catalog)
    }
}
