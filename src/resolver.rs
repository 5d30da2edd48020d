// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Resolution of a version specifier to a concrete version

use tracing::debug;

use crate::catalog::{Catalog, CatalogSource};
use crate::error::{Result, SetupError};
use crate::version::{ResolvedVersion, VersionRange, VersionSpecifier};

/// Resolve a specifier to a concrete version
///
/// The nightly alias and exact versions never touch the catalog. Ranges and
/// partial versions are matched against a freshly fetched catalog and resolve
/// to the highest matching entry.
///
/// # Errors
/// Returns `InvalidSpecifier` for malformed input, `CatalogFetch` if the
/// catalog is needed but unavailable, and `VersionNotFound` if no published
/// version satisfies the range
pub fn resolve(specifier: &str, catalog: &dyn CatalogSource) -> Result<ResolvedVersion> {
    match VersionSpecifier::parse(specifier)? {
        VersionSpecifier::Nightly => Ok(ResolvedVersion::Nightly),
        VersionSpecifier::Exact(version) => Ok(ResolvedVersion::Release(version)),
        VersionSpecifier::Range(range) => {
            let available = catalog.list_available()?;
            debug!(specifier, candidates = available.len(), "matching range against catalog");
            find_matching_version(&range, &available)
                .map(ResolvedVersion::Release)
                .ok_or_else(|| SetupError::VersionNotFound(specifier.to_string()))
        }
    }
}

/// Highest catalog entry satisfying `range`
///
/// Scans from the newest version down and stops at the first match.
#[must_use]
pub fn find_matching_version(range: &VersionRange, catalog: &Catalog) -> Option<semver::Version> {
    catalog
        .versions()
        .iter()
        .rev()
        .find(|v| range.matches(v))
        .cloned()
}
