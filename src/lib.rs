// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Deno setup for CI job runners
//!
//! This library resolves a version specifier (exact, range or `nightly`) to a
//! concrete Deno release, downloads the matching platform archive, extracts
//! it and registers the result in the runner tool cache.

pub mod acquire;
pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod installer;
pub mod platform;
pub mod resolver;
pub mod runner;
pub mod tool_cache;
pub mod version;

// Re-export commonly used items at the crate root for convenience
pub use catalog::{Catalog, CatalogSource, RemoteCatalog};
pub use config::{Config, TOOL_NAME};
pub use download::{ArchiveDescriptor, ArchiveFormat, build_archive, build_url};
pub use error::SetupError;
pub use http::{Fetch, FetchError, HttpFetcher};
pub use installer::{InstallSource, Installation, Installer};
pub use platform::{HostOs, PlatformDescriptor, RELEASE_NAMING, ReleaseEra, identify};
pub use resolver::resolve;
pub use tool_cache::ToolCache;
pub use version::{NIGHTLY, ResolvedVersion, VersionRange, VersionSpecifier};
