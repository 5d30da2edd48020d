// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Tests for version resolution, URL construction, the tool cache and the
//! full install pipeline
//!
//! Nothing here touches the network: an in-memory `Fetch` implementation
//! serves catalog documents and archives and records every requested URL.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use semver::Version;
use setup_deno::catalog::DEFAULT_CATALOG_URL;
use setup_deno::{
    ArchiveFormat, Catalog, CatalogSource, Config, Fetch, FetchError, InstallSource, Installer,
    PlatformDescriptor, RemoteCatalog, ReleaseEra, ResolvedVersion, SetupError, TOOL_NAME,
    ToolCache, build_archive, build_url, identify, resolve,
};
use tempfile::TempDir;

// =============================================================================
// Test doubles and helpers
// =============================================================================

/// In-memory remote: unknown URLs answer 404 unless a status is configured
#[derive(Default)]
struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
    statuses: HashMap<String, u16>,
    calls: RefCell<Vec<String>>,
}

impl MockFetcher {
    fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    fn fail(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn respond(&self, url: &str) -> Result<&Vec<u8>, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        if let Some(status) = self.statuses.get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            });
        }
        self.bodies.get(url).ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

impl Fetch for MockFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let body = self.respond(url)?;
        Ok(String::from_utf8_lossy(body).into_owned())
    }

    fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let body = self.respond(url)?;
        fs::write(dest, body)?;
        Ok(())
    }
}

/// Catalog with fixed contents that counts how often it is consulted
struct StaticCatalog {
    versions: Vec<&'static str>,
    fetches: RefCell<usize>,
}

impl StaticCatalog {
    fn new(versions: &[&'static str]) -> Self {
        Self {
            versions: versions.to_vec(),
            fetches: RefCell::new(0),
        }
    }
}

impl CatalogSource for StaticCatalog {
    fn list_available(&self) -> setup_deno::error::Result<Catalog> {
        *self.fetches.borrow_mut() += 1;
        Ok(Catalog::from_versions(
            self.versions.iter().map(|v| Version::parse(v).unwrap()),
        ))
    }
}

/// Catalog whose remote is unreachable
struct UnreachableCatalog;

impl CatalogSource for UnreachableCatalog {
    fn list_available(&self) -> setup_deno::error::Result<Catalog> {
        Err(SetupError::CatalogFetch {
            url: DEFAULT_CATALOG_URL.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

fn release(version: &str) -> ResolvedVersion {
    ResolvedVersion::Release(Version::parse(version).unwrap())
}

fn linux_config(root: &TempDir) -> Config {
    Config::rooted_at(root.path()).with_os("linux")
}

fn zip_bytes(name: &str, contents: &[u8]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o644);
    writer.start_file(name, options).unwrap();
    writer.write_all(contents).unwrap();
    writer.finish().unwrap().into_inner()
}

fn gzip_bytes(contents: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(contents).unwrap();
    encoder.finish().unwrap()
}

/// Create a cache entry by hand, optionally with its completion marker
fn seed_cache(config: &Config, version: &str, complete: bool) {
    let version_dir = config.tool_cache_dir.join(TOOL_NAME).join(version);
    let entry = version_dir.join(&config.arch);
    fs::create_dir_all(&entry).unwrap();
    fs::write(entry.join("deno"), b"cached").unwrap();
    if complete {
        fs::write(version_dir.join(format!("{}.complete", config.arch)), "hello").unwrap();
    }
}

fn marker_exists(config: &Config, version: &str) -> bool {
    config
        .tool_cache_dir
        .join(TOOL_NAME)
        .join(version)
        .join(format!("{}.complete", config.arch))
        .is_file()
}

const RELEASES_MD: &str = "\
# Releases

### 1.2.0 / 2020.07.13

### 1.1.2 / 2020.06.26

### v0.38.0 / 2020.03.28

### 0.0.0 / unreleased
";

const MODERN_LINUX_1_2_0: &str =
    "https://github.com/denoland/deno/releases/download/v1.2.0/deno-x86_64-unknown-linux-gnu.zip";
const LEGACY_LINUX_0_20_0: &str =
    "https://github.com/denoland/deno/releases/download/v0.20.0/deno_linux_x64.gz";
const NIGHTLY_LINUX: &str = "https://github.com/maximousblk/deno_nightly/releases/download/latest/deno-x86_64-unknown-linux-gnu.zip";

// =============================================================================
// Version resolution
// =============================================================================

#[cfg(test)]
mod resolver_tests {
    use super::*;

    #[test]
    fn test_exact_versions_pass_through_without_catalog() {
        let catalog = StaticCatalog::new(&["1.1.2", "1.2.0"]);
        assert_eq!(resolve("1.1.2", &catalog).unwrap(), release("1.1.2"));
        assert_eq!(resolve("v1.2.0", &catalog).unwrap(), release("1.2.0"));
        assert_eq!(*catalog.fetches.borrow(), 0);
    }

    #[test]
    fn test_range_picks_highest_match() {
        let catalog = StaticCatalog::new(&["1.1.2", "1.2.0", "0.38.0", "1.1.0"]);
        assert_eq!(resolve("1.x", &catalog).unwrap(), release("1.2.0"));
        assert_eq!(resolve("1", &catalog).unwrap(), release("1.2.0"));
        assert_eq!(resolve("1.1", &catalog).unwrap(), release("1.1.2"));
        assert_eq!(resolve("v1.1.x", &catalog).unwrap(), release("1.1.2"));
        assert_eq!(resolve("~1.1.0", &catalog).unwrap(), release("1.1.2"));
        assert_eq!(resolve("<1.0.0", &catalog).unwrap(), release("0.38.0"));
    }

    #[test]
    fn test_range_fetches_catalog_once() {
        let catalog = StaticCatalog::new(&["1.1.2", "1.2.0"]);
        resolve("1.x", &catalog).unwrap();
        assert_eq!(*catalog.fetches.borrow(), 1);
    }

    #[test]
    fn test_nightly_never_consults_catalog() {
        assert_eq!(
            resolve("nightly", &UnreachableCatalog).unwrap(),
            ResolvedVersion::Nightly
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = StaticCatalog::new(&["1.1.2", "1.2.0"]);
        for spec in ["1.x", "v1.1.2", "1.1", "nightly"] {
            let first = resolve(spec, &catalog).unwrap();
            let second = resolve(&first.to_string(), &catalog).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.to_string(), second.to_string());
        }
    }

    #[test]
    fn test_unmatched_range_is_version_not_found() {
        let catalog = StaticCatalog::new(&["1.1.2", "1.2.0"]);
        let err = resolve("1000", &catalog).unwrap_err();
        assert!(matches!(err, SetupError::VersionNotFound(ref s) if s == "1000"));
    }

    #[test]
    fn test_empty_catalog_is_version_not_found() {
        let catalog = StaticCatalog::new(&[]);
        assert!(matches!(
            resolve("1.x", &catalog),
            Err(SetupError::VersionNotFound(_))
        ));
    }

    #[test]
    fn test_unreachable_catalog_fails_ranges_only() {
        assert!(matches!(
            resolve("1.x", &UnreachableCatalog),
            Err(SetupError::CatalogFetch { .. })
        ));
        assert!(resolve("1.2.0", &UnreachableCatalog).is_ok());
    }

    #[test]
    fn test_invalid_specifier() {
        let catalog = StaticCatalog::new(&["1.2.0"]);
        assert!(matches!(
            resolve("latest-please", &catalog),
            Err(SetupError::InvalidSpecifier { .. })
        ));
        assert_eq!(*catalog.fetches.borrow(), 0);
    }
}

// =============================================================================
// Remote catalog
// =============================================================================

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_remote_catalog_extracts_and_filters() {
        let fetcher = MockFetcher::default().serve(DEFAULT_CATALOG_URL, RELEASES_MD);
        let catalog = RemoteCatalog::new(&fetcher, DEFAULT_CATALOG_URL)
            .list_available()
            .unwrap();
        let versions: Vec<String> = catalog.versions().iter().map(ToString::to_string).collect();
        assert_eq!(versions, vec!["0.38.0", "1.1.2", "1.2.0"]);
    }

    #[test]
    fn test_remote_catalog_http_failure() {
        let fetcher = MockFetcher::default().fail(DEFAULT_CATALOG_URL, 503);
        let err = RemoteCatalog::new(&fetcher, DEFAULT_CATALOG_URL)
            .list_available()
            .unwrap_err();
        assert!(matches!(err, SetupError::CatalogFetch { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_remote_catalog_without_versions_is_empty_not_error() {
        let fetcher = MockFetcher::default().serve(DEFAULT_CATALOG_URL, "# Releases\n");
        let catalog = RemoteCatalog::new(&fetcher, DEFAULT_CATALOG_URL)
            .list_available()
            .unwrap();
        assert!(catalog.is_empty());
    }
}

// =============================================================================
// Platform identification and URL construction
// =============================================================================

#[cfg(test)]
mod url_tests {
    use super::*;

    #[test]
    fn test_legacy_unix_is_gzip_with_legacy_tags() {
        let version = release("0.20.0");
        let platform = identify("linux", &version).unwrap();
        assert_eq!(platform.os_tag, "linux");
        assert_eq!(platform.arch_tag, "x64");

        let archive = build_archive(&version, ReleaseEra::Legacy, &platform);
        assert_eq!(archive.url, LEGACY_LINUX_0_20_0);
        assert_eq!(archive.format, ArchiveFormat::Gzip);
        assert_eq!(archive.binary_name.as_deref(), Some("deno_linux_x64"));

        let mac = identify("macos", &version).unwrap();
        assert_eq!(
            build_url(&version, &mac),
            "https://github.com/denoland/deno/releases/download/v0.20.0/deno_osx_x64.gz"
        );
    }

    #[test]
    fn test_modern_is_zip_with_target_triples() {
        let version = release("1.5.0");
        let cases = [
            ("linux", "deno-x86_64-unknown-linux-gnu.zip"),
            ("macos", "deno-x86_64-apple-darwin.zip"),
            ("windows", "deno-x86_64-pc-windows-msvc.zip"),
        ];
        for (os, file) in cases {
            let platform = identify(os, &version).unwrap();
            let archive = build_archive(&version, ReleaseEra::classify(&version), &platform);
            assert_eq!(
                archive.url,
                format!("https://github.com/denoland/deno/releases/download/v1.5.0/{file}")
            );
            assert_eq!(archive.format, ArchiveFormat::Zip);
        }
    }

    #[test]
    fn test_nightly_uses_fixed_channel_url() {
        for os in ["linux", "macos", "windows"] {
            let platform = identify(os, &ResolvedVersion::Nightly).unwrap();
            let url = build_url(&ResolvedVersion::Nightly, &platform);
            assert!(url.starts_with(
                "https://github.com/maximousblk/deno_nightly/releases/download/latest/deno-x86_64-"
            ));
            assert!(url.ends_with(".zip"));
        }
        let linux = identify("linux", &ResolvedVersion::Nightly).unwrap();
        assert_eq!(build_url(&ResolvedVersion::Nightly, &linux), NIGHTLY_LINUX);
    }

    #[test]
    fn test_tag_prefix_is_not_doubled() {
        let from_tagged = ResolvedVersion::Release(
            setup_deno::version::parse_exact("v1.2.0").unwrap(),
        );
        let platform = identify("linux", &from_tagged).unwrap();
        let url = build_url(&from_tagged, &platform);
        assert_eq!(url, MODERN_LINUX_1_2_0);
        assert!(!url.contains("vv"));
    }

    #[test]
    fn test_unsupported_host() {
        let err = identify("freebsd", &release("1.0.0")).unwrap_err();
        assert!(matches!(err, SetupError::UnsupportedPlatform(ref os) if os == "freebsd"));
        assert!(PlatformDescriptor::for_era("aix", ReleaseEra::Rolling).is_err());
    }
}

// =============================================================================
// Tool cache
// =============================================================================

#[cfg(test)]
mod tool_cache_tests {
    use super::*;

    #[test]
    fn test_complete_entry_is_hit() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        seed_cache(&config, "250.0.0", true);

        let cache = ToolCache::new(&config.tool_cache_dir, &config.arch);
        let path = cache.find(TOOL_NAME, "250.0.0").unwrap();
        assert_eq!(path, config.tool_cache_dir.join("deno/250.0.0").join(&config.arch));
        assert_eq!(cache.find(TOOL_NAME, "v250.0.0"), Some(path));
    }

    #[test]
    fn test_entry_without_marker_is_miss() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        seed_cache(&config, "251.0.0", false);

        let cache = ToolCache::new(&config.tool_cache_dir, &config.arch);
        assert!(cache.find(TOOL_NAME, "251.0.0").is_none());
        assert!(cache.find(TOOL_NAME, "251.x").is_none());
        assert!(cache.list_versions(TOOL_NAME).is_empty());
    }

    #[test]
    fn test_range_lookup_picks_highest_complete() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        seed_cache(&config, "252.0.0", true);
        seed_cache(&config, "252.0.3", true);
        seed_cache(&config, "252.0.9", false);
        seed_cache(&config, "252.1.0", true);

        let cache = ToolCache::new(&config.tool_cache_dir, &config.arch);
        let expected = config.tool_cache_dir.join("deno/252.0.3").join(&config.arch);
        for spec in ["252.0.x", "v252.0.x", "252.0", "v252.0"] {
            assert_eq!(cache.find(TOOL_NAME, spec), Some(expected.clone()), "{spec}");
        }
    }

    #[test]
    fn test_commit_copies_then_marks() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let source = root.path().join("extracted");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("deno"), b"binary").unwrap();

        let cache = ToolCache::new(&config.tool_cache_dir, &config.arch);
        let path = cache.commit(&source, TOOL_NAME, "v1.2.0").unwrap();

        assert_eq!(fs::read(path.join("deno")).unwrap(), b"binary");
        assert!(marker_exists(&config, "1.2.0"));
        assert_eq!(cache.find(TOOL_NAME, "1.2.0"), Some(path));
        assert_eq!(cache.list_versions(TOOL_NAME), vec![Version::new(1, 2, 0)]);
    }

    #[test]
    fn test_commit_replaces_previous_entry() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        seed_cache(&config, "1.2.0", false);
        let stale = config.tool_cache_dir.join("deno/1.2.0").join(&config.arch);
        fs::write(stale.join("leftover"), b"partial").unwrap();

        let source = root.path().join("extracted");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("deno"), b"fresh").unwrap();

        let cache = ToolCache::new(&config.tool_cache_dir, &config.arch);
        let path = cache.commit(&source, TOOL_NAME, "1.2.0").unwrap();
        assert_eq!(fs::read(path.join("deno")).unwrap(), b"fresh");
        assert!(!path.join("leftover").exists());
    }
}

// =============================================================================
// Full installation pipeline
// =============================================================================

#[cfg(test)]
mod installer_tests {
    use super::*;

    #[test]
    fn test_cached_version_makes_no_network_calls() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        seed_cache(&config, "250.0.0", true);
        let fetcher = MockFetcher::default();

        let installation = Installer::new(&config, &fetcher).install("250.0.0").unwrap();
        assert_eq!(installation.source, InstallSource::Cache);
        assert_eq!(installation.version, "250.0.0");
        assert!(fetcher.calls().is_empty());
    }

    #[test]
    fn test_cached_ranges_make_no_network_calls() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        seed_cache(&config, "252.0.0", true);
        let fetcher = MockFetcher::default();
        let installer = Installer::new(&config, &fetcher);

        for spec in ["v252.0.0", "252.0.0", "v252.0.x", "252.0.x", "v252.0", "252.0"] {
            let installation = installer.install(spec).unwrap();
            assert_eq!(installation.version, "252.0.0", "{spec}");
            assert_eq!(installation.source, InstallSource::Cache);
        }
        assert!(fetcher.calls().is_empty());
    }

    #[test]
    fn test_partial_cache_entry_triggers_download() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        seed_cache(&config, "251.0.0", false);
        let fetcher = MockFetcher::default();

        let err = Installer::new(&config, &fetcher).install("251.0.0").unwrap_err();
        assert!(matches!(err, SetupError::VersionNotFound(ref s) if s == "251.0.0"));
        assert_eq!(
            fetcher.calls(),
            vec![
                "https://github.com/denoland/deno/releases/download/v251.0.0/deno-x86_64-unknown-linux-gnu.zip"
                    .to_string()
            ]
        );
        assert!(!marker_exists(&config, "251.0.0"));
    }

    #[test]
    fn test_modern_zip_install() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher = MockFetcher::default()
            .serve(MODERN_LINUX_1_2_0, zip_bytes("deno", b"deno 1.2.0"));

        let installation = Installer::new(&config, &fetcher).install("v1.2.0").unwrap();
        assert_eq!(installation.source, InstallSource::Download);
        assert_eq!(installation.version, "1.2.0");
        assert_eq!(fs::read(installation.path.join("deno")).unwrap(), b"deno 1.2.0");
        assert!(marker_exists(&config, "1.2.0"));
        assert_eq!(fetcher.calls(), vec![MODERN_LINUX_1_2_0.to_string()]);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(installation.path.join("deno"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_legacy_gzip_install() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher =
            MockFetcher::default().serve(LEGACY_LINUX_0_20_0, gzip_bytes(b"deno 0.20.0"));

        let installation = Installer::new(&config, &fetcher).install("v0.20.0").unwrap();
        assert_eq!(installation.version, "0.20.0");
        assert_eq!(fs::read(installation.path.join("deno")).unwrap(), b"deno 0.20.0");
        assert!(!installation.path.join("deno_linux_x64").exists());
        assert!(marker_exists(&config, "0.20.0"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(installation.path.join("deno"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_range_resolves_through_catalog_then_downloads() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher = MockFetcher::default()
            .serve(DEFAULT_CATALOG_URL, RELEASES_MD)
            .serve(MODERN_LINUX_1_2_0, zip_bytes("deno", b"deno 1.2.0"));

        let installation = Installer::new(&config, &fetcher).install("1.x").unwrap();
        assert_eq!(installation.version, "1.2.0");
        assert_eq!(
            fetcher.calls(),
            vec![DEFAULT_CATALOG_URL.to_string(), MODERN_LINUX_1_2_0.to_string()]
        );

        // A second run is served from the cache
        let again = Installer::new(&config, &fetcher).install("1.2.0").unwrap();
        assert_eq!(again.source, InstallSource::Cache);
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[test]
    fn test_nightly_renames_binary_and_skips_catalog() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher = MockFetcher::default()
            .fail(DEFAULT_CATALOG_URL, 500)
            .serve(NIGHTLY_LINUX, zip_bytes("deno-canary", b"nightly build"));

        let installation = Installer::new(&config, &fetcher).install("nightly").unwrap();
        assert_eq!(installation.version, "nightly");
        assert_eq!(fs::read(installation.path.join("deno")).unwrap(), b"nightly build");
        assert!(!installation.path.join("deno-canary").exists());
        assert_eq!(fetcher.calls(), vec![NIGHTLY_LINUX.to_string()]);
    }

    #[test]
    fn test_download_failure_commits_nothing() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher = MockFetcher::default().fail(MODERN_LINUX_1_2_0, 500);

        let err = Installer::new(&config, &fetcher).install("1.2.0").unwrap_err();
        assert!(matches!(err, SetupError::Download(FetchError::Status { status: 500, .. })));
        assert!(!marker_exists(&config, "1.2.0"));
    }

    #[test]
    fn test_corrupt_archive_is_extraction_error() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher = MockFetcher::default().serve(MODERN_LINUX_1_2_0, b"not a zip".to_vec());

        let err = Installer::new(&config, &fetcher).install("1.2.0").unwrap_err();
        assert!(matches!(err, SetupError::Extraction { .. }));
        assert!(!marker_exists(&config, "1.2.0"));
    }

    #[test]
    fn test_zip_entry_escaping_scratch_dir_is_rejected() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher =
            MockFetcher::default().serve(MODERN_LINUX_1_2_0, zip_bytes("../evil", b"payload"));

        let err = Installer::new(&config, &fetcher).install("1.2.0").unwrap_err();
        assert!(matches!(err, SetupError::Extraction { .. }));
        assert!(!config.temp_dir.join("evil").exists());
        assert!(!root.path().join("evil").exists());
        assert!(!marker_exists(&config, "1.2.0"));
        assert!(
            !config
                .tool_cache_dir
                .join(TOOL_NAME)
                .join("1.2.0")
                .exists()
        );
    }

    #[test]
    fn test_archive_without_binary_is_extraction_error() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher =
            MockFetcher::default().serve(MODERN_LINUX_1_2_0, zip_bytes("README.md", b"docs"));

        let err = Installer::new(&config, &fetcher).install("1.2.0").unwrap_err();
        assert!(matches!(err, SetupError::Extraction { .. }));
    }

    #[test]
    fn test_unknown_range_fails_after_catalog() {
        let root = TempDir::new().unwrap();
        let config = linux_config(&root);
        let fetcher = MockFetcher::default().serve(DEFAULT_CATALOG_URL, RELEASES_MD);

        let err = Installer::new(&config, &fetcher).install("1000").unwrap_err();
        assert!(matches!(err, SetupError::VersionNotFound(_)));
        assert_eq!(fetcher.calls(), vec![DEFAULT_CATALOG_URL.to_string()]);
    }

    #[test]
    fn test_unsupported_host_fails_before_download() {
        let root = TempDir::new().unwrap();
        let config = Config::rooted_at(root.path()).with_os("freebsd");
        let fetcher = MockFetcher::default();

        let err = Installer::new(&config, &fetcher).install("1.2.0").unwrap_err();
        assert!(matches!(err, SetupError::UnsupportedPlatform(_)));
        assert!(fetcher.calls().is_empty());
    }
}
