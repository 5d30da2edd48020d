// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Platform detection and release-era naming for Deno archives
//!
//! Deno renamed its release artifacts after 0.38.0: the OS and architecture
//! tags in archive names switched from `osx`/`linux`/`win` + `x64` to target
//! triples. Both vocabularies live in [`RELEASE_NAMING`] so a future rename
//! only touches that table.

use semver::Version;

use crate::error::{Result, SetupError};
use crate::version::ResolvedVersion;

/// Host operating systems Deno publishes binaries for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
}

impl HostOs {
    /// Map an OS name (as in `std::env::consts::OS` or node's `os.platform()`)
    ///
    /// # Errors
    /// Returns `UnsupportedPlatform` for anything outside Windows, macOS and Linux
    pub fn parse(os: &str) -> Result<Self> {
        match os {
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            other => Err(SetupError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Detect the host this binary was compiled for
    ///
    /// # Errors
    /// Returns `UnsupportedPlatform` on hosts Deno has no builds for
    pub fn detect() -> Result<Self> {
        Self::parse(std::env::consts::OS)
    }

    /// File name of the installed Deno executable on this host
    #[must_use]
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::Windows => "deno.exe",
            Self::MacOs | Self::Linux => "deno",
        }
    }
}

/// Artifact tag spellings used during one naming era
#[derive(Debug, Clone, Copy)]
pub struct TagVocabulary {
    /// OS tag for Windows hosts
    pub windows: &'static str,
    /// OS tag for macOS hosts
    pub macos: &'static str,
    /// OS tag for Linux hosts
    pub linux: &'static str,
    /// Architecture tag, shared by every OS in the era
    pub arch: &'static str,
}

impl TagVocabulary {
    #[must_use]
    pub fn os_tag(&self, os: HostOs) -> &'static str {
        match os {
            HostOs::Windows => self.windows,
            HostOs::MacOs => self.macos,
            HostOs::Linux => self.linux,
        }
    }
}

/// Upstream naming conventions, keyed by release era
#[derive(Debug, Clone, Copy)]
pub struct ReleaseNaming {
    /// Last release (inclusive) published with the legacy vocabulary
    pub legacy_cutover: (u64, u64, u64),
    /// Tags for releases up to the cutover
    pub legacy: TagVocabulary,
    /// Tags for later releases and the rolling build
    pub modern: TagVocabulary,
    /// Base URL of stable release assets; the tag directory is appended
    pub release_base: &'static str,
    /// Base URL of the rolling build assets
    pub nightly_base: &'static str,
}

pub const RELEASE_NAMING: ReleaseNaming = ReleaseNaming {
    legacy_cutover: (0, 38, 0),
    legacy: TagVocabulary {
        windows: "win",
        macos: "osx",
        linux: "linux",
        arch: "x64",
    },
    modern: TagVocabulary {
        windows: "pc-windows-msvc",
        macos: "apple-darwin",
        linux: "unknown-linux-gnu",
        arch: "x86_64",
    },
    release_base: "https://github.com/denoland/deno/releases/download",
    nightly_base: "https://github.com/maximousblk/deno_nightly/releases/download/latest",
};

impl ReleaseNaming {
    #[must_use]
    pub fn cutover_version(&self) -> Version {
        let (major, minor, patch) = self.legacy_cutover;
        Version::new(major, minor, patch)
    }

    #[must_use]
    pub fn vocabulary(&self, era: ReleaseEra) -> &TagVocabulary {
        match era {
            ReleaseEra::Legacy => &self.legacy,
            ReleaseEra::Modern | ReleaseEra::Rolling => &self.modern,
        }
    }
}

/// Packaging convention period a resolved version belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseEra {
    /// At or below the cutover: legacy tags, gzip on Unix
    Legacy,
    /// Above the cutover: target-triple tags, always zip
    Modern,
    /// The nightly channel: modern tags, separate origin
    Rolling,
}

impl ReleaseEra {
    #[must_use]
    pub fn classify(version: &ResolvedVersion) -> Self {
        Self::classify_with(version, &RELEASE_NAMING)
    }

    #[must_use]
    pub fn classify_with(version: &ResolvedVersion, naming: &ReleaseNaming) -> Self {
        match version {
            ResolvedVersion::Nightly => Self::Rolling,
            ResolvedVersion::Release(v) if *v <= naming.cutover_version() => Self::Legacy,
            ResolvedVersion::Release(_) => Self::Modern,
        }
    }
}

/// OS and architecture tags as they appear in artifact names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDescriptor {
    /// Host operating system
    pub os: HostOs,
    /// OS spelling in the archive name (e.g. "osx", "apple-darwin")
    pub os_tag: &'static str,
    /// Architecture spelling in the archive name (e.g. "x64", "x86_64")
    pub arch_tag: &'static str,
}

impl PlatformDescriptor {
    /// Tags for `host_os` under an already classified era
    ///
    /// # Errors
    /// Returns `UnsupportedPlatform` when `host_os` is not Windows, macOS or Linux
    pub fn for_era(host_os: &str, era: ReleaseEra) -> Result<Self> {
        let os = HostOs::parse(host_os)?;
        let vocabulary = RELEASE_NAMING.vocabulary(era);
        Ok(Self {
            os,
            os_tag: vocabulary.os_tag(os),
            arch_tag: vocabulary.arch,
        })
    }
}

/// Identify the artifact tags for a host and resolved version
///
/// # Errors
/// Returns `UnsupportedPlatform` when `host_os` is not Windows, macOS or Linux
pub fn identify(host_os: &str, version: &ResolvedVersion) -> Result<PlatformDescriptor> {
    PlatformDescriptor::for_era(host_os, ReleaseEra::classify(version))
}

/// Architecture name used for tool-cache keys
///
/// CI runners key their tool cache with node's `os.arch()` vocabulary, so
/// Rust architecture names are translated to match.
#[must_use]
pub fn runner_arch(rust_arch: &str) -> String {
    match rust_arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        other => other,
    }
    .to_string()
}
