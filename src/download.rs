// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Download URL construction for Deno release archives

use crate::platform::{HostOs, PlatformDescriptor, RELEASE_NAMING, ReleaseEra, ReleaseNaming};
use crate::version::{ResolvedVersion, strip_tag_prefix};

/// How a release archive is packaged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// A single gzip-compressed executable
    Gzip,
    /// A zip container holding the executable
    Zip,
}

impl ArchiveFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Zip => "zip",
        }
    }
}

/// Everything needed to fetch and unpack one release archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDescriptor {
    pub url: String,
    pub format: ArchiveFormat,
    pub era: ReleaseEra,
    /// Name of the executable inside the archive, when the era defines one
    pub binary_name: Option<String>,
    /// Name the executable must have once installed
    pub canonical_name: &'static str,
}

/// Build the archive descriptor for a resolved version on a platform
#[must_use]
pub fn build_archive(
    version: &ResolvedVersion,
    era: ReleaseEra,
    platform: &PlatformDescriptor,
) -> ArchiveDescriptor {
    build_archive_with(version, era, platform, &RELEASE_NAMING)
}

/// Same as [`build_archive`] against an explicit naming table
#[must_use]
pub fn build_archive_with(
    version: &ResolvedVersion,
    era: ReleaseEra,
    platform: &PlatformDescriptor,
    naming: &ReleaseNaming,
) -> ArchiveDescriptor {
    let os = platform.os_tag;
    let arch = platform.arch_tag;
    let canonical_name = platform.os.binary_name();

    match (era, version) {
        (ReleaseEra::Rolling, _) | (_, ResolvedVersion::Nightly) => ArchiveDescriptor {
            url: format!("{}/deno-{arch}-{os}.zip", naming.nightly_base),
            format: ArchiveFormat::Zip,
            era: ReleaseEra::Rolling,
            binary_name: None,
            canonical_name,
        },
        (ReleaseEra::Legacy, ResolvedVersion::Release(v)) => {
            let tag = release_tag(&v.to_string());
            let stem = format!("deno_{os}_{arch}");
            let (format, binary_name) = if platform.os == HostOs::Windows {
                (ArchiveFormat::Zip, canonical_name.to_string())
            } else {
                (ArchiveFormat::Gzip, stem.clone())
            };
            ArchiveDescriptor {
                url: format!(
                    "{}/{tag}/{stem}.{}",
                    naming.release_base,
                    format.extension()
                ),
                format,
                era,
                binary_name: Some(binary_name),
                canonical_name,
            }
        }
        (ReleaseEra::Modern, ResolvedVersion::Release(v)) => {
            let tag = release_tag(&v.to_string());
            ArchiveDescriptor {
                url: format!("{}/{tag}/deno-{arch}-{os}.zip", naming.release_base),
                format: ArchiveFormat::Zip,
                era,
                binary_name: Some(canonical_name.to_string()),
                canonical_name,
            }
        }
    }
}

/// Build only the download URL for a resolved version on a platform
#[must_use]
pub fn build_url(version: &ResolvedVersion, platform: &PlatformDescriptor) -> String {
    build_archive(version, ReleaseEra::classify(version), platform).url
}

/// Upstream tag directory for a version: always exactly one `v` prefix
fn release_tag(version: &str) -> String {
    format!("v{}", strip_tag_prefix(version))
}
