// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Download and extraction of Deno release archives
//!
//! Each acquisition downloads into the temp root and unpacks into its own
//! uniquely named scratch directory. Downloaded zip archives are left in
//! place for the runner to reap with the rest of its temp directory.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;
use zip::ZipArchive;

use crate::config::Config;
use crate::download::{ArchiveDescriptor, ArchiveFormat};
use crate::error::{Result, SetupError};
use crate::http::Fetch;
use crate::platform::ReleaseEra;

/// Download `archive` and return a directory holding the ready-to-run binary
///
/// The directory contains the executable under its canonical name with
/// execute permission set.
///
/// # Errors
/// Returns `Download` if the fetch fails and `Extraction` if the archive is
/// corrupt or does not contain the expected binary
pub fn acquire(
    fetcher: &dyn Fetch,
    config: &Config,
    archive: &ArchiveDescriptor,
) -> Result<PathBuf> {
    fs::create_dir_all(&config.temp_dir)?;

    let download_path = tempfile::Builder::new()
        .prefix("deno-download-")
        .tempfile_in(&config.temp_dir)?
        .into_temp_path()
        .keep()
        .map_err(|e| SetupError::Io(e.error))?;
    fetcher.download(&archive.url, &download_path)?;
    debug!(url = %archive.url, path = %download_path.display(), "downloaded archive");

    let scratch = tempfile::Builder::new()
        .prefix("deno-")
        .tempdir_in(&config.temp_dir)?
        .keep();

    match archive.format {
        ArchiveFormat::Zip => extract_zip(&download_path, &scratch)?,
        ArchiveFormat::Gzip => {
            // The upstream gz holds a single file named after the archive
            let staged = scratch.join(format!(
                "{}.gz",
                archive.binary_name.as_deref().unwrap_or(archive.canonical_name)
            ));
            fs::rename(&download_path, &staged)?;
            decompress_gzip(&staged, &scratch.join(archive.canonical_name))?;
            fs::remove_file(&staged)?;
        }
    }
    debug!(dir = %scratch.display(), format = ?archive.format, "extracted archive");

    let binary = normalize_binary(&scratch, archive)?;
    set_executable(&binary)?;

    Ok(scratch)
}

/// Extract a zip archive into `dest_dir`
///
/// # Errors
/// Returns `Extraction` for corrupt archives or entries escaping `dest_dir`
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| SetupError::extraction(archive_path, e))?;

    fs::create_dir_all(dest_dir)?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| SetupError::extraction(archive_path, e))?;
        let Some(relative_path) = entry.enclosed_name() else {
            return Err(SetupError::extraction(
                archive_path,
                format!("invalid path in archive: {}", entry.name()),
            ));
        };
        let absolute_path = dest_dir.join(relative_path);

        if entry.is_dir() {
            fs::create_dir_all(&absolute_path)?;
            continue;
        }

        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = BufWriter::new(File::create(&absolute_path)?);
        io::copy(&mut entry, &mut out).map_err(|e| SetupError::extraction(archive_path, e))?;
        out.flush()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&absolute_path, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

/// Decompress a single gzip-compressed file to `dest`
///
/// # Errors
/// Returns `Extraction` if the input is not valid gzip
pub fn decompress_gzip(source: &Path, dest: &Path) -> Result<()> {
    let mut decoder = GzDecoder::new(BufReader::new(File::open(source)?));
    let mut out = BufWriter::new(File::create(dest)?);
    io::copy(&mut decoder, &mut out).map_err(|e| SetupError::extraction(source, e))?;
    out.flush()?;
    Ok(())
}

/// Make sure the binary sits in `dir` under its canonical name
///
/// Stable archives name the executable predictably; the nightly channel does
/// not, so for the rolling era the single file it contains is renamed.
fn normalize_binary(dir: &Path, archive: &ArchiveDescriptor) -> Result<PathBuf> {
    let canonical = dir.join(archive.canonical_name);
    if canonical.is_file() {
        return Ok(canonical);
    }

    if let Some(name) = &archive.binary_name {
        let expected = dir.join(name);
        if expected.is_file() {
            fs::rename(&expected, &canonical)?;
            return Ok(canonical);
        }
    }

    if archive.era == ReleaseEra::Rolling {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        if let [only] = files.as_slice() {
            debug!(from = %only.display(), to = %canonical.display(), "renaming nightly binary");
            fs::rename(only, &canonical)?;
            return Ok(canonical);
        }
    }

    Err(SetupError::extraction(
        dir,
        format!("archive did not contain {}", archive.canonical_name),
    ))
}

/// Set rwxr-xr-x on Unix; a no-op elsewhere
fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
