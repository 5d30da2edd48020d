// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error taxonomy for the resolve-and-acquire pipeline
//!
//! Every failure is fatal and propagates to the entry point unchanged;
//! nothing in this crate retries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::http::FetchError;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Failed to fetch the list of Deno versions from {url}: {reason}")]
    CatalogFetch { url: String, reason: String },

    #[error("Unable to find Deno version '{0}'")]
    VersionNotFound(String),

    #[error("Invalid version specifier '{specifier}': {reason}")]
    InvalidSpecifier { specifier: String, reason: String },

    #[error("Download failed: {0}")]
    Download(#[from] FetchError),

    #[error("Failed to extract {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },

    #[error("Tool cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SetupError {
    pub(crate) fn extraction(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Extraction {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
