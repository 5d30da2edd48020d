// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! HTTP collaborator used for the version catalog and archive downloads
//!
//! The pipeline only talks to the network through the [`Fetch`] trait so the
//! resolver and acquirer can be driven without network access.

use std::fs;
use std::io::{self, BufWriter};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FetchError {
    /// Whether the remote answered that the resource does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Blocking access to remote documents and files
pub trait Fetch {
    /// Fetch a document and return its body as text
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a body that
    /// is not valid UTF-8
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Download `url` into the file at `dest`, replacing it if present
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or when `dest`
    /// cannot be written
    fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

/// [`Fetch`] implementation backed by `attohttpc`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            user_agent: format!("setup-deno/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, url: &str) -> Result<attohttpc::Response, FetchError> {
        let resp = attohttpc::get(url)
            .header("User-Agent", self.user_agent.as_str())
            .send()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !resp.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        Ok(resp)
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "fetching document");
        self.get(url)?.text().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        debug!(%url, dest = %dest.display(), "downloading");
        let resp = self.get(url)?;
        let out = BufWriter::new(fs::File::create(dest)?);
        let written = resp.write_to(out).map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!(bytes = written, "download complete");
        Ok(())
    }
}
