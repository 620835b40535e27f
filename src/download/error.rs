//! Error types for the download module.
//!
//! Every variant is terminal for the link being transferred and never for
//! the batch, except [`TransferError::Interrupted`].

use std::path::PathBuf;

use thiserror::Error;

use crate::site::Site;

/// Errors that can occur while resolving and transferring one link.
#[derive(Debug, Error)]
pub enum TransferError {
    /// No direct link could be extracted from an intermediate page.
    #[error(
        "could not find a {site} download link on {url}\n  Suggestion: check the file's access permissions and that the link is valid"
    )]
    ResolutionFailed {
        /// The page URL whose body yielded no link.
        url: String,
        /// The site strategy that was applied.
        site: Site,
    },

    /// The resolution loop fetched too many intermediate pages.
    #[error("gave up on {url} after {hops} pages without a file response")]
    TooManyHops {
        /// The original link.
        url: String,
        /// Number of pages fetched.
        hops: usize,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while staging, writing or finalizing.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The transfer was cancelled by the interrupt flag.
    #[error("download of {url} interrupted")]
    Interrupted {
        /// The link that was in flight.
        url: String,
    },
}

impl TransferError {
    /// Creates a resolution failure.
    pub fn resolution_failed(url: impl Into<String>, site: Site) -> Self {
        Self::ResolutionFailed {
            url: url.into(),
            site,
        }
    }

    /// Creates a hop-limit error.
    pub fn too_many_hops(url: impl Into<String>, hops: usize) -> Self {
        Self::TooManyHops {
            url: url.into(),
            hops,
        }
    }

    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::Timeout { url: url.into() };
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an interruption error.
    pub fn interrupted(url: impl Into<String>) -> Self {
        Self::Interrupted { url: url.into() }
    }

    /// Returns true for the batch-wide cancellation error.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }

    /// Returns true for filesystem or network failures during the transfer.
    #[must_use]
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::HttpStatus { .. } | Self::Io { .. }
        )
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path that the source error does not carry.
