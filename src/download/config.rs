//! Transfer configuration passed in at construction time.

use std::path::PathBuf;

use super::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_CHUNK_SIZE, DEFAULT_DOWNLOAD_ROOT, DEFAULT_MAX_HOPS,
    READ_TIMEOUT_SECS,
};
use crate::resolver::ResolverOptions;
use crate::user_agent::BROWSER_USER_AGENT;

/// Settings for a [`Transfer`](super::Transfer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    /// Root directory that destination folders are created under.
    pub download_root: PathBuf,
    /// Size of each write to the staging file, in bytes.
    pub chunk_size: usize,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Maximum number of intermediate pages fetched per link.
    pub max_hops: usize,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Longest gap between two reads of a response, in seconds.
    pub read_timeout_secs: u64,
    /// Inputs to the per-site link resolvers.
    pub resolver: ResolverOptions,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            download_root: PathBuf::from(DEFAULT_DOWNLOAD_ROOT),
            chunk_size: DEFAULT_CHUNK_SIZE,
            user_agent: BROWSER_USER_AGENT.to_string(),
            max_hops: DEFAULT_MAX_HOPS,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
            resolver: ResolverOptions::default(),
        }
    }
}

impl TransferConfig {
    /// Sets the download root.
    #[must_use]
    pub fn with_download_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.download_root = root.into();
        self
    }

    /// Sets the chunk size in bytes (at least one byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets the qiwi mirror prefix.
    #[must_use]
    pub fn with_qiwi_mirror(mut self, mirror: impl Into<String>) -> Self {
        self.resolver.qiwi_mirror = mirror.into();
        self
    }

    /// Sets the hop limit (at least one page).
    #[must_use]
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops.max(1);
        self
    }
}
