//! Constants for the download module (timeouts, chunking, hop limits).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout: longest silence between two reads (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Default write chunk size (512 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 512 * 1024;

/// Default maximum number of pages fetched before the file response.
pub const DEFAULT_MAX_HOPS: usize = 10;

/// Default root directory for finished downloads.
pub const DEFAULT_DOWNLOAD_ROOT: &str = "downloads";

/// Suffix of in-flight staging files.
pub const STAGING_SUFFIX: &str = ".part";

/// How often a blocked network wait re-checks the interrupt flag.
pub(crate) const INTERRUPT_POLL_INTERVAL: Duration = Duration::from_millis(100);
