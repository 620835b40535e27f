//! HTTP transfer pipeline: resolve, stream, stage, promote.
//!
//! This module follows a share link through intermediate pages until the
//! server answers with the file itself, then streams the body to disk.
//!
//! # Features
//!
//! - Streaming downloads in fixed-size chunks (512 KiB by default)
//! - Filename from `Content-Disposition`, decoded from raw UTF-8 octets
//! - Destination folders that group multi-part archives
//! - Uniquely named staging files, removed on every failure path
//! - Atomic rename into the final path
//! - Cooperative cancellation through a shared interrupt flag
//!
//! # Example
//!
//! ```no_run
//! use locker_core::download::{Transfer, TransferConfig};
//! use locker_core::Site;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transfer = Transfer::new(TransferConfig::default().with_download_root("./downloads"))?;
//! let result = transfer
//!     .run("https://www.mediafire.com/file/abc/report.zip/file", Site::Mediafire)
//!     .await?;
//! println!("Downloaded: {}", result.path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod constants;
mod error;
mod filename;
mod progress;
mod staging;
mod transfer;

pub use config::TransferConfig;
pub use constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_CHUNK_SIZE, DEFAULT_DOWNLOAD_ROOT, DEFAULT_MAX_HOPS,
    READ_TIMEOUT_SECS, STAGING_SUFFIX,
};
pub use error::TransferError;
pub use progress::{NoProgress, ProgressObserver, ProgressState};
pub use staging::is_staging_file_name;
pub use transfer::{DestinationPath, Transfer, TransferResult};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, TransferError>` explicitly in function signatures.
