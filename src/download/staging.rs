//! Staging files for in-flight downloads.
//!
//! Bytes are written to a uniquely named `.part` file next to the final
//! path and renamed over it only after the body is complete, so a partial
//! file never appears under the final name. The staging file is removed when
//! the [`StagingFile`] is dropped, which covers error returns, interruption
//! and a dropped transfer future alike.

use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::constants::STAGING_SUFFIX;
use super::error::TransferError;

/// Longest final-name prefix kept in a staging file name.
const MAX_PREFIX_CHARS: usize = 64;

/// An exclusively owned, uniquely named temporary file inside the
/// destination folder.
#[derive(Debug)]
pub(crate) struct StagingFile {
    file: File,
    path: TempPath,
}

impl StagingFile {
    /// Creates `.<final_name>.<random>.part` inside `folder`.
    pub(crate) fn create(folder: &Path, final_name: &str) -> Result<Self, TransferError> {
        let prefix = staging_prefix(final_name);
        let named = Builder::new()
            .prefix(&prefix)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(folder)
            .map_err(|e| TransferError::io(folder, e))?;
        let (file, path) = named.into_parts();
        debug!(path = %path.display(), "created staging file");
        Ok(Self {
            file: File::from_std(file),
            path,
        })
    }

    /// Path of the staging file.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one chunk.
    pub(crate) async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransferError> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|e| TransferError::io(self.path.to_path_buf(), e))
    }

    /// Flushes, closes and renames the staging file onto `destination`,
    /// replacing any existing file there.
    ///
    /// On failure the staging file is removed before returning.
    pub(crate) async fn promote(self, destination: &Path) -> Result<PathBuf, TransferError> {
        let Self { mut file, path } = self;
        file.flush()
            .await
            .map_err(|e| TransferError::io(path.to_path_buf(), e))?;
        file.sync_all()
            .await
            .map_err(|e| TransferError::io(path.to_path_buf(), e))?;
        drop(file);

        // A failed persist hands the TempPath back inside the error; dropping
        // it deletes the staging file.
        path.persist(destination)
            .map_err(|e| TransferError::io(destination, e.error))?;
        debug!(path = %destination.display(), "promoted staging file");
        Ok(destination.to_path_buf())
    }
}

fn staging_prefix(final_name: &str) -> String {
    let truncated: String = final_name.chars().take(MAX_PREFIX_CHARS).collect();
    format!(".{truncated}.")
}

/// Returns true if `name` looks like a staging file name.
#[must_use]
pub fn is_staging_file_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(STAGING_SUFFIX)
}
