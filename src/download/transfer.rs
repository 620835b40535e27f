//! Resolution-and-download pipeline for a single link.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::StreamExt;
use reqwest::Response;
use reqwest::header::CONTENT_DISPOSITION;
use tracing::{debug, info, instrument};
use url::Url;

use super::client::{HttpSession, content_length};
use super::config::TransferConfig;
use super::constants::INTERRUPT_POLL_INTERVAL;
use super::error::TransferError;
use super::filename::{filename_for_response, is_safe_filename_segment};
use super::progress::{NoProgress, ProgressObserver, ProgressState};
use super::staging::StagingFile;
use crate::naming::folder_for;
use crate::resolver::{ResolutionResult, resolve};
use crate::site::Site;

/// Where a finished download lives: `<root>/<folder>/<file_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationPath {
    root: PathBuf,
    folder: String,
    file_name: String,
}

impl DestinationPath {
    /// Derives the destination for `file_name` under `root`.
    ///
    /// A folder name that is empty or not a plain path segment maps to
    /// `root` itself.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let folder = folder_for(&file_name);
        let folder = if folder.is_empty() || !is_safe_filename_segment(&folder) {
            String::new()
        } else {
            folder
        };
        Self {
            root: root.into(),
            folder,
            file_name,
        }
    }

    /// The sanitized folder name (empty when files go straight into the root).
    #[must_use]
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// The final file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Directory the file is written into.
    #[must_use]
    pub fn folder_path(&self) -> PathBuf {
        if self.folder.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&self.folder)
        }
    }

    /// Full path of the finished file.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.folder_path().join(&self.file_name)
    }
}

/// Outcome of a successful [`Transfer::run`].
#[derive(Debug, Clone)]
pub struct TransferResult {
    /// Destination the file was promoted to.
    pub destination: DestinationPath,
    /// Full path of the finished file.
    pub path: PathBuf,
    /// Bytes written.
    pub bytes_written: u64,
    /// Expected size from `Content-Length`, when the server sent one.
    pub content_length: Option<u64>,
    /// URL that produced the file response.
    pub file_url: String,
    /// Number of requests made, including the file request.
    pub hops: usize,
}

/// Resolves share links and downloads the files they point at.
///
/// Created once and reused for every link of a batch, taking advantage of
/// connection pooling and the shared cookie store.
///
/// # Example
///
/// ```no_run
/// use locker_core::{Site, Transfer, TransferConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transfer = Transfer::new(TransferConfig::default())?;
/// let result = transfer
///     .run("https://www.mediafire.com/file/abc/report.zip/file", Site::Mediafire)
///     .await?;
/// println!("Downloaded to: {}", result.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Transfer {
    session: HttpSession,
    config: TransferConfig,
    interrupted: Arc<AtomicBool>,
}

impl Transfer {
    /// Creates a transfer with its own HTTP session.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: TransferConfig) -> Result<Self, TransferError> {
        let session = HttpSession::new(&config)?;
        Ok(Self {
            session,
            config,
            interrupted: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Uses `flag` as the cancellation signal; setting it aborts the
    /// in-flight transfer at the next check.
    #[must_use]
    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    /// Returns true once the cancellation flag is set.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Resolves `link` for `site` and downloads the file without progress output.
    ///
    /// # Errors
    ///
    /// See [`run_with_progress`](Self::run_with_progress).
    pub async fn run(&self, link: &str, site: Site) -> Result<TransferResult, TransferError> {
        self.run_with_progress(link, site, &NoProgress).await
    }

    /// Resolves `link` for `site`, streams the file into a staging file under
    /// the download root and promotes it to its final path.
    ///
    /// No staging file survives the call, whichever way it returns.
    ///
    /// # Errors
    ///
    /// Returns `TransferError` if:
    /// - The link is not a valid URL
    /// - A page yields no direct link (`ResolutionFailed`) or the hop limit is hit
    /// - A request fails or returns a non-success status
    /// - Creating, writing or renaming files fails
    /// - The interrupt flag is set before the file is promoted
    #[instrument(skip(self, progress), fields(link = %link, site = %site))]
    pub async fn run_with_progress(
        &self,
        link: &str,
        site: Site,
        progress: &dyn ProgressObserver,
    ) -> Result<TransferResult, TransferError> {
        let link = link.trim();
        Url::parse(link).map_err(|_| TransferError::invalid_url(link))?;
        self.check_interrupted(link)?;

        let (response, hops) = self.follow_to_file(link, site).await?;
        let file_url = response.url().clone();
        let file_name =
            filename_for_response(response.headers().get(CONTENT_DISPOSITION), &file_url);
        let destination = DestinationPath::new(&self.config.download_root, file_name);
        let folder = destination.folder_path();
        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|e| TransferError::io(folder.clone(), e))?;

        let total = content_length(&response);
        info!(
            from = %link,
            file = %destination.file_name(),
            folder = %folder.display(),
            bytes = ?total,
            "downloading"
        );

        let mut staging = StagingFile::create(&folder, destination.file_name())?;
        let mut state = ProgressState::new(total);
        progress.on_start(destination.file_name(), total);
        let streamed = self
            .stream_body(link, response, &mut staging, &mut state, progress)
            .await;
        progress.on_finish(&state);
        streamed?;
        self.check_interrupted(link)?;

        let path = staging.promote(&destination.file_path()).await?;
        info!(
            path = %path.display(),
            bytes = state.bytes_transferred,
            hops,
            "download complete"
        );

        Ok(TransferResult {
            destination,
            path,
            bytes_written: state.bytes_transferred,
            content_length: total,
            file_url: file_url.to_string(),
            hops,
        })
    }

    /// Fetches pages until one is the file response, resolving the next
    /// link from each intermediate page.
    async fn follow_to_file(
        &self,
        link: &str,
        site: Site,
    ) -> Result<(Response, usize), TransferError> {
        let mut current = link.to_string();
        for hop in 1..=self.config.max_hops {
            let response = self
                .until_interrupted(link, self.session.get(&current))
                .await?;
            if site.is_terminal_response(response.headers()) {
                debug!(hop, url = %current, "reached file response");
                return Ok((response, hop));
            }

            let text = response.text();
            let body = self
                .until_interrupted(link, async {
                    text.await.map_err(|e| TransferError::network(current.as_str(), e))
                })
                .await?;

            match resolve(site, &current, &body, &self.config.resolver) {
                ResolutionResult::DirectLink(next) => {
                    debug!(hop, from = %current, next = %next, "following resolved link");
                    current = next;
                }
                ResolutionResult::NotFound => {
                    return Err(TransferError::resolution_failed(current, site));
                }
            }
        }
        Err(TransferError::too_many_hops(link, self.config.max_hops))
    }

    /// Streams the body into `staging` in fixed-size chunks, in arrival order.
    async fn stream_body(
        &self,
        link: &str,
        response: Response,
        staging: &mut StagingFile,
        state: &mut ProgressState,
        progress: &dyn ProgressObserver,
    ) -> Result<(), TransferError> {
        let chunk_size = self.config.chunk_size.max(1);
        let url = response.url().to_string();
        let mut stream = response.bytes_stream();
        let mut pending: Vec<u8> = Vec::with_capacity(chunk_size);

        loop {
            let next = self
                .until_interrupted(link, async { Ok(stream.next().await) })
                .await?;
            let Some(piece) = next else {
                break;
            };
            let piece = piece.map_err(|e| TransferError::network(url.as_str(), e))?;
            pending.extend_from_slice(&piece);

            while pending.len() >= chunk_size {
                self.write_chunk(link, staging, &pending[..chunk_size], state, progress)
                    .await?;
                pending.drain(..chunk_size);
            }
        }

        if !pending.is_empty() {
            self.write_chunk(link, staging, &pending, state, progress)
                .await?;
        }
        Ok(())
    }

    async fn write_chunk(
        &self,
        link: &str,
        staging: &mut StagingFile,
        chunk: &[u8],
        state: &mut ProgressState,
        progress: &dyn ProgressObserver,
    ) -> Result<(), TransferError> {
        self.check_interrupted(link)?;
        staging.write_chunk(chunk).await?;
        state.advance(chunk.len());
        progress.on_advance(state);
        Ok(())
    }

    fn check_interrupted(&self, link: &str) -> Result<(), TransferError> {
        if self.is_interrupted() {
            return Err(TransferError::interrupted(link));
        }
        Ok(())
    }

    /// Runs `operation`, abandoning it if the interrupt flag is set first.
    async fn until_interrupted<T>(
        &self,
        link: &str,
        operation: impl Future<Output = Result<T, TransferError>>,
    ) -> Result<T, TransferError> {
        tokio::select! {
            result = operation => result,
            () = wait_for_interrupt(&self.interrupted) => Err(TransferError::interrupted(link)),
        }
    }
}

async fn wait_for_interrupt(flag: &AtomicBool) {
    while !flag.load(Ordering::SeqCst) {
        tokio::time::sleep(INTERRUPT_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_groups_parts_into_one_folder() {
        let first = DestinationPath::new("downloads", "report part 1.zip");
        let second = DestinationPath::new("downloads", "report part 2.zip");
        assert_eq!(first.folder(), "report");
        assert_eq!(first.folder_path(), second.folder_path());
        assert_eq!(
            first.file_path(),
            PathBuf::from("downloads").join("report").join("report part 1.zip")
        );
    }

    #[test]
    fn test_destination_without_folder_uses_root() {
        let dest = DestinationPath::new("downloads", ".zip");
        assert_eq!(dest.folder(), "");
        assert_eq!(dest.folder_path(), PathBuf::from("downloads"));
        assert_eq!(dest.file_path(), PathBuf::from("downloads").join(".zip"));
    }

    #[test]
    fn test_destination_rejects_dot_folders() {
        let dest = DestinationPath::new("downloads", "..x");
        assert_eq!(dest.folder(), "");
        assert_eq!(dest.file_path(), PathBuf::from("downloads").join("..x"));
    }

    #[test]
    fn test_destination_keeps_file_name() {
        let dest = DestinationPath::new("/data", "Café part 3.rar");
        assert_eq!(dest.file_name(), "Café part 3.rar");
        assert_eq!(dest.folder(), "Café");
    }

    #[tokio::test]
    async fn test_wait_for_interrupt_returns_once_flag_is_set() {
        let flag = Arc::new(AtomicBool::new(false));
        let setter = Arc::clone(&flag);
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            setter.store(true, Ordering::SeqCst);
        });
        tokio::time::timeout(std::time::Duration::from_secs(5), wait_for_interrupt(&flag))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_url_before_network() {
        let transfer = Transfer::new(TransferConfig::default()).unwrap();
        let result = transfer.run("not a url", Site::Mediafire).await;
        assert!(matches!(result, Err(TransferError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_run_honors_preset_interrupt_flag() {
        let flag = Arc::new(AtomicBool::new(true));
        let transfer = Transfer::new(TransferConfig::default())
            .unwrap()
            .with_interrupt_flag(flag);
        let result = transfer.run("https://example.invalid/file/x", Site::Qiwi).await;
        assert!(matches!(result, Err(TransferError::Interrupted { .. })));
    }
}
