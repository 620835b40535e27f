//! Batch driver: runs a list of share links through one [`Transfer`].
//!
//! Links are processed one at a time in input order. A failed link is
//! recorded and the batch moves on; only an interruption stops it.

use tracing::{error, info, instrument, warn};

use crate::download::{ProgressObserver, Transfer, TransferError, TransferResult};
use crate::site::Site;

/// A link that could not be downloaded, with the reason.
#[derive(Debug)]
pub struct LinkFailure {
    /// The link as given in the input.
    pub link: String,
    /// Why the transfer failed.
    pub error: TransferError,
}

/// Outcome of a [`run_batch`] call.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Finished downloads, in input order.
    pub completed: Vec<TransferResult>,
    /// Links that failed, in input order.
    pub failed: Vec<LinkFailure>,
    /// Links never attempted because the batch was interrupted.
    pub skipped: usize,
    /// True if the interrupt flag stopped the batch.
    pub interrupted: bool,
}

impl BatchSummary {
    /// Number of links attempted (completed + failed).
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.completed.len() + self.failed.len()
    }

    /// True when every link completed and nothing was interrupted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.interrupted
    }
}

/// Extracts links from a text list: one per line, trimmed; blank lines and
/// lines starting with `#` are skipped.
///
/// # Example
///
/// ```
/// use locker_core::parse_links;
///
/// let links = parse_links("# parts\nhttps://a.test/1\n\n  https://a.test/2  \n");
/// assert_eq!(links, vec!["https://a.test/1", "https://a.test/2"]);
/// ```
#[must_use]
pub fn parse_links(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

/// Downloads every link in order with the strategy for `site`.
///
/// Per-link failures are logged and recorded in the summary. An
/// [`TransferError::Interrupted`] stops the batch; files already promoted
/// are kept.
#[instrument(skip(transfer, links, progress), fields(site = %site, links = links.len()))]
pub async fn run_batch(
    transfer: &Transfer,
    links: &[String],
    site: Site,
    progress: &dyn ProgressObserver,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for (index, link) in links.iter().enumerate() {
        if transfer.is_interrupted() {
            summary.interrupted = true;
            summary.skipped = links.len() - index;
            break;
        }

        match transfer.run_with_progress(link, site, progress).await {
            Ok(result) => summary.completed.push(result),
            Err(error) if error.is_interrupted() => {
                warn!(link = %link, "interrupted, stopping batch");
                summary.interrupted = true;
                summary.skipped = links.len() - index - 1;
                summary.failed.push(LinkFailure {
                    link: link.clone(),
                    error,
                });
                break;
            }
            Err(error) => {
                error!(link = %link, error = %error, "download failed");
                summary.failed.push(LinkFailure {
                    link: link.clone(),
                    error,
                });
            }
        }
    }

    info!(
        completed = summary.completed.len(),
        failed = summary.failed.len(),
        skipped = summary.skipped,
        interrupted = summary.interrupted,
        "batch finished"
    );
    summary
}
