//! Progress reporting for in-flight transfers.

/// Bytes written so far and the expected total, when the server sent one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressState {
    /// Bytes written to the staging file. Never decreases.
    pub bytes_transferred: u64,
    /// Value of `Content-Length`, if present.
    pub total_expected: Option<u64>,
}

impl ProgressState {
    /// Creates a state with nothing transferred yet.
    #[must_use]
    pub fn new(total_expected: Option<u64>) -> Self {
        Self {
            bytes_transferred: 0,
            total_expected,
        }
    }

    /// Records `len` more bytes written.
    pub fn advance(&mut self, len: usize) {
        self.bytes_transferred = self.bytes_transferred.saturating_add(len as u64);
    }
}

/// Receives progress updates from a transfer.
///
/// Called from the transfer loop between chunk writes; implementations must
/// only touch local output and return promptly.
pub trait ProgressObserver: Send + Sync {
    /// The file response arrived and body streaming is about to start.
    fn on_start(&self, file_name: &str, total_expected: Option<u64>);

    /// A chunk was written to the staging file.
    fn on_advance(&self, state: &ProgressState);

    /// The transfer ended, successfully or not.
    fn on_finish(&self, state: &ProgressState);
}

/// Observer that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_start(&self, _file_name: &str, _total_expected: Option<u64>) {}

    fn on_advance(&self, _state: &ProgressState) {}

    fn on_finish(&self, _state: &ProgressState) {}
}
