//! Terminal progress display for file transfers.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use locker_core::{ProgressObserver, ProgressState};

const BAR_TEMPLATE: &str =
    "{msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec}, eta {eta})";
const SPINNER_TEMPLATE: &str = "{spinner} {msg} {bytes} ({bytes_per_sec})";

pub(crate) fn should_show_progress(stderr_is_terminal: bool, quiet: bool, dumb_terminal: bool) -> bool {
    stderr_is_terminal && !quiet && !dumb_terminal
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

/// Draws a byte bar when the size is known, a byte-count spinner otherwise.
pub(crate) struct TerminalProgress {
    enabled: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            bar: Mutex::new(None),
        }
    }

    fn make_bar(file_name: &str, total_expected: Option<u64>) -> ProgressBar {
        let bar = match total_expected {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(BAR_TEMPLATE)
                        .map(|style| style.progress_chars("=> "))
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::with_template(SPINNER_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.enable_steady_tick(Duration::from_millis(100));
                spinner
            }
        };
        bar.set_message(file_name.to_string());
        bar
    }
}

impl ProgressObserver for TerminalProgress {
    fn on_start(&self, file_name: &str, total_expected: Option<u64>) {
        if !self.enabled {
            return;
        }
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.take() {
                previous.finish_and_clear();
            }
            *slot = Some(Self::make_bar(file_name, total_expected));
        }
    }

    fn on_advance(&self, state: &ProgressState) {
        if let Ok(slot) = self.bar.lock()
            && let Some(bar) = slot.as_ref()
        {
            bar.set_position(state.bytes_transferred);
        }
    }

    fn on_finish(&self, state: &ProgressState) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(bar) = slot.take()
        {
            bar.set_position(state.bytes_transferred);
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_show_progress_rules() {
        assert!(should_show_progress(true, false, false));
        assert!(!should_show_progress(false, false, false));
        assert!(!should_show_progress(true, true, false));
        assert!(!should_show_progress(true, false, true));
    }

    #[test]
    fn test_disabled_progress_never_creates_bar() {
        let progress = TerminalProgress::new(false);
        progress.on_start("a.zip", Some(10));
        progress.on_advance(&ProgressState::new(Some(10)));
        assert!(progress.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_bar_lifecycle_with_and_without_length() {
        let progress = TerminalProgress::new(true);

        progress.on_start("a.zip", Some(10));
        let mut state = ProgressState::new(Some(10));
        state.advance(4);
        progress.on_advance(&state);
        assert_eq!(
            progress.bar.lock().unwrap().as_ref().unwrap().position(),
            4
        );
        progress.on_finish(&state);
        assert!(progress.bar.lock().unwrap().is_none());

        progress.on_start("b.zip", None);
        assert!(progress.bar.lock().unwrap().is_some());
        progress.on_finish(&ProgressState::new(None));
        assert!(progress.bar.lock().unwrap().is_none());
    }
}
