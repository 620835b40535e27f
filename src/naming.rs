//! Destination folder naming.
//!
//! Split archives (`movie part 1.rar`, `movie part2.rar`, ...) must land in
//! one folder, so the folder name drops the extension and any `part N`
//! marker from the remote file name.

use std::sync::LazyLock;

use regex::Regex;

use crate::resolver::compile_static_regex;

static TRAILING_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"\.[^.]+$"));

static PART_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"\s*part\s*\d+"));

/// Derives the destination folder name for a remote file name.
///
/// Removes the final `.ext` segment, then every `part`/`part N` marker
/// (case-sensitive), then surrounding whitespace. Names that differ only in
/// their part number or extension map to the same folder.
///
/// # Example
///
/// ```
/// use locker_core::folder_for;
///
/// assert_eq!(folder_for("report part 1.zip"), "report");
/// assert_eq!(folder_for("report part2.zip"), "report");
/// assert_eq!(folder_for("archive.tar.gz"), "archive.tar");
/// ```
#[must_use]
pub fn folder_for(remote_filename: &str) -> String {
    let without_extension = TRAILING_EXTENSION_RE.replace(remote_filename, "");
    let without_parts = PART_MARKER_RE.replace_all(&without_extension, "");
    without_parts.trim().to_string()
}
