//! Per-site extraction of direct download links from fetched pages.
//!
//! Resolution is a pure transform over text that has already been fetched:
//! no network or filesystem access happens here, so every strategy can be
//! exercised with fixture strings.
//!
//! # Architecture
//!
//! - [`resolve`] - Dispatches on [`Site`] to a strategy function
//! - [`ResolutionResult`] - Either a direct link or `NotFound`
//! - [`ResolverOptions`] - Operator-tunable inputs (e.g. the qiwi mirror)
//!
//! Adding a site means adding one [`Site`] variant and one strategy module;
//! the `match` in [`resolve`] is exhaustive, so the compiler points at the
//! dispatch that needs the new arm.
//!
//! # Example
//!
//! ```
//! use locker_core::resolver::{resolve, ResolutionResult, ResolverOptions};
//! use locker_core::Site;
//!
//! let body = r#"<a class="input" href="https://download123.mediafire.com/x/file.zip">"#;
//! let result = resolve(
//!     Site::Mediafire,
//!     "https://www.mediafire.com/file/x",
//!     body,
//!     &ResolverOptions::default(),
//! );
//! assert_eq!(
//!     result,
//!     ResolutionResult::DirectLink("https://download123.mediafire.com/x/file.zip".to_string())
//! );
//! ```

mod mediafire;
mod qiwi;
mod utils;

pub(crate) use utils::compile_static_regex;

use tracing::debug;

use crate::site::Site;

/// Mirror prefix used to build qiwi direct links.
///
/// The mirror host changes from time to time; override it through
/// [`ResolverOptions::qiwi_mirror`] instead of rebuilding.
pub const DEFAULT_QIWI_MIRROR: &str = "https://spyderrock.com/";

/// Outcome of a single resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The next URL to fetch.
    DirectLink(String),
    /// No strategy could produce a link from the page.
    NotFound,
}

/// Operator-tunable inputs to the resolution strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Domain prefix that qiwi direct links are built on.
    pub qiwi_mirror: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            qiwi_mirror: DEFAULT_QIWI_MIRROR.to_string(),
        }
    }
}

/// Extracts the next link to fetch from a page body.
///
/// `source_url` is the URL the body was fetched from; some strategies derive
/// the link from the URL rather than from the page content.
#[must_use]
pub fn resolve(
    site: Site,
    source_url: &str,
    body: &str,
    options: &ResolverOptions,
) -> ResolutionResult {
    let result = match site {
        Site::Mediafire => mediafire::extract_download_link(body),
        Site::Qiwi => qiwi::derive_download_link(source_url, body, &options.qiwi_mirror),
    };
    debug!(site = %site, found = matches!(result, ResolutionResult::DirectLink(_)), "resolved page");
    result
}
