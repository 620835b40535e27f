//! Supported file-locker sites.
//!
//! A [`Site`] is chosen once per run and selects both the link extraction
//! strategy and the rule that recognizes the terminal file response.

use std::fmt;
use std::str::FromStr;

use reqwest::header::{CONTENT_DISPOSITION, HeaderMap};
use thiserror::Error;

/// Names accepted by [`Site::from_str`], in display order.
pub const SUPPORTED_SITES: [&str; 2] = ["mediafire", "qiwi"];

/// A file-locker site with a known link extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    /// mediafire.com share pages (download link embedded as an `href`).
    Mediafire,
    /// qiwi.gg share pages (direct link derived from the page title and URL).
    Qiwi,
}

/// Returned when a site name is not in [`SUPPORTED_SITES`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("site {name:?} is not supported (supported: {})", SUPPORTED_SITES.join(", "))]
pub struct UnsupportedSite {
    /// The rejected site name as given by the caller.
    pub name: String,
}

impl Site {
    /// Returns the stable lowercase identifier for this site.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mediafire => "mediafire",
            Self::Qiwi => "qiwi",
        }
    }

    /// Returns true if the response headers mark the terminal file response
    /// rather than an intermediate page.
    #[must_use]
    pub fn is_terminal_response(self, headers: &HeaderMap) -> bool {
        match self {
            Self::Mediafire | Self::Qiwi => headers.contains_key(CONTENT_DISPOSITION),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = UnsupportedSite;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mediafire" => Ok(Self::Mediafire),
            "qiwi" => Ok(Self::Qiwi),
            _ => Err(UnsupportedSite {
                name: value.trim().to_string(),
            }),
        }
    }
}
