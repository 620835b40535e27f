//! Locker Downloader Core Library
//!
//! This library turns indirect "share page" URLs hosted on file-locker sites
//! into direct download links and streams the files into an organized
//! `downloads/` tree.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`site`] - Supported file-locker sites
//! - [`resolver`] - Per-site extraction of direct links from fetched pages
//! - [`naming`] - Destination folder naming for (multi-part) files
//! - [`download`] - HTTP transfer loop with staged, atomically promoted files
//! - [`batch`] - Sequential per-link processing with failure isolation

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod download;
pub mod naming;
pub mod resolver;
pub mod site;
mod user_agent;

// Re-export commonly used types
pub use batch::{BatchSummary, LinkFailure, parse_links, run_batch};
pub use download::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DOWNLOAD_ROOT, DEFAULT_MAX_HOPS, DestinationPath, NoProgress,
    ProgressObserver, ProgressState, Transfer, TransferConfig, TransferError, TransferResult,
};
pub use naming::folder_for;
pub use resolver::{DEFAULT_QIWI_MIRROR, ResolutionResult, ResolverOptions, resolve};
pub use site::{SUPPORTED_SITES, Site, UnsupportedSite};
pub use user_agent::BROWSER_USER_AGENT;
