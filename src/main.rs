//! CLI entry point for locker-dl.

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use locker_core::{BatchSummary, Site, Transfer, parse_links, run_batch};
use tracing::{debug, error, info, warn};

mod app_config;
mod cli;
mod progress;

use app_config::{build_transfer_config, load_default_file_config};
use cli::Args;
use progress::{TerminalProgress, is_dumb_terminal, should_show_progress};

/// Site used when none is given and nobody answers the prompt.
const DEFAULT_SITE: Site = Site::Mediafire;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessExit {
    Success,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(outcome: ProcessExit) -> Self {
        match outcome {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    let loaded = load_default_file_config()?;
    if let Some(path) = loaded.path.as_ref().filter(|_| loaded.config.is_some()) {
        debug!(path = %path.display(), "loaded config file");
    }
    let file_config = loaded.file_config();

    let site_name = match args.site.clone().or_else(|| file_config.site.clone()) {
        Some(name) => name,
        None => prompt_for_site()?,
    };
    let site = match Site::from_str(&site_name) {
        Ok(site) => site,
        Err(e) => {
            error!("{e}");
            return Ok(ProcessExit::Failure.into());
        }
    };

    let raw = std::fs::read_to_string(&args.links)
        .with_context(|| format!("Failed to read links file '{}'", args.links.display()))?;
    let links = parse_links(&raw);
    if links.is_empty() {
        info!(file = %args.links.display(), "No links to download");
        return Ok(ProcessExit::Success.into());
    }

    let config = build_transfer_config(&args, &file_config);
    info!(
        site = %site,
        links = links.len(),
        output_dir = %config.download_root.display(),
        "locker-dl starting"
    );

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_signal = Arc::clone(&interrupted);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupted_signal.store(true, Ordering::SeqCst);
        }
    });

    let transfer = Transfer::new(config)?.with_interrupt_flag(Arc::clone(&interrupted));
    let show_progress =
        should_show_progress(io::stderr().is_terminal(), args.quiet, is_dumb_terminal());
    let progress = TerminalProgress::new(show_progress);

    let summary = run_batch(&transfer, &links, site, &progress).await;
    Ok(report(&summary).into())
}

/// Logs the batch outcome and maps it to an exit status.
///
/// Per-link outcomes are already logged by the transfer and batch loops.
fn report(summary: &BatchSummary) -> ProcessExit {
    if summary.interrupted {
        warn!(
            completed = summary.completed.len(),
            skipped = summary.skipped,
            "Interrupted. Finished files were kept."
        );
        return ProcessExit::Failure;
    }

    info!(
        completed = summary.completed.len(),
        failed = summary.failed.len(),
        "Download complete"
    );
    if summary.is_success() {
        ProcessExit::Success
    } else {
        ProcessExit::Failure
    }
}

/// Asks for the site on an interactive terminal; falls back to the default.
fn prompt_for_site() -> Result<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(DEFAULT_SITE.to_string());
    }

    let mut stderr = io::stderr();
    write!(
        stderr,
        "Site ({}) [{DEFAULT_SITE}]: ",
        locker_core::SUPPORTED_SITES.join("/")
    )?;
    stderr.flush()?;

    let mut answer = String::new();
    stdin
        .lock()
        .read_line(&mut answer)
        .context("Failed to read site name")?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(DEFAULT_SITE.to_string())
    } else {
        Ok(answer.to_string())
    }
}
