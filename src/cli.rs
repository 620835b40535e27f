//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Resolve file-locker share links and download the files they point at.
///
/// Reads one share link per line from a text file, follows each link to the
/// file it serves and saves it under a folder named after the file, so the
/// parts of a multi-part archive end up together.
#[derive(Parser, Debug)]
#[command(name = "locker-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Text file with one share link per line (`#` starts a comment)
    #[arg(short = 'i', long, default_value = "links.txt")]
    pub links: PathBuf,

    /// Site hosting the links: mediafire or qiwi (asked for when omitted)
    #[arg(short, long)]
    pub site: Option<String>,

    /// Directory downloads are saved under [default: downloads]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Size of each disk write in KiB (1-65536) [default: 512]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=65536))]
    pub chunk_size_kib: Option<u32>,

    /// Mirror prefix used to build qiwi direct links
    #[arg(long)]
    pub qiwi_mirror: Option<String>,

    /// Maximum pages fetched per link before giving up (1-50) [default: 10]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=50))]
    pub max_hops: Option<u8>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Default log filter implied by the verbosity flags.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
