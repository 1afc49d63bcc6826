//! Command-line interface definition for dsu
//!
//! The tool is driven as `dsu [FLAGS] <MODE> [ARGS...]`, the mode being one
//! of `1`..`4` (or its alias).

use crate::error::DsuError;
use crate::matcher::MatchOptions;
use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Batch text-file utility for URL/domain workflows
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dsu",
    author = "m0h1nd4",
    version,
    about = "Split files, extract domains, match links against domains, merge text files",
    long_about = r#"
Batch text-file utility for URL/domain workflows.

MODES:
    1  Split a file into chunks of at most N lines (output_1.txt, output_2.txt, ...)
    2  Extract sorted unique domains from a URL list (<input>_domains.txt)
    3  Keep the links whose domain appears in a domains file
    4  Merge all .txt files of a directory into merged.txt

EXAMPLES:
    dsu 1 links.txt 100000
    dsu 2 links.txt
    dsu 3 domains.txt links.txt matched.txt
    dsu 3 domains.txt links.txt matched.csv -in -csv
    dsu 4 ./parts/

DOMAINS FILE (mode 3):
    One domain per line. With -in, a tab-separated second field is carried
    into the output next to every matching link.
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory for split chunks and merged.txt (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write buffer size (e.g. 64KB, 8MB)
    #[arg(long, value_name = "SIZE", default_value = "64KB")]
    pub buffer_size: String,

    /// Quiet mode - no banner, progress or summary
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Operating mode
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split a file into several files by line count
    #[command(name = "1", visible_alias = "split")]
    Split {
        /// File to split
        input: PathBuf,
        /// Maximum number of lines per output file
        max_lines: NonZeroUsize,
    },

    /// Extract domains from links
    #[command(name = "2", visible_alias = "domains")]
    Domains {
        /// File with one URL per line
        input: PathBuf,
    },

    /// Compare a domains file with a links file
    #[command(name = "3", visible_alias = "match")]
    Match {
        /// Domains file (domain[TAB value] per line)
        domains_file: PathBuf,
        /// Links file (one URL per line)
        links_file: PathBuf,
        /// Output file
        output_file: PathBuf,
        /// -in: include the domain's value, -csv: write CSV
        #[arg(
            value_name = "OPTIONS",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        options: Vec<String>,
    },

    /// Merge the text files of a directory into one file
    #[command(name = "4", visible_alias = "merge")]
    Merge {
        /// Directory holding the .txt files
        directory: PathBuf,
    },
}

impl Command {
    /// Short name for log lines and headers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Split { .. } => "split",
            Self::Domains { .. } => "domains",
            Self::Match { .. } => "match",
            Self::Merge { .. } => "merge",
        }
    }

    /// Validate mode-specific arguments that clap cannot check on its own
    pub fn match_options(&self) -> Result<Option<MatchOptions>, DsuError> {
        match self {
            Self::Match { options, .. } => MatchOptions::from_tokens(options).map(Some),
            _ => Ok(None),
        }
    }
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        let size = parse_size(&self.buffer_size)?;
        if size == 0 {
            anyhow::bail!("Buffer size must be greater than zero");
        }
        Ok(size)
    }

    /// Get output directory, defaulting to current directory
    pub fn get_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(num) = size_str.strip_suffix("GB") {
        (num, 1024 * 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("MB") {
        (num, 1024 * 1024)
    } else if let Some(num) = size_str.strip_suffix("KB") {
        (num, 1024)
    } else if let Some(num) = size_str.strip_suffix('B') {
        (num, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    Ok(num * multiplier)
}
