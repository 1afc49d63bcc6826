//! # dsu
//!
//! Batch text-file utility for URL/domain workflows.
//!
//! ## Modes
//!
//! - **Split** (`1`): partition a file into `output_<k>.txt` chunks of at most N lines
//! - **Domains** (`2`): extract sorted, unique, `www.`-stripped domains from a URL list
//! - **Match** (`3`): keep the links whose domain appears in a domains file,
//!   optionally with the domain's value and optionally as CSV
//! - **Merge** (`4`): concatenate the `.txt` files of a directory into `merged.txt`
//!
//! ## Usage
//!
//! ```bash
//! dsu 1 links.txt 100000
//! dsu 2 links.txt
//! dsu 3 domains.txt links.txt matched.csv -in -csv
//! dsu 4 ./parts/
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use dsu::matcher::{match_files, MatchOptions};
//! use dsu::processor::RunConfig;
//! use std::path::Path;
//!
//! let options = MatchOptions { include_numbers: true, export_csv: false };
//! let config = RunConfig { quiet: true, ..RunConfig::default() };
//! let report = match_files(
//!     Path::new("domains.txt"),
//!     Path::new("links.txt"),
//!     Path::new("matched.txt"),
//!     options,
//!     &config,
//! )?;
//! println!("{} lines kept", report.stats.lines_written);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod dedup;
pub mod domain;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod merge;
pub mod output;
pub mod processor;
pub mod progress;
pub mod split;

pub use cli::Args;
pub use error::DsuError;
pub use processor::{Processor, Report, RunConfig};
