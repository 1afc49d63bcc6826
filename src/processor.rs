//! Operation dispatch
//!
//! Turns parsed arguments into a [`RunConfig`] and runs the selected mode.

use crate::cli::{Args, Command};
use crate::error::DsuError;
use crate::extract::extract_domains;
use crate::matcher::{match_files, MatchOptions};
use crate::merge::merge_directory;
use crate::output::{OutputWriter, DEFAULT_BUFFER_SIZE};
use crate::progress::{print_bullet, print_header, print_info, print_success, OperationStats};
use crate::split::split_file;

use std::path::PathBuf;

/// Settings shared by every mode
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where split chunks and merged.txt are written
    pub output_dir: PathBuf,
    pub buffer_size: usize,
    pub quiet: bool,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            output_dir: args.get_output_dir(),
            buffer_size: args.parse_buffer_size()?,
            quiet: args.quiet,
        })
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            buffer_size: DEFAULT_BUFFER_SIZE,
            quiet: false,
        }
    }
}

/// Outcome of one operation: the files it wrote and its counters
#[derive(Debug)]
pub struct Report {
    pub outputs: Vec<PathBuf>,
    pub stats: OperationStats,
}

impl Report {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
            stats: OperationStats::new(),
        }
    }

    /// Close a finished output and account for what it received
    pub fn record_output(&mut self, writer: OutputWriter) -> Result<(), DsuError> {
        self.stats.files_written += 1;
        self.stats.lines_written += writer.lines_written();
        self.stats.bytes_written += writer.bytes_written();
        self.outputs.push(writer.finish()?);
        Ok(())
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// Main processor
pub struct Processor {
    config: RunConfig,
}

impl Processor {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run one mode to completion
    ///
    /// Mode arguments are validated before any file is touched.
    pub fn run(&self, command: &Command) -> anyhow::Result<Report> {
        let match_options = command.match_options()?;

        if !self.config.quiet {
            print_header(&format!("Running {} mode...", command.name()));
        }
        log::debug!("Running {:?} with {:?}", command, self.config);

        let report = match command {
            Command::Split { input, max_lines } => {
                let report = split_file(input, *max_lines, &self.config)?;
                self.confirm("File split into parts:", &report);
                report
            }
            Command::Domains { input } => {
                let report = extract_domains(input, &self.config)?;
                self.confirm("Domains saved to:", &report);
                report
            }
            Command::Match {
                domains_file,
                links_file,
                output_file,
                ..
            } => {
                let options = match_options.unwrap_or_default();
                let report = match_files(domains_file, links_file, output_file, options, &self.config)?;
                self.confirm(match_message(options), &report);
                report
            }
            Command::Merge { directory } => {
                let report = merge_directory(directory, &self.config)?;
                if !self.config.quiet {
                    print_info(&format!(
                        "All text files from {:?} merged ({} files)",
                        directory, report.stats.files_read
                    ));
                }
                self.confirm("Merged into:", &report);
                report
            }
        };

        if !self.config.quiet {
            report.stats.print_summary();
        }

        Ok(report)
    }

    /// Print the success line naming every output path
    fn confirm(&self, message: &str, report: &Report) {
        if self.config.quiet {
            return;
        }

        match report.outputs.as_slice() {
            [single] => print_success(&format!("{} {:?}", message, single)),
            outputs => {
                print_success(message);
                for path in outputs {
                    print_bullet(&format!("{:?}", path));
                }
            }
        }
    }
}

fn match_message(options: MatchOptions) -> &'static str {
    if options.export_csv {
        "Results saved to CSV file"
    } else {
        "Results saved to file"
    }
}
