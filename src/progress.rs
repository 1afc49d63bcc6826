//! Console output
//!
//! Styled messages, the line spinner and the end-of-run summary.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║   ██████╗ ███████╗██╗   ██╗                                  ║
║   ██╔══██╗██╔════╝██║   ██║                                  ║
║   ██║  ██║███████╗██║   ██║                                  ║
║   ██║  ██║╚════██║██║   ██║                                  ║
║   ██████╔╝███████║╚██████╔╝                                  ║
║   ╚═════╝ ╚══════╝ ╚═════╝                                   ║
║          Split / Domains / Match / Merge                     ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a line-counting spinner, or a hidden one in quiet mode
pub fn create_line_spinner(msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} lines {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Per-operation counters
#[derive(Debug)]
pub struct OperationStats {
    pub lines_read: u64,
    pub lines_written: u64,
    pub files_read: u64,
    pub files_written: u64,
    pub bytes_written: u64,
    pub start_time: Instant,
}

impl OperationStats {
    pub fn new() -> Self {
        Self {
            lines_read: 0,
            lines_written: 0,
            files_read: 0,
            files_written: 0,
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("  {} {}", "Files read:     ".green(), format_number(self.files_read));
        println!("  {} {}", "Lines read:     ".green(), format_number(self.lines_read));
        println!("  {} {}", "Files written:  ".green(), format_number(self.files_written));
        println!(
            "  {} {}",
            "Lines written:  ".green().bold(),
            format_number(self.lines_written).green().bold()
        );
        println!("  {} {}", "Data written:   ".green(), ByteSize(self.bytes_written));
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for OperationStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
