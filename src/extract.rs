//! Domain extraction
//!
//! Reads one URL or bare host per line and writes every distinct normalized
//! domain once, sorted ascending.

use crate::dedup::DomainSet;
use crate::domain::normalize_link;
use crate::encoding::{Bom, LineReader};
use crate::output::{domains_output_path, OutputWriter};
use crate::processor::{Report, RunConfig};
use crate::progress::create_line_spinner;

use anyhow::Context;
use std::path::Path;

/// Collect the distinct normalized domains of a URL list
pub fn collect_domains(input: &Path, quiet: bool) -> anyhow::Result<(DomainSet, u64)> {
    let reader = LineReader::open(input, Bom::Strip)
        .with_context(|| format!("Failed to open input {:?}", input))?;
    let pb = create_line_spinner("Extracting domains...", quiet);

    let mut domains = DomainSet::new();
    let mut lines_read = 0;

    for line in reader {
        let line = line?;
        lines_read += 1;
        pb.inc(1);

        if let Some(domain) = normalize_link(&line) {
            domains.insert(domain);
        }
    }

    pb.finish_and_clear();
    if domains.is_empty() {
        log::warn!("No domains found in {:?}", input);
    }
    log::debug!(
        "{} unique domains, {} duplicates in {:?}",
        domains.len(),
        domains.duplicates(),
        input
    );

    Ok((domains, lines_read))
}

/// Extract domains from `input` into `<stem>_domains.txt` next to it
pub fn extract_domains(input: &Path, config: &RunConfig) -> anyhow::Result<Report> {
    let output_path = domains_output_path(input)?;
    extract_domains_to(input, &output_path, config)
}

/// Extract domains from `input` into an explicit output path
pub fn extract_domains_to(input: &Path, output_path: &Path, config: &RunConfig) -> anyhow::Result<Report> {
    let mut report = Report::new();

    let (domains, lines_read) = collect_domains(input, config.quiet)?;
    report.stats.files_read = 1;
    report.stats.lines_read = lines_read;

    let mut writer = OutputWriter::create(output_path.to_path_buf(), config.buffer_size)?;
    for domain in domains.into_sorted() {
        writer.write_line(&domain)?;
    }
    report.record_output(writer)?;

    log::info!(
        "Extracted {} domains from {:?}",
        report.stats.lines_written,
        input
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet() -> RunConfig {
        RunConfig {
            quiet: true,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_extract_sorted_unique() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("links.txt");
        std::fs::write(
            &input,
            "https://www.zeta.io/a\n\nhttp://alpha.com/x?y=1\n  \nwww.alpha.com\nbeta.net\nhttp://zeta.io/b\n",
        )
        .unwrap();

        let report = extract_domains(&input, &quiet()).unwrap();

        let output = temp_dir.path().join("links_domains.txt");
        assert_eq!(report.outputs, vec![output.clone()]);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "alpha.com\nbeta.net\nzeta.io\n"
        );
        assert_eq!(report.stats.lines_read, 7);
        assert_eq!(report.stats.lines_written, 3);
    }

    #[test]
    fn test_extract_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("empty.txt");
        std::fs::write(&input, "").unwrap();

        extract_domains(&input, &quiet()).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("empty_domains.txt")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_extract_missing_input_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("missing.txt");

        assert!(extract_domains(&input, &quiet()).is_err());
        assert!(!temp_dir.path().join("missing_domains.txt").exists());
    }

    #[test]
    fn test_collect_domains_strips_bom() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bom.txt");
        std::fs::write(&input, b"\xEF\xBB\xBFwww.example.com\n").unwrap();

        let (domains, lines) = collect_domains(&input, true).unwrap();
        assert_eq!(lines, 1);
        assert_eq!(domains.into_sorted(), vec!["example.com"]);
    }
}
