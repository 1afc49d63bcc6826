//! Link/domain matching
//!
//! Loads a tab-separated domains file into a [`DomainMap`], then keeps the
//! lines of a links file whose normalized domain is a key of that map.
//! Output is either tab-joined text or CSV with a header row.

use crate::domain::{normalize_link, strip_www};
use crate::encoding::{Bom, LineReader};
use crate::error::DsuError;
use crate::output::OutputWriter;
use crate::processor::{Report, RunConfig};
use crate::progress::create_line_spinner;

use ahash::RandomState;
use anyhow::Context;
use hashbrown::HashMap;
use std::path::Path;

/// Flags accepted after the three positional arguments of match mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Carry the domain's associated value into the output
    pub include_numbers: bool,
    /// Write CSV with a header instead of tab-joined lines
    pub export_csv: bool,
}

impl MatchOptions {
    /// Interpret the raw trailing tokens of match mode
    ///
    /// Every token that is not a recognized option is collected and reported
    /// together.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, DsuError> {
        let mut options = Self::default();
        let mut unknown = Vec::new();

        for token in tokens {
            match token.as_ref() {
                "-in" | "--include-numbers" => options.include_numbers = true,
                "-csv" | "--csv" => options.export_csv = true,
                other => unknown.push(other.to_string()),
            }
        }

        if unknown.is_empty() {
            Ok(options)
        } else {
            Err(DsuError::UnknownOptions(unknown))
        }
    }
}

/// Normalized domain -> optional associated value
///
/// `None` means the value is absent (include-numbers off); `Some("")` means
/// include-numbers was on but the line had a single field.
#[derive(Debug, Default)]
pub struct DomainMap {
    map: HashMap<String, Option<String>, RandomState>,
}

impl DomainMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one domains-file line into `(domain, value)`
    ///
    /// The domain is the first tab field with a literal `www.` removed; it is
    /// never URL-parsed. Returns `None` for blank lines.
    pub fn parse_line(line: &str, include_numbers: bool) -> Option<(String, Option<String>)> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut fields = line.split('\t');
        let domain = fields.next().unwrap_or_default();
        let value = match (include_numbers, fields.next()) {
            (true, Some(value)) => Some(value.to_string()),
            (true, None) => Some(String::new()),
            (false, _) => None,
        };

        Some((strip_www(domain).to_string(), value))
    }

    /// Load a domains file. Later lines overwrite earlier ones for the same domain.
    pub fn load(path: &Path, include_numbers: bool) -> anyhow::Result<Self> {
        let reader = LineReader::open(path, Bom::Strip)
            .with_context(|| format!("Failed to open domains file {:?}", path))?;

        let mut map = Self::new();
        for line in reader {
            if let Some((domain, value)) = Self::parse_line(&line?, include_numbers) {
                map.insert(domain, value);
            }
        }

        log::debug!("Loaded {} domains from {:?}", map.len(), path);
        Ok(map)
    }

    pub fn insert(&mut self, domain: String, value: Option<String>) {
        if self.map.insert(domain, value).is_some() {
            log::trace!("Duplicate domain entry replaced");
        }
    }

    /// Look up a normalized domain. The outer `Option` is membership.
    pub fn get(&self, domain: &str) -> Option<Option<&str>> {
        self.map.get(domain).map(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// A kept link line and, with include-numbers, its domain's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRecord {
    pub url: String,
    pub value: Option<String>,
}

impl MatchedRecord {
    /// Output fields: `[url]` or `[url, value]`
    pub fn fields(&self) -> Vec<&str> {
        match self.value {
            Some(ref value) => vec![self.url.as_str(), value.as_str()],
            None => vec![self.url.as_str()],
        }
    }
}

/// Filter a links file against the domain map, preserving link order
///
/// Returns the matched records and the number of lines read. Matched lines
/// are not deduplicated.
pub fn match_links(
    domains: &DomainMap,
    links: &Path,
    include_numbers: bool,
    quiet: bool,
) -> anyhow::Result<(Vec<MatchedRecord>, u64)> {
    let reader = LineReader::open(links, Bom::Strip)
        .with_context(|| format!("Failed to open links file {:?}", links))?;
    let pb = create_line_spinner("Matching links...", quiet);

    let mut records = Vec::new();
    let mut lines_read = 0;

    for line in reader {
        let line = line?;
        lines_read += 1;
        pb.inc(1);

        let Some(domain) = normalize_link(&line) else {
            continue;
        };

        if let Some(value) = domains.get(&domain) {
            let value = if include_numbers { value } else { None };
            records.push(MatchedRecord {
                url: line.trim().to_string(),
                value: value.map(str::to_string),
            });
        }
    }

    pb.finish_and_clear();
    Ok((records, lines_read))
}

/// Write records as tab-joined lines, one per record
pub fn write_tsv(writer: &mut OutputWriter, records: &[MatchedRecord]) -> Result<(), DsuError> {
    for record in records {
        writer.write_line(&record.fields().join("\t"))?;
    }
    Ok(())
}

/// Write records as CSV with a `URL` or `URL,Number` header
///
/// Returns the number of rows written, header included.
pub fn write_csv(
    writer: &mut OutputWriter,
    records: &[MatchedRecord],
    include_numbers: bool,
) -> anyhow::Result<u64> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .flexible(true)
        .from_writer(writer);

    if include_numbers {
        csv_writer.write_record(["URL", "Number"])?;
    } else {
        csv_writer.write_record(["URL"])?;
    }

    for record in records {
        csv_writer.write_record(record.fields())?;
    }

    csv_writer.flush()?;
    Ok(records.len() as u64 + 1)
}

/// Match `links_file` against `domains_file` and write the kept lines to `output`
///
/// Both inputs are read fully before the output is created, so a missing
/// input leaves no output behind.
pub fn match_files(
    domains_file: &Path,
    links_file: &Path,
    output: &Path,
    options: MatchOptions,
    config: &RunConfig,
) -> anyhow::Result<Report> {
    let mut report = Report::new();

    let domains = DomainMap::load(domains_file, options.include_numbers)?;
    if domains.is_empty() {
        log::warn!("No domains in {:?}, nothing can match", domains_file);
    }
    let (records, lines_read) = match_links(&domains, links_file, options.include_numbers, config.quiet)?;
    report.stats.files_read = 2;
    report.stats.lines_read = lines_read;

    let mut writer = OutputWriter::create(output.to_path_buf(), config.buffer_size)?;
    if options.export_csv {
        let rows = write_csv(&mut writer, &records, options.include_numbers)?;
        report.stats.lines_written += rows;
    } else {
        write_tsv(&mut writer, &records)?;
    }
    report.record_output(writer)?;

    log::info!(
        "Matched {} of {} link lines against {} domains",
        records.len(),
        lines_read,
        domains.len()
    );

    Ok(report)
}
