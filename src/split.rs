//! File splitting
//!
//! Partitions an input file into `output_1.txt`, `output_2.txt`, ... holding
//! at most `max_lines` lines each. Lines are copied byte for byte.

use crate::encoding::{Bom, LineReader};
use crate::output::{chunk_path, ensure_output_dir, OutputWriter};
use crate::processor::{Report, RunConfig};
use crate::progress::create_line_spinner;

use anyhow::Context;
use std::num::NonZeroUsize;
use std::path::Path;

/// Split `input` into chunks of at most `max_lines` lines in `config.output_dir`
///
/// The first chunk is created before the input is read, so an empty input
/// still yields one empty `output_1.txt`. The last chunk may be short.
pub fn split_file(input: &Path, max_lines: NonZeroUsize, config: &RunConfig) -> anyhow::Result<Report> {
    let max_lines = max_lines.get();
    let mut report = Report::new();

    ensure_output_dir(&config.output_dir)?;

    let mut file_index = 1;
    let mut writer = OutputWriter::create(chunk_path(&config.output_dir, file_index), config.buffer_size)?;
    let reader = LineReader::open(input, Bom::Keep)
        .with_context(|| format!("Failed to open input {:?}", input))?;

    let pb = create_line_spinner("Splitting...", config.quiet);

    for line in reader {
        let line = line?;

        if writer.lines_written() as usize >= max_lines {
            report.record_output(writer)?;
            file_index += 1;
            writer = OutputWriter::create(chunk_path(&config.output_dir, file_index), config.buffer_size)?;
            log::debug!("Rolled over to chunk {}", file_index);
        }

        writer.write_raw_line(&line)?;
        report.stats.lines_read += 1;
        pb.inc(1);
    }

    report.record_output(writer)?;
    report.stats.files_read = 1;
    pb.finish_and_clear();

    log::info!(
        "Split {:?} into {} file(s) of at most {} lines",
        input,
        report.outputs.len(),
        max_lines
    );

    Ok(report)
}
