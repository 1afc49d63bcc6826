//! UTF-8 input handling
//!
//! Every file dsu reads is UTF-8. This module sniffs byte order marks,
//! rejects UTF-16 input, and hands out lines with their terminators intact.

use crate::error::DsuError;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read buffer for line iteration (64KB)
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// What to do with a leading UTF-8 BOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bom {
    /// Drop it before the first line
    Strip,
    /// Pass it through as part of the first line
    Keep,
}

/// Inspect the first bytes of a file for a byte order mark
///
/// Returns the BOM length when it is a UTF-8 BOM, `0` when there is none,
/// and an error for any other encoding's BOM.
pub fn detect_bom(path: &Path, head: &[u8]) -> Result<usize, DsuError> {
    match Encoding::for_bom(head) {
        Some((encoding, len)) if encoding == encoding_rs::UTF_8 => Ok(len),
        Some((encoding, _)) => Err(DsuError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        }),
        None => Ok(0),
    }
}

/// Line iterator over a UTF-8 file
///
/// Yields each line including its `\n` / `\r\n` terminator, so that writing
/// the lines back out reproduces the file byte for byte.
pub struct LineReader {
    reader: BufReader<File>,
    path: PathBuf,
    line_buffer: Vec<u8>,
    line_number: u64,
}

impl LineReader {
    /// Open a file for line iteration
    pub fn open(path: &Path, bom: Bom) -> Result<Self, DsuError> {
        let file = File::open(path).map_err(|e| DsuError::io(path, e))?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let head = reader.fill_buf().map_err(|e| DsuError::io(path, e))?;
        let bom_len = detect_bom(path, head)?;
        if bom == Bom::Strip && bom_len > 0 {
            log::debug!("Skipping UTF-8 BOM in {:?}", path);
            reader.consume(bom_len);
        }

        Ok(Self {
            reader,
            path: path.to_path_buf(),
            line_buffer: Vec::with_capacity(4096),
            line_number: 0,
        })
    }

}

impl Iterator for LineReader {
    type Item = Result<String, DsuError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line_buffer.clear();

        match self.reader.read_until(b'\n', &mut self.line_buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                match std::str::from_utf8(&self.line_buffer) {
                    Ok(line) => Some(Ok(line.to_string())),
                    Err(_) => Some(Err(DsuError::InvalidUtf8 {
                        path: self.path.clone(),
                        line: self.line_number,
                    })),
                }
            }
            Err(e) => Some(Err(DsuError::io(&self.path, e))),
        }
    }
}

/// Read a whole UTF-8 file into a string, dropping a leading BOM
pub fn read_text(path: &Path) -> Result<String, DsuError> {
    let bytes = std::fs::read(path).map_err(|e| DsuError::io(path, e))?;
    let start = detect_bom(path, &bytes)?;

    match std::str::from_utf8(&bytes[start..]) {
        Ok(text) => Ok(text.to_string()),
        Err(e) => {
            let valid = &bytes[start..start + e.valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() as u64 + 1;
            Err(DsuError::InvalidUtf8 {
                path: path.to_path_buf(),
                line,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lines_keep_terminators() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "line1\nline2\r\nline3").unwrap();

        let reader = LineReader::open(file.path(), Bom::Keep).unwrap();
        let lines: Vec<_> = reader.map(|r| r.unwrap()).collect();

        assert_eq!(lines, vec!["line1\n", "line2\r\n", "line3"]);
    }

    #[test]
    fn test_bom_strip_and_keep() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBFexample.com\n").unwrap();

        let stripped: Vec<_> = LineReader::open(file.path(), Bom::Strip)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(stripped, vec!["example.com\n"]);

        let kept: Vec<_> = LineReader::open(file.path(), Bom::Keep)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(kept, vec!["\u{FEFF}example.com\n"]);
    }

    #[test]
    fn test_utf16_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xFF\xFEa\x00").unwrap();

        let err = LineReader::open(file.path(), Bom::Strip).err().unwrap();
        assert!(matches!(err, DsuError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xC3\x28\n").unwrap();

        let results: Vec<_> = LineReader::open(file.path(), Bom::Keep).unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(DsuError::InvalidUtf8 { line: 2, .. })));

        let err = read_text(file.path()).unwrap_err();
        assert!(matches!(err, DsuError::InvalidUtf8 { line: 2, .. }));
    }

    #[test]
    fn test_read_text_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xEF\xBB\xBFhello").unwrap();

        assert_eq!(read_text(file.path()).unwrap(), "hello");
    }

    #[test]
    fn test_missing_file() {
        let err = LineReader::open(Path::new("/nonexistent/dsu/input.txt"), Bom::Keep)
            .err()
            .unwrap();
        assert!(matches!(err, DsuError::Io { .. }));
    }
}
