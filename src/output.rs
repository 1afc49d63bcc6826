//! Output management module
//!
//! Buffered output files plus the naming rules for everything dsu writes.

use crate::error::DsuError;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for file writing (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Fixed name of the merge output
pub const MERGED_FILE_NAME: &str = "merged.txt";

/// Suffix replacing the input extension for extracted domains
pub const DOMAINS_SUFFIX: &str = "_domains.txt";

/// Output file writer with buffering
///
/// Files are opened truncating; nothing is written atomically.
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) an output file
    pub fn create(path: PathBuf, buffer_size: usize) -> Result<Self, DsuError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| DsuError::io(&path, e))?;

        log::debug!("Opened output {:?}", path);

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path,
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a line followed by `\n`
    pub fn write_line(&mut self, line: &str) -> Result<(), DsuError> {
        writeln!(self.writer, "{}", line).map_err(|e| DsuError::io(&self.path, e))?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    /// Write a line exactly as given, terminator included
    pub fn write_raw_line(&mut self, line: &str) -> Result<(), DsuError> {
        self.write_str(line)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write data without counting it as a line
    pub fn write_str(&mut self, data: &str) -> Result<(), DsuError> {
        self.writer
            .write_all(data.as_bytes())
            .map_err(|e| DsuError::io(&self.path, e))?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<(), DsuError> {
        self.writer.flush().map_err(|e| DsuError::io(&self.path, e))
    }

    /// Flush and close, returning the path written
    pub fn finish(mut self) -> Result<PathBuf, DsuError> {
        self.flush()?;
        Ok(std::mem::take(&mut self.path))
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

/// Byte sink for formatters such as the CSV writer; bytes are counted, lines are not
impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.writer.write(buf)?;
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Path of the `index`-th split chunk (1-based)
pub fn chunk_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("output_{}.txt", index))
}

/// Output path for extracted domains: the input's extension is replaced by
/// `_domains.txt`, in the input's own directory
pub fn domains_output_path(input: &Path) -> Result<PathBuf, DsuError> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DsuError::MissingFileName(input.to_path_buf()))?;

    Ok(input.with_file_name(format!("{}{}", stem, DOMAINS_SUFFIX)))
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<(), DsuError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| DsuError::io(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::create(path.clone(), 1024).unwrap();
        writer.write_line("hello").unwrap();
        writer.write_raw_line("world\r\n").unwrap();
        writer.write_str("tail").unwrap();

        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 17);

        let written = writer.finish().unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello\nworld\r\ntail");
    }

    #[test]
    fn test_writer_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        std::fs::write(&path, "old content that is long").unwrap();

        let mut writer = OutputWriter::create(path.clone(), 1024).unwrap();
        writer.write_line("new").unwrap();
        drop(writer);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_chunk_path() {
        assert_eq!(chunk_path(Path::new("."), 3), PathBuf::from("./output_3.txt"));
    }

    #[test]
    fn test_domains_output_path() {
        assert_eq!(
            domains_output_path(Path::new("/path/to/links.txt")).unwrap(),
            PathBuf::from("/path/to/links_domains.txt")
        );
        assert_eq!(
            domains_output_path(Path::new("links")).unwrap(),
            PathBuf::from("links_domains.txt")
        );
        assert_eq!(
            domains_output_path(Path::new("dir.d/archive.tar.gz")).unwrap(),
            PathBuf::from("dir.d/archive.tar_domains.txt")
        );
        assert!(domains_output_path(Path::new("/")).is_err());
    }
}
