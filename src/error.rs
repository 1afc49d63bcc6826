//! Error types for dsu operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the dsu operations.
///
/// Anything not listed here (plain I/O failures without a useful path, CSV
/// serialization errors) travels as an `anyhow::Error` with context attached.
#[derive(Error, Debug)]
pub enum DsuError {
    /// Trailing tokens in match mode that are neither `-in` nor `-csv`.
    #[error("Unknown options: {}", .0.join(" "))]
    UnknownOptions(Vec<String>),

    /// A line is not valid UTF-8.
    #[error("{path:?}: invalid UTF-8 on line {line}")]
    InvalidUtf8 { path: PathBuf, line: u64 },

    /// The input starts with a byte order mark for something other than UTF-8.
    #[error("{path:?}: unsupported encoding {encoding}, only UTF-8 is accepted")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// Input path has no file name to derive an output name from.
    #[error("Cannot derive an output name from {0:?}")]
    MissingFileName(PathBuf),

    #[error("I/O error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DsuError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error: 2 for usage mistakes, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownOptions(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_options_message() {
        let err = DsuError::UnknownOptions(vec!["-x".to_string(), "--foo".to_string()]);
        assert_eq!(err.to_string(), "Unknown options: -x --foo");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_error_exit_code() {
        let err = DsuError::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "I/O error on \"missing.txt\"");

        // The io error is reported once, as the source
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "not found");
    }
}
