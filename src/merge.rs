//! Directory merging
//!
//! Concatenates the `.txt` files directly inside a directory into a single
//! output, appending a newline after each file's content.

use crate::encoding::read_text;
use crate::error::DsuError;
use crate::output::{ensure_output_dir, OutputWriter, MERGED_FILE_NAME};
use crate::processor::{Report, RunConfig};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MERGE_EXTENSION: &str = ".txt";

/// List the files to merge, sorted by file name
///
/// Every entry directly inside `directory` whose name ends in `.txt` is
/// returned, whatever its type; a directory named `*.txt` fails later when
/// it is read. `exclude` is skipped so that merging the output directory
/// does not read its own output.
pub fn collect_txt_files(directory: &Path, exclude: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        if directory.exists() {
            return Err(DsuError::NotADirectory(directory.to_path_buf()).into());
        }
        return Err(DsuError::io(
            directory,
            std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
        )
        .into());
    }

    let exclude = exclude.and_then(|path| path.canonicalize().ok());
    let mut files = Vec::new();

    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();

        if !name.ends_with(MERGE_EXTENSION) {
            continue;
        }
        if let (Some(exclude), Ok(path)) = (exclude.as_deref(), entry.path().canonicalize()) {
            if path == exclude {
                log::debug!("Skipping merge output {:?}", entry.path());
                continue;
            }
        }

        files.push(entry.into_path());
    }

    Ok(files)
}

/// Merge every `.txt` file of `directory` into `merged.txt` in `config.output_dir`
pub fn merge_directory(directory: &Path, config: &RunConfig) -> anyhow::Result<Report> {
    ensure_output_dir(&config.output_dir)?;
    let output_path = config.output_dir.join(MERGED_FILE_NAME);
    merge_files_to(directory, &output_path, config)
}

/// Merge every `.txt` file of `directory` into an explicit output path
pub fn merge_files_to(directory: &Path, output_path: &Path, config: &RunConfig) -> anyhow::Result<Report> {
    let mut report = Report::new();

    // Listed before the output is created so a stale merged.txt in the
    // source directory is not picked up either
    let files = collect_txt_files(directory, Some(output_path))?;
    let mut writer = OutputWriter::create(output_path.to_path_buf(), config.buffer_size)?;

    for path in &files {
        let content = read_text(path)?;
        log::debug!("Merging {:?} ({} bytes)", path, content.len());

        report.stats.files_read += 1;
        report.stats.lines_read += content.lines().count() as u64;

        writer.write_str(&content)?;
        writer.write_str("\n")?;
    }

    report.stats.lines_written = report.stats.lines_read;
    report.record_output(writer)?;

    log::info!("Merged {} files from {:?}", files.len(), directory);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(dir: &Path) -> RunConfig {
        RunConfig {
            output_dir: dir.to_path_buf(),
            quiet: true,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_merge_txt_only_sorted() {
        let src = TempDir::new().unwrap();
        std::fs::write(src.path().join("b.txt"), "Y").unwrap();
        std::fs::write(src.path().join("a.txt"), "X").unwrap();
        std::fs::write(src.path().join("c.csv"), "ignored").unwrap();
        std::fs::create_dir(src.path().join("nested")).unwrap();
        std::fs::write(src.path().join("nested").join("d.txt"), "deep").unwrap();

        let out = TempDir::new().unwrap();
        let report = merge_directory(src.path(), &config(out.path())).unwrap();

        let merged = std::fs::read_to_string(out.path().join("merged.txt")).unwrap();
        assert_eq!(merged, "X\nY\n");
        assert_eq!(report.stats.files_read, 2);
    }

    #[test]
    fn test_merge_keeps_trailing_newlines() {
        let src = TempDir::new().unwrap();
        std::fs::write(src.path().join("a.txt"), "one\n").unwrap();
        std::fs::write(src.path().join("b.txt"), "two").unwrap();

        let out = TempDir::new().unwrap();
        merge_directory(src.path(), &config(out.path())).unwrap();

        let merged = std::fs::read_to_string(out.path().join("merged.txt")).unwrap();
        assert_eq!(merged, "one\n\ntwo\n");
    }

    #[test]
    fn test_merge_skips_own_output() {
        let src = TempDir::new().unwrap();
        std::fs::write(src.path().join("a.txt"), "A").unwrap();
        std::fs::write(src.path().join("merged.txt"), "stale").unwrap();

        merge_directory(src.path(), &config(src.path())).unwrap();

        let merged = std::fs::read_to_string(src.path().join("merged.txt")).unwrap();
        assert_eq!(merged, "A\n");
    }

    #[test]
    fn test_merge_directory_named_txt_is_fatal() {
        let src = TempDir::new().unwrap();
        std::fs::create_dir(src.path().join("folder.txt")).unwrap();
        std::fs::write(src.path().join("a.txt"), "A").unwrap();

        let files = collect_txt_files(src.path(), None).unwrap();
        assert_eq!(
            files,
            vec![src.path().join("a.txt"), src.path().join("folder.txt")]
        );

        let out = TempDir::new().unwrap();
        let err = merge_directory(src.path(), &config(out.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DsuError>(),
            Some(DsuError::Io { .. })
        ));
    }

    #[test]
    fn test_merge_missing_directory() {
        let out = TempDir::new().unwrap();
        let result = merge_directory(&out.path().join("nope"), &config(out.path()));
        assert!(result.is_err());
        assert!(!out.path().join("merged.txt").exists());
    }

    #[test]
    fn test_merge_not_a_directory() {
        let src = TempDir::new().unwrap();
        let file = src.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = collect_txt_files(&file, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DsuError>(),
            Some(DsuError::NotADirectory(_))
        ));
    }
}
