//! Line scanning for job logs

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, StatusError};

/// Counts the lines of a log that match a pattern
pub trait LogScanner {
    fn count_matches(&self, path: &Path, pattern: &Regex) -> Result<usize>;
}

/// Scans log files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileScanner;

impl LogScanner for FileScanner {
    fn count_matches(&self, path: &Path, pattern: &Regex) -> Result<usize> {
        scan_for_pattern(path, pattern)
    }
}

/// Reads the whole file and returns how many lines match `pattern`
///
/// A line with several matches counts once. Invalid UTF-8 is replaced rather
/// than rejected, job logs are not guaranteed to be clean text.
pub fn scan_for_pattern(path: &Path, pattern: &Regex) -> Result<usize> {
    let bytes = fs::read(path).map_err(|source| StatusError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(count_matching_lines(&String::from_utf8_lossy(&bytes), pattern))
}

fn count_matching_lines(text: &str, pattern: &Regex) -> usize {
    text.lines().filter(|line| pattern.is_match(line)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join("job.log");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, b"");

        for pattern in ["", ".*", "Backup succeeded", "traceback"] {
            let re = Regex::new(pattern).unwrap();
            assert_eq!(scan_for_pattern(&path, &re).unwrap(), 0, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_counts_matching_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            b"starting\nBackup succeeded\nsomething else\nBackup succeeded\n",
        );

        let re = Regex::new("Backup succeeded").unwrap();
        assert_eq!(scan_for_pattern(&path, &re).unwrap(), 2);
    }

    #[test]
    fn test_multiple_matches_on_one_line_count_once() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, b"traceback traceback traceback\nok\n");

        let re = Regex::new("traceback").unwrap();
        assert_eq!(scan_for_pattern(&path, &re).unwrap(), 1);
    }

    #[test]
    fn test_no_match() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, b"Backup failed\n");

        let re = Regex::new("Backup succeeded").unwrap();
        assert_eq!(scan_for_pattern(&path, &re).unwrap(), 0);
    }

    #[test]
    fn test_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, b"Traceback (most recent call last):\n");

        let re = Regex::new("traceback").unwrap();
        assert_eq!(scan_for_pattern(&path, &re).unwrap(), 0);
    }

    #[test]
    fn test_last_line_without_newline_and_crlf() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, b"Backup succeeded\r\nBackup succeeded");

        let re = Regex::new("succeeded$").unwrap();
        assert_eq!(scan_for_pattern(&path, &re).unwrap(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_scanned() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, b"\xff\xfe garbage\nBackup succeeded\n");

        let re = Regex::new("Backup succeeded").unwrap();
        assert_eq!(scan_for_pattern(&path, &re).unwrap(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let re = Regex::new("x").unwrap();

        let err = scan_for_pattern(&dir.path().join("missing.log"), &re).unwrap_err();
        assert!(matches!(err, StatusError::Read { .. }));
    }

    #[test]
    fn test_file_scanner_delegates() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, b"a\nb\na\n");

        let re = Regex::new("^a$").unwrap();
        assert_eq!(FileScanner.count_matches(&path, &re).unwrap(), 2);
    }
}
