//! Writing the status file

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, StatusError};

use super::runner::StatusMap;

/// Creates `dir` and any missing parents
///
/// On Unix new directories get mode 0755 (subject to the umask).
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder
        .create(dir)
        .map_err(|source| StatusError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

/// Overwrites `path` with one `"<name> <status>"` line per job
pub fn persist_status(map: &StatusMap, path: &Path) -> Result<()> {
    let write_err = |source| StatusError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(write_err)?);
    for (name, status) in map.iter() {
        writeln!(out, "{} {}", name, status.code()).map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::evaluate::JobStatus;
    use tempfile::TempDir;

    #[test]
    fn test_persist_two_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");

        let mut map = StatusMap::new();
        map.insert("a").unwrap();
        map.insert("b").unwrap();
        map.set("a", JobStatus::Pass);

        persist_status(&map, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines: Vec<_> = contents.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, ["a 1", "b 0"]);
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_persist_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "old 1\nstale 1\nleftover 1\n").unwrap();

        let mut map = StatusMap::new();
        map.insert("etl_status").unwrap();

        persist_status(&map, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "etl_status 0\n");
    }

    #[test]
    fn test_persist_empty_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");

        persist_status(&StatusMap::new(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_persist_into_missing_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("index.html");

        let err = persist_status(&StatusMap::new(), &path).unwrap_err();
        assert!(matches!(err, StatusError::Write { .. }));
    }

    #[test]
    fn test_ensure_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("jobstatus").join("metrics");

        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());

        // Existing directory is fine
        ensure_output_dir(&out).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_output_dir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let out = dir.path().join("metrics");
        ensure_output_dir(&out).unwrap();

        let mode = fs::metadata(&out).unwrap().permissions().mode() & 0o777;
        // The umask can only remove bits
        assert_eq!(mode & !0o755, 0);
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn test_ensure_output_dir_over_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("metrics");
        fs::write(&file, "").unwrap();

        let err = ensure_output_dir(&file).unwrap_err();
        assert!(matches!(err, StatusError::CreateDir { .. }));
    }
}
