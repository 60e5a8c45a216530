//! Log freshness checks

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::error::{Result, StatusError};

/// Modification time of a log and its age relative to a reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogAge {
    pub modified: SystemTime,
    pub age: Duration,
}

/// Returns true if a log of the given age is recent enough to evaluate
pub fn is_fresh(age: Duration, threshold: Duration) -> bool {
    age < threshold
}

/// Stats `path` and measures its age at `now`
///
/// A modification time later than `now` (clock skew between hosts) is treated
/// as age zero.
pub fn log_age(path: &Path, now: SystemTime) -> Result<LogAge> {
    let stat_err = |source| StatusError::Stat {
        path: path.to_path_buf(),
        source,
    };

    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(stat_err)?;
    let age = now.duration_since(modified).unwrap_or(Duration::ZERO);

    Ok(LogAge { modified, age })
}

/// Returns whether the log at `path` was modified less than `threshold` ago
pub fn check_freshness(path: &Path, threshold: Duration) -> Result<bool> {
    check_freshness_at(path, threshold, SystemTime::now())
}

/// Same as [`check_freshness`] with an explicit reference instant
pub fn check_freshness_at(path: &Path, threshold: Duration, now: SystemTime) -> Result<bool> {
    let LogAge { age, .. } = log_age(path, now)?;
    Ok(is_fresh(age, threshold))
}
