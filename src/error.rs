//! Error type shared by the status pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a status run.
///
/// Filesystem variants carry the path that failed so the top-level log line is
/// enough to find the culprit. A pattern that simply does not match is never an
/// error.
#[derive(Error, Debug)]
pub enum StatusError {
    /// The log file could not be stat'ed (missing, permission denied, ...)
    #[error("cannot stat {}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file exists but could not be read
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created
    #[error("cannot create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The status file could not be created or written
    #[error("cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A job pattern failed to compile
    #[error("invalid pattern for job '{job}'")]
    InvalidPattern {
        job: String,
        #[source]
        source: regex::Error,
    },

    /// Two jobs share a name
    #[error("job '{0}' is configured more than once")]
    DuplicateJob(String),

    /// Settings could not be loaded
    #[error("configuration error")]
    Config(#[from] config::ConfigError),
}

pub type Result<T, E = StatusError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_chain_prints_io_error_once() {
        let err = StatusError::Stat {
            path: PathBuf::from("/home/ubuntu/etl.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such log"),
        };
        let message = format!(
            "{:#}",
            anyhow::Error::from(err).context("job status check failed")
        );

        assert_eq!(
            message,
            "job status check failed: cannot stat /home/ubuntu/etl.log: no such log"
        );
        assert_eq!(message.matches("no such log").count(), 1);
    }

    #[test]
    fn test_pattern_error_printed_once() {
        let source = regex::Regex::new("(").unwrap_err();
        let detail = source.to_string();
        let err = StatusError::InvalidPattern {
            job: "etl_status".to_string(),
            source,
        };

        let message = format!("{:#}", anyhow::Error::from(err));
        assert!(message.starts_with("invalid pattern for job 'etl_status': "));
        assert_eq!(message.matches(detail.as_str()).count(), 1);
    }
}
