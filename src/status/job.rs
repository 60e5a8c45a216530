//! Job definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;

use crate::error::{Result, StatusError};

/// Default maximum age of a log file before its job is treated as not run
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(720 * 60);

/// One monitored job: where its log lives and what the log must contain
#[derive(Debug, Clone)]
pub struct JobCheck {
    /// Key written to the status file
    pub name: String,
    /// Log file produced by the job
    pub log_path: PathBuf,
    /// A line matching this means the job completed
    pub success_pattern: Regex,
    /// A line matching this overrides any success
    pub failure_pattern: Option<Regex>,
    /// Logs older than this are not evaluated
    pub freshness_threshold: Duration,
}

impl JobCheck {
    /// Creates a job with a success pattern and no failure pattern
    pub fn new(
        name: impl Into<String>,
        log_path: impl Into<PathBuf>,
        success_pattern: &str,
        freshness_threshold: Duration,
    ) -> Result<Self> {
        let name = name.into();
        let success_pattern = compile(&name, success_pattern)?;

        Ok(Self {
            name,
            log_path: log_path.into(),
            success_pattern,
            failure_pattern: None,
            freshness_threshold,
        })
    }

    /// Adds a failure pattern to the job
    pub fn with_failure_pattern(mut self, pattern: &str) -> Result<Self> {
        self.failure_pattern = Some(compile(&self.name, pattern)?);
        Ok(self)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

fn compile(job: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| StatusError::InvalidPattern {
        job: job.to_string(),
        source,
    })
}

/// The fixed set of jobs checked on every run
///
/// The ETL job also fails on a logged traceback, the two backup jobs only need
/// their success line.
pub fn default_jobs(freshness_threshold: Duration) -> Result<Vec<JobCheck>> {
    Ok(vec![
        JobCheck::new(
            "etl_status",
            "/home/ubuntu/etl.log",
            "Estimated remaining time: 0 m.*recommendations",
            freshness_threshold,
        )?
        .with_failure_pattern("traceback")?,
        JobCheck::new(
            "backupportainer_status",
            "/tmp/backupportainer.log",
            "Backup succeeded",
            freshness_threshold,
        )?,
        JobCheck::new(
            "backupswarm_status",
            "/tmp/backupswarm.log",
            "Backup succeeded",
            freshness_threshold,
        )?,
    ])
}
