//! Per-job evaluation

use std::time::{Duration, SystemTime};

use tracing::{info, warn};

use super::freshness::{LogAge, is_fresh, log_age};
use super::job::JobCheck;
use super::scan::LogScanner;
use crate::error::Result;

/// Binary status of a job as written to the status file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    /// Job not confirmed (stale log, no success line, or failure logged)
    #[default]
    Fail,
    /// Job completed
    Pass,
}

impl JobStatus {
    /// Integer written to the status file
    pub fn code(&self) -> u8 {
        match self {
            JobStatus::Fail => 0,
            JobStatus::Pass => 1,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, JobStatus::Pass)
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            JobStatus::Pass => "PASS".green().to_string(),
            JobStatus::Fail => "FAIL".red().to_string(),
        }
    }
}

/// Why a job ended up with its status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Log too old; not scanned
    Stale { age: Duration },
    /// Log fresh but the success pattern never matched
    NoSuccess,
    /// Success pattern matched but so did the failure pattern
    FailureLogged { successes: usize, failures: usize },
    /// Success pattern matched and no failure was logged
    Passed { successes: usize },
}

impl JobOutcome {
    pub fn status(&self) -> JobStatus {
        match self {
            JobOutcome::Passed { .. } => JobStatus::Pass,
            _ => JobStatus::Fail,
        }
    }

    /// Short human-readable description
    pub fn message(&self) -> String {
        match self {
            JobOutcome::Stale { age } => {
                format!("log is stale ({}s old)", age.as_secs())
            }
            JobOutcome::NoSuccess => "no success line found".to_string(),
            JobOutcome::FailureLogged {
                successes,
                failures,
            } => format!("{successes} success lines, but {failures} failure lines"),
            JobOutcome::Passed { successes } => format!("{successes} success lines"),
        }
    }
}

/// Evaluates one job against its log as of `now`
///
/// A stale log is not an error; it is reported and never scanned. Any stat or
/// read failure is returned as-is.
pub fn evaluate_job<S: LogScanner + ?Sized>(
    job: &JobCheck,
    scanner: &S,
    now: SystemTime,
) -> Result<(JobOutcome, LogAge)> {
    let path = job.log_path();
    let log = log_age(path, now)?;

    if !is_fresh(log.age, job.freshness_threshold) {
        info!(
            job = %job.name,
            path = %path.display(),
            age = ?log.age,
            threshold = ?job.freshness_threshold,
            "log is older than the freshness threshold, skipping"
        );
        return Ok((JobOutcome::Stale { age: log.age }, log));
    }

    info!(job = %job.name, age = ?log.age, "log is recent enough, scanning");

    let successes = scanner.count_matches(path, &job.success_pattern)?;
    if successes == 0 {
        info!(job = %job.name, "no success line found");
        return Ok((JobOutcome::NoSuccess, log));
    }

    info!(job = %job.name, matches = successes, "success lines found");

    if let Some(failure_pattern) = &job.failure_pattern {
        let failures = scanner.count_matches(path, failure_pattern)?;
        if failures > 0 {
            warn!(job = %job.name, matches = failures, "failure lines found");
            return Ok((
                JobOutcome::FailureLogged {
                    successes,
                    failures,
                },
                log,
            ));
        }
    }

    Ok((JobOutcome::Passed { successes }, log))
}
