//! Runner for evaluating all jobs and collecting their statuses

use std::time::{Duration, Instant, SystemTime};

use indexmap::IndexMap;

use super::evaluate::{JobOutcome, JobStatus, evaluate_job};
use super::job::JobCheck;
use super::scan::{FileScanner, LogScanner};
use crate::error::{Result, StatusError};

/// Job name to status, in the order jobs were configured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusMap {
    entries: IndexMap<String, JobStatus>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job with status [`JobStatus::Fail`]
    ///
    /// Fails if the name is already present.
    pub fn insert(&mut self, name: &str) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(StatusError::DuplicateJob(name.to_string()));
        }
        self.entries.insert(name.to_string(), JobStatus::default());
        Ok(())
    }

    /// Updates the status of an existing job; unknown names are ignored
    pub fn set(&mut self, name: &str, status: JobStatus) {
        if let Some(entry) = self.entries.get_mut(name) {
            *entry = status;
        }
    }

    pub fn get(&self, name: &str) -> Option<JobStatus> {
        self.entries.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, JobStatus)> {
        self.entries.iter().map(|(name, status)| (name.as_str(), *status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of evaluating a single job
#[derive(Debug, Clone)]
pub struct JobResult {
    pub name: String,
    pub outcome: JobOutcome,
    /// Modification time of the job's log
    pub modified: SystemTime,
    /// Age of the log when it was checked
    pub age: Duration,
    /// How long the evaluation took
    pub duration: Duration,
}

impl JobResult {
    pub fn status(&self) -> JobStatus {
        self.outcome.status()
    }
}

/// Outcome of a full run
#[derive(Debug)]
pub struct StatusReport {
    /// Final status of every job
    pub statuses: StatusMap,
    /// Per-job details in evaluation order
    pub results: Vec<JobResult>,
}

impl StatusReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.status().is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Returns true if every job passed
    pub fn is_healthy(&self) -> bool {
        self.failed() == 0
    }
}

/// Evaluates a list of jobs in order
pub struct StatusChecker<S = FileScanner> {
    jobs: Vec<JobCheck>,
    scanner: S,
}

impl StatusChecker<FileScanner> {
    /// Creates a checker with no jobs that scans files on disk
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            scanner: FileScanner,
        }
    }
}

impl Default for StatusChecker<FileScanner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LogScanner> StatusChecker<S> {
    /// Adds a job to the checker
    pub fn add_job(mut self, job: JobCheck) -> Self {
        self.jobs.push(job);
        self
    }

    /// Adds several jobs to the checker
    pub fn with_jobs(mut self, jobs: impl IntoIterator<Item = JobCheck>) -> Self {
        self.jobs.extend(jobs);
        self
    }

    /// Replaces the scanner used to read logs
    pub fn with_scanner<T: LogScanner>(self, scanner: T) -> StatusChecker<T> {
        StatusChecker {
            jobs: self.jobs,
            scanner,
        }
    }

    pub fn jobs(&self) -> &[JobCheck] {
        &self.jobs
    }

    /// Evaluates every job with the current time
    pub fn run(&self) -> Result<StatusReport> {
        self.run_at(SystemTime::now())
    }

    /// Evaluates every job as of `now`
    ///
    /// Stops at the first stat or read error; no partial report is returned.
    pub fn run_at(&self, now: SystemTime) -> Result<StatusReport> {
        let mut statuses = StatusMap::new();
        for job in &self.jobs {
            statuses.insert(&job.name)?;
        }

        let mut results = Vec::with_capacity(self.jobs.len());
        for job in &self.jobs {
            let start = Instant::now();
            let (outcome, log) = evaluate_job(job, &self.scanner, now)?;
            let duration = start.elapsed();

            statuses.set(&job.name, outcome.status());
            results.push(JobResult {
                name: job.name.clone(),
                outcome,
                modified: log.modified,
                age: log.age,
                duration,
            });
        }

        Ok(StatusReport { statuses, results })
    }
}
