//! Job status checks
//!
//! Each monitored job writes a log. A job counts as done when its log is
//! fresh, contains the job's success line, and (for jobs that have one) does
//! not contain its failure line. The verdicts are written as
//! `"<name> <0|1>"` lines for a metrics endpoint to pick up.
//!
//! # Example
//!
//! ```no_run
//! use jobstatus::status::{StatusChecker, default_jobs, DEFAULT_FRESHNESS};
//!
//! let report = StatusChecker::new()
//!     .with_jobs(default_jobs(DEFAULT_FRESHNESS)?)
//!     .run()?;
//!
//! if report.is_healthy() {
//!     println!("All jobs completed");
//! }
//! # Ok::<(), jobstatus::StatusError>(())
//! ```

pub mod evaluate;
pub mod freshness;
pub mod job;
pub mod persist;
pub mod reporter;
pub mod runner;
pub mod scan;

pub use evaluate::{JobOutcome, JobStatus, evaluate_job};
pub use freshness::{LogAge, check_freshness, check_freshness_at, is_fresh, log_age};
pub use job::{DEFAULT_FRESHNESS, JobCheck, default_jobs};
pub use persist::{ensure_output_dir, persist_status};
pub use reporter::{format_report, print_report};
pub use runner::{JobResult, StatusChecker, StatusMap, StatusReport};
pub use scan::{FileScanner, LogScanner, scan_for_pattern};

use tracing::info;

use crate::config::Settings;
use crate::error::Result;

/// Runs the fixed job set and writes the status file
pub fn run_status_check(settings: &Settings) -> Result<StatusReport> {
    let checker = StatusChecker::new().with_jobs(default_jobs(settings.freshness_threshold())?);
    run_with(&checker, settings)
}

/// Runs `checker` and writes its statuses to the configured output file
///
/// The output directory is created before any log is read. Nothing is written
/// if a job fails to evaluate.
pub fn run_with<S: LogScanner>(
    checker: &StatusChecker<S>,
    settings: &Settings,
) -> Result<StatusReport> {
    ensure_output_dir(&settings.output_dir)?;

    let report = checker.run()?;

    let output = settings.output_path();
    persist_status(&report.statuses, &output)?;
    info!(
        path = %output.display(),
        passed = report.passed(),
        failed = report.failed(),
        "status file written"
    );

    Ok(report)
}
