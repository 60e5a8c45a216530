//! Job Status Checker
//!
//! Checks that scheduled jobs ran and succeeded by inspecting their logs, and
//! writes a flat status file for a metrics endpoint.

/// Build-time information (target, compiler, timestamp)
pub mod build_info;

/// Runtime settings (output location, freshness threshold, log level)
pub mod config;

/// Error type for the status pipeline
pub mod error;

/// Job definitions, evaluation, and the status file
pub mod status;

pub use error::{Result, StatusError};
