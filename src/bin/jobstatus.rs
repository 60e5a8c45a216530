//! Scheduled job status check
//!
//! Meant to run from cron once all jobs should have finished, e.g.
//! `1 6 * * * /usr/local/bin/jobstatus`.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use jobstatus::build_info;
use jobstatus::config::Settings;
use jobstatus::status;

#[derive(Debug, Parser)]
#[command(name = "jobstatus", version, long_version = build_info::LONG_VERSION)]
#[command(about = "Checks job logs and writes a status file for the metrics endpoint")]
struct Cli {
    /// Settings profile to load (config/<profile>.toml)
    #[arg(long, env = "JOBSTATUS_PROFILE", default_value = "release")]
    profile: String,

    /// Print a table of the results after writing the status file
    #[arg(long)]
    report: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::load(&cli.profile)
        .with_context(|| format!("failed to load settings for profile '{}'", cli.profile))?;

    init_tracing(&settings.log_level);
    info!(
        profile = %settings.profile,
        output = %settings.output_path().display(),
        "checking job statuses"
    );

    let report = status::run_status_check(&settings).context("job status check failed")?;

    if cli.report {
        status::print_report(&report);
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Settings may have failed before tracing was set up
            let message = format!("{e:#}");
            if tracing::dispatcher::has_been_set() {
                error!(error = %message, "aborting");
            } else {
                eprintln!("jobstatus: {message}");
            }
            ExitCode::FAILURE
        }
    }
}
