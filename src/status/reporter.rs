//! Formatting and reporting for status runs

use chrono::{DateTime, Local};
use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::runner::StatusReport;

/// Formats a status report as a pretty table
pub fn format_report(report: &StatusReport) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Job", "Status", "Modified", "Age", "Duration", "Message"]);

    for result in &report.results {
        let modified = DateTime::<Local>::from(result.modified)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let age = format_age(result.age.as_secs());
        let duration = format!("{:.2?}", result.duration);
        builder.push_record([
            result.name.as_str(),
            &result.status().as_colored_str(),
            &modified,
            &age,
            &duration,
            &result.outcome.message(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = String::new();
    output.push_str(&table.to_string());
    output.push('\n');

    output.push_str(&format_summary(report));

    output
}

fn format_age(secs: u64) -> String {
    let (hours, minutes) = (secs / 3600, (secs % 3600) / 60);
    if hours > 0 {
        format!("{hours}h{minutes:02}m")
    } else {
        format!("{minutes}m{:02}s", secs % 60)
    }
}

fn format_summary(report: &StatusReport) -> String {
    let mut summary = String::new();

    summary.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    summary.push_str(&format!("  Jobs checked: {}\n", report.total()));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed()));

    if report.failed() > 0 {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed()));
    }

    summary.push('\n');
    if report.is_healthy() {
        summary.push_str(&format!("  {}\n", "Overall: ALL JOBS OK".green().bold()));
    } else {
        summary.push_str(&format!("  {}\n", "Overall: JOBS NEED ATTENTION".red().bold()));
    }

    summary
}

/// Prints a status report to stdout
pub fn print_report(report: &StatusReport) {
    println!("{}", format_report(report));
}
