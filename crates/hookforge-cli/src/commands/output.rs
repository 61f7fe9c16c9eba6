//! Shared output formatting for scan and validation results.

use anyhow::Result;
use hookforge_core::ScanReport;
use hookforge_exports::ValidationReport;

use crate::OutputFormat;

/// Print a scan report in the specified format.
pub fn print_scan(report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_scan_text(report),
        OutputFormat::Json => return print_json(&report.technologies),
        OutputFormat::Compact => print_scan_compact(report),
    }
    Ok(())
}

fn print_scan_text(report: &ScanReport) {
    if report.technologies.is_empty() {
        println!("No technologies detected.");
        return;
    }

    println!("{:<12} {:>6}  {:<28} CONFIDENCE", "TECHNOLOGY", "FILES", "VERSION");
    for tech in report.technologies.values() {
        println!(
            "{:<12} {:>6}  {:<28} {:>5.1}%",
            tech.name,
            tech.file_count,
            tech.version.as_deref().unwrap_or("unknown"),
            tech.confidence * 100.0,
        );
    }
    println!(
        "\nDetected {} technolog{} in {} file(s)",
        report.technologies.len(),
        if report.technologies.len() == 1 { "y" } else { "ies" },
        report.files_scanned
    );
}

fn print_scan_compact(report: &ScanReport) {
    for tech in report.technologies.values() {
        println!(
            "{}: {} file(s), confidence {:.2}",
            tech.name, tech.file_count, tech.confidence
        );
    }
}

/// Print a validation report in the specified format.
pub fn print_validation(
    report: &ValidationReport,
    format: OutputFormat,
    quiet: bool,
    show_stats: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_validation_text(report, quiet, show_stats),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_validation_compact(report),
    }
    Ok(())
}

fn print_validation_text(report: &ValidationReport, quiet: bool, show_stats: bool) {
    for violation in &report.violations {
        print!("{}", violation.format());
    }

    let errors = report.error_count();
    let warnings = report.warning_count();

    if report.violations.is_empty() {
        if !quiet {
            println!("All imports respect declared exports.");
        }
    } else {
        println!(
            "\nFound {} error(s), {} warning(s) across {} librar{}",
            errors,
            warnings,
            report.libraries.len(),
            if report.libraries.len() == 1 { "y" } else { "ies" },
        );
    }

    if show_stats {
        for stats in &report.libraries {
            println!(
                "{}: {} export(s), {} import(s), {} violation(s) in {:.3}s",
                stats.lib_name,
                stats.exports_count,
                stats.imports_count,
                stats.violations_count,
                stats.execution_time,
            );
        }
        println!(
            "total: {} export(s), {} import(s), {} violation(s) in {:.3}s",
            report.total_exports,
            report.total_imports,
            report.total_violations,
            report.total_execution_time,
        );
    }
}

fn print_validation_compact(report: &ValidationReport) {
    for violation in &report.violations {
        println!("{violation}");
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
