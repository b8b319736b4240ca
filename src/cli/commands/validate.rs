//! `validate` command handler
//!
//! Runs the loading pipeline on each given plan file without executing
//! anything, and reports every issue found.

use std::path::Path;

use serde_json::json;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config;
use crate::error::{ApiCheckError, ConfigError, Severity, ValidationIssue};

/// Validates each file and reports the issues.
///
/// # Errors
///
/// Returns an error if any file fails to parse or has error-severity
/// issues (with `--strict`, warnings count as errors too).
pub fn run(args: &ValidateArgs) -> Result<(), ApiCheckError> {
    let mut first_failure: Option<ConfigError> = None;

    for file in &args.files {
        let report = validate_file(file, args.strict);

        match args.format {
            OutputFormat::Human => print_human(&report),
            OutputFormat::Json => print_json(&report),
        }

        if !report.valid && first_failure.is_none() {
            first_failure = Some(report.into_error());
        }
    }

    first_failure.map_or(Ok(()), |e| Err(e.into()))
}

/// Validation report for one plan file.
struct FileReport {
    path: String,
    valid: bool,
    issues: Vec<ValidationIssue>,
}

impl FileReport {
    fn into_error(self) -> ConfigError {
        ConfigError::ValidationError {
            path: self.path,
            errors: self
                .issues
                .into_iter()
                .filter(|i| i.severity == Severity::Error)
                .collect(),
        }
    }
}

fn validate_file(path: &Path, strict: bool) -> FileReport {
    let display = path.display().to_string();

    let plan = match config::parse(path) {
        Ok(plan) => plan,
        Err(e) => {
            return FileReport {
                path: display,
                valid: false,
                issues: vec![ValidationIssue {
                    path: String::new(),
                    message: e.to_string(),
                    severity: Severity::Error,
                }],
            };
        }
    };

    let mut issues = config::validate(&plan);
    if strict {
        for issue in &mut issues {
            issue.severity = Severity::Error;
        }
    }

    let valid = issues.iter().all(|i| i.severity != Severity::Error);
    FileReport {
        path: display,
        valid,
        issues,
    }
}

fn print_human(report: &FileReport) {
    if report.valid && report.issues.is_empty() {
        println!("{}: ok", report.path);
        return;
    }

    println!("{}:", report.path);
    for issue in &report.issues {
        println!("  {issue}");
    }
}

fn print_json(report: &FileReport) {
    let issues: Vec<_> = report
        .issues
        .iter()
        .map(|i| {
            json!({
                "path": i.path,
                "message": i.message,
                "severity": match i.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                },
            })
        })
        .collect();

    println!(
        "{}",
        json!({
            "file": report.path,
            "valid": report.valid,
            "issues": issues,
        })
    );
}
