//! Test plan loader
//!
//! Loading pipeline:
//! 1. Read the raw file (missing file is a config error, not an I/O panic)
//! 2. Strip a UTF-8 BOM if present
//! 3. YAML parsing into the typed plan
//! 4. Validation
//! 5. Freeze with `Arc`

use std::path::Path;
use std::sync::Arc;

use crate::config::schema::TestPlan;
use crate::config::validation;
use crate::error::{ConfigError, Severity, ValidationIssue};

/// Result of loading a test plan.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated plan.
    pub plan: Arc<TestPlan>,

    /// Non-fatal issues encountered during validation.
    pub warnings: Vec<ValidationIssue>,
}

/// Parses a test plan file without validating it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or YAML parsing fails.
pub fn parse(path: &Path) -> Result<TestPlan, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;

    // Handle UTF-8 BOM
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    if raw.trim().is_empty() {
        return Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            line: None,
            message: "test plan file is empty".to_string(),
        });
    }

    serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        line: e.location().map(|l| l.line()),
        message: e.to_string(),
    })
}

/// Loads a test plan file and returns the frozen, validated plan.
///
/// Validation errors fail the load; warnings are passed through for the
/// caller to report.
///
/// # Errors
///
/// Returns an error if the file cannot be read, YAML parsing fails, or
/// validation finds at least one error-severity issue.
pub fn load(path: &Path) -> Result<LoadResult, ConfigError> {
    let plan = parse(path)?;

    let issues = validation::validate(&plan);
    let (errors, warnings): (Vec<_>, Vec<_>) = issues
        .into_iter()
        .partition(|i| i.severity == Severity::Error);

    if !errors.is_empty() {
        return Err(ConfigError::ValidationError {
            path: path.display().to_string(),
            errors,
        });
    }

    Ok(LoadResult {
        plan: Arc::new(plan),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_plan(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_plan() {
        let file = write_plan(
            r"
url: http://localhost:1234
groups:
  - name: health
    prefix: /api
    routes:
      - name: ping
        method: GET
        path: /health
",
        );
        let result = load(file.path()).unwrap();
        assert_eq!(result.plan.url, "http://localhost:1234");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = load(Path::new("/nonexistent/plan.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn empty_file_is_parse_error() {
        let file = write_plan("");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn invalid_yaml_reports_parse_error() {
        let file = write_plan("url: [unclosed");
        let err = load(file.path()).unwrap_err();
        match err {
            ConfigError::ParseError { message, .. } => assert!(!message.is_empty()),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn bom_is_stripped() {
        let file = write_plan("\u{feff}url: http://x\ngroups: []\n");
        let result = load(file.path()).unwrap();
        assert_eq!(result.plan.url, "http://x");
    }

    #[test]
    fn empty_url_fails_validation() {
        let file = write_plan("url: \"\"\ngroups: []\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn warnings_do_not_fail_load() {
        let file = write_plan(
            r"
url: http://localhost:1234
groups:
  - name: empty
    routes: []
",
        );
        let result = load(file.path()).unwrap();
        assert_eq!(result.warnings.len(), 1);
    }
}
