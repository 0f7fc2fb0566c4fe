//! In-place rewrite of the results file.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::ReportError;
use crate::header::{format_pdt, render_header};
use crate::params::BenchmarkParameters;

/// Environment variable holding the benchmark start time.
pub const START_TIME_ENV: &str = "OSB_START_TIME";

/// Prepend the metadata header to `results_path`, overwriting it.
///
/// The end time is `now` rendered in PDT. The results file ends up as the
/// header, a blank line, then its previous contents.
///
/// # Errors
///
/// Returns a [`ReportError`] if either input cannot be read or parsed, or the
/// results file cannot be rewritten. The results file is left untouched when
/// reading fails.
pub fn stitch_report(
    params_path: &Path,
    results_path: &Path,
    scenario: &str,
    start_time: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), ReportError> {
    let params = BenchmarkParameters::from_file(params_path)?;
    let results = std::fs::read_to_string(results_path).map_err(|source| ReportError::Read {
        path: results_path.to_path_buf(),
        source,
    })?;
    debug!(bytes = results.len(), path = %results_path.display(), "read results");

    let end_time = format_pdt(now);
    let header = render_header(&params, scenario, start_time, &end_time);

    std::fs::write(results_path, format!("{header}\n{results}")).map_err(|source| {
        ReportError::Write {
            path: results_path.to_path_buf(),
            source,
        }
    })?;
    info!(scenario, path = %results_path.display(), "stitched benchmark metadata");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_should_prepend_header_to_results() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.json");
        let results_path = dir.path().join("results.md");
        std::fs::write(
            &params_path,
            r#"{"target_index_name":"idx1","target_index_dimension":128}"#,
        )
        .unwrap();
        std::fs::write(&results_path, "latency_p50: 12ms").unwrap();

        stitch_report(&params_path, &results_path, "smoke", None, now()).unwrap();

        let output = std::fs::read_to_string(&results_path).unwrap();
        let index_name = output.find("Index Name: idx1").unwrap();
        let dimension = output.find("Vector Dimension: 128").unwrap();
        let query_count = output.find("query_count: unknown").unwrap();
        let results = output.find("latency_p50: 12ms").unwrap();
        assert!(index_name < dimension && dimension < query_count && query_count < results);
        assert!(output.contains("- End Time (PDT): 2026-03-01 05:00:00\n"));
        assert!(output.ends_with("# Benchmark Results\n\nlatency_p50: 12ms"));
    }

    #[test]
    fn test_should_equal_header_plus_results() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.json");
        let results_path = dir.path().join("results.md");
        std::fs::write(&params_path, "{}").unwrap();
        std::fs::write(&results_path, "| metric | value |\n").unwrap();

        stitch_report(&params_path, &results_path, "s1", Some("t0"), now()).unwrap();

        let expected_header = render_header(
            &BenchmarkParameters::default(),
            "s1",
            Some("t0"),
            "2026-03-01 05:00:00",
        );
        assert_eq!(
            std::fs::read_to_string(&results_path).unwrap(),
            format!("{expected_header}\n| metric | value |\n")
        );
    }

    #[test]
    fn test_should_leave_results_untouched_on_bad_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.json");
        let results_path = dir.path().join("results.md");
        std::fs::write(&params_path, "not json").unwrap();
        std::fs::write(&results_path, "original").unwrap();

        let result = stitch_report(&params_path, &results_path, "s", None, now());

        assert!(matches!(result, Err(ReportError::InvalidParameters(_))));
        assert_eq!(std::fs::read_to_string(&results_path).unwrap(), "original");
    }

    #[test]
    fn test_should_fail_on_missing_results_file() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.json");
        std::fs::write(&params_path, "{}").unwrap();

        let result = stitch_report(&params_path, &dir.path().join("absent.md"), "s", None, now());
        assert!(matches!(result, Err(ReportError::Read { .. })));
    }
}
