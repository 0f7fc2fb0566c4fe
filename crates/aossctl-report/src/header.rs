//! Metadata header rendering.

use std::fmt::Write as _;

use chrono::{DateTime, TimeDelta, Utc};

use crate::params::BenchmarkParameters;

/// Timestamp format used for start and end times.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fixed offset of Pacific Daylight Time from UTC, in hours.
const PDT_OFFSET_HOURS: i64 = -7;

/// Header lines taken from the parameters file, after the index mode.
const TUNING_KEYS: [&str; 4] = [
    "query_count",
    "query_k",
    "hnsw_ef_search",
    "hnsw_ef_construction",
];

/// Format `instant` in fixed UTC-07:00, ignoring daylight saving rules.
#[must_use]
pub fn format_pdt(instant: DateTime<Utc>) -> String {
    (instant + TimeDelta::hours(PDT_OFFSET_HOURS))
        .format(TIME_FORMAT)
        .to_string()
}

/// Render the metadata header.
///
/// A missing start time renders as `None`.
#[must_use]
pub fn render_header(
    params: &BenchmarkParameters,
    scenario: &str,
    start_time: Option<&str>,
    end_time: &str,
) -> String {
    let mut header = String::from("# Benchmark Metadata\n\n");
    let mut line = |label: &str, value: &str| {
        // Writing to a String cannot fail.
        let _ = writeln!(header, "- {label}: {value}");
    };

    line("Scenario", scenario);
    line("Start Time (PDT)", start_time.unwrap_or("None"));
    line("End Time (PDT)", end_time);
    line("Index Name", &params.display("target_index_name"));
    line("DataSet", &params.display("target_index_bulk_index_data_set_path"));
    line("Vector Dimension", &params.display("target_index_dimension"));
    line("Vector SpaceType", &params.display("target_index_space_type"));
    line("Index Mode", &params.mode());
    for key in TUNING_KEYS {
        line(key, &params.display(key));
    }

    header.push_str("\n---\n\n# Benchmark Results\n");
    header
}
