//! Benchmark metadata stitcher.
//!
//! Prepends a metadata header, built from a flat JSON parameters file, to a
//! benchmark results file, rewriting the results file in place.
//!
//! ```
//! use aossctl_report::{BenchmarkParameters, render_header};
//!
//! let params = BenchmarkParameters::from_json(r#"{"target_index_name": "idx1"}"#).unwrap();
//! let header = render_header(&params, "smoke", None, "2026-01-01 00:00:00");
//! assert!(header.contains("- Index Name: idx1"));
//! assert!(header.contains("- Index Mode: in_memory"));
//! ```

pub mod error;
pub mod header;
pub mod params;
pub mod stitch;

pub use error::ReportError;
pub use header::{TIME_FORMAT, format_pdt, render_header};
pub use params::BenchmarkParameters;
pub use stitch::{START_TIME_ENV, stitch_report};
