//! Coverage pipeline.
//!
//! ## Module Structure
//!
//! - `file_scanner`: finds resource files and derives their package names
//! - `parsers`: properties decoding and key to line indexing
//! - `classify`: translated/untranslated heuristic
//! - `builder`: per-file coverage records and bundle assembly
//! - `data`: coverage model and session info
//! - `locator`: maps coverage records back to files for display
//! - `pipeline`: runs the phases in order and writes the report

pub mod builder;
pub mod classify;
pub mod data;
pub mod file_scanner;
pub mod locator;
pub mod parsers;
pub mod pipeline;

pub use builder::{BundleBuilder, CoverageResult, CoverageWarning};
pub use pipeline::{
    CoverageOptions, LineIndexMode, ReportOutcome, collect_coverage, generate_report,
};
