//! Coverage model shared by all pipeline phases.
//!
//! ## Module Structure
//!
//! - `coverage`: counters, per-line, per-file, per-package and bundle coverage
//! - `session`: SessionInfo carried into the report envelope

pub mod coverage;
pub mod session;

pub use coverage::{
    BundleCoverage, Counter, LineCoverage, LineStatus, PackageCoverage, SourceFileCoverage,
};
pub use session::SessionInfo;
