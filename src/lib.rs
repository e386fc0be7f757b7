//! l10n-coverage - translation coverage for `.properties` resource bundles
//!
//! Every key of every resource file is treated like a line of code: it is
//! covered when its value looks translated (contains non-ASCII characters)
//! and missed when it is plain ASCII. The result is written as a JaCoCo XML
//! report so existing coverage dashboards can display translation progress.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and option resolution
//! - `core`: Scan, parse, classify and aggregate pipeline
//! - `report`: JaCoCo XML serialization

pub mod cli;
pub mod config;
pub mod core;
pub mod report;
