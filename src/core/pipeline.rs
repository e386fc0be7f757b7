//! Scan, parse, classify and report in one pass.
//!
//! The whole run is sequential: the directory is enumerated first, files are
//! then processed in discovery order, and the report is serialized last. The
//! report file is only created once every file has been processed, so a
//! failing run never leaves a partial report behind.

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        builder::{BundleBuilder, CoverageResult, CoverageWarning},
        data::{BundleCoverage, SessionInfo, session::now_millis},
        file_scanner::scan_resource_files,
        locator::SourceLocator,
        parsers::{LineIndex, parse_properties_file},
    },
    report::write_report_file,
};

/// How keys are mapped to line numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineIndexMode {
    /// Lines come from the properties parser itself, so comments,
    /// continuations and `:` separators are handled.
    #[default]
    Parser,
    /// Lines come from a separate scan that treats every line containing
    /// `=` as an assignment.
    Naive,
}

/// Fully resolved inputs of one run.
#[derive(Debug, Clone)]
pub struct CoverageOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub package_prefix: String,
    pub extension: String,
    pub ignores: Vec<String>,
    pub line_index: LineIndexMode,
    pub session_id: String,
    pub report_name: String,
}

/// Everything produced by [`generate_report`].
#[derive(Debug)]
pub struct ReportOutcome {
    pub report_path: PathBuf,
    pub bundle: BundleCoverage,
    pub warnings: Vec<CoverageWarning>,
    pub session: SessionInfo,
}

/// Scan the input directory and build the coverage bundle.
pub fn collect_coverage(options: &CoverageOptions) -> Result<CoverageResult> {
    // Canonical root gives absolute file paths; a missing root is reported
    // by the scanner.
    let root = options
        .input_dir
        .canonicalize()
        .unwrap_or_else(|_| options.input_dir.clone());

    let files = scan_resource_files(
        &root,
        &options.extension,
        &options.package_prefix,
        &options.ignores,
    )?;
    tracing::debug!(count = files.len(), root = %root.display(), "scan complete");

    let locator = SourceLocator::new(&root, &options.package_prefix);
    let mut builder = BundleBuilder::new(&options.report_name, locator);

    for file in &files {
        let resource = parse_properties_file(&file.path)?;
        let line_index = match options.line_index {
            LineIndexMode::Parser => resource.properties.line_index(),
            LineIndexMode::Naive => LineIndex::scan(&resource.content),
        };
        builder.add_file(file, &resource.properties, &line_index);
    }

    Ok(builder.finish())
}

/// Run the whole pipeline and write the report under `output_dir`.
pub fn generate_report(options: &CoverageOptions) -> Result<ReportOutcome> {
    let start = now_millis();
    let CoverageResult { bundle, warnings } = collect_coverage(options)?;
    let session = SessionInfo::new(&options.session_id, start, now_millis());

    let report_path = write_report_file(&options.output_dir, &bundle, &session)?;
    tracing::debug!(path = %report_path.display(), "report written");

    Ok(ReportOutcome {
        report_path,
        bundle,
        warnings,
        session,
    })
}
