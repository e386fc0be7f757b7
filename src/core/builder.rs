//! Assembles coverage records from parsed resource files.
//!
//! Each parsed key is classified and its counter is attached to the line
//! the line index maps it to. Keys without a line produce a
//! [`CoverageWarning`] and are left out of the counts.

use std::fmt;

use crate::core::{
    classify::classify,
    data::{BundleCoverage, Counter, SourceFileCoverage},
    file_scanner::ScannedFile,
    locator::SourceLocator,
    parsers::{LineIndex, Properties},
};

/// A parsed key that the line index could not place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageWarning {
    pub file_path: String,
    pub key: String,
}

impl fmt::Display for CoverageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' not found in line index of {}", self.key, self.file_path)
    }
}

/// Build the coverage record of one file.
///
/// Counters are recorded in the iteration order of `properties`. Missing
/// line mappings are appended to `warnings`, one per key.
pub fn build_source_file(
    file: &ScannedFile,
    properties: &Properties,
    line_index: &LineIndex,
    warnings: &mut Vec<CoverageWarning>,
) -> SourceFileCoverage {
    let mut source = SourceFileCoverage::new(&file.name, &file.package_name);
    let file_path = file.path.to_string_lossy();

    for (key, entry) in properties.iter() {
        let Some(line) = line_index.get(key) else {
            tracing::debug!(key, file = %file_path, "key not found in line index");
            warnings.push(CoverageWarning {
                file_path: file_path.to_string(),
                key: key.to_string(),
            });
            continue;
        };
        source.increment(key, Counter::from(classify(&entry.value)), line);
    }

    source
}

/// Result of assembling a bundle.
#[derive(Debug)]
pub struct CoverageResult {
    pub bundle: BundleCoverage,
    pub warnings: Vec<CoverageWarning>,
}

/// Accumulates source files in discovery order.
#[derive(Debug)]
pub struct BundleBuilder {
    name: String,
    locator: SourceLocator,
    source_files: Vec<SourceFileCoverage>,
    warnings: Vec<CoverageWarning>,
}

impl BundleBuilder {
    pub fn new(name: impl Into<String>, locator: SourceLocator) -> Self {
        Self {
            name: name.into(),
            locator,
            source_files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_file(&mut self, file: &ScannedFile, properties: &Properties, line_index: &LineIndex) {
        let source = build_source_file(file, properties, line_index, &mut self.warnings);
        tracing::debug!(
            file = %file.path.display(),
            package = %source.package_name,
            keys = %source.instruction_counter(),
            "built source file coverage"
        );
        self.source_files.push(source);
    }

    pub fn finish(self) -> CoverageResult {
        CoverageResult {
            bundle: BundleCoverage::new(self.name, self.source_files, self.locator),
            warnings: self.warnings,
        }
    }
}
