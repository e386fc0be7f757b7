//! Report output.
//!
//! - `xml`: JaCoCo XML serialization of a coverage bundle

pub mod xml;

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::data::{BundleCoverage, SessionInfo};
use xml::XmlReportVisitor;

/// Location of the report relative to the output directory, where
/// JaCoCo-aware tooling expects the test report of a Gradle build.
pub const REPORT_RELATIVE_PATH: &str = "reports/jacoco/test/jacocoTestReport.xml";

pub fn report_path(output_dir: &Path) -> PathBuf {
    REPORT_RELATIVE_PATH
        .split('/')
        .fold(output_dir.to_path_buf(), |path, part| path.join(part))
}

/// Serialize `bundle` into `sink`, wrapped in the session envelope.
pub fn write_report<W: Write>(sink: W, bundle: &BundleCoverage, session: &SessionInfo) -> Result<W> {
    let sessions = std::slice::from_ref(session);
    let mut visitor = XmlReportVisitor::new(sink);
    visitor.visit_info(sessions)?;
    visitor.visit_bundle(bundle)?;
    visitor.visit_info(sessions)?;
    visitor.visit_end()
}

/// Write the report to its fixed location under `output_dir`, creating
/// parent directories and replacing any previous report.
pub fn write_report_file(
    output_dir: &Path,
    bundle: &BundleCoverage,
    session: &SessionInfo,
) -> Result<PathBuf> {
    let path = report_path(output_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(&path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    let writer = write_report(BufWriter::new(file), bundle, session)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::core::{
        data::{Counter, SourceFileCoverage},
        locator::SourceLocator,
    };

    fn sample_bundle() -> BundleCoverage {
        let mut source = SourceFileCoverage::new("messages_de.properties", "app.");
        source.increment("title", Counter::COVERED, 1);
        BundleCoverage::new("", vec![source], SourceLocator::new("/", "app."))
    }

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path(Path::new("/build")),
            PathBuf::from("/build/reports/jacoco/test/jacocoTestReport.xml")
        );
    }

    #[test]
    fn test_write_report_file_creates_parents() {
        let dir = tempdir().unwrap();
        let session = SessionInfo::new("id", 1, 2);

        let path = write_report_file(dir.path(), &sample_bundle(), &session).unwrap();

        assert_eq!(path, report_path(dir.path()));
        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(r#"<sourcefile name="messages_de.properties">"#));
    }

    #[test]
    fn test_write_report_file_truncates_previous_report() {
        let dir = tempdir().unwrap();
        let path = report_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x".repeat(10_000)).unwrap();

        write_report_file(dir.path(), &sample_bundle(), &SessionInfo::new("id", 1, 2)).unwrap();

        let xml = fs::read_to_string(&path).unwrap();
        assert!(xml.ends_with("</report>"));
        assert!(!xml.contains("xxx"));
    }

    #[test]
    fn test_write_report_to_sink() {
        let bytes = write_report(Vec::new(), &sample_bundle(), &SessionInfo::new("run", 3, 4))
            .unwrap();
        let xml = String::from_utf8(bytes).unwrap();

        assert_eq!(xml.matches("<sessioninfo").count(), 1);
        assert!(xml.contains(r#"<sessioninfo id="run" start="3" dump="4"/>"#));
    }
}
