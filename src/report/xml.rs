//! JaCoCo XML report writer.
//!
//! Produces the same document layout as JaCoCo's XML formatter, so the
//! output can be fed to any tool that reads `jacocoTestReport.xml`:
//!
//! ```text
//! <report name="">
//!   <sessioninfo id="…" start="…" dump="…"/>
//!   <package name="…">
//!     <sourcefile name="…">
//!       <line nr="…" mi="…" ci="…" mb="0" cb="0"/>
//!       <counter type="INSTRUCTION" missed="…" covered="…"/>
//!       <counter type="LINE" missed="…" covered="…"/>
//!     </sourcefile>
//!     <counter …/>
//!   </package>
//!   <counter …/>
//! </report>
//! ```
//!
//! No whitespace is emitted between elements.

use std::io::Write;

use anyhow::{Context, Result, bail};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::core::data::{
    BundleCoverage, Counter, LineCoverage, PackageCoverage, SessionInfo, SourceFileCoverage,
};

pub const DOCTYPE: &str = r#"report PUBLIC "-//JACOCO//DTD Report 1.1//EN" "report.dtd""#;

/// Counters of one report node. Resource files only ever produce
/// instruction and line counters; zero-total counters are not written.
struct NodeCounters {
    instructions: Counter,
    lines: Counter,
}

impl NodeCounters {
    /// `(type, counter)` pairs in report order.
    fn entries(&self) -> [(&'static str, Counter); 2] {
        [("INSTRUCTION", self.instructions), ("LINE", self.lines)]
    }
}

/// Streams a coverage bundle to a byte sink.
///
/// Calls follow the visitor protocol: [`visit_info`](Self::visit_info) any
/// number of times, at most one [`visit_bundle`](Self::visit_bundle), then
/// [`visit_end`](Self::visit_end). The session infos current at the time the
/// bundle is visited are the ones written into the report header.
pub struct XmlReportVisitor<W: Write> {
    writer: Writer<W>,
    sessions: Vec<SessionInfo>,
    report_open: bool,
}

impl<W: Write> XmlReportVisitor<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: Writer::new(sink),
            sessions: Vec::new(),
            report_open: false,
        }
    }

    pub fn visit_info(&mut self, sessions: &[SessionInfo]) -> Result<()> {
        self.sessions = sessions.to_vec();
        Ok(())
    }

    pub fn visit_bundle(&mut self, bundle: &BundleCoverage) -> Result<()> {
        if self.report_open {
            bail!("A report can only contain one bundle");
        }
        self.open_report(&bundle.name)?;

        for package in bundle.packages() {
            self.write_package(&package)?;
        }
        self.write_counters(&NodeCounters {
            instructions: bundle.instruction_counter(),
            lines: bundle.line_counter(),
        })
    }

    /// Closes the document and hands back the sink.
    pub fn visit_end(mut self) -> Result<W> {
        if !self.report_open {
            self.open_report("")?;
        }
        self.end("report")?;
        let mut sink = self.writer.into_inner();
        sink.flush().context("Failed to flush report")?;
        Ok(sink)
    }

    fn open_report(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .context("Failed to write XML declaration")?;
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))
            .context("Failed to write XML doctype")?;
        self.start("report", &[("name", name)])?;

        for session in self.sessions.clone() {
            let start = session.start.to_string();
            let dump = session.dump.to_string();
            self.empty(
                "sessioninfo",
                &[
                    ("id", session.id.as_str()),
                    ("start", start.as_str()),
                    ("dump", dump.as_str()),
                ],
            )?;
        }
        self.report_open = true;
        Ok(())
    }

    fn write_package(&mut self, package: &PackageCoverage<'_>) -> Result<()> {
        self.start("package", &[("name", package.name)])?;
        for source in &package.source_files {
            self.write_source_file(source)?;
        }
        self.write_counters(&NodeCounters {
            instructions: package.instruction_counter(),
            lines: package.line_counter(),
        })?;
        self.end("package")
    }

    fn write_source_file(&mut self, source: &SourceFileCoverage) -> Result<()> {
        self.start("sourcefile", &[("name", source.name.as_str())])?;
        for (nr, line) in source.lines() {
            self.write_line(nr, line)?;
        }
        self.write_counters(&NodeCounters {
            instructions: source.instruction_counter(),
            lines: source.line_counter(),
        })?;
        self.end("sourcefile")
    }

    fn write_line(&mut self, nr: usize, line: &LineCoverage) -> Result<()> {
        let nr = nr.to_string();
        let mi = line.instructions.missed.to_string();
        let ci = line.instructions.covered.to_string();
        self.empty(
            "line",
            &[
                ("nr", nr.as_str()),
                ("mi", mi.as_str()),
                ("ci", ci.as_str()),
                ("mb", "0"),
                ("cb", "0"),
            ],
        )
    }

    fn write_counters(&mut self, counters: &NodeCounters) -> Result<()> {
        for (kind, counter) in counters.entries() {
            if counter.total() == 0 {
                continue;
            }
            let missed = counter.missed.to_string();
            let covered = counter.covered.to_string();
            self.empty(
                "counter",
                &[
                    ("type", kind),
                    ("missed", missed.as_str()),
                    ("covered", covered.as_str()),
                ],
            )?;
        }
        Ok(())
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = element(name, attributes);
        self.writer
            .write_event(Event::Start(element))
            .with_context(|| format!("Failed to write <{}>", name))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = element(name, attributes);
        self.writer
            .write_event(Event::Empty(element))
            .with_context(|| format!("Failed to write <{}/>", name))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .with_context(|| format!("Failed to write </{}>", name))
    }
}

fn element<'a>(name: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for &attribute in attributes {
        element.push_attribute(attribute);
    }
    element
}
