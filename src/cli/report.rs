//! Console output for the `report` command.
//!
//! The XML report is the real product; this only tells the user where it
//! went and what it says. Output is cargo-style: `warning:` lines on stderr,
//! summary and details on stdout.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{
    CoverageWarning, ReportOutcome,
    data::{BundleCoverage, Counter, LineStatus},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print warnings to stderr, then the summary (and details if `verbose`) to stdout.
pub fn print(outcome: &ReportOutcome, verbose: bool) {
    print_warnings_to(&outcome.warnings, &mut io::stderr().lock());

    let mut stdout = io::stdout().lock();
    if verbose {
        print_untranslated_to(&outcome.bundle, &mut stdout);
        print_packages_to(&outcome.bundle, &mut stdout);
    }
    print_summary_to(outcome, &mut stdout);
}

pub fn print_warnings_to<W: Write>(warnings: &[CoverageWarning], writer: &mut W) {
    for warning in warnings {
        let _ = writeln!(
            writer,
            "{} '{}' not found in line index",
            "warning:".bold().yellow(),
            warning.key
        );
        let _ = writeln!(writer, "  {} {}", "-->".blue(), warning.file_path);
    }
}

pub fn print_summary_to<W: Write>(outcome: &ReportOutcome, writer: &mut W) {
    let files = outcome.bundle.source_files.len();
    let keys = outcome.bundle.instruction_counter();

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote coverage for {} resource {} to {}",
            files,
            if files == 1 { "file" } else { "files" },
            outcome.report_path.display()
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "  {} of {} {} translated ({})",
        keys.covered,
        keys.total(),
        if keys.total() == 1 { "key" } else { "keys" },
        format_ratio(keys)
    );
}

/// One row per package: name, translated/total keys, percentage.
pub fn print_packages_to<W: Write>(bundle: &BundleCoverage, writer: &mut W) {
    let packages = bundle.packages();
    if packages.is_empty() {
        return;
    }

    let names: Vec<&str> = packages
        .iter()
        .map(|p| if p.name.is_empty() { "(root)" } else { p.name })
        .collect();
    let name_width = names.iter().map(|n| n.width()).max().unwrap_or(0);

    let _ = writeln!(writer, "{}", "Packages:".bold());
    for (package, name) in packages.iter().zip(&names) {
        let counter = package.instruction_counter();
        let padding = name_width - name.width();
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {:>9}  {:>6}",
            name,
            "",
            counter.to_string(),
            format_ratio(counter),
            padding = padding
        );
    }
    let _ = writeln!(writer);
}

/// Every untranslated key with its source line, when the file can be read.
pub fn print_untranslated_to<W: Write>(bundle: &BundleCoverage, writer: &mut W) {
    for source in &bundle.source_files {
        let untranslated: Vec<_> = source
            .lines()
            .filter(|(_, line)| {
                matches!(
                    line.status(),
                    LineStatus::NotCovered | LineStatus::PartlyCovered
                )
            })
            .collect();
        if untranslated.is_empty() {
            continue;
        }

        let path = bundle
            .locator
            .resolve(source)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("{}/{}", source.package_name, source.name));
        let lines = bundle.locator.read_lines(source).ok().flatten();
        let width = source
            .last_line()
            .map(|n| n.to_string().len())
            .unwrap_or(1);

        let _ = writeln!(
            writer,
            "{} {} ({} untranslated)",
            "untranslated:".bold().cyan(),
            path,
            untranslated.len()
        );
        for (nr, line) in untranslated {
            let text = lines
                .as_ref()
                .and_then(|lines| lines.get(nr - 1))
                .cloned()
                .unwrap_or_else(|| line.keys.join(", "));
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                nr.to_string().blue(),
                "|".blue(),
                text,
                width = width
            );
        }
        let _ = writeln!(writer);
    }
}

fn format_ratio(counter: Counter) -> String {
    match counter.covered_ratio() {
        Some(ratio) => format!("{:.1}%", ratio * 100.0),
        None => "n/a".to_string(),
    }
}
