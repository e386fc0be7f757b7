use std::{collections::BTreeMap, fmt, ops::Add};

use crate::core::locator::SourceLocator;

/// Missed/covered pair, the smallest unit of coverage arithmetic.
///
/// Each key contributes exactly one of [`Counter::MISSED`] or
/// [`Counter::COVERED`]; larger counters are sums of those.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counter {
    pub missed: u64,
    pub covered: u64,
}

impl Counter {
    pub const ZERO: Counter = Counter::new(0, 0);
    /// One untranslated key.
    pub const MISSED: Counter = Counter::new(1, 0);
    /// One translated key.
    pub const COVERED: Counter = Counter::new(0, 1);

    pub const fn new(missed: u64, covered: u64) -> Self {
        Self { missed, covered }
    }

    pub fn total(&self) -> u64 {
        self.missed + self.covered
    }

    /// Covered share in `[0.0, 1.0]`, or `None` when nothing was counted.
    pub fn covered_ratio(&self) -> Option<f64> {
        if self.total() == 0 {
            None
        } else {
            Some(self.covered as f64 / self.total() as f64)
        }
    }
}

impl Add for Counter {
    type Output = Counter;

    fn add(self, rhs: Counter) -> Counter {
        Counter::new(self.missed + rhs.missed, self.covered + rhs.covered)
    }
}

impl std::iter::Sum for Counter {
    fn sum<I: Iterator<Item = Counter>>(iter: I) -> Counter {
        iter.fold(Counter::ZERO, Add::add)
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.covered, self.total())
    }
}

/// Coverage status of a single line, derived from its instruction counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Empty,
    NotCovered,
    PartlyCovered,
    FullyCovered,
}

/// Everything recorded at one line number of a resource file.
///
/// Normally one key per line. Several keys land on the same line only when
/// they collide after unescaping; their counters then accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineCoverage {
    pub instructions: Counter,
    pub keys: Vec<String>,
}

impl LineCoverage {
    pub fn status(&self) -> LineStatus {
        match (self.instructions.missed, self.instructions.covered) {
            (0, 0) => LineStatus::Empty,
            (_, 0) => LineStatus::NotCovered,
            (0, _) => LineStatus::FullyCovered,
            _ => LineStatus::PartlyCovered,
        }
    }
}

/// Coverage of one resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileCoverage {
    /// File name without directories, e.g. `messages_de.properties`.
    pub name: String,
    /// Package prefix followed by the directory path relative to the input root.
    pub package_name: String,
    lines: BTreeMap<usize, LineCoverage>,
}

impl SourceFileCoverage {
    pub fn new(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            lines: BTreeMap::new(),
        }
    }

    /// Record `counter` for `key` at the 1-based `line`.
    pub fn increment(&mut self, key: impl Into<String>, counter: Counter, line: usize) {
        let entry = self.lines.entry(line).or_default();
        entry.instructions = entry.instructions + counter;
        entry.keys.push(key.into());
    }

    pub fn line(&self, nr: usize) -> Option<&LineCoverage> {
        self.lines.get(&nr)
    }

    /// Non-empty lines in ascending line order.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &LineCoverage)> {
        self.lines
            .iter()
            .filter(|(_, line)| line.status() != LineStatus::Empty)
            .map(|(nr, line)| (*nr, line))
    }

    pub fn last_line(&self) -> Option<usize> {
        self.lines().last().map(|(nr, _)| nr)
    }

    pub fn instruction_counter(&self) -> Counter {
        self.lines.values().map(|line| line.instructions).sum()
    }

    /// A line counts as covered when at least one of its keys is translated.
    pub fn line_counter(&self) -> Counter {
        self.lines
            .values()
            .map(|line| match line.status() {
                LineStatus::Empty => Counter::ZERO,
                LineStatus::NotCovered => Counter::MISSED,
                LineStatus::PartlyCovered | LineStatus::FullyCovered => Counter::COVERED,
            })
            .sum()
    }
}

/// Source files sharing one package name.
#[derive(Debug)]
pub struct PackageCoverage<'a> {
    pub name: &'a str,
    pub source_files: Vec<&'a SourceFileCoverage>,
}

impl PackageCoverage<'_> {
    pub fn instruction_counter(&self) -> Counter {
        self.source_files
            .iter()
            .map(|s| s.instruction_counter())
            .sum()
    }

    pub fn line_counter(&self) -> Counter {
        self.source_files.iter().map(|s| s.line_counter()).sum()
    }
}

/// All source files of one scan.
#[derive(Debug)]
pub struct BundleCoverage {
    pub name: String,
    pub source_files: Vec<SourceFileCoverage>,
    /// Used to show source lines to humans, never for counting.
    pub locator: SourceLocator,
}

impl BundleCoverage {
    pub fn new(
        name: impl Into<String>,
        source_files: Vec<SourceFileCoverage>,
        locator: SourceLocator,
    ) -> Self {
        Self {
            name: name.into(),
            source_files,
            locator,
        }
    }

    /// Groups source files by package name, sorted by name.
    pub fn packages(&self) -> Vec<PackageCoverage<'_>> {
        let mut grouped: BTreeMap<&str, Vec<&SourceFileCoverage>> = BTreeMap::new();
        for source in &self.source_files {
            grouped
                .entry(source.package_name.as_str())
                .or_default()
                .push(source);
        }
        grouped
            .into_iter()
            .map(|(name, source_files)| PackageCoverage { name, source_files })
            .collect()
    }

    pub fn instruction_counter(&self) -> Counter {
        self.source_files
            .iter()
            .map(|s| s.instruction_counter())
            .sum()
    }

    pub fn line_counter(&self) -> Counter {
        self.source_files.iter().map(|s| s.line_counter()).sum()
    }
}
