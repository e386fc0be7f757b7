//! Key to line number mapping for resource files.
//!
//! [`LineIndex::scan`] is the line-oriented indexer: every physical line
//! containing `=` is an assignment whose key is the trimmed, unescaped text
//! before the first `=`. It knows nothing about comments, continuations,
//! `:` separators or escaped `=`, so it can disagree with
//! [`parse_properties`](super::properties::parse_properties) on such files.

use std::collections::HashMap;

use super::properties::{physical_lines, unescape};

/// Mapping from decoded key to the 1-based line where its assignment begins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    lines: HashMap<String, usize>,
}

impl LineIndex {
    pub fn scan(content: &str) -> Self {
        let mut index = LineIndex::default();

        for (i, line) in physical_lines(content).into_iter().enumerate() {
            let Some(eq) = line.find('=') else {
                continue;
            };
            match unescape(line[..eq].trim()) {
                Ok(key) => index.insert(key, i + 1),
                Err(e) => tracing::debug!(line = i + 1, error = %e, "skipping unindexable key"),
            }
        }

        index
    }

    /// Later insertions for the same key replace earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, line: usize) {
        self.lines.insert(key.into(), line);
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.lines.get(key).copied()
    }
}

impl FromIterator<(String, usize)> for LineIndex {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        let mut index = LineIndex::default();
        for (key, line) in iter {
            index.insert(key, line);
        }
        index
    }
}
