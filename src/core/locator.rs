use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::core::{
    data::SourceFileCoverage,
    parsers::properties::{decode_content, physical_lines},
};

/// Tab stop used when rendering source lines.
const TAB_WIDTH: usize = 4;

/// Finds the resource file behind a [`SourceFileCoverage`] so its lines can
/// be shown to a human.
#[derive(Debug, Clone)]
pub struct SourceLocator {
    root: PathBuf,
    package_prefix: String,
}

impl SourceLocator {
    pub fn new(root: impl Into<PathBuf>, package_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            package_prefix: package_prefix.into(),
        }
    }

    /// Path of the file, or `None` when its package does not carry this
    /// locator's prefix.
    pub fn resolve(&self, source: &SourceFileCoverage) -> Option<PathBuf> {
        let relative = source.package_name.strip_prefix(&self.package_prefix)?;
        let dir = relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part));
        Some(dir.join(&source.name))
    }

    /// All lines of the file with tabs expanded.
    pub fn read_lines(&self, source: &SourceFileCoverage) -> Result<Option<Vec<String>>> {
        let Some(path) = self.resolve(source) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }
        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read source file: {:?}", path))?;
        let content = decode_content(&bytes);
        Ok(Some(
            physical_lines(&content)
                .into_iter()
                .map(expand_tabs)
                .collect(),
        ))
    }
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}
