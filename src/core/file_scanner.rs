use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use walkdir::WalkDir;

/// Default resource file extension.
pub const DEFAULT_EXTENSION: &str = "properties";

/// A resource file selected by the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// File name without directories.
    pub name: String,
    /// Package prefix followed by the `/`-separated directory of the file
    /// relative to the scan root.
    pub package_name: String,
}

/// Recursively collect resource files under `root`.
///
/// A file is selected when it is a regular file (symlinks followed) whose
/// extension equals `extension` exactly, and its path relative to `root`
/// matches none of `ignores`. The extension is everything after the last
/// `.` of the file name, so a file named `.properties` is selected too. Directories are walked in file-name order so
/// repeated scans return files in the same order. Any unreadable entry
/// aborts the scan.
pub fn scan_resource_files(
    root: &Path,
    extension: &str,
    package_prefix: &str,
    ignores: &[String],
) -> Result<Vec<ScannedFile>> {
    if !root.exists() {
        bail!(
            "Input directory '{}' does not exist.\n\
             Hint: Check the 'inputDir' setting or the --input-dir flag.",
            root.display()
        );
    }
    if !root.is_dir() {
        bail!("'{}' is not a directory.", root.display());
    }

    let ignore_patterns = ignores
        .iter()
        .map(|p| {
            Pattern::new(p).with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Cannot access path under {}", root.display()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();

        if !entry.file_type().is_file() || file_extension(&name) != Some(extension) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let relative_str = to_slash_path(relative);
        if ignore_patterns.iter().any(|p| p.matches(&relative_str)) {
            tracing::debug!(file = %relative_str, "ignored");
            continue;
        }

        let package_dir = relative.parent().map(to_slash_path).unwrap_or_default();
        tracing::debug!(file = %path.display(), package = %package_dir, "found resource file");

        files.push(ScannedFile {
            path: path.to_path_buf(),
            name: name.into_owned(),
            package_name: format!("{}{}", package_prefix, package_dir),
        });
    }

    Ok(files)
}

fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, extension)| extension)
}

/// Join path components with `/` regardless of platform.
fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
