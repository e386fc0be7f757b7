use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{CoverageOptions, LineIndexMode, file_scanner::DEFAULT_EXTENSION};

pub const CONFIG_FILE_NAME: &str = ".l10ncovrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory scanned for resource files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<String>,
    /// Directory the report is written under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    /// Prepended verbatim to every package name.
    #[serde(default)]
    pub package_prefix: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub line_index: LineIndexMode,
    #[serde(default = "default_session_id")]
    pub session_id: String,
    #[serde(default)]
    pub report_name: String,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_session_id() -> String {
    "id".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            package_prefix: String::new(),
            extension: default_extension(),
            ignores: Vec::new(),
            line_index: LineIndexMode::default(),
            session_id: default_session_id(),
            report_name: String::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or the
    /// extension is not a bare extension.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.extension.is_empty() || self.extension.contains('.') {
            bail!(
                "Invalid 'extension': \"{}\" (expected a bare extension such as \"properties\")",
                self.extension
            );
        }

        Ok(())
    }
}

/// Template written by `init`.
pub fn default_config_json() -> Result<String> {
    let config = Config {
        input_dir: Some("./src/main/resources".to_string()),
        output_dir: Some("./build".to_string()),
        ..Config::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative config paths are resolved against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
        }),
    }
}

/// Values given on the command line or through the environment. They take
/// precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub package_prefix: Option<String>,
    pub line_index: Option<LineIndexMode>,
    pub session_id: Option<String>,
    pub report_name: Option<String>,
}

/// Merge overrides into the loaded config and check required values.
///
/// Relative override paths resolve against `cwd`, relative config paths
/// against the config file's directory.
pub fn resolve_options(
    loaded: ConfigLoadResult,
    overrides: ConfigOverrides,
    cwd: &Path,
) -> Result<CoverageOptions> {
    let ConfigLoadResult {
        config, base_dir, ..
    } = loaded;

    let input_dir = overrides
        .input_dir
        .map(|p| cwd.join(p))
        .or_else(|| config.input_dir.as_deref().map(|p| base_dir.join(p)));
    let Some(input_dir) = input_dir else {
        bail!(
            "Input directory is not configured.\n\
             Hint: Pass --input-dir, set L10N_COVERAGE_INPUT_DIR, or add 'inputDir' to {}.",
            CONFIG_FILE_NAME
        );
    };

    let output_dir = overrides
        .output_dir
        .map(|p| cwd.join(p))
        .or_else(|| config.output_dir.as_deref().map(|p| base_dir.join(p)));
    let Some(output_dir) = output_dir else {
        bail!(
            "Output directory is not configured.\n\
             Hint: Pass --output-dir, set L10N_COVERAGE_OUTPUT_DIR, or add 'outputDir' to {}.",
            CONFIG_FILE_NAME
        );
    };

    Ok(CoverageOptions {
        input_dir,
        output_dir,
        package_prefix: overrides.package_prefix.unwrap_or(config.package_prefix),
        extension: config.extension,
        ignores: config.ignores,
        line_index: overrides.line_index.unwrap_or(config.line_index),
        session_id: overrides.session_id.unwrap_or(config.session_id),
        report_name: overrides.report_name.unwrap_or(config.report_name),
    })
}
