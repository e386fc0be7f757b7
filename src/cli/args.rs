//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `report`: Scan resource files and write the coverage report
//! - `init`: Create a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::core::LineIndexMode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Report(args)) => args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Directory to scan for resource files (overrides config file)
    #[arg(long, env = "L10N_COVERAGE_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory the report is written under (overrides config file)
    #[arg(long, env = "L10N_COVERAGE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Prefix prepended to every package name, e.g. "org.example." (overrides config file)
    #[arg(long, env = "L10N_COVERAGE_PACKAGE_PREFIX")]
    pub package_prefix: Option<String>,

    /// How keys are mapped to line numbers (overrides config file)
    #[arg(long, value_enum)]
    pub line_index: Option<LineIndexMode>,

    /// Session id written to the report (overrides config file)
    #[arg(long)]
    pub session_id: Option<String>,

    /// Report name written to the report (overrides config file)
    #[arg(long)]
    pub report_name: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<&ReportArgs> for ConfigOverrides {
    fn from(args: &ReportArgs) -> Self {
        ConfigOverrides {
            input_dir: args.input_dir.clone(),
            output_dir: args.output_dir.clone(),
            package_prefix: args.package_prefix.clone(),
            line_index: args.line_index,
            session_id: args.session_id.clone(),
            report_name: args.report_name.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a JaCoCo XML translation coverage report for .properties files
    Report(ReportArgs),
    /// Initialize a new .l10ncovrc.json configuration file
    Init,
}
