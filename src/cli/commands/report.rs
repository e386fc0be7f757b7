use std::env;

use anyhow::{Context, Result};

use crate::{
    cli::args::ReportArgs,
    config::{ConfigOverrides, load_config, resolve_options},
    core::{ReportOutcome, generate_report},
};

pub fn report(args: &ReportArgs) -> Result<ReportOutcome> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let loaded = load_config(&cwd)?;
    let options = resolve_options(loaded, ConfigOverrides::from(args), &cwd)?;
    tracing::debug!(?options, "resolved options");

    generate_report(&options)
}
