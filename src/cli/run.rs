use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{init::init, report::report},
    exit_status::ExitStatus,
    report::print,
};

/// Dispatch to the command handler.
///
/// Returns `Err` when the command fails (missing configuration, unreadable
/// files, malformed resources); the caller maps that to [`ExitStatus::Error`].
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Report(args)) => {
            let verbose = args.verbose;
            let outcome = report(&args)?;
            print(&outcome, verbose);
            Ok(ExitStatus::Success)
        }
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
