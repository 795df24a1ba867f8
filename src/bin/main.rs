use std::process::ExitCode;

use color_eyre::Result;
use env_logger::Target;
use xcci::{cli::input::CliArgs, utils::logger::config_logger, worker::run_xcci};

/// The entry point for the binary generated
/// for the program
fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli_args = CliArgs::parse_lenient(std::env::args_os()).unwrap_or_else(|e| e.exit());
    config_logger(cli_args.verbose, Target::Stdout)?;

    log::info!("Launching a new xcci run");
    let status = run_xcci(&cli_args)?;
    log::info!("Finished with status: {status}");

    Ok(ExitCode::from(u8::try_from(status).unwrap_or(1)))
}
