use clap::Parser;
use hofcalc::cli::cli_args::Cli;
use hofcalc::cli::cli_main::run;
use hofcalc::cli::logging::setup_logging;
use log::error;
use std::process::ExitCode;

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
