//! Entry point for humioctl.
use std::process::ExitCode;

use clap::Parser;
use humioctl::{
    cli::{execute, CliArgs, CliExit},
    lib::telemetry,
};

fn main() -> ExitCode {
    match bootstrap() {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

fn bootstrap() -> Result<(), CliExit> {
    telemetry::init_tracing().map_err(CliExit::from_error)?;
    let args = CliArgs::parse();
    let output = execute(args).map_err(CliExit::from_error)?;
    println!("{output}");
    Ok(())
}
