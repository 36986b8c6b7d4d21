//! freefalld - free-fall disk protection daemon
//!
//! Parks the heads of a hard disk while the accelerometer reports free fall.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod cli;
mod daemon;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match daemon::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = daemon::exit_code(&err);
            error!(exit_code = code, "{err:#}");
            ExitCode::from(code)
        }
    }
}
