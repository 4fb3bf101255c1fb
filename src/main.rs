use std::process::ExitCode;

use clap::Parser;
use srclist::cli::{Arguments, ExitStatus};
use srclist::logging::init_logging;

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.common.verbose);

    match srclist::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
