//! fuzzyintent command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use fuzzyintent_runtime::cli::{Cli, run};
use fuzzyintent_runtime::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(cli, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}
