mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let args = platform::cli::Args::parse();
    if let Err(err) = platform::run_app(args) {
        eprintln!("Error: {:#}", err);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
