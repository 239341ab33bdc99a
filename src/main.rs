use std::process::ExitCode;

use api_keygen::cli::{Cli, Outcome, run};
use clap::Parser;

fn main() -> ExitCode {
    // Enable basic logging; set RUST_LOG=debug for visibility.
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(Outcome::Output(text)) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Rejected(text)) => {
            println!("{}", text);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
