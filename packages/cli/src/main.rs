//! Main entry point for the uplynk-jwt command line

use clap::Parser;
use std::process::ExitCode;
use uplynk_jwt_cli::{Cli, logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
