//! Binary crate for the `geoweather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Resolving configuration and credentials
//! - Logging setup and human-friendly output

use clap::Parser;

mod cli;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = match cli::Cli::try_parse() {
        Ok(cmd) => cmd,
        Err(err) => {
            let code = cli::usage_exit_code(&err);
            let _ = err.print();
            std::process::exit(code);
        }
    };

    logger::init_cli_logger(cmd.verbose);
    cmd.run().await
}
