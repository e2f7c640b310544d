//! Dazzle Application CLI

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = cli::Cli::parse().run().await {
        #[expect(clippy::print_stderr, reason = "command errors are reported to the operator")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
