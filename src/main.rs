use clap::Parser;
use repograph::cli::{Cli, CliError};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    repograph::cli::run(Cli::parse()).await
}
