use std::process::exit;

use clap::Parser;
use cli::Cli;

mod cli;
mod cli_chat;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("An error occurred while running: {}", e);
        exit(1);
    }
}
