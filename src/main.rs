mod commands;

use std::{error::Error, path::PathBuf};

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rpcmock")]
#[command(author, version, about = "Configurable JSON-RPC mock server")]
struct Cli {
    /// Path to the JSON mock configuration
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Address to bind; the port comes from the configuration
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Validate the configuration and exit
    #[arg(long)]
    validate: bool,
}

impl Cli {
    async fn run(self) -> Result<(), Box<dyn Error>> {
        if self.validate {
            commands::validate::run(&self.config)
        } else {
            commands::serve::run(&self.config, &self.host).await
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter (e.g. RPCMOCK_LOG=debug)
    let filter = EnvFilter::try_from_env("RPCMOCK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
