use std::{error::Error, path::Path, sync::Arc};

use rustyrpcmock::http::server;
use tracing::info;

/// Load the configuration once, then serve it until the process is stopped.
pub async fn run(config_arg: &Path, host: &str) -> Result<(), Box<dyn Error>> {
    info!(config = %config_arg.display(), "serving configuration");
    let config = Arc::new(super::load_or_report(config_arg)?);

    let addr = format!("{}:{}", host, config.server_port);
    info!(%addr, discriminator_header = %config.discriminator_header, "starting HTTP server");

    server::run(&addr, config).await?;
    Ok(())
}
