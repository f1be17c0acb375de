use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{error, info};

use super::handler::handle_client;
use crate::config::Configuration;

pub async fn bind<A: ToSocketAddrs>(address: A) -> std::io::Result<TcpListener> {
    TcpListener::bind(address).await
}

/// Accept loop. Every connection gets a shared handle to the same immutable
/// configuration; no lock is taken per request.
pub async fn serve(listener: TcpListener, config: Arc<Configuration>) -> std::io::Result<()> {
    info!(
        address = %listener.local_addr()?,
        path = %config.route_path(),
        handlers = config.handlers.len(),
        "Server listening"
    );

    loop {
        let (stream, peer) = listener.accept().await?;
        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, &config).await {
                error!(%peer, "Error handling client: {}", e);
            }
        });
    }
}

pub async fn run(address: &str, config: Arc<Configuration>) -> std::io::Result<()> {
    let listener = bind(address).await?;
    serve(listener, config).await
}
