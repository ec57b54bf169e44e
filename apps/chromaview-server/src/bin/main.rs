use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chromaview_client::ChromaSource;
use chromaview_core::config::Config;

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().inspect_err(|e| eprintln!("Error loading config: {e}"))?;
    let settings = config.settings()?;
    init_tracing(&settings.log.filter);

    let source = ChromaSource::new(settings.chroma.clone())?;
    let app = chromaview_server::router(Arc::new(source));

    let bind_addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        addr = %bind_addr,
        api_version = ?settings.chroma.api_version,
        "chromaview server listening"
    );
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
