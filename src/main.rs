use std::sync::Arc;

use bookvault::{http, BookService, BookStore, Config, JsonFileSnapshot};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "bookvault=info".to_string()),
        )
        .init();

    let config = Config::from_env();
    let snapshot = JsonFileSnapshot::new(&config.data_file);
    tracing::info!(data_file = %snapshot.path().display(), "BookVault API is starting up");

    let store = BookStore::open(snapshot);
    tracing::info!(count = store.len()?, "books loaded");

    let service = Arc::new(BookService::new(store));
    http::serve_with_shutdown(service.clone(), &config.addr, shutdown_signal()).await?;

    tracing::info!("BookVault API is shutting down");
    if service.store().persist()? {
        tracing::info!("books saved to snapshot");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
