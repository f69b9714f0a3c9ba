//! HTTP server for campus-crud.
//!
//! Run from repo root: `cargo run -p campus-crud-server`
//! Settings come from the environment (or a `.env` file); see `campus_crud::Settings`.

use campus_crud::{app, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campus_crud=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = AppState::from_settings(&settings).await?;
    let router = app(state, settings.request_body_limit);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
