mod api;
mod middleware;
mod session;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use konbini_gemini::GeminiClient;

use crate::api::{build_app, AppState};
use crate::session::SearchSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(konbini_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let gemini = match config.gemini_base_url.as_deref() {
        Some(base_url) => GeminiClient::with_base_url(
            &config.gemini_api_key,
            &config.gemini_model,
            config.request_timeout_secs,
            base_url,
        )?,
        None => GeminiClient::new(
            &config.gemini_api_key,
            &config.gemini_model,
            config.request_timeout_secs,
        )?,
    };

    let app = build_app(AppState {
        config: Arc::clone(&config),
        gemini: Arc::new(gemini),
        session: Arc::new(SearchSession::new()),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "konbini server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
