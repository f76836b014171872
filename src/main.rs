use anyhow::Context;
use tokio::net::TcpListener;

use ragent_backend::core::{config::Settings, logging};
use ragent_backend::server::router::router;
use ragent_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    logging::init(&settings.log_dir);
    settings.require_openai_key()?;

    let bind_addr = format!("0.0.0.0:{}", settings.port);
    let state = AppState::initialize(settings);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app = router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
