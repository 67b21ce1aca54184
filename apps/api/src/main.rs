mod analysis;
mod config;
mod errors;
mod flow_client;
mod models;
mod preview;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::flow_client::catalog::FlowCatalog;
use crate::flow_client::LangflowClient;
use crate::preview::rasterizer::PdfiumRasterizer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Flow exports are re-read on every run; this only reports what is missing now.
    let catalog = FlowCatalog::new(config.flows_dir.clone());
    let resolvable = catalog.check().await;
    info!(
        "Flow catalog at {} ({resolvable} flows resolvable)",
        catalog.dir().display()
    );

    let flow_runner = LangflowClient::new(
        config.langflow_url.clone(),
        config.langflow_api_key.clone(),
        catalog,
        Duration::from_secs(config.flow_timeout_secs),
    )?;
    info!("Langflow client initialized ({})", config.langflow_url);

    let rasterizer = PdfiumRasterizer::new(config.pdfium_lib_path.clone(), config.pdf_render_scale);
    info!(
        "PDF rasterizer initialized (library: {}, scale: {})",
        config.pdfium_lib_path.as_deref().unwrap_or("system"),
        config.pdf_render_scale
    );

    let state = AppState::new(config.clone(), Arc::new(flow_runner), Arc::new(rasterizer));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
