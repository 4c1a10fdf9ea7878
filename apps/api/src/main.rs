mod config;
mod errors;
mod models;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::render::{LatexCompiler, ResumePipeline};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-api v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the LaTeX compiler (one private working directory per request)
    let compiler = LatexCompiler::new(&config.latex_compiler, &config.work_root)
        .with_timeout(config.compile_timeout);
    info!(
        "LaTeX compiler: {} (work root: {}, timeout: {:?})",
        config.latex_compiler,
        config.work_root.display(),
        config.compile_timeout
    );

    // Initialize the render pipeline and fail fast on an unreadable template
    let pipeline = ResumePipeline::new(&config.template_path, Arc::new(compiler));
    pipeline
        .check_template()
        .await
        .context("Resume template is not readable")?;
    info!("Template loaded from {}", pipeline.template_path().display());

    // Build app state
    let state = AppState {
        config: config.clone(),
        pipeline: Arc::new(pipeline),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
