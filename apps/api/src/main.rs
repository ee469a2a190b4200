mod clipboard;
mod config;
mod errors;
mod form;
mod generation;
mod layout;
mod models;
mod output;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::clipboard::{ClipboardChain, ClipboardSink, CommandClipboard, SystemClipboard};
use crate::config::Config;
use crate::form::FormSession;
use crate::generation::clock::{SystemClock, TokioDelay};
use crate::generation::generator::TemplateLetterGenerator;
use crate::layout::default_page_config;
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cover Letter API v{}", env!("CARGO_PKG_VERSION"));

    // Template generator with simulated latency
    let generator = Arc::new(TemplateLetterGenerator::new(
        Arc::new(TokioDelay(config.generation_delay)),
        Arc::new(SystemClock),
    ));
    info!(
        "Letter generator initialized (delay: {} ms)",
        config.generation_delay.as_millis()
    );

    // Clipboard: system clipboard first, then the configured command
    let fallback = CommandClipboard::from_argv(
        &config.clipboard_fallback_command,
        config.clipboard_timeout,
    )
        .map(|command| Arc::new(command) as Arc<dyn ClipboardSink>);
    if fallback.is_none() {
        warn!("CLIPBOARD_FALLBACK_COMMAND is empty; copy has no fallback");
    }
    let clipboard = ClipboardChain::new(Arc::new(SystemClipboard), fallback);

    // Export page geometry (A4, 11pt, 25 mm margins)
    let page_config = default_page_config(config.export_font);
    info!(
        "Layout page config: {:?} {}pt",
        page_config.font, page_config.font_size_pt
    );

    // Build app state
    let state = AppState {
        session: Arc::new(Mutex::new(FormSession::new(config.copy_feedback))),
        generator,
        renderer: Arc::new(PdfRenderer),
        clipboard,
        page_config,
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
