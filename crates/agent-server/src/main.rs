//! travel-agent HTTP Server
//!
//! Axum-based server exposing the travel planning agent over a REST API.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::LlmProvider;
use agent_runtime::OllamaProvider;
use travel_planner::{MarkdownExporter, PlannerConfig, ToolkitServices, TravelAgent};

use crate::handlers::{health_check, plan_handler};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize LLM provider
    let provider = Arc::new(OllamaProvider::from_env());

    // Verify Ollama connection
    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to Ollama"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - agent will fall back at request time");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    // Wire the travel toolkit from configured providers
    let config = PlannerConfig::from_env();
    let services = ToolkitServices::from_config(&config);
    let tools = services.build_registry()?;

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let agent = TravelAgent::new(provider.clone(), tools)?;

    // Build application state
    let state = AppState {
        provider,
        agent: Arc::new(agent),
        exporter: Arc::new(MarkdownExporter::new()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/plan", post(plan_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 travel-agent server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health    - Health check");
    tracing::info!("  POST /api/plan  - Plan a trip");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
