//! Application State

use std::sync::Arc;

use agent_core::LlmProvider;
use travel_planner::{MarkdownExporter, TravelAgent};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Ollama, etc.)
    pub provider: Arc<dyn LlmProvider>,

    /// Planning facade over the reasoning loop and travel toolkit
    pub agent: Arc<TravelAgent>,

    /// Itinerary exporter
    pub exporter: Arc<MarkdownExporter>,
}
