//! Error Types for the Travel Planner

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Search provider error: {0}")]
    Search(String),

    #[error("All search providers exhausted for query: {0}")]
    SearchExhausted(String),

    #[error("Invalid date: {0}")]
    Date(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Agent error: {0}")]
    Agent(String),
}

impl PlannerError {
    /// Wrap a core loop error without losing its message
    pub fn from_agent(err: agent_core::AgentError) -> Self {
        PlannerError::Agent(err.to_string())
    }
}

impl From<PlannerError> for agent_core::AgentError {
    fn from(err: PlannerError) -> Self {
        agent_core::AgentError::ToolExecution(err.to_string())
    }
}
