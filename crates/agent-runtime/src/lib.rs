//! # agent-runtime
//!
//! Runtime providers for the travel-agent system.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost", 11434);
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::OllamaProvider;

// Re-export core types for convenience
pub use agent_core::{Agent, AgentError, LlmProvider, Message, Result, Role, Tool, ToolRegistry};
