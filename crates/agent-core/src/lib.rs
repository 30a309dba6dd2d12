//! # agent-core
//!
//! Core agent logic with provider-agnostic LLM abstraction and an
//! extensible tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ State-Machine│ │    Tools    │  │   LlmProvider       │  │
//! │  │     Loop     │─│   Registry  │──│   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop is an explicit finite-state machine (`Agent` -> `Tools` ->
//! `Agent` ... -> `End`) with ordered completion guards and an iteration
//! ceiling. The `LlmProvider` trait enables swapping model backends
//! without changing agent logic.

pub mod error;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider, TokenUsage};
pub use reasoning::{Agent, AgentBuilder, CompletionGuards, LoopState, RunOutcome};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
