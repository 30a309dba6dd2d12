//! Tool System
//!
//! Extensible tool framework for agent capabilities. Tools are registered
//! behind a validated dispatch table and invoked by the reasoning loop; a
//! batch of calls executes sequentially with results correlated by call id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Tool call request from the LLM
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    #[serde(alias = "tool")]
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,

    /// Call ID for correlating the result message
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
            id: Some(uuid::Uuid::new_v4().to_string()),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }

    /// Fetch a string argument
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Fetch a numeric argument
    pub fn f64_arg(&self, key: &str) -> Option<f64> {
        self.arguments.get(key).and_then(serde_json::Value::as_f64)
    }

    /// Fetch an integer argument
    pub fn i64_arg(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(serde_json::Value::as_i64)
    }
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Call ID (if provided in request)
    pub id: Option<String>,

    /// Whether execution succeeded
    pub success: bool,

    /// Output (result text or error description)
    pub output: String,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: false,
            output: error.into(),
        }
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, integer, boolean, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl ParameterSchema {
    pub fn required(name: &str, param_type: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: true,
            default: None,
            enum_values: None,
        }
    }

    pub fn optional(
        name: &str,
        param_type: &str,
        description: &str,
        default: Option<serde_json::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: false,
            default,
            enum_values: None,
        }
    }

    pub fn with_enum(mut self, values: Vec<serde_json::Value>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// Tool definition schema (for LLM function calling).
///
/// The description text is part of the model-facing contract: the model
/// selects tools by it, so it must stay stable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to LLM)
    pub description: String,

    /// Parameter definitions, in declaration order
    pub parameters: Vec<ParameterSchema>,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema for LLM function calling
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments before execution (optional)
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(AgentError::ToolValidation(format!(
                    "Missing required parameter: {}",
                    param.name
                )));
            }
        }

        Ok(())
    }
}

/// Registry for available tools.
///
/// Schemas are checked at registration time, so dispatch never has to deal
/// with a duplicate or unnamed entry.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a new tool, validating its schema
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        self.register_boxed(Arc::new(tool))
    }

    /// Register a boxed tool, validating its schema
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let schema = tool.schema();

        if schema.name.trim().is_empty() {
            return Err(AgentError::ToolRegistration(
                "tool name must not be empty".into(),
            ));
        }
        if self.tools.contains_key(&schema.name) {
            return Err(AgentError::ToolRegistration(format!(
                "duplicate tool name: {}",
                schema.name
            )));
        }
        for param in &schema.parameters {
            if param.name.trim().is_empty() {
                return Err(AgentError::ToolRegistration(format!(
                    "tool {} declares an unnamed parameter",
                    schema.name
                )));
            }
        }

        self.order.push(schema.name.clone());
        self.tools.insert(schema.name, tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Execute a single tool call
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        tool.validate(call)?;

        let result = tool.execute(call).await?;
        Ok(result.with_id(call.id.clone()))
    }

    /// Execute a batch of calls in order.
    ///
    /// A failing call never aborts the batch; its error is folded into a
    /// failure result so the conversation keeps its one-result-per-call
    /// correlation.
    pub async fn execute_batch(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let result = match self.execute(call).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(tool = %call.name, error = %e, "tool call failed");
                    ToolResult::failure(call.name.clone(), format!("Error: {e}"))
                        .with_id(call.id.clone())
                }
            };
            results.push(result);
        }
        results
    }

    /// Get all tool schemas in registration order (for system prompt generation)
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name).map(|t| t.schema()))
            .collect()
    }

    /// Get tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Generate system prompt section describing available tools
    pub fn generate_prompt_section(&self) -> String {
        let mut prompt = String::from("## Available Tools\n\n");
        prompt.push_str("You can use a tool by responding with a JSON block:\n\n");
        prompt.push_str(
            "```tool\n{\"tool\": \"tool_name\", \"arguments\": {\"arg\": \"value\"}}\n```\n\n",
        );
        prompt.push_str("You may emit several tool blocks in one reply.\n\n");

        for schema in self.schemas() {
            prompt.push_str(&format!("### {}\n", schema.name));
            prompt.push_str(&format!("{}\n", schema.description));

            if !schema.parameters.is_empty() {
                prompt.push_str("**Parameters:**\n");
                for param in &schema.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    prompt.push_str(&format!(
                        "- `{}` ({}){}: {}\n",
                        param.name, param.param_type, required, param.description
                    ));
                }
            }
            prompt.push('\n');
        }

        prompt
    }
}
