//! Reasoning Loop
//!
//! An explicit finite-state machine drives the conversation: an LLM decision
//! step (`Agent`) alternates with a tool execution step (`Tools`) until the
//! transition guards accept the latest assistant message as a complete
//! answer, or the iteration ceiling forces termination.
//!
//! Models sometimes narrate an intention to fetch data instead of emitting a
//! tool call, or stop with a short low-information reply. The guards route
//! both cases back through the tool step, trading a few extra tool calls for
//! completeness of the final answer.

use std::sync::Arc;

use crate::error::Result;
use crate::message::{Conversation, Message, Role};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{ToolCall, ToolRegistry, ToolResult};

/// States of the conversation loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// LLM decision step
    Agent,
    /// Tool execution step
    Tools,
    /// Terminal state
    End,
}

/// Heuristics deciding whether an assistant message is a finished answer.
///
/// Checked in order, first match wins; only a message passing every guard
/// ends the loop.
#[derive(Clone, Debug)]
pub struct CompletionGuards {
    /// Phrases that mean the model narrated a fetch instead of doing one
    pub stall_phrases: Vec<String>,

    /// Answers shorter than this are treated as incomplete
    pub min_chars: usize,

    /// Domain keywords a complete answer is expected to mention
    pub topic_keywords: Vec<String>,

    /// How many distinct keywords must appear
    pub min_keyword_hits: usize,
}

impl Default for CompletionGuards {
    fn default() -> Self {
        Self {
            stall_phrases: [
                "let me search",
                "i'll look up",
                "please hold on",
                "i'll prepare",
                "let me gather",
                "i need to check",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            min_chars: 500,
            topic_keywords: Vec::new(),
            min_keyword_hits: 3,
        }
    }
}

impl CompletionGuards {
    /// Set the domain keyword list
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topic_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

/// Transition function, evaluated after every `Agent` step.
pub fn next_state(message: &Message, guards: &CompletionGuards) -> LoopState {
    if message.has_tool_calls() {
        return LoopState::Tools;
    }

    let content = message.content.to_lowercase();

    if guards.stall_phrases.iter().any(|p| content.contains(p)) {
        return LoopState::Tools;
    }

    if content.chars().count() < guards.min_chars {
        return LoopState::Tools;
    }

    if !guards.topic_keywords.is_empty() {
        let hits = guards
            .topic_keywords
            .iter()
            .filter(|k| content.contains(k.as_str()))
            .count();
        if hits < guards.min_keyword_hits {
            return LoopState::Tools;
        }
    }

    LoopState::End
}

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt template
    pub system_prompt: String,

    /// Maximum Agent steps before forced termination
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Completion heuristics
    pub guards: CompletionGuards,

    /// Whether to append tool descriptions to system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
            guards: CompletionGuards::default(),
            inject_tool_descriptions: true,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant.

When you need to use a tool, respond with a JSON block in this exact format:
```tool
{"tool": "tool_name", "arguments": {"arg1": "value1"}}
```

After receiving tool results, synthesize them into a helpful response.
If you can answer directly without tools, do so.
Be thorough and accurate."#;

/// Outcome of a loop run
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Text of the last message when the loop stopped
    pub content: String,

    /// Number of Agent steps taken
    pub iterations: usize,

    /// Whether the iteration ceiling forced termination
    pub hit_ceiling: bool,
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self::new(provider, tools, AgentConfig::default())
    }

    /// Build the full system prompt including tool descriptions
    pub fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if self.config.inject_tool_descriptions && !self.tools.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.tools.generate_prompt_section());
        }

        prompt
    }

    /// Drive the state machine with the configured iteration ceiling.
    pub async fn run(&self, conversation: &mut Conversation) -> Result<RunOutcome> {
        self.run_bounded(conversation, self.config.max_iterations).await
    }

    /// Drive the state machine over the conversation until `End` or the
    /// given iteration ceiling.
    ///
    /// The ceiling is not an error: the loop stops and reports what it has,
    /// leaving recovery policy (forced summary, fallback answer) to the
    /// caller.
    pub async fn run_bounded(
        &self,
        conversation: &mut Conversation,
        max_iterations: usize,
    ) -> Result<RunOutcome> {
        if conversation.messages().first().map(|m| &m.role) != Some(&Role::System) {
            conversation
                .messages_mut()
                .insert(0, Message::system(self.build_system_prompt()));
        }

        let mut state = LoopState::Agent;
        let mut iterations = 0;
        let mut hit_ceiling = false;

        while state != LoopState::End {
            match state {
                LoopState::Agent => {
                    if iterations >= max_iterations {
                        tracing::warn!(
                            max_iterations,
                            "iteration ceiling reached, forcing termination"
                        );
                        hit_ceiling = true;
                        break;
                    }
                    iterations += 1;

                    let completion = self
                        .provider
                        .complete(conversation.messages(), &self.config.generation)
                        .await?;

                    let calls = parse_tool_calls(&completion.content);
                    let message = Message::assistant_with_calls(completion.content, calls);
                    state = next_state(&message, &self.config.guards);
                    tracing::debug!(iteration = iterations, next = ?state, "agent step");
                    conversation.push(message);
                }
                LoopState::Tools => {
                    let calls: Vec<ToolCall> = conversation
                        .last_assistant()
                        .map(|m| m.tool_calls.clone())
                        .unwrap_or_default();

                    for result in self.tools.execute_batch(&calls).await {
                        let id = result.id.clone();
                        conversation.push(Message::tool(format_tool_result(&result), id));
                    }

                    // Single fixed edge back to the decision step.
                    state = LoopState::Agent;
                }
                LoopState::End => unreachable!(),
            }
        }

        Ok(RunOutcome {
            content: conversation.last().map(|m| m.content.clone()).unwrap_or_default(),
            iterations,
            hit_ceiling,
        })
    }

    /// Issue one completion on the conversation without tool dispatch.
    ///
    /// Used for post-loop recovery prompts that must not re-enter the loop.
    pub async fn respond_once(&self, conversation: &mut Conversation) -> Result<String> {
        let completion = self
            .provider
            .complete(conversation.messages(), &self.config.generation)
            .await?;
        conversation.push(Message::assistant(&completion.content));
        Ok(completion.content)
    }

    /// Run with a simple string input (creates temporary conversation)
    pub async fn ask(&self, question: &str) -> Result<String> {
        let mut conversation = Conversation::with_system_prompt(self.build_system_prompt());
        conversation.push(Message::user(question));
        Ok(self.run(&mut conversation).await?.content)
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Format a tool result for the conversation
fn format_tool_result(result: &ToolResult) -> String {
    if result.success {
        format!("[Tool '{}' returned]\n{}", result.name, result.output)
    } else {
        format!("[Tool '{}' failed]\n{}", result.name, result.output)
    }
}

/// Parse every tool call out of an LLM response.
///
/// Looks for ```tool fenced blocks; when none parse, falls back to a single
/// inline JSON object with a "tool" key. Calls without an id get one.
pub fn parse_tool_calls(content: &str) -> Vec<ToolCall> {
    const FENCE_OPEN: &str = "```tool";
    const FENCE_CLOSE: &str = "```";

    let mut calls = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find(FENCE_OPEN) {
        let after = &rest[start + FENCE_OPEN.len()..];
        let Some(end) = after.find(FENCE_CLOSE) else {
            break;
        };
        if let Ok(call) = serde_json::from_str::<ToolCall>(after[..end].trim()) {
            calls.push(ensure_id(call));
        }
        rest = &after[end + FENCE_CLOSE.len()..];
    }

    if calls.is_empty() {
        if let Some(call) = parse_inline_tool_call(content) {
            calls.push(ensure_id(call));
        }
    }

    calls
}

fn ensure_id(mut call: ToolCall) -> ToolCall {
    if call.id.is_none() {
        call.id = Some(uuid::Uuid::new_v4().to_string());
    }
    call
}

fn parse_inline_tool_call(content: &str) -> Option<ToolCall> {
    if !content.contains(r#""tool""#) {
        return None;
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }

    serde_json::from_str::<ToolCall>(&content[start..=end]).ok()
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn guards(mut self, guards: CompletionGuards) -> Self {
        self.config.guards = guards;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| crate::error::AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn travel_guards() -> CompletionGuards {
        CompletionGuards::default()
            .with_keywords(["hotel", "attraction", "cost", "weather", "itinerary"])
    }

    fn long_text(seed: &str) -> String {
        let mut s = String::new();
        while s.len() < 600 {
            s.push_str(seed);
        }
        s
    }

    #[test]
    fn test_tool_calls_always_route_to_tools() {
        let msg = Message::assistant_with_calls("", vec![ToolCall::new("search_hotels")]);
        assert_eq!(next_state(&msg, &travel_guards()), LoopState::Tools);
    }

    #[test]
    fn test_stalling_phrase_routes_to_tools() {
        let msg = Message::assistant(long_text(
            "Let me search for the best options before I continue. ",
        ));
        assert_eq!(next_state(&msg, &travel_guards()), LoopState::Tools);
    }

    #[test]
    fn test_short_answer_routes_to_tools() {
        let msg = Message::assistant("Here is your hotel, weather, cost and itinerary.");
        assert_eq!(next_state(&msg, &travel_guards()), LoopState::Tools);
    }

    #[test]
    fn test_complete_answer_ends_loop() {
        // 600+ chars, four of the five keywords, no stall phrases.
        let msg = Message::assistant(long_text(
            "The hotel stands near the main attraction, the total cost fits \
             the budget, and the weather stays mild all week. ",
        ));
        assert_eq!(next_state(&msg, &travel_guards()), LoopState::End);
    }

    #[test]
    fn test_thin_answer_routes_to_tools() {
        // Long enough, but only two keywords.
        let msg = Message::assistant(long_text(
            "The hotel is lovely and the weather should be pleasant all week long. ",
        ));
        assert_eq!(next_state(&msg, &travel_guards()), LoopState::Tools);
    }

    #[test]
    fn test_length_guard_counts_chars_not_bytes() {
        // 300 chars but 600 bytes; still short of the 500-char minimum.
        let msg = Message::assistant("é".repeat(300));
        assert_eq!(next_state(&msg, &CompletionGuards::default()), LoopState::Tools);
    }

    #[test]
    fn test_keyword_guard_skipped_without_keywords() {
        let msg = Message::assistant(long_text("A perfectly generic but very long answer. "));
        assert_eq!(next_state(&msg, &CompletionGuards::default()), LoopState::End);
    }

    #[test]
    fn test_parse_multiple_tool_blocks() {
        let content = r#"Gathering data.
```tool
{"tool": "search_hotels", "arguments": {"city": "Paris"}}
```
```tool
{"tool": "get_weather_forecast", "arguments": {"city": "Paris"}}
```"#;

        let calls = parse_tool_calls(content);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "search_hotels");
        assert_eq!(calls[1].name, "get_weather_forecast");
        assert!(calls.iter().all(|c| c.id.is_some()));
    }

    #[test]
    fn test_parse_inline_tool_call() {
        let content = r#"{"tool": "add_costs", "arguments": {"cost1": 1, "cost2": 2}}"#;
        let calls = parse_tool_calls(content);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "add_costs");
    }

    #[test]
    fn test_parse_plain_text_yields_nothing() {
        assert!(parse_tool_calls("Here is your finished itinerary.").is_empty());
    }
}
