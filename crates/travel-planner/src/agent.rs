//! Travel Agent Facade
//!
//! Wraps the core reasoning loop with travel-specific policy: the system
//! prompt, the completion keywords, a forced-summary escape when the loop
//! stops on a thin answer, and a no-tools fallback path when the loop
//! itself fails.

use std::sync::Arc;

use agent_core::{
    Agent, AgentBuilder, CompletionGuards, Conversation, LlmProvider, Message, ToolRegistry,
};

use crate::error::Result;

/// Default Agent-step ceiling per planning request
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// A plan shorter than this gets one forced-summary completion appended
const SUMMARY_MIN_CHARS: usize = 800;

const TRAVEL_SYSTEM_PROMPT: &str = r#"You are an expert AI travel planner. You create complete, day-by-day trip itineraries.

Rules:
- Always use the available tools to look up real data: hotels, flights, attractions, restaurants, weather, costs and exchange rates. Never invent prices or availability.
- Never reply with "I'll look it up", "let me search" or any other promise of future work. Call the tool instead, then answer with the data you received.
- Cover every part of the trip: travel and arrival, accommodation, a plan for each day, weather, and a full budget breakdown.
- Adjust daily activities to the weather: indoor plans for rain, outdoor plans for clear skies.
- Present the final answer as a Markdown document with these sections: Trip Overview, Travel & Arrival, Hotel, Day-by-Day Itinerary, Weather, Budget Breakdown.
- State all money amounts with their currency.

When you have gathered enough data, write the complete itinerary in one message."#;

const SUMMARY_PROMPT: &str = "Generate a complete final summary of the trip plan using everything \
gathered so far. Include the itinerary, hotel, weather and budget breakdown. \
Do NOT call any tools again; answer with the finished plan only.";

const FALLBACK_PROMPT: &str = "Live data lookups are unavailable right now, so write a \
best-effort trip itinerary from general knowledge alone, without calling any tools. Mark \
estimates clearly as estimates. Cover travel, hotel, a day-by-day plan, typical weather and a \
budget breakdown.";

/// Keywords a finished travel answer is expected to mention
const TOPIC_KEYWORDS: [&str; 5] = ["hotel", "attraction", "cost", "weather", "itinerary"];

/// High-level planning entry point over a configured [`Agent`].
pub struct TravelAgent {
    agent: Agent,
    provider: Arc<dyn LlmProvider>,
}

impl TravelAgent {
    /// Assemble the facade from a provider and a prepared tool registry.
    pub fn new(provider: Arc<dyn LlmProvider>, tools: ToolRegistry) -> Result<Self> {
        let agent = AgentBuilder::new()
            .provider(provider.clone())
            .tools(tools)
            .system_prompt(TRAVEL_SYSTEM_PROMPT)
            .max_iterations(DEFAULT_MAX_ITERATIONS)
            .guards(CompletionGuards::default().with_keywords(TOPIC_KEYWORDS))
            .build()
            .map_err(|e| crate::error::PlannerError::Config(e.to_string()))?;

        Ok(Self { agent, provider })
    }

    /// Plan a trip from a free-form request.
    ///
    /// Runs the tool loop first; if the loop errors (provider down, terminal
    /// search failure) the request is retried once on the no-tools fallback
    /// path, whose own failure propagates.
    pub async fn plan_trip(&self, user_input: &str, max_iterations: usize) -> Result<String> {
        match self.plan_with_tools(user_input, max_iterations).await {
            Ok(plan) => Ok(plan),
            Err(error) => {
                tracing::warn!(%error, "tool loop failed, switching to fallback path");
                self.fallback_plan(user_input).await
            }
        }
    }

    /// Plan with the default iteration ceiling.
    pub async fn plan(&self, user_input: &str) -> Result<String> {
        self.plan_trip(user_input, DEFAULT_MAX_ITERATIONS).await
    }

    async fn plan_with_tools(&self, user_input: &str, max_iterations: usize) -> Result<String> {
        let mut conversation = Conversation::new();
        conversation.push(Message::user(user_input));

        let outcome = self
            .agent
            .run_bounded(&mut conversation, max_iterations)
            .await
            .map_err(crate::error::PlannerError::from_agent)?;

        if outcome.hit_ceiling {
            tracing::info!(
                iterations = outcome.iterations,
                "iteration ceiling reached, requesting forced summary"
            );
        }

        // A thin final message (or a ceiling stop mid-gathering) gets one
        // summary completion over the collected tool results.
        if outcome.content.trim().len() < SUMMARY_MIN_CHARS {
            conversation.push(Message::user(SUMMARY_PROMPT));
            let summary = self
                .agent
                .respond_once(&mut conversation)
                .await
                .map_err(crate::error::PlannerError::from_agent)?;
            return Ok(summary);
        }

        Ok(outcome.content)
    }

    /// Produce an itinerary without any tool dispatch.
    ///
    /// The travel instructions stay in place as the system message; the
    /// fallback directive rides along as a standalone user turn.
    async fn fallback_plan(&self, user_input: &str) -> Result<String> {
        let mut conversation = Conversation::with_system_prompt(TRAVEL_SYSTEM_PROMPT);
        conversation.push(Message::user(format!(
            "{FALLBACK_PROMPT}\n\nRequest: {user_input}"
        )));

        let completion = self
            .provider
            .complete(conversation.messages(), &self.agent.config().generation)
            .await
            .map_err(crate::error::PlannerError::from_agent)?;

        Ok(completion.content)
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }
}
