//! Trip-planning agent loop
//!
//! The loop drives a planner through the Thought / Action / PAUSE /
//! Observation convention: each turn is parsed for an action line, the named
//! tool runs, and its output goes back to the planner as an observation
//! prompt until the planner produces a final answer or the turn budget runs
//! out.

use crate::error::{Error, Result};
use crate::planner::Planner;
use crate::tools::{Tool, ToolContext};
use crate::transcript::{self, ActionRequest, ModelTurn, Observation, Thought, TripTrace};
use crate::types::TripId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_MAX_TURNS: u32 = 6;

/// Agent driving one trip-planning conversation
pub struct TravelAgent {
    /// Unique identifier for this agent instance
    pub id: TripId,
    /// Human-readable name for tracing and debugging
    pub name: String,
    /// Maximum planner turns before giving up
    pub max_turns: u32,
    planner: Arc<dyn Planner>,
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for TravelAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelAgent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("max_turns", &self.max_turns)
            .field("planner", &self.planner.planner_name())
            .field("tools", &self.tools.len())
            .finish()
    }
}

impl TravelAgent {
    /// Create a new agent builder
    pub fn builder() -> TravelAgentBuilder {
        TravelAgentBuilder::new()
    }

    /// Run the planning loop for the given request.
    ///
    /// The context carries caller-side data (the fare request) that tools
    /// read; the planner only ever sees prompts and observations.
    pub async fn run(&self, request: &str, ctx: &ToolContext) -> Result<TripOutcome> {
        let mut trace = TripTrace::new();
        let mut prompt = request.to_string();

        info!(agent = %self.name, trip = %self.id, "starting trip planning");

        for turn in 0..self.max_turns {
            debug!(turn, planner = self.planner.planner_name(), "requesting planner turn");
            let response = self.planner.plan(&prompt).await?;
            trace.add_thought(Thought::new(&response));

            match transcript::parse_turn(&response) {
                ModelTurn::Answer(answer) => {
                    trace.complete();
                    info!(agent = %self.name, turns = trace.turn_count(), "trip planning finished");
                    return Ok(TripOutcome {
                        trip_id: self.id,
                        answer,
                        trace,
                    });
                }
                ModelTurn::Action(action) => {
                    trace.add_action(action.clone());
                    let observation = self.execute_action(&action, ctx).await?;
                    trace.add_observation(observation.clone());
                    prompt = format!("Observation: {}", observation.content);
                }
            }
        }

        trace.complete();
        Err(Error::MaxTurnsExceeded(self.max_turns))
    }

    /// Run the requested tool and wrap its result as an observation.
    ///
    /// Unknown tools and tool-reported failures become error observations so
    /// the planner can recover; transport-level errors still propagate.
    async fn execute_action(
        &self,
        action: &ActionRequest,
        ctx: &ToolContext,
    ) -> Result<Observation> {
        let Some(tool) = self.tools.iter().find(|t| t.id() == action.tool) else {
            warn!(tool = %action.tool, "planner requested an unknown tool");
            return Ok(Observation::error(format!(
                "unknown tool: {}",
                action.tool
            )));
        };

        info!(tool = tool.id(), input = %action.input, "running tool");
        let output = tool.execute(&action.input, ctx).await?;

        if output.success {
            Ok(Observation::new(output.content))
        } else {
            Ok(Observation::error(
                output
                    .error
                    .unwrap_or_else(|| "tool reported an error".to_string()),
            ))
        }
    }
}

/// Travel agent builder
pub struct TravelAgentBuilder {
    name: Option<String>,
    planner: Option<Arc<dyn Planner>>,
    tools: Vec<Arc<dyn Tool>>,
    max_turns: u32,
}

impl TravelAgentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            name: None,
            planner: None,
            tools: Vec::new(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Set the agent name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the planner
    pub fn planner(mut self, planner: Arc<dyn Planner>) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Add a tool
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add multiple tools
    pub fn tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Set the maximum planner turns
    pub fn max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Build the agent
    pub fn build(self) -> Result<TravelAgent> {
        let name = self.name.ok_or_else(|| Error::config("Agent name is required"))?;
        let planner = self
            .planner
            .ok_or_else(|| Error::config("Planner is required"))?;

        Ok(TravelAgent {
            id: TripId::new(),
            name,
            max_turns: self.max_turns,
            planner,
            tools: self.tools,
        })
    }
}

impl Default for TravelAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one trip-planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripOutcome {
    /// Trip this outcome belongs to
    pub trip_id: TripId,
    /// The planner's final answer
    pub answer: String,
    /// Full Thought/Action/Observation trace
    pub trace: TripTrace,
}
