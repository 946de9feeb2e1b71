//! ReAct transcript grammar and trace records
//!
//! Planner turns follow the Thought / Action / PAUSE / Observation
//! convention: a turn either carries an `Action: <tool>: <details>` line and
//! waits for an observation, or it is the final answer.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn action_re() -> &'static Regex {
    static ACTION_RE: OnceLock<Regex> = OnceLock::new();
    ACTION_RE.get_or_init(|| Regex::new(r"(?m)^Action:\s*(\w+):\s*(.+)$").expect("valid action pattern"))
}

fn answer_re() -> &'static Regex {
    static ANSWER_RE: OnceLock<Regex> = OnceLock::new();
    ANSWER_RE.get_or_init(|| Regex::new(r"(?m)^Answer:\s*").expect("valid answer pattern"))
}

/// A parsed `Action:` line from a planner turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Tool the planner asked for
    pub tool: String,
    /// Free-text details passed to the tool
    pub input: String,
}

/// What a planner turn asks the loop to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelTurn {
    /// The turn requests a tool run and awaits an observation
    Action(ActionRequest),
    /// The turn is the final answer
    Answer(String),
}

/// Extract the first `Action: <tool>: <details>` line from a turn.
///
/// Details stop at the first sentence break (". ") so trailing prose on the
/// action line does not leak into the tool input.
pub fn parse_action(response: &str) -> Option<ActionRequest> {
    let caps = action_re().captures(response)?;
    let tool = caps[1].to_string();
    let rest = &caps[2];
    let input = rest
        .split_once(". ")
        .map(|(head, _)| head)
        .unwrap_or(rest)
        .trim()
        .to_string();
    Some(ActionRequest { tool, input })
}

/// Classify one planner turn.
///
/// `PAUSE` marker lines are stripped first; a turn without an action line is
/// the final answer, taken from after a leading `Answer:` marker when one is
/// present.
pub fn parse_turn(response: &str) -> ModelTurn {
    let body = strip_pause(response);

    if let Some(action) = parse_action(&body) {
        return ModelTurn::Action(action);
    }

    ModelTurn::Answer(final_answer(&body))
}

/// Drop lines that consist solely of the PAUSE marker
fn strip_pause(response: &str) -> String {
    response
        .lines()
        .filter(|line| line.trim() != "PAUSE")
        .collect::<Vec<_>>()
        .join("\n")
}

/// Final-answer content of a turn with no action line
fn final_answer(body: &str) -> String {
    match answer_re().find(body) {
        Some(marker) => body[marker.end()..].trim().to_string(),
        None => body.trim().to_string(),
    }
}

/// A planner turn recorded in the trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    /// The raw turn content
    pub content: String,
    /// When this turn occurred
    pub timestamp: DateTime<Utc>,
}

impl Thought {
    /// Create a new thought
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The text fed back to the planner after executing an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// The observation content
    pub content: String,
    /// Whether this observation reports an error
    pub is_error: bool,
    /// When this observation occurred
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    /// Create a new observation
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            timestamp: Utc::now(),
        }
    }

    /// Create an error observation
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
            timestamp: Utc::now(),
        }
    }
}

/// A trace of one trip-planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripTrace {
    /// All planner turns in order
    pub thoughts: Vec<Thought>,
    /// All actions taken
    pub actions: Vec<ActionRequest>,
    /// All observations fed back
    pub observations: Vec<Observation>,
    /// When the trace started
    pub started_at: DateTime<Utc>,
    /// When the trace completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl TripTrace {
    /// Create a new empty trace
    pub fn new() -> Self {
        Self {
            thoughts: Vec::new(),
            actions: Vec::new(),
            observations: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Add a planner turn to the trace
    pub fn add_thought(&mut self, thought: Thought) {
        self.thoughts.push(thought);
    }

    /// Add an action to the trace
    pub fn add_action(&mut self, action: ActionRequest) {
        self.actions.push(action);
    }

    /// Add an observation to the trace
    pub fn add_observation(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Mark the trace as completed
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Number of planner turns taken
    pub fn turn_count(&self) -> usize {
        self.thoughts.len()
    }

    /// Format the trace as a human-readable string
    pub fn format(&self) -> String {
        let mut output = String::new();

        for i in 0..self.turn_count() {
            output.push_str(&format!("=== Turn {} ===\n", i + 1));

            if let Some(thought) = self.thoughts.get(i) {
                output.push_str(&format!("{}\n", thought.content));
            }

            if let Some(action) = self.actions.get(i) {
                output.push_str(&format!(">>> {}: {}\n", action.tool, action.input));
            }

            if let Some(observation) = self.observations.get(i) {
                output.push_str(&format!("Observation: {}\n\n", observation.content));
            }
        }

        output
    }
}

impl Default for TripTrace {
    fn default() -> Self {
        Self::new()
    }
}
