//! Error types for the wayfarer harness

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for wayfarer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the wayfarer harness
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the search API
    #[error("Search API error: {0}")]
    Search(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Planner error
    #[error("Planner error: {0}")]
    Planner(String),

    /// Tool execution error
    #[error("Tool execution error: {tool}: {message}")]
    ToolExecution {
        /// Tool that failed
        tool: String,
        /// What went wrong
        message: String,
    },

    /// Unknown tool requested by the planner
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inverted or otherwise unusable travel date range
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// First travel day
        start: NaiveDate,
        /// Last travel day
        end: NaiveDate,
    },

    /// Maximum planning turns exceeded
    #[error("Maximum turns exceeded: {0}")]
    MaxTurnsExceeded(u32),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a search API error
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }

    /// Create a planner error
    pub fn planner(msg: impl Into<String>) -> Self {
        Self::Planner(msg.into())
    }

    /// Create a tool execution error
    pub fn tool_execution(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an other error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
