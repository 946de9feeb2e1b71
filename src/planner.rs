//! Planner seam between the trip loop and a language model
//!
//! The loop never talks to a model vendor directly. Applications implement
//! [`Planner`] over whichever chat-completion client they use and hand it to
//! the agent builder.

use crate::error::{Error, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Produces the next planner turn for a prompt
#[async_trait]
pub trait Planner: Send + Sync {
    /// Produce the next model turn for the given prompt
    async fn plan(&self, prompt: &str) -> Result<String>;

    /// Short name used in logs
    fn planner_name(&self) -> &str {
        "planner"
    }
}

/// Planner that replays a fixed sequence of turns.
///
/// Useful in tests and demos where the loop mechanics matter and the model
/// does not.
pub struct ScriptedPlanner {
    turns: Mutex<VecDeque<String>>,
}

impl ScriptedPlanner {
    /// Create a scripted planner from a sequence of turns
    pub fn new<I, S>(turns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            turns: Mutex::new(turns.into_iter().map(Into::into).collect()),
        }
    }

    /// Turns left in the script
    pub fn remaining(&self) -> usize {
        self.turns.lock().len()
    }
}

#[async_trait]
impl Planner for ScriptedPlanner {
    async fn plan(&self, _prompt: &str) -> Result<String> {
        self.turns
            .lock()
            .pop_front()
            .ok_or_else(|| Error::planner("scripted planner ran out of turns"))
    }

    fn planner_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_planner_replays_in_order() {
        let planner = ScriptedPlanner::new(["first", "second"]);
        assert_eq!(planner.remaining(), 2);
        assert_eq!(planner.plan("ignored").await.unwrap(), "first");
        assert_eq!(planner.plan("ignored").await.unwrap(), "second");
        assert_eq!(planner.remaining(), 0);
    }

    #[tokio::test]
    async fn test_scripted_planner_exhaustion_is_an_error() {
        let planner = ScriptedPlanner::new(Vec::<String>::new());
        let err = planner.plan("anything").await.unwrap_err();
        assert!(matches!(err, Error::Planner(_)));
    }
}
