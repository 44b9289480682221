//! Reward, transition, and discrete-action types exchanged between
//! environments and agents

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reward value from an environment step
pub type Reward = f64;

/// Result of a single environment step: the state the environment moved
/// into, the immediate reward earned by the move, and whether the new
/// state is terminal. Produced fresh by every step and consumed
/// immediately by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition<S> {
    pub state: S,
    pub reward: Reward,
    pub terminal: bool,
}

impl<S> Transition<S> {
    pub fn new(state: S, reward: Reward, terminal: bool) -> Self {
        Self {
            state,
            reward,
            terminal,
        }
    }
}

/// Totals accumulated over one completed episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    pub total_reward: Reward,
    pub steps: u64,
}

/// A finite action set addressable by dense indices.
///
/// Tabular agents store one value-table column per action index, so every
/// action must map to an index in `0..COUNT` and back. Decoding an index
/// outside that range is the invalid-action error; it never silently
/// falls back to a default action.
pub trait DiscreteAction: Copy {
    /// Number of distinct actions
    const COUNT: usize;

    /// Dense index of this action, in `0..COUNT`
    fn to_index(self) -> usize;

    /// Decode an action from its dense index
    fn from_index(index: usize) -> Result<Self>;
}
