//! Agent contract

use rand::rngs::StdRng;

use crate::error::Result;
use crate::types::{DiscreteAction, Transition};

/// Contract for learning agents.
///
/// An agent encapsulates its policy and learning updates. Whatever memory
/// it keeps across episodes (for tabular agents, the action-value table)
/// is owned exclusively by the agent and reinitialized through `reset`.
pub trait Agent {
    /// State observed from the environment
    type State: Copy;

    /// Action type shared with the environment
    type Action: DiscreteAction;

    /// Begin an episode: observe the initial state and return the first
    /// action.
    fn start(&mut self, state: Self::State, rng: &mut StdRng) -> Result<Self::Action>;

    /// Observe one transition, learn from it, and return the next action.
    ///
    /// Returns `None` exactly when the transition was terminal: the final
    /// update has been applied and the episode is over.
    fn step(
        &mut self,
        transition: Transition<Self::State>,
        rng: &mut StdRng,
    ) -> Result<Option<Self::Action>>;

    /// Reinitialize policy memory, decorrelating independent runs that
    /// share one agent instance.
    fn reset(&mut self, rng: &mut StdRng);
}
