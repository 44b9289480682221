//! Environment contract

use rand::rngs::StdRng;

use crate::error::Result;
use crate::types::{DiscreteAction, Transition};

/// Contract for episodic environments.
///
/// An environment is solely responsible for the integrity of its internal
/// state: it is mutated only through `start` and `step`, and everything an
/// agent observes (state, reward, termination) is derived from it.
pub trait Environment {
    /// Externally observable state
    type State: Copy;

    /// Legal action set
    type Action: DiscreteAction;

    /// Reset to a state drawn from the environment's start distribution
    /// and return that state.
    fn start(&mut self, rng: &mut StdRng) -> Self::State;

    /// Apply one action and return the resulting transition.
    ///
    /// Stepping an environment that is already terminal, or that was never
    /// started, is an error: state must never leave its legal range.
    fn step(&mut self, action: Self::Action) -> Result<Transition<Self::State>>;

    /// Whether the current state is terminal
    fn is_terminal(&self) -> bool;

    /// The legal action set, stable for the environment's lifetime
    fn actions(&self) -> &[Self::Action];
}
