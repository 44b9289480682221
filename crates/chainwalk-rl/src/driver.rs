//! Episode driver - composes one environment and one agent
//!
//! The driver owns the control flow of a single episode: environment
//! start, agent start, then alternating environment and agent steps until
//! the environment reports a terminal state. It owns neither party's
//! internal state.

use rand::rngs::StdRng;
use tracing::debug;

use chainwalk_core::{Agent, ChainwalkError, Environment, EpisodeOutcome, Result};

/// Runs single episodes to completion.
///
/// By default an episode runs until the environment is terminal, which is
/// only guaranteed to happen if the environment's dynamics guarantee it.
/// Callers that need a safety bound on environments with unbounded
/// worst-case episode length can opt into a step cap.
#[derive(Debug, Clone, Default)]
pub struct EpisodeRunner {
    max_steps: Option<u64>,
}

impl EpisodeRunner {
    pub fn new() -> Self {
        Self { max_steps: None }
    }

    /// Abort episodes that would exceed `limit` steps with a `StepLimit`
    /// error instead of a silent truncation.
    pub fn with_max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }

    /// Run one episode, returning the accumulated reward and step count.
    pub fn run<E, A>(&self, env: &mut E, agent: &mut A, rng: &mut StdRng) -> Result<EpisodeOutcome>
    where
        E: Environment,
        A: Agent<State = E::State, Action = E::Action>,
    {
        let state = env.start(rng);
        let mut action = agent.start(state, rng)?;

        let mut total_reward = 0.0;
        let mut steps: u64 = 0;

        loop {
            let transition = env.step(action)?;
            total_reward += transition.reward;
            steps += 1;

            let next = agent.step(transition, rng)?;
            if transition.terminal {
                break;
            }

            action = next.ok_or_else(|| {
                ChainwalkError::Internal(
                    "agent returned no action for a non-terminal transition".to_string(),
                )
            })?;

            if let Some(limit) = self.max_steps {
                if steps >= limit {
                    return Err(ChainwalkError::StepLimit { limit });
                }
            }
        }

        debug!(steps, total_reward, "episode complete");
        Ok(EpisodeOutcome {
            total_reward,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use chainwalk_core::{DiscreteAction, Transition};

    use super::*;
    use crate::chain::{ChainAction, ChainEnv};
    use crate::qlearning::{QLearningAgent, QLearningConfig};

    /// Right strictly dominant at every state
    fn right_biased_table(num_states: usize) -> Array2<f64> {
        let mut table = Array2::zeros((num_states, ChainAction::COUNT));
        for row in 0..num_states {
            table[[row, ChainAction::Right.to_index()]] = 1.0;
        }
        table
    }

    fn greedy_agent(table: Array2<f64>) -> QLearningAgent<ChainAction> {
        QLearningAgent::with_values(
            table,
            QLearningConfig {
                learning_rate: 0.1,
                discount: 0.9,
                epsilon: 0.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_greedy_right_walk_reaches_goal() {
        let mut env = ChainEnv::new(10).unwrap().with_start_state(5).unwrap();
        let mut agent = greedy_agent(right_biased_table(10));
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = EpisodeRunner::new()
            .run(&mut env, &mut agent, &mut rng)
            .unwrap();

        // Five moves right from 5: four -1 rewards, then +1 at the goal
        assert_eq!(outcome.steps, 5);
        assert_eq!(outcome.total_reward, -3.0);
        assert_eq!(env.current_state(), Some(10));
    }

    #[test]
    fn test_step_limit_aborts_long_episode() {
        // Left-biased greedy policy needs four steps from 5 to reach 1
        let mut table = Array2::zeros((10, ChainAction::COUNT));
        for row in 0..10 {
            table[[row, ChainAction::Left.to_index()]] = 1.0;
        }

        let mut env = ChainEnv::new(10).unwrap().with_start_state(5).unwrap();
        let mut agent = greedy_agent(table);
        let mut rng = StdRng::seed_from_u64(0);

        let err = EpisodeRunner::new()
            .with_max_steps(2)
            .run(&mut env, &mut agent, &mut rng)
            .unwrap_err();
        assert!(matches!(err, ChainwalkError::StepLimit { limit: 2 }));
    }

    #[test]
    fn test_step_limit_allows_episodes_within_bound() {
        let mut env = ChainEnv::new(10).unwrap().with_start_state(5).unwrap();
        let mut agent = greedy_agent(right_biased_table(10));
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = EpisodeRunner::new()
            .with_max_steps(5)
            .run(&mut env, &mut agent, &mut rng)
            .unwrap();
        assert_eq!(outcome.steps, 5);
    }

    /// Agent that violates the contract by refusing to act
    struct SilentAgent;

    impl Agent for SilentAgent {
        type State = usize;
        type Action = ChainAction;

        fn start(&mut self, _state: usize, _rng: &mut StdRng) -> chainwalk_core::Result<ChainAction> {
            Ok(ChainAction::Right)
        }

        fn step(
            &mut self,
            _transition: Transition<usize>,
            _rng: &mut StdRng,
        ) -> chainwalk_core::Result<Option<ChainAction>> {
            Ok(None)
        }

        fn reset(&mut self, _rng: &mut StdRng) {}
    }

    #[test]
    fn test_agent_without_action_is_an_internal_error() {
        let mut env = ChainEnv::new(10).unwrap().with_start_state(5).unwrap();
        let mut agent = SilentAgent;
        let mut rng = StdRng::seed_from_u64(0);

        let err = EpisodeRunner::new()
            .run(&mut env, &mut agent, &mut rng)
            .unwrap_err();
        assert!(matches!(err, ChainwalkError::Internal(_)));
    }
}
