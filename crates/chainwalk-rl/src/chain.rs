//! One-dimensional chain-walk environment
//!
//! A chain of positions numbered `1..=size`. Both boundaries are terminal;
//! a move onto the right boundary pays +1, every other move pays -1.
//! Episodes start uniform-random within the inner half of the chain.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use chainwalk_core::{
    ChainwalkError, DiscreteAction, Environment, Result, Reward, Transition,
};

/// Move along the chain: `Left` decrements the position, `Right`
/// increments it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainAction {
    Left,
    Right,
}

impl ChainAction {
    /// Both actions, in index order
    pub const ALL: [ChainAction; 2] = [ChainAction::Left, ChainAction::Right];
}

impl DiscreteAction for ChainAction {
    const COUNT: usize = 2;

    fn to_index(self) -> usize {
        match self {
            ChainAction::Left => 0,
            ChainAction::Right => 1,
        }
    }

    fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(ChainAction::Left),
            1 => Ok(ChainAction::Right),
            other => Err(ChainwalkError::InvalidAction {
                index: other,
                count: Self::COUNT,
            }),
        }
    }
}

/// Chain-walk environment with terminal boundaries at `1` and `size`.
///
/// Invariant: whenever a state is set, it lies in `[1, size]`. The state
/// is `None` until the first `start`.
pub struct ChainEnv {
    size: usize,
    state: Option<usize>,
    fixed_start: Option<usize>,
}

impl ChainEnv {
    /// Minimum chain length: one interior state between the two terminals
    const MIN_SIZE: usize = 3;

    pub fn new(size: usize) -> Result<Self> {
        if size < Self::MIN_SIZE {
            return Err(ChainwalkError::Config(format!(
                "chain size must be at least {}, got {size}",
                Self::MIN_SIZE
            )));
        }
        Ok(Self {
            size,
            state: None,
            fixed_start: None,
        })
    }

    /// Pin the start state to a fixed interior position instead of drawing
    /// from the start distribution. Used for deterministic evaluation.
    pub fn with_start_state(mut self, state: usize) -> Result<Self> {
        if state <= 1 || state >= self.size {
            return Err(ChainwalkError::Config(format!(
                "fixed start state {state} must be an interior position of [1, {}]",
                self.size
            )));
        }
        self.fixed_start = Some(state);
        Ok(self)
    }

    /// Number of positions on the chain
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current position, or `None` before the first `start`
    pub fn current_state(&self) -> Option<usize> {
        self.state
    }

    /// Inner band the start distribution draws from, clamped so a fresh
    /// episode never begins on a terminal boundary.
    fn start_bounds(&self) -> (usize, usize) {
        let mid = self.size / 2;
        let spread = self.size / 4;
        let lo = mid.saturating_sub(spread).clamp(2, self.size - 1);
        let hi = (mid + spread).clamp(2, self.size - 1);
        (lo, hi)
    }

    fn terminal_at(&self, state: usize) -> bool {
        state == 1 || state == self.size
    }
}

impl Environment for ChainEnv {
    type State = usize;
    type Action = ChainAction;

    fn start(&mut self, rng: &mut StdRng) -> usize {
        let state = match self.fixed_start {
            Some(fixed) => fixed,
            None => {
                let (lo, hi) = self.start_bounds();
                rng.gen_range(lo..=hi)
            }
        };
        self.state = Some(state);
        state
    }

    fn step(&mut self, action: ChainAction) -> Result<Transition<usize>> {
        let state = self.state.ok_or(ChainwalkError::NotStarted)?;
        if self.terminal_at(state) {
            // A further move would leave [1, size]
            return Err(ChainwalkError::EpisodeOver { state });
        }

        let next = match action {
            ChainAction::Left => state - 1,
            ChainAction::Right => state + 1,
        };
        self.state = Some(next);

        let reward: Reward = if next == self.size { 1.0 } else { -1.0 };
        Ok(Transition::new(next, reward, self.terminal_at(next)))
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, Some(state) if self.terminal_at(state))
    }

    fn actions(&self) -> &[ChainAction] {
        &ChainAction::ALL
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_size_validation() {
        assert!(ChainEnv::new(0).is_err());
        assert!(ChainEnv::new(2).is_err());

        let env = ChainEnv::new(3).unwrap();
        assert_eq!(env.size(), 3);
        assert_eq!(env.current_state(), None);
    }

    #[test]
    fn test_start_lands_in_inner_band() {
        let mut env = ChainEnv::new(10).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let state = env.start(&mut rng);
            assert!((3..=7).contains(&state), "start state {state} outside [3, 7]");
            assert_eq!(env.current_state(), Some(state));
            assert!(!env.is_terminal());
        }
    }

    #[test]
    fn test_start_never_terminal_on_short_chains() {
        for size in 3..=8 {
            let mut env = ChainEnv::new(size).unwrap();
            let mut rng = StdRng::seed_from_u64(size as u64);
            for _ in 0..50 {
                let state = env.start(&mut rng);
                assert!(state > 1 && state < size, "size {size} started at {state}");
            }
        }
    }

    #[test]
    fn test_state_stays_in_bounds_under_random_walk() {
        let mut env = ChainEnv::new(5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            env.start(&mut rng);
            while !env.is_terminal() {
                let action = ChainAction::from_index(rng.gen_range(0..2)).unwrap();
                let transition = env.step(action).unwrap();
                assert!((1..=5).contains(&transition.state));
            }
        }
    }

    #[test]
    fn test_terminal_iff_boundary() {
        let mut env = ChainEnv::new(10).unwrap().with_start_state(2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        env.start(&mut rng);
        assert!(!env.is_terminal());
        let transition = env.step(ChainAction::Left).unwrap();
        assert_eq!(transition.state, 1);
        assert!(transition.terminal);
        assert!(env.is_terminal());
    }

    #[test]
    fn test_reward_is_positive_only_at_goal() {
        let mut rng = StdRng::seed_from_u64(0);

        // Right boundary pays +1
        let mut env = ChainEnv::new(10).unwrap().with_start_state(9).unwrap();
        env.start(&mut rng);
        let transition = env.step(ChainAction::Right).unwrap();
        assert_eq!(transition.state, 10);
        assert_eq!(transition.reward, 1.0);
        assert!(transition.terminal);

        // Left boundary is terminal but still pays -1
        let mut env = ChainEnv::new(10).unwrap().with_start_state(2).unwrap();
        env.start(&mut rng);
        let transition = env.step(ChainAction::Left).unwrap();
        assert_eq!(transition.reward, -1.0);
        assert!(transition.terminal);

        // Interior moves pay -1
        let mut env = ChainEnv::new(10).unwrap().with_start_state(5).unwrap();
        env.start(&mut rng);
        let transition = env.step(ChainAction::Right).unwrap();
        assert_eq!(transition.reward, -1.0);
        assert!(!transition.terminal);
    }

    #[test]
    fn test_step_before_start_fails() {
        let mut env = ChainEnv::new(10).unwrap();
        let err = env.step(ChainAction::Right).unwrap_err();
        assert!(matches!(err, ChainwalkError::NotStarted));
    }

    #[test]
    fn test_step_past_terminal_fails() {
        let mut env = ChainEnv::new(10).unwrap().with_start_state(9).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        env.start(&mut rng);
        env.step(ChainAction::Right).unwrap();
        let err = env.step(ChainAction::Right).unwrap_err();
        assert!(matches!(err, ChainwalkError::EpisodeOver { state: 10 }));
    }

    #[test]
    fn test_fixed_start_must_be_interior() {
        assert!(ChainEnv::new(10).unwrap().with_start_state(1).is_err());
        assert!(ChainEnv::new(10).unwrap().with_start_state(10).is_err());
        assert!(ChainEnv::new(10).unwrap().with_start_state(0).is_err());
        assert!(ChainEnv::new(10).unwrap().with_start_state(5).is_ok());
    }

    #[test]
    fn test_action_indices() {
        assert_eq!(ChainAction::Left.to_index(), 0);
        assert_eq!(ChainAction::Right.to_index(), 1);
        assert_eq!(ChainAction::from_index(0).unwrap(), ChainAction::Left);
        assert_eq!(ChainAction::from_index(1).unwrap(), ChainAction::Right);

        let err = ChainAction::from_index(2).unwrap_err();
        assert!(matches!(
            err,
            ChainwalkError::InvalidAction { index: 2, count: 2 }
        ));
    }

    #[test]
    fn test_action_set_is_stable() {
        let env = ChainEnv::new(10).unwrap();
        assert_eq!(env.actions(), &[ChainAction::Left, ChainAction::Right]);
    }
}
