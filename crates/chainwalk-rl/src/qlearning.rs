//! Tabular Q-learning with epsilon-greedy action selection

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use chainwalk_core::{Agent, ChainwalkError, DiscreteAction, Result, Transition};

/// Q-learning hyperparameters. All three are fixed at construction; there
/// is no adaptation schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Step size of the value update
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Discount factor applied to the bootstrapped target
    #[serde(default = "default_discount")]
    pub discount: f64,

    /// Probability of taking a uniform-random exploratory action
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_learning_rate() -> f64 {
    0.1
}
fn default_discount() -> f64 {
    0.99
}
fn default_epsilon() -> f64 {
    0.1
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            discount: default_discount(),
            epsilon: default_epsilon(),
        }
    }
}

impl QLearningConfig {
    /// All three parameters must be finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("learning_rate", self.learning_rate),
            ("discount", self.discount),
            ("epsilon", self.epsilon),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChainwalkError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Tabular Q-learning agent over 1-based integer states.
///
/// The value table holds one row per state (`row = state - 1`, matching
/// the positions tabular environments in this crate report) and one column
/// per action index. The table is the agent's only memory that persists
/// across episodes; `reset` re-randomizes it between independent runs.
pub struct QLearningAgent<A> {
    table: Array2<f64>,
    config: QLearningConfig,
    prev: Option<(usize, A)>,
}

impl<A: DiscreteAction> QLearningAgent<A> {
    /// Create an agent for states `1..=num_states`, with the value table
    /// initialized uniform-random from `rng`.
    pub fn new(num_states: usize, config: QLearningConfig, rng: &mut StdRng) -> Result<Self> {
        config.validate()?;
        if num_states == 0 {
            return Err(ChainwalkError::Config(
                "agent needs at least one state".to_string(),
            ));
        }
        let table = Array2::from_shape_simple_fn((num_states, A::COUNT), || rng.gen::<f64>());
        Ok(Self {
            table,
            config,
            prev: None,
        })
    }

    /// Warm-start from an existing value table of shape
    /// (num_states x num_actions).
    pub fn with_values(table: Array2<f64>, config: QLearningConfig) -> Result<Self> {
        config.validate()?;
        if table.nrows() == 0 || table.ncols() != A::COUNT {
            return Err(ChainwalkError::Config(format!(
                "value table shape {:?} does not match an action space of size {}",
                table.dim(),
                A::COUNT
            )));
        }
        Ok(Self {
            table,
            config,
            prev: None,
        })
    }

    /// Action-value table, one row per state
    pub fn values(&self) -> &Array2<f64> {
        &self.table
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    /// Scalar hyperparameters and table shape as JSON
    pub fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "learning_rate": self.config.learning_rate,
            "discount": self.config.discount,
            "epsilon": self.config.epsilon,
            "num_states": self.table.nrows(),
            "num_actions": self.table.ncols(),
        })
    }

    /// Update scalar hyperparameters from JSON; absent keys keep their
    /// current values, and the merged result is re-validated.
    pub fn set_params(&mut self, params: serde_json::Value) -> Result<()> {
        let mut next = self.config.clone();
        if let Some(learning_rate) = params["learning_rate"].as_f64() {
            next.learning_rate = learning_rate;
        }
        if let Some(discount) = params["discount"].as_f64() {
            next.discount = discount;
        }
        if let Some(epsilon) = params["epsilon"].as_f64() {
            next.epsilon = epsilon;
        }
        next.validate()?;
        self.config = next;
        Ok(())
    }

    fn row(&self, state: usize) -> Result<usize> {
        if state == 0 || state > self.table.nrows() {
            return Err(ChainwalkError::StateOutOfRange {
                state,
                max: self.table.nrows(),
            });
        }
        Ok(state - 1)
    }

    /// Epsilon-greedy selection. Ties between equal greedy values break
    /// toward the lowest action index, keeping selection deterministic
    /// given equal values.
    fn select_action(&self, row: usize, rng: &mut StdRng) -> Result<A> {
        if rng.gen::<f64>() < self.config.epsilon {
            return A::from_index(rng.gen_range(0..A::COUNT));
        }

        let mut best = 0;
        for (index, value) in self.table.row(row).iter().enumerate() {
            if *value > self.table[[row, best]] {
                best = index;
            }
        }
        A::from_index(best)
    }
}

impl<A: DiscreteAction> Agent for QLearningAgent<A> {
    type State = usize;
    type Action = A;

    fn start(&mut self, state: usize, rng: &mut StdRng) -> Result<A> {
        let row = self.row(state)?;
        let action = self.select_action(row, rng)?;
        self.prev = Some((state, action));
        Ok(action)
    }

    fn step(&mut self, transition: Transition<usize>, rng: &mut StdRng) -> Result<Option<A>> {
        let (prev_state, prev_action) = self.prev.ok_or(ChainwalkError::NotStarted)?;
        let prev_row = self.row(prev_state)?;
        let prev_col = prev_action.to_index();

        // One-step Q-learning target: reward alone on terminal
        // transitions, bootstrapped otherwise.
        let target = if transition.terminal {
            transition.reward
        } else {
            let next_row = self.row(transition.state)?;
            let max_next = self
                .table
                .row(next_row)
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            transition.reward + self.config.discount * max_next
        };

        let current = self.table[[prev_row, prev_col]];
        self.table[[prev_row, prev_col]] =
            current + self.config.learning_rate * (target - current);

        if transition.terminal {
            self.prev = None;
            return Ok(None);
        }

        let next_row = self.row(transition.state)?;
        let action = self.select_action(next_row, rng)?;
        self.prev = Some((transition.state, action));
        Ok(Some(action))
    }

    fn reset(&mut self, rng: &mut StdRng) {
        self.table.mapv_inplace(|_| rng.gen::<f64>());
        self.prev = None;
    }
}
