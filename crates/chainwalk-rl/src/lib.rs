//! Chainwalk RL - chain-walk environment, tabular Q-learning, and the
//! experiment harness
//!
//! This crate provides the concrete pieces that compose into a tabular RL
//! experiment: a one-dimensional chain environment, a Q-learning agent,
//! an episode driver, and a runs-by-episodes experiment runner.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod chain;
pub mod driver;
pub mod experiment;
pub mod qlearning;

pub use chain::{ChainAction, ChainEnv};
pub use driver::EpisodeRunner;
pub use experiment::{run_experiment, ExperimentConfig, ExperimentReport, ExperimentSummary};
pub use qlearning::{QLearningAgent, QLearningConfig};
