//! Chainwalk Core - environment and agent contracts, transitions, errors
//!
//! This crate provides the foundational types shared by all chainwalk
//! components: the `Environment` and `Agent` traits, the transition and
//! episode-outcome types they exchange, and the crate-wide error type.

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod env;
pub mod error;
pub mod types;

pub use agent::Agent;
pub use env::Environment;
pub use error::{ChainwalkError, Result};
pub use types::{DiscreteAction, EpisodeOutcome, Reward, Transition};
