//! Experiment runner - sweeps runs by episodes and collects result arrays
//!
//! One environment instance and one agent instance are used strictly
//! sequentially. The agent is reset at the start of every run so
//! independent runs stay decorrelated; the environment carries no memory
//! across episodes beyond what `start` overwrites. Downstream aggregation
//! and plotting consume the report's numeric arrays.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use chainwalk_core::{Agent, ChainwalkError, Environment, Reward};

use crate::driver::EpisodeRunner;

/// Experiment sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of independent runs
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Episodes per run
    #[serde(default = "default_episodes")]
    pub episodes: usize,

    /// Base RNG seed. Run `r` draws every stochastic decision from a
    /// generator seeded with `seed + r` (wrapping), so a fixed seed
    /// reproduces the whole sweep.
    #[serde(default)]
    pub seed: u64,

    /// Optional per-episode step cap
    #[serde(default)]
    pub max_steps: Option<u64>,
}

fn default_runs() -> usize {
    1
}
fn default_episodes() -> usize {
    100
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            episodes: default_episodes(),
            seed: 0,
            max_steps: None,
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> chainwalk_core::Result<()> {
        if self.runs == 0 {
            return Err(ChainwalkError::Config("runs must be at least 1".to_string()));
        }
        if self.episodes == 0 {
            return Err(ChainwalkError::Config(
                "episodes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-run, per-episode results of one experiment sweep
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config: ExperimentConfig,
    /// Total reward per episode, indexed `[run][episode]`
    pub rewards: Vec<Vec<Reward>>,
    /// Step count per episode, indexed `[run][episode]`
    pub steps: Vec<Vec<u64>>,
}

impl ExperimentReport {
    /// Mean episode reward across runs, one entry per episode index
    pub fn mean_rewards_per_episode(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.config.episodes];
        for run in &self.rewards {
            for (episode, reward) in run.iter().enumerate() {
                means[episode] += reward;
            }
        }
        let runs = self.rewards.len() as f64;
        for mean in &mut means {
            *mean /= runs;
        }
        means
    }

    /// Aggregate statistics over the whole sweep
    pub fn summary(&self) -> ExperimentSummary {
        let episode_count = (self.rewards.len() * self.config.episodes) as f64;
        let total_reward: f64 = self.rewards.iter().flatten().sum();
        let total_steps: u64 = self.steps.iter().flatten().sum();

        ExperimentSummary {
            runs: self.rewards.len(),
            episodes_per_run: self.config.episodes,
            mean_reward: total_reward / episode_count,
            mean_steps: total_steps as f64 / episode_count,
        }
    }
}

/// Aggregate statistics over a whole report
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentSummary {
    pub runs: usize,
    pub episodes_per_run: usize,
    pub mean_reward: f64,
    pub mean_steps: f64,
}

/// Run the full sweep with one environment and one agent.
pub fn run_experiment<E, A>(
    env: &mut E,
    agent: &mut A,
    config: &ExperimentConfig,
) -> Result<ExperimentReport>
where
    E: Environment,
    A: Agent<State = E::State, Action = E::Action>,
{
    config.validate()?;

    let started_at = Utc::now();
    let mut runner = EpisodeRunner::new();
    if let Some(limit) = config.max_steps {
        runner = runner.with_max_steps(limit);
    }

    let mut rewards = Vec::with_capacity(config.runs);
    let mut steps = Vec::with_capacity(config.runs);

    for run in 0..config.runs {
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(run as u64));
        agent.reset(&mut rng);

        let mut run_rewards = Vec::with_capacity(config.episodes);
        let mut run_steps = Vec::with_capacity(config.episodes);

        for episode in 0..config.episodes {
            let outcome = runner
                .run(env, agent, &mut rng)
                .with_context(|| format!("run {run}, episode {episode}"))?;
            run_rewards.push(outcome.total_reward);
            run_steps.push(outcome.steps);
        }

        info!(run, episodes = config.episodes, "run complete");
        rewards.push(run_rewards);
        steps.push(run_steps);
    }

    Ok(ExperimentReport {
        id: Uuid::new_v4(),
        started_at,
        finished_at: Utc::now(),
        config: config.clone(),
        rewards,
        steps,
    })
}
