//! Shared per-agent buffers exchanged between the adapter and a simulator.
//!
//! Every buffer is a flat, row-major `Vec` whose leading dimension is the
//! agent count. The vectors are allocated once and only ever handed out as
//! slices, so their lengths cannot change after construction.

use crate::config::SwerveConfig;
use crate::error::{EnvError, Result};

/// Observation, action, reward, terminal and truncation storage for `N` agents.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvBuffers {
    num_agents: usize,
    observations: Vec<f32>,
    actions: Vec<f32>,
    rewards: Vec<f32>,
    terminals: Vec<bool>,
    truncations: Vec<bool>,
}

impl EnvBuffers {
    /// Allocates zeroed buffers for `num_agents` agents.
    pub fn new(num_agents: usize) -> Result<Self> {
        if num_agents == 0 {
            return Err(EnvError::NoAgents);
        }
        Ok(Self {
            num_agents,
            observations: vec![0.0; num_agents * SwerveConfig::OBS_DIM],
            actions: vec![0.0; num_agents * SwerveConfig::ACTION_DIM],
            rewards: vec![0.0; num_agents],
            terminals: vec![false; num_agents],
            truncations: vec![false; num_agents],
        })
    }

    /// Adopts caller-provided storage, checking every shape against `num_agents`.
    pub fn from_parts(
        num_agents: usize,
        observations: Vec<f32>,
        actions: Vec<f32>,
        rewards: Vec<f32>,
        terminals: Vec<bool>,
        truncations: Vec<bool>,
    ) -> Result<Self> {
        if num_agents == 0 {
            return Err(EnvError::NoAgents);
        }
        check_shape(
            "observations",
            observations.len(),
            num_agents,
            SwerveConfig::OBS_DIM,
        )?;
        check_shape("actions", actions.len(), num_agents, SwerveConfig::ACTION_DIM)?;
        check_shape("rewards", rewards.len(), num_agents, 1)?;
        check_shape("terminals", terminals.len(), num_agents, 1)?;
        check_shape("truncations", truncations.len(), num_agents, 1)?;

        Ok(Self {
            num_agents,
            observations,
            actions,
            rewards,
            terminals,
            truncations,
        })
    }

    /// Number of agents (rows) in every buffer.
    pub fn num_agents(&self) -> usize {
        self.num_agents
    }

    /// Shape of the observation buffer, `(N, 6)`.
    pub fn observation_shape(&self) -> [usize; 2] {
        [self.num_agents, SwerveConfig::OBS_DIM]
    }

    /// Shape of the action buffer, `(N, 3)`.
    pub fn action_shape(&self) -> [usize; 2] {
        [self.num_agents, SwerveConfig::ACTION_DIM]
    }

    pub fn observations(&self) -> &[f32] {
        &self.observations
    }

    pub fn observations_mut(&mut self) -> &mut [f32] {
        &mut self.observations
    }

    pub fn actions(&self) -> &[f32] {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut [f32] {
        &mut self.actions
    }

    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    pub fn rewards_mut(&mut self) -> &mut [f32] {
        &mut self.rewards
    }

    pub fn terminals(&self) -> &[bool] {
        &self.terminals
    }

    pub fn terminals_mut(&mut self) -> &mut [bool] {
        &mut self.terminals
    }

    pub fn truncations(&self) -> &[bool] {
        &self.truncations
    }

    pub fn truncations_mut(&mut self) -> &mut [bool] {
        &mut self.truncations
    }

    /// Observation row of agent `i`.
    pub fn observation_row(&self, i: usize) -> &[f32] {
        let d = SwerveConfig::OBS_DIM;
        &self.observations[i * d..(i + 1) * d]
    }

    /// Mutable observation row of agent `i`.
    pub fn observation_row_mut(&mut self, i: usize) -> &mut [f32] {
        let d = SwerveConfig::OBS_DIM;
        &mut self.observations[i * d..(i + 1) * d]
    }

    /// Action row of agent `i`.
    pub fn action_row(&self, i: usize) -> &[f32] {
        let d = SwerveConfig::ACTION_DIM;
        &self.actions[i * d..(i + 1) * d]
    }

    /// Mean reward over agents whose terminal flag is set, if any terminated.
    pub fn terminal_reward_mean(&self) -> Option<f32> {
        let (sum, count) = self
            .rewards
            .iter()
            .zip(&self.terminals)
            .filter(|(_, done)| **done)
            .fold((0.0_f32, 0usize), |(s, c), (r, _)| (s + r, c + 1));
        (count > 0).then(|| sum / count as f32)
    }
}

fn check_shape(buffer: &'static str, len: usize, rows: usize, cols: usize) -> Result<()> {
    if len != rows * cols {
        let actual = if cols > 1 && len % cols == 0 {
            vec![len / cols, cols]
        } else {
            vec![len]
        };
        let expected = if cols > 1 { vec![rows, cols] } else { vec![rows] };
        return Err(EnvError::ShapeMismatch {
            buffer,
            expected,
            actual,
        });
    }
    Ok(())
}
