//! Evaluation metrics for the swerve environment.
//!
//! Runs a policy for a fixed number of steps and aggregates what the
//! environment reports: per-step rewards, terminal metadata and truncations.

use std::fmt;

use crate::environment::SwerveEnv;
use crate::error::Result;
use crate::policy::Policy;
use crate::simulator::Simulator;

/// Aggregated statistics of one evaluation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationMetrics {
    /// Policy that produced the actions.
    pub policy: String,
    /// Environment steps taken.
    pub steps: usize,
    /// Agent episodes that ended with the terminal flag.
    pub episodes_finished: usize,
    /// Agent episodes cut off by truncation.
    pub episodes_truncated: usize,
    /// Mean reward of terminated agents on their final step.
    pub mean_terminal_reward: f64,
    /// Mean reward over every agent-step.
    pub mean_step_reward: f64,
}

impl EvaluationMetrics {
    /// Resets `env`, then drives it for `steps` steps with `policy`.
    ///
    /// # Arguments
    ///
    /// * `env` - Environment to evaluate in
    /// * `policy` - Policy choosing the actions
    /// * `steps` - Number of environment steps
    /// * `seed` - Optional reset seed
    pub fn evaluate<S: Simulator>(
        env: &mut SwerveEnv<S>,
        policy: &mut dyn Policy,
        steps: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        let n = env.num_agents();
        let mut obs = env.reset(seed)?.0.to_vec();

        let mut finished = 0usize;
        let mut truncated = 0usize;
        let mut terminal_reward_sum = 0.0_f64;
        let mut step_reward_sum = 0.0_f64;

        for _ in 0..steps {
            let actions = policy.select_actions(&obs, n);
            let result = env.step(&actions)?;

            let done = result.terminals.iter().filter(|t| **t).count();
            if let Some(episode) = result.info.first() {
                // The info entry is a mean; weight it back by its count.
                terminal_reward_sum += f64::from(episode.reward) * done as f64;
            }
            finished += done;
            truncated += result.truncations.iter().filter(|t| **t).count();
            step_reward_sum += result.rewards.iter().map(|r| f64::from(*r)).sum::<f64>();

            obs.copy_from_slice(result.observations);
        }

        let agent_steps = (steps * n) as f64;
        Ok(Self {
            policy: policy.name().to_string(),
            steps,
            episodes_finished: finished,
            episodes_truncated: truncated,
            mean_terminal_reward: if finished > 0 {
                terminal_reward_sum / finished as f64
            } else {
                0.0
            },
            mean_step_reward: if agent_steps > 0.0 {
                step_reward_sum / agent_steps
            } else {
                0.0
            },
        })
    }

    /// Share of completed episodes that reached the goal, in percent.
    pub fn pct_finished(&self) -> f64 {
        let total = self.episodes_finished + self.episodes_truncated;
        if total > 0 {
            self.episodes_finished as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({}, {} steps) ===",
            self.policy, self.steps
        )?;
        writeln!(f, "  Episodes finished:       {}", self.episodes_finished)?;
        writeln!(f, "  Episodes truncated:      {}", self.episodes_truncated)?;
        writeln!(f, "  % finished:              {:.1}%", self.pct_finished())?;
        writeln!(
            f,
            "  Mean terminal reward:    {:.4}",
            self.mean_terminal_reward
        )?;
        writeln!(f, "  Mean step reward:        {:.5}", self.mean_step_reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwerveConfig;
    use crate::policy::{GoalSeekingPolicy, RandomPolicy};
    use crate::render::RenderMode;

    fn make_env(horizon: u32) -> SwerveEnv<crate::simulator::SwerveSimulator> {
        let config = SwerveConfig {
            episode_horizon: horizon,
            ..SwerveConfig::default()
        };
        SwerveEnv::native(3, RenderMode::None, 11, config, 42).unwrap()
    }

    #[test]
    fn evaluate_completes() {
        let mut env = make_env(10);
        let mut policy = RandomPolicy::new(1);
        let metrics = EvaluationMetrics::evaluate(&mut env, &mut policy, 30, Some(5)).unwrap();
        assert_eq!(metrics.steps, 30);
        assert_eq!(metrics.policy, "random");
        // Ten ticks is too short to reach a goal, so all nine episodes truncate.
        assert_eq!(metrics.episodes_finished + metrics.episodes_truncated, 9);
    }

    #[test]
    fn zero_steps_is_empty() {
        let mut env = make_env(10);
        let mut policy = RandomPolicy::new(1);
        let metrics = EvaluationMetrics::evaluate(&mut env, &mut policy, 0, None).unwrap();
        assert_eq!(metrics.episodes_finished, 0);
        assert_eq!(metrics.mean_step_reward, 0.0);
        assert_eq!(metrics.pct_finished(), 0.0);
    }

    #[test]
    fn goal_seeking_beats_random() {
        let mut env = make_env(600);
        let mut greedy = GoalSeekingPolicy::default();
        let greedy_metrics =
            EvaluationMetrics::evaluate(&mut env, &mut greedy, 1500, Some(8)).unwrap();

        let mut env = make_env(600);
        let mut random = RandomPolicy::new(8);
        let random_metrics =
            EvaluationMetrics::evaluate(&mut env, &mut random, 1500, Some(8)).unwrap();

        assert!(greedy_metrics.episodes_finished > random_metrics.episodes_finished);
        assert!(greedy_metrics.mean_terminal_reward > 0.5);
    }

    #[test]
    fn display_lists_policy() {
        let metrics = EvaluationMetrics {
            policy: "random".into(),
            steps: 5,
            episodes_finished: 1,
            episodes_truncated: 3,
            mean_terminal_reward: 1.0,
            mean_step_reward: 0.0,
        };
        let text = metrics.to_string();
        assert!(text.contains("random, 5 steps"));
        assert!(text.contains("25.0%"));
    }
}
