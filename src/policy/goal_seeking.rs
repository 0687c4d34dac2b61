//! Goal-seeking heuristic policy.
//!
//! A proportional-derivative controller on the observation features: push
//! along the relative goal offset, damp by the current velocity, and do the
//! same for heading against angular velocity.

use super::trait_::Policy;
use crate::config::SwerveConfig;

/// Controller gains, expressed on normalized observation features.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalSeekingGains {
    /// Action per unit of normalized goal offset.
    pub position: f32,
    /// Action per unit of normalized linear velocity (subtracted).
    pub velocity_damping: f32,
    /// Action per unit of normalized heading error.
    pub heading: f32,
    /// Action per unit of normalized angular velocity (subtracted).
    pub spin_damping: f32,
}

impl Default for GoalSeekingGains {
    fn default() -> Self {
        Self {
            position: 5.0,
            velocity_damping: 3.0,
            heading: 3.0,
            spin_damping: 4.0,
        }
    }
}

/// Drives every robot toward its goal pose.
///
/// Serves as a competitive baseline; it should finish far more episodes
/// than [`super::RandomPolicy`].
pub struct GoalSeekingPolicy {
    gains: GoalSeekingGains,
}

impl GoalSeekingPolicy {
    pub fn new(gains: GoalSeekingGains) -> Self {
        Self { gains }
    }

    /// Action row for one observation row.
    fn control(&self, obs: &[f32]) -> [f32; SwerveConfig::ACTION_DIM] {
        // Every feature is centred on 0.5.
        let centred = |i: usize| obs[i] - 0.5;
        let g = &self.gains;
        [
            (g.position * centred(0) - g.velocity_damping * centred(3)).clamp(-1.0, 1.0),
            (g.position * centred(1) - g.velocity_damping * centred(4)).clamp(-1.0, 1.0),
            (g.heading * centred(2) - g.spin_damping * centred(5)).clamp(-1.0, 1.0),
        ]
    }
}

impl Default for GoalSeekingPolicy {
    fn default() -> Self {
        Self::new(GoalSeekingGains::default())
    }
}

impl Policy for GoalSeekingPolicy {
    fn select_actions(&mut self, observations: &[f32], num_agents: usize) -> Vec<f32> {
        let mut actions = Vec::with_capacity(num_agents * SwerveConfig::ACTION_DIM);
        for row in observations
            .chunks_exact(SwerveConfig::OBS_DIM)
            .take(num_agents)
        {
            actions.extend(self.control(row));
        }
        // Rows missing from a short buffer get a zero command.
        actions.resize(num_agents * SwerveConfig::ACTION_DIM, 0.0);
        actions
    }

    fn name(&self) -> &str {
        "goal_seeking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::SwerveEnv;
    use crate::render::RenderMode;

    #[test]
    fn pushes_toward_goal() {
        let mut policy = GoalSeekingPolicy::default();
        // Goal up and to the right, heading error positive, robot at rest.
        let obs = [0.7, 0.6, 0.6, 0.5, 0.5, 0.5];
        let actions = policy.select_actions(&obs, 1);
        assert!(actions[0] > 0.0);
        assert!(actions[1] > 0.0);
        assert!(actions[2] > 0.0);
    }

    #[test]
    fn at_rest_on_goal_is_idle() {
        let mut policy = GoalSeekingPolicy::default();
        let actions = policy.select_actions(&[0.5; 6], 1);
        assert_eq!(actions, vec![0.0; 3]);
    }

    #[test]
    fn damping_opposes_velocity() {
        let mut policy = GoalSeekingPolicy::default();
        let obs = [0.5, 0.5, 0.5, 0.9, 0.1, 0.5];
        let actions = policy.select_actions(&obs, 1);
        assert!(actions[0] < 0.0);
        assert!(actions[1] > 0.0);
    }

    #[test]
    fn short_buffer_padded_with_zeros() {
        let mut policy = GoalSeekingPolicy::default();
        let actions = policy.select_actions(&[0.9; 6], 2);
        assert_eq!(actions.len(), 6);
        assert_eq!(&actions[3..], &[0.0; 3]);
    }

    #[test]
    fn reaches_goals_in_native_env() {
        let mut env =
            SwerveEnv::native(4, RenderMode::None, 11, SwerveConfig::default(), 21).unwrap();
        let mut policy = GoalSeekingPolicy::default();
        let mut obs = env.reset(None).unwrap().0.to_vec();

        let mut finished = 0;
        for _ in 0..1200 {
            let actions = policy.select_actions(&obs, 4);
            let result = env.step(&actions).unwrap();
            finished += result.terminals.iter().filter(|t| **t).count();
            obs.copy_from_slice(result.observations);
        }
        assert!(finished > 0);
    }
}
