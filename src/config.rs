//! Configuration for the swerve drive simulator and environment.

use crate::error::{EnvError, Result};

/// Configuration for the native swerve simulator.
///
/// Controls arena geometry, drivetrain limits, episode length,
/// goal tolerances, and reward shaping.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwerveConfig {
    // --- Arena geometry ---
    /// Width of the arena along x.
    pub world_width: f32,
    /// Height of the arena along y.
    pub world_height: f32,
    /// Integration time step.
    pub dt: f32,
    /// Ticks before an episode is truncated.
    pub episode_horizon: u32,

    // --- Drivetrain limits ---
    /// Linear acceleration produced by a unit action.
    pub max_accel: f32,
    /// Angular acceleration produced by a unit action.
    pub max_angular_accel: f32,
    /// Cap on the translational speed.
    pub max_speed: f32,
    /// Cap on the angular speed.
    pub max_omega: f32,

    // --- Goal ---
    /// Distance within which the goal position counts as reached.
    pub goal_tolerance: f32,
    /// Heading error (radians) within which the goal heading counts as reached.
    pub goal_angle_tolerance: f32,

    // --- Reward shaping ---
    /// Reward per unit of distance closed toward the goal.
    pub reward_progress: f32,
    /// Reward per radian of heading error removed.
    pub reward_heading_progress: f32,
    /// Bonus paid on the step the goal is reached.
    pub reward_goal_bonus: f32,
    /// Penalty subtracted every step.
    pub reward_time_penalty: f32,
}

impl SwerveConfig {
    /// Number of observation features per agent.
    pub const OBS_DIM: usize = 6;

    /// Number of action values per agent: x accel, y accel, angular accel.
    pub const ACTION_DIM: usize = 3;

    /// Arena centre, where robots spawn.
    pub fn centre(&self) -> (f32, f32) {
        (self.world_width / 2.0, self.world_height / 2.0)
    }

    /// Smallest distance between the spawn point and a fresh goal.
    pub fn min_goal_distance(&self) -> f32 {
        0.25 * self.world_width.min(self.world_height)
    }

    /// Largest goal tolerance that still leaves room for goals at
    /// [`Self::min_goal_distance`] along both axes.
    fn max_goal_tolerance(&self) -> f32 {
        0.5 * self.world_width.min(self.world_height) - self.min_goal_distance()
    }

    /// Checks that geometry, limits and time step are usable.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("dt", self.dt),
            ("max_speed", self.max_speed),
            ("max_omega", self.max_omega),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(EnvError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.episode_horizon == 0 {
            return Err(EnvError::InvalidConfig(
                "episode_horizon must be at least 1".into(),
            ));
        }
        let non_negative = [
            ("max_accel", self.max_accel),
            ("max_angular_accel", self.max_angular_accel),
            ("goal_tolerance", self.goal_tolerance),
            ("goal_angle_tolerance", self.goal_angle_tolerance),
            ("reward_progress", self.reward_progress),
            ("reward_heading_progress", self.reward_heading_progress),
            ("reward_goal_bonus", self.reward_goal_bonus),
            ("reward_time_penalty", self.reward_time_penalty),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(EnvError::InvalidConfig(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        if self.goal_tolerance > self.max_goal_tolerance() {
            return Err(EnvError::InvalidConfig(format!(
                "goal_tolerance {} leaves no goal at least {} from the centre",
                self.goal_tolerance,
                self.min_goal_distance()
            )));
        }
        Ok(())
    }
}

impl Default for SwerveConfig {
    fn default() -> Self {
        Self {
            world_width: 10.0,
            world_height: 10.0,
            dt: 1.0 / 60.0,
            episode_horizon: 600,
            max_accel: 4.0,
            max_angular_accel: 8.0,
            max_speed: 3.0,
            max_omega: 4.0,
            goal_tolerance: 0.25,
            goal_angle_tolerance: 0.2,
            reward_progress: 1.0,
            reward_heading_progress: 0.2,
            reward_goal_bonus: 1.0,
            reward_time_penalty: 0.001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SwerveConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.centre(), (5.0, 5.0));
    }

    #[test]
    fn zero_dt_rejected() {
        let cfg = SwerveConfig {
            dt: 0.0,
            ..SwerveConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(EnvError::InvalidConfig(_))));
    }

    #[test]
    fn zero_horizon_rejected() {
        let cfg = SwerveConfig {
            episode_horizon: 0,
            ..SwerveConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_width_rejected() {
        let cfg = SwerveConfig {
            world_width: f32::NAN,
            ..SwerveConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_in_any_numeric_field_rejected() {
        let poisoned: [fn(&mut SwerveConfig); 8] = [
            |c| c.max_accel = f32::NAN,
            |c| c.max_angular_accel = f32::NAN,
            |c| c.goal_tolerance = f32::NAN,
            |c| c.goal_angle_tolerance = f32::NAN,
            |c| c.reward_progress = f32::NAN,
            |c| c.reward_heading_progress = f32::NAN,
            |c| c.reward_goal_bonus = f32::INFINITY,
            |c| c.reward_time_penalty = f32::NAN,
        ];
        for (i, poison) in poisoned.iter().enumerate() {
            let mut cfg = SwerveConfig::default();
            poison(&mut cfg);
            assert!(
                matches!(cfg.validate(), Err(EnvError::InvalidConfig(_))),
                "field {i} accepted"
            );
        }
    }

    #[test]
    fn negative_tolerance_rejected() {
        let cfg = SwerveConfig {
            goal_angle_tolerance: -0.1,
            ..SwerveConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn goal_tolerance_must_leave_room_for_goals() {
        let tight = SwerveConfig {
            goal_tolerance: 2.5,
            ..SwerveConfig::default()
        };
        assert!(tight.validate().is_ok());

        let too_wide = SwerveConfig {
            goal_tolerance: 4.0,
            ..SwerveConfig::default()
        };
        assert!(matches!(
            too_wide.validate(),
            Err(EnvError::InvalidConfig(_))
        ));
    }

    #[test]
    fn min_goal_distance_uses_short_side() {
        let cfg = SwerveConfig {
            world_width: 20.0,
            world_height: 8.0,
            ..SwerveConfig::default()
        };
        assert_eq!(cfg.min_goal_distance(), 2.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_round_trip() {
        let cfg = SwerveConfig {
            episode_horizon: 42,
            ..SwerveConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SwerveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
