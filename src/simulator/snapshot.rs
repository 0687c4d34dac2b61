//! Render snapshots reported by simulators.

use std::fmt;

use crate::error::{EnvError, Result};

/// Momentary state of the rendered robot.
///
/// Simulators report either the minimal five values (pose and linear
/// velocity) or the full nine, which add angular velocity and the goal pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub vx: f32,
    pub vy: f32,
    pub detail: Option<GoalDetail>,
}

/// Extra fields of a full snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalDetail {
    pub omega: f32,
    pub goal_x: f32,
    pub goal_y: f32,
    pub goal_angle: f32,
}

impl RenderSnapshot {
    /// Values in a minimal snapshot.
    pub const MINIMAL_LEN: usize = 5;
    /// Values in a full snapshot.
    pub const FULL_LEN: usize = 9;

    /// Minimal snapshot without goal information.
    pub fn minimal(x: f32, y: f32, angle: f32, vx: f32, vy: f32) -> Self {
        Self {
            x,
            y,
            angle,
            vx,
            vy,
            detail: None,
        }
    }

    /// Builds a snapshot from a raw 5- or 9-value array.
    ///
    /// Layout: `[x, y, angle, vx, vy]` or
    /// `[x, y, angle, vx, vy, omega, goal_x, goal_y, goal_angle]`.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        match *values {
            [x, y, angle, vx, vy] => Ok(Self::minimal(x, y, angle, vx, vy)),
            [x, y, angle, vx, vy, omega, goal_x, goal_y, goal_angle] => Ok(Self {
                x,
                y,
                angle,
                vx,
                vy,
                detail: Some(GoalDetail {
                    omega,
                    goal_x,
                    goal_y,
                    goal_angle,
                }),
            }),
            _ => Err(EnvError::RenderDataLength {
                accepted: [Self::MINIMAL_LEN, Self::FULL_LEN],
                actual: values.len(),
            }),
        }
    }

    /// Vector from the robot to the goal, if the goal is known.
    pub fn goal_offset(&self) -> Option<(f32, f32)> {
        self.detail
            .map(|d| (d.goal_x - self.x, d.goal_y - self.y))
    }
}

impl fmt::Display for RenderSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x: {}, y: {}, angle: {}, vx: {}, vy: {}",
            self.x, self.y, self.angle, self.vx, self.vy
        )?;
        if let Some(d) = self.detail {
            write!(
                f,
                ", omega: {}, goal_x: {}, goal_y: {}, goal_angle: {}",
                d.omega, d.goal_x, d.goal_y, d.goal_angle
            )?;
        }
        Ok(())
    }
}
