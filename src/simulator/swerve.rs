//! Native holonomic ("swerve") drive simulator.
//!
//! Each agent is a robot that can translate and rotate independently in a
//! walled arena while chasing a goal pose. Per tick:
//! saturate → accelerate → limit → integrate → clamp to walls → reward →
//! terminal/truncation → auto-reset → observe.

use std::f32::consts::{PI, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::snapshot::{GoalDetail, RenderSnapshot};
use super::trait_::Simulator;
use crate::buffers::EnvBuffers;
use crate::config::SwerveConfig;
use crate::error::{EnvError, Result};

/// Goal draws attempted before falling back to a window corner.
const MAX_GOAL_SAMPLES: usize = 64;

/// Wraps an angle into `[-π, π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Pose, velocity and goal of one robot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RobotState {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub vx: f32,
    pub vy: f32,
    pub omega: f32,
    pub goal_x: f32,
    pub goal_y: f32,
    pub goal_angle: f32,
    /// Ticks elapsed in the current episode.
    pub tick: u32,
}

impl RobotState {
    /// Euclidean distance to the goal position.
    pub fn goal_distance(&self) -> f32 {
        (self.goal_x - self.x).hypot(self.goal_y - self.y)
    }

    /// Absolute heading error to the goal heading, in `[0, π]`.
    pub fn heading_error(&self) -> f32 {
        wrap_angle(self.goal_angle - self.angle).abs()
    }

    /// Encodes the robot as six features in `[0, 1]`:
    /// `[goal_dx, goal_dy, goal_dθ, vx, vy, ω]`.
    pub fn features(&self, config: &SwerveConfig) -> [f32; SwerveConfig::OBS_DIM] {
        let unit = |v: f32| v.clamp(0.0, 1.0);
        [
            unit((self.goal_x - self.x) / config.world_width * 0.5 + 0.5),
            unit((self.goal_y - self.y) / config.world_height * 0.5 + 0.5),
            unit(wrap_angle(self.goal_angle - self.angle) / TAU + 0.5),
            unit(self.vx / (2.0 * config.max_speed) + 0.5),
            unit(self.vy / (2.0 * config.max_speed) + 0.5),
            unit(self.omega / (2.0 * config.max_omega) + 0.5),
        ]
    }

    fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            x: self.x,
            y: self.y,
            angle: self.angle,
            vx: self.vx,
            vy: self.vy,
            detail: Some(GoalDetail {
                omega: self.omega,
                goal_x: self.goal_x,
                goal_y: self.goal_y,
                goal_angle: self.goal_angle,
            }),
        }
    }
}

/// What happened to one robot during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TickOutcome {
    reward: f32,
    reached: bool,
    truncated: bool,
}

/// Vectorized swerve drive simulator.
#[derive(Debug)]
pub struct SwerveSimulator {
    config: SwerveConfig,
    robots: Vec<RobotState>,
    rng: StdRng,
    closed: bool,
}

impl SwerveSimulator {
    /// Creates a simulator for `num_agents` robots.
    ///
    /// Robots are not placed until [`Simulator::reset`] is called.
    pub fn new(config: SwerveConfig, num_agents: usize, seed: u64) -> Result<Self> {
        if num_agents == 0 {
            return Err(EnvError::NoAgents);
        }
        config.validate()?;
        Ok(Self {
            config,
            robots: vec![RobotState::default(); num_agents],
            rng: StdRng::seed_from_u64(seed),
            closed: false,
        })
    }

    /// Simulator configuration.
    pub fn config(&self) -> &SwerveConfig {
        &self.config
    }

    /// State of robot `i`.
    pub fn robot(&self, i: usize) -> Option<&RobotState> {
        self.robots.get(i)
    }

    /// A robot at the arena centre facing 0 with a fresh random goal.
    fn spawn(&mut self) -> RobotState {
        let (cx, cy) = self.config.centre();
        let margin = self.config.goal_tolerance;
        let (w, h) = (self.config.world_width, self.config.world_height);
        let min_distance = self.config.min_goal_distance();

        let mut robot = RobotState {
            x: cx,
            y: cy,
            ..RobotState::default()
        };
        let found = (0..MAX_GOAL_SAMPLES).any(|_| {
            robot.goal_x = self.sample(margin, w - margin);
            robot.goal_y = self.sample(margin, h - margin);
            robot.goal_distance() >= min_distance
        });
        if !found {
            // Fall back to a corner of the goal window, the farthest point from the centre.
            robot.goal_x = if self.rng.gen() { margin } else { w - margin };
            robot.goal_y = if self.rng.gen() { margin } else { h - margin };
        }
        robot.goal_angle = self.rng.gen_range(-PI..PI);
        robot
    }

    fn sample(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.gen_range(lo..hi)
        } else {
            (lo + hi) / 2.0
        }
    }

    /// Integrates one robot by one tick under `action`.
    fn advance(config: &SwerveConfig, robot: &mut RobotState, action: &[f32]) -> TickOutcome {
        let prev_distance = robot.goal_distance();
        let prev_heading = robot.heading_error();
        let dt = config.dt;

        // Commands beyond unit magnitude saturate at the actuator limit.
        let ax = action[0].clamp(-1.0, 1.0) * config.max_accel;
        let ay = action[1].clamp(-1.0, 1.0) * config.max_accel;
        let alpha = action[2].clamp(-1.0, 1.0) * config.max_angular_accel;

        robot.vx += ax * dt;
        robot.vy += ay * dt;
        let speed = robot.vx.hypot(robot.vy);
        if speed > config.max_speed {
            let scale = config.max_speed / speed;
            robot.vx *= scale;
            robot.vy *= scale;
        }
        robot.omega = (robot.omega + alpha * dt).clamp(-config.max_omega, config.max_omega);

        robot.x += robot.vx * dt;
        robot.y += robot.vy * dt;
        robot.angle = wrap_angle(robot.angle + robot.omega * dt);

        if robot.x < 0.0 || robot.x > config.world_width {
            robot.x = robot.x.clamp(0.0, config.world_width);
            robot.vx = 0.0;
        }
        if robot.y < 0.0 || robot.y > config.world_height {
            robot.y = robot.y.clamp(0.0, config.world_height);
            robot.vy = 0.0;
        }

        robot.tick += 1;

        let distance = robot.goal_distance();
        let heading = robot.heading_error();
        let mut reward = config.reward_progress * (prev_distance - distance)
            + config.reward_heading_progress * (prev_heading - heading)
            - config.reward_time_penalty;

        let reached = distance <= config.goal_tolerance && heading <= config.goal_angle_tolerance;
        if reached {
            reward += config.reward_goal_bonus;
        }
        let truncated = !reached && robot.tick >= config.episode_horizon;

        TickOutcome {
            reward,
            reached,
            truncated,
        }
    }

    fn check_buffers(&self, buffers: &EnvBuffers) -> Result<()> {
        if buffers.num_agents() != self.robots.len() {
            return Err(EnvError::ShapeMismatch {
                buffer: "observations",
                expected: vec![self.robots.len(), SwerveConfig::OBS_DIM],
                actual: buffers.observation_shape().to_vec(),
            });
        }
        if self.closed {
            return Err(EnvError::Simulator("simulator has been closed".into()));
        }
        Ok(())
    }

    fn write_observation(&self, buffers: &mut EnvBuffers, i: usize) {
        let features = self.robots[i].features(&self.config);
        buffers.observation_row_mut(i).copy_from_slice(&features);
    }
}

impl Simulator for SwerveSimulator {
    fn num_agents(&self) -> usize {
        self.robots.len()
    }

    fn reset(&mut self, buffers: &mut EnvBuffers, seed: Option<u64>) -> Result<()> {
        self.check_buffers(buffers)?;
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        for i in 0..self.robots.len() {
            self.robots[i] = self.spawn();
            self.write_observation(buffers, i);
        }
        buffers.rewards_mut().fill(0.0);
        buffers.terminals_mut().fill(false);
        buffers.truncations_mut().fill(false);

        debug!(agents = self.robots.len(), ?seed, "swerve simulator reset");
        Ok(())
    }

    fn step(&mut self, buffers: &mut EnvBuffers) -> Result<()> {
        self.check_buffers(buffers)?;
        if let Some(pos) = buffers.actions().iter().position(|a| !a.is_finite()) {
            return Err(EnvError::Simulator(format!(
                "agent {} has a non-finite action",
                pos / SwerveConfig::ACTION_DIM
            )));
        }

        for i in 0..self.robots.len() {
            let outcome = Self::advance(&self.config, &mut self.robots[i], buffers.action_row(i));

            buffers.rewards_mut()[i] = outcome.reward;
            buffers.terminals_mut()[i] = outcome.reached;
            buffers.truncations_mut()[i] = outcome.truncated;

            if outcome.reached || outcome.truncated {
                trace!(
                    agent = i,
                    tick = self.robots[i].tick,
                    reached = outcome.reached,
                    "episode finished"
                );
                self.robots[i] = self.spawn();
            }
            self.write_observation(buffers, i);
        }
        Ok(())
    }

    fn render_data(&self) -> Result<RenderSnapshot> {
        self.robots
            .first()
            .map(RobotState::snapshot)
            .ok_or(EnvError::NoAgents)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            debug!("swerve simulator closed");
            self.closed = true;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "swerve"
    }
}
