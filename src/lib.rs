//! swerve-env - vectorized swerve drive reinforcement-learning environment.
//!
//! A buffer-backed environment adapter ([`SwerveEnv`]) over a pluggable
//! [`Simulator`], a native holonomic drive simulator, text and plot rendering,
//! and baseline policies with an evaluation harness.

pub mod buffers;
pub mod config;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod render;
pub mod simulator;
pub mod spaces;

pub use buffers::EnvBuffers;
pub use config::SwerveConfig;
pub use environment::{EpisodeInfo, StepResult, SwerveEnv};
pub use error::{EnvError, Result};
pub use metrics::EvaluationMetrics;
pub use policy::{GoalSeekingPolicy, Policy, RandomPolicy};
pub use render::{PlotView, RenderMode, Renderer};
pub use simulator::{RenderSnapshot, Simulator, SwerveSimulator};
pub use spaces::BoxSpace;

/// Identifier type used for environment instances.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
