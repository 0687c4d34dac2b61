//! Simulator trait and implementations.

pub mod snapshot;
pub mod swerve;
pub mod trait_;

pub use snapshot::{GoalDetail, RenderSnapshot};
pub use swerve::{RobotState, SwerveSimulator};
pub use trait_::Simulator;
