//! Simulator capability the environment adapter drives.

use super::snapshot::RenderSnapshot;
use crate::buffers::EnvBuffers;
use crate::error::Result;

/// A vectorized simulation engine operating on shared [`EnvBuffers`].
///
/// The adapter owns the buffers and lends them for each call. A simulator
/// reads the action buffer and is the only writer of observations, rewards,
/// terminals and truncations.
pub trait Simulator {
    /// Number of agents the simulator was built for.
    fn num_agents(&self) -> usize;

    /// Starts fresh episodes for every agent and writes initial observations.
    ///
    /// `seed` reseeds the simulator's random source when given.
    fn reset(&mut self, buffers: &mut EnvBuffers, seed: Option<u64>) -> Result<()>;

    /// Advances every agent one tick using the current action buffer.
    fn step(&mut self, buffers: &mut EnvBuffers) -> Result<()>;

    /// Returns the state to display. Must not alter simulation state.
    fn render_data(&self) -> Result<RenderSnapshot>;

    /// Releases simulator resources.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human-readable name used in logs.
    fn name(&self) -> &str;
}
