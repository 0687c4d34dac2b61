//! Policy trait for the swerve environment.

/// A policy that maps a batch of observations to a batch of actions.
///
/// Observations are the environment's row-major `N × 6` buffer; the returned
/// actions must be row-major `N × 3`, nominally within `[-1, 1]`.
pub trait Policy: Send + Sync {
    /// Selects one action row per agent.
    ///
    /// # Arguments
    ///
    /// * `observations` - Observation buffer, `num_agents × 6` values
    /// * `num_agents` - Number of rows in `observations`
    fn select_actions(&mut self, observations: &[f32], num_agents: usize) -> Vec<f32>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
