//! Bounded box spaces describing per-agent observations and actions.

use std::fmt;

/// A fixed-length vector space with uniform scalar bounds `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxSpace {
    pub low: f32,
    pub high: f32,
    /// Number of scalars per agent.
    pub dim: usize,
}

impl BoxSpace {
    /// Creates a new space.
    pub fn new(low: f32, high: f32, dim: usize) -> Self {
        Self { low, high, dim }
    }

    /// Returns true if every value lies within the bounds.
    ///
    /// Length is not checked; pass a single row or a whole batch.
    pub fn contains(&self, values: &[f32]) -> bool {
        values.iter().all(|v| *v >= self.low && *v <= self.high)
    }

    /// Shape of the batched buffer for `num_agents` rows.
    pub fn batch_shape(&self, num_agents: usize) -> [usize; 2] {
        [num_agents, self.dim]
    }
}

impl fmt::Display for BoxSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box({}, {}, ({},))", self.low, self.high, self.dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_checks_bounds() {
        let space = BoxSpace::new(-1.0, 1.0, 3);
        assert!(space.contains(&[-1.0, 0.0, 1.0]));
        assert!(!space.contains(&[0.0, 1.5, 0.0]));
    }

    #[test]
    fn batch_shape() {
        let space = BoxSpace::new(0.0, 1.0, 6);
        assert_eq!(space.batch_shape(4), [4, 6]);
    }

    #[test]
    fn display() {
        assert_eq!(BoxSpace::new(0.0, 1.0, 6).to_string(), "Box(0, 1, (6,))");
    }
}
