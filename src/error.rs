use thiserror::Error;

/// Errors raised by the environment adapter and its simulators.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Environment needs at least one agent")]
    NoAgents,

    #[error("Buffer '{buffer}' has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        buffer: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Render data has {actual} values, expected one of {accepted:?}")]
    RenderDataLength { accepted: [usize; 2], actual: usize },

    #[error("Expected {expected} action values, got {actual}")]
    ActionLength { expected: usize, actual: usize },

    #[error("Environment is closed")]
    Closed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Simulator fault: {0}")]
    Simulator(String),

    #[error("Render output failed: {0}")]
    Render(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EnvError>;
