//! Error types for kmap-solver

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// kmap-solver errors
#[derive(Error, Debug)]
pub enum Error {
    /// Missing, empty, or out-of-range variable set
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed expression or a row that failed to evaluate
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error belongs to the validation class (bad variable set)
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Whether this error belongs to the evaluation class (malformed expression)
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Error::Evaluation(_))
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
