use thiserror::Error;

/// Every failure the scheduler and its loaders can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed or inconsistent configuration document.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unknown greenhouse, plan or tick, or no configuration loaded yet.
    #[error("{what} not found.")]
    NotFound { what: String },

    /// The run did not reach the finished state within the tick ceiling.
    #[error("Simulation did not finish within {ceiling} ticks.")]
    LimitExceeded { ceiling: u32 },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
