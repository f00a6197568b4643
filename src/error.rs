//! Crate-wide error type.
//!
//! Every failure carries the process exit code the `afford` binary reports for it,
//! so the front-ends can simply bubble errors up to `main`.

/// Errors produced by the calculator core and its front-ends.
///
/// `Clone` because comparison rows keep a per-region error next to the successful rows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// A caller supplied a value outside the domain of the computation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An unknown region identifier.
    #[error("Unknown region '{0}'.")]
    NotFound(String),

    /// Malformed distribution or rule parameters (fatal at startup).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading or writing an export file failed.
    #[error("{0}")]
    Io(String),

    /// Terminal backend failures in the TUI.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal(message.into())
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidInput(_) | AppError::NotFound(_) => 2,
            AppError::Configuration(_) => 3,
            AppError::Io(_) | AppError::Terminal(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
