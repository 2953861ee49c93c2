//! Application layer errors.
//!
//! These errors represent failures in orchestration (remote execution,
//! storage), not template rules. Rule violations are `DomainError` from
//! `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The execution service answered with an error payload.
    #[error("Prompt execution failed: {reason}")]
    ExecutionFailed { reason: String },

    /// The execution service could not be reached or answered garbage.
    #[error("Could not reach the execution service: {reason}")]
    TransportFailed { reason: String },

    /// No saved prompt with this id.
    #[error("Prompt not found: {id}")]
    PromptNotFound { id: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Prompt store error")]
    StoreLockError,

    /// Store backend failed to read or write.
    #[error("Prompt store failed: {reason}")]
    StoreFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ExecutionFailed { reason } => vec![
                format!("The service reported: {}", reason),
                "Check the compiled prompt and try again".into(),
            ],
            Self::TransportFailed { .. } => vec![
                "Check executor.endpoint in your configuration".into(),
                "Increase executor.timeout_secs if the service is slow".into(),
            ],
            Self::PromptNotFound { id } => vec![
                format!("No saved prompt with id '{}'", id),
                "Try: promptbench prompts to list saved prompts".into(),
            ],
            Self::StoreLockError => vec![
                "The prompt store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::StoreFailed { .. } => vec![
                "Check that store.directory exists and is writable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ExecutionFailed { .. } | Self::TransportFailed { .. } => {
                ErrorCategory::Execution
            }
            Self::PromptNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreLockError | Self::StoreFailed { .. } => ErrorCategory::Internal,
        }
    }
}
