// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Malformed placeholders are never errors; they are ordinary text. What
/// remains are rule violations a caller can render inline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid variable name '{name}': use letters, digits and underscores")]
    InvalidVariableName { name: String },

    // ========================================================================
    // Run-limit Errors
    // ========================================================================
    #[error("The free preview run has already been used")]
    RunAlreadyConsumed,

    #[error("A run is already in progress")]
    RunInProgress,

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("No variable with id or name '{key}'")]
    UnknownVariable { key: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidVariableName { name } => vec![
                format!("'{}' would not be recognised as {{{{{}}}}}", name, name),
                "Examples: task_description, tone, input_data".into(),
            ],
            Self::RunAlreadyConsumed => vec![
                "Previews allow a single run".into(),
                "Purchase the prompt or open it in the editor for unlimited runs".into(),
            ],
            Self::RunInProgress => vec!["Wait for the current run to finish".into()],
            Self::UnknownVariable { key } => vec![
                format!("'{}' is not a variable of the current template", key),
                "Variables are derived from {{name}} placeholders".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidVariableName { .. } => ErrorCategory::Validation,
            Self::RunAlreadyConsumed | Self::RunInProgress => ErrorCategory::RunLimit,
            Self::UnknownVariable { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    RunLimit,
    NotFound,
}
