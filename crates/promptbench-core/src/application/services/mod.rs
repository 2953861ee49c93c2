//! Application services - wrap the compiler with an invocation policy.
//!
//! Both sessions compile with the same domain functions. They differ in
//! what happens on `run()`:
//!
//! | Session          | Runs allowed | State                      |
//! |------------------|--------------|----------------------------|
//! | `PreviewSession` | one          | fixed template + bindings  |
//! | `EditorSession`  | unlimited    | editable template + list   |

pub mod editor_service;
pub mod preview_service;

pub use editor_service::EditorSession;
pub use preview_service::PreviewSession;

use crate::{
    application::{ApplicationError, ports::ExecutionResponse},
    error::PromptbenchResult,
};

/// What a `run()` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The service returned generated text.
    Completed(String),
    /// The compiled prompt was blank; nothing was sent.
    Skipped,
}

impl RunOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Completed(text) => Some(text),
            Self::Skipped => None,
        }
    }
}

/// Turn a service payload into generated text or an execution error.
pub(crate) fn response_text(response: ExecutionResponse) -> PromptbenchResult<String> {
    if response.success {
        Ok(response.content.unwrap_or_default())
    } else {
        Err(ApplicationError::ExecutionFailed {
            reason: response
                .error
                .unwrap_or_else(|| "Failed to run prompt".to_string()),
        }
        .into())
    }
}
