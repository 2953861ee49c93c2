// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for promptbench.
//!
//! Pure logic: the template compiler, editor variable reconciliation, the
//! preview run-limiter and the saved-prompt record. Remote execution, id
//! generation and persistence are reached through ports defined in the
//! application layer.
//!
//! ## Rules
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Never fails on input text**: malformed placeholders are literal text
//!
pub mod error;
pub mod prompt;
pub mod run_limiter;
pub mod template;
pub mod variables;

pub use error::{DomainError, ErrorCategory};
pub use prompt::SavedPrompt;
pub use run_limiter::{RunCompletion, RunLimiter, RunState};
pub use template::{
    CompiledOutput, SUGGESTED_VARIABLES, Template, VariableBindings, VariableSet, compile,
    complete_trigger, extract_variables, insert_placeholder, is_valid_variable_name,
    next_variable_name, placeholder,
};
pub use variables::{VariableItem, VariableList, reconcile};
