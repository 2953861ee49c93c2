//! Application layer for promptbench.
//!
//! This layer contains:
//! - **Services**: Preview and editor sessions that wrap the compiler with an
//!   invocation policy
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Template rules live in `crate::domain`; this layer only orchestrates.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{EditorSession, PreviewSession, RunOutcome};

pub use ports::{ExecutionResponse, IdGenerator, PromptExecutor, PromptStore};

pub use error::ApplicationError;
