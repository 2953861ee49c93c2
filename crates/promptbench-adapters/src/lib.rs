//! Infrastructure adapters for promptbench.
//!
//! This crate implements the ports defined in `promptbench-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod executor;
pub mod id_generator;
pub mod prompt_store;

// Re-export commonly used adapters
pub use executor::{HttpExecutor, MockExecutor};
pub use id_generator::{SequentialIds, UuidGenerator};
pub use prompt_store::{InMemoryPromptStore, JsonFilePromptStore};
