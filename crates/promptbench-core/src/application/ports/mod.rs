//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `promptbench-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `PromptExecutor`: Remote text generation
//!   - `IdGenerator`: Unique ids
//!   - `PromptStore`: Saved prompt storage
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ExecutionResponse, IdGenerator, PromptExecutor, PromptStore};

#[cfg(test)]
pub use output::{MockPromptExecutor, MockPromptStore};
