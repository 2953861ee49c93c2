//! Prompt executors.

pub mod http;
pub mod mock;

pub use http::{DEFAULT_TIMEOUT, HttpExecutor};
pub use mock::MockExecutor;
