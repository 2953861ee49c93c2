//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `promptbench-adapters` crate provides implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::SavedPrompt;
use crate::error::PromptbenchResult;

/// Payload returned by an execution service.
///
/// Mirrors the wire shape `{ "success": bool, "content"?: string, "error"?: string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResponse {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            error: Some(error.into()),
        }
    }
}

/// Port for remote prompt execution.
///
/// Implemented by:
/// - `promptbench_adapters::executor::HttpExecutor` (production)
/// - `promptbench_adapters::executor::MockExecutor` (testing)
///
/// Transport problems are `Err`; a service that answers with
/// `success: false` is `Ok(ExecutionResponse::failure(..))`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PromptExecutor: Send + Sync {
    /// Send one compiled prompt and await the generated text.
    async fn execute(&self, prompt: &str) -> PromptbenchResult<ExecutionResponse>;
}

/// Port for unique identifiers (editor variable ids, saved prompt ids).
///
/// Implemented by:
/// - `promptbench_adapters::id_generator::UuidGenerator` (production)
/// - `promptbench_adapters::id_generator::SequentialIds` (deterministic)
/// - any `Fn() -> String + Send + Sync`
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Port for saved prompt storage.
///
/// Implemented by:
/// - `promptbench_adapters::prompt_store::InMemoryPromptStore`
/// - `promptbench_adapters::prompt_store::JsonFilePromptStore`
#[cfg_attr(test, mockall::automock)]
pub trait PromptStore: Send + Sync {
    /// Insert or replace a prompt by id.
    fn save(&self, prompt: SavedPrompt) -> PromptbenchResult<()>;

    /// Get a prompt by id.
    fn get(&self, id: &str) -> PromptbenchResult<SavedPrompt>;

    /// List all prompts, most recently updated first.
    fn list(&self) -> PromptbenchResult<Vec<SavedPrompt>>;

    /// Remove a prompt.
    fn remove(&self, id: &str) -> PromptbenchResult<()>;
}
