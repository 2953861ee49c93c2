//! Scripted executor for tests and offline runs.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use promptbench_core::{
    application::ports::{ExecutionResponse, PromptExecutor},
    error::PromptbenchResult,
};

/// Answers from a queue, then falls back to a default response.
///
/// Every prompt it receives is recorded so callers can assert on what was
/// (or was not) sent.
#[derive(Debug, Clone)]
pub struct MockExecutor {
    queue: Arc<Mutex<VecDeque<PromptbenchResult<ExecutionResponse>>>>,
    fallback: Option<ExecutionResponse>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockExecutor {
    /// Echo executor: answers every prompt with `Mock response to: <prompt>`.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            fallback: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every unscripted prompt with `response`.
    pub fn with_default(response: ExecutionResponse) -> Self {
        Self {
            fallback: Some(response),
            ..Self::new()
        }
    }

    /// Queue one result for the next call.
    pub fn push(&self, result: PromptbenchResult<ExecutionResponse>) -> &Self {
        locked(&self.queue).push_back(result);
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        locked(&self.prompts).clone()
    }

    pub fn call_count(&self) -> usize {
        locked(&self.prompts).len()
    }
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptExecutor for MockExecutor {
    async fn execute(&self, prompt: &str) -> PromptbenchResult<ExecutionResponse> {
        locked(&self.prompts).push(prompt.to_owned());

        let scripted = locked(&self.queue).pop_front();

        match scripted {
            Some(result) => result,
            None => match &self.fallback {
                Some(response) => Ok(response.clone()),
                None => {
                    debug!("Mock executor echoing prompt");
                    Ok(ExecutionResponse::success(format!(
                        "Mock response to: {prompt}"
                    )))
                }
            },
        }
    }
}

/// Lock, recovering the data if a holder panicked.
fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptbench_core::application::ApplicationError;

    #[tokio::test]
    async fn echoes_by_default() {
        let executor = MockExecutor::new();
        let response = executor.execute("ping").await.unwrap();
        assert_eq!(response.content.as_deref(), Some("Mock response to: ping"));
        assert_eq!(executor.prompts(), ["ping"]);
    }

    #[tokio::test]
    async fn scripted_results_come_first() {
        let executor = MockExecutor::with_default(ExecutionResponse::success("later"));
        executor
            .push(Ok(ExecutionResponse::failure("first")))
            .push(Err(ApplicationError::TransportFailed {
                reason: "second".into(),
            }
            .into()));

        assert!(!executor.execute("a").await.unwrap().success);
        assert!(executor.execute("b").await.is_err());
        assert_eq!(
            executor.execute("c").await.unwrap(),
            ExecutionResponse::success("later")
        );
        assert_eq!(executor.call_count(), 3);
    }

    #[tokio::test]
    async fn scripted_failure_survives_poisoned_queue() {
        let executor = MockExecutor::new();
        let queue = Arc::clone(&executor.queue);
        let _ = std::thread::spawn(move || {
            let _guard = queue.lock().unwrap();
            panic!("poison the queue");
        })
        .join();

        executor.push(Ok(ExecutionResponse::failure("scripted")));
        let response = executor.execute("x").await.unwrap();
        assert_eq!(response.error.as_deref(), Some("scripted"));
        assert_eq!(executor.call_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_recorded_prompts() {
        let executor = MockExecutor::new();
        let handle = executor.clone();
        executor.execute("x").await.unwrap();
        assert_eq!(handle.call_count(), 1);
    }
}
