//! HTTP prompt executor.
//!
//! Sends the compiled prompt to a text-generation endpoint:
//!
//! ```text
//! POST <endpoint>
//! Authorization: Bearer <api_key>      (optional)
//! {"prompt": "..."}
//!
//! 200 {"success": true,  "content": "..."}
//! 200 {"success": false, "error": "..."}
//! ```
//!
//! Non-2xx answers become failure payloads, not transport errors: the
//! service was reached and said no.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, instrument};

use promptbench_core::{
    application::{
        ApplicationError,
        ports::{ExecutionResponse, PromptExecutor},
    },
    error::{PromptbenchError, PromptbenchResult},
};

/// Used when the caller does not configure a timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("promptbench/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct RunPromptRequest<'a> {
    prompt: &'a str,
}

/// Production executor backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpExecutor {
    /// Create an executor for `endpoint` with a request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> PromptbenchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PromptbenchError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
        })
    }

    /// Send `Authorization: Bearer <key>` with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PromptExecutor for HttpExecutor {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, prompt_len = prompt.len()))]
    async fn execute(&self, prompt: &str) -> PromptbenchResult<ExecutionResponse> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&RunPromptRequest { prompt });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!("Sending prompt to execution service");
        let response = request.send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Execution service error");

            // Services often send the same error payload with a 4xx/5xx status.
            if let Ok(payload) = serde_json::from_str::<ExecutionResponse>(&body) {
                if !payload.success {
                    return Ok(payload);
                }
            }
            return Ok(ExecutionResponse::failure(format!("HTTP {status}: {body}")));
        }

        let payload: ExecutionResponse = response.json().await.map_err(|e| {
            ApplicationError::TransportFailed {
                reason: format!("invalid response body: {e}"),
            }
        })?;

        debug!(success = payload.success, "Execution service responded");
        Ok(payload)
    }
}

fn transport(e: reqwest::Error) -> PromptbenchError {
    let reason = if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        e.to_string()
    };
    ApplicationError::TransportFailed { reason }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn executor_for(server: &MockServer) -> HttpExecutor {
        HttpExecutor::new(format!("{}/run-prompt", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn posts_prompt_and_decodes_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/run-prompt"))
            .and(body_json(json!({ "prompt": "Say hi" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "content": "hi" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = executor_for(&server).await.execute("Say hi").await.unwrap();
        assert_eq!(response, ExecutionResponse::success("hi"));
    }

    #[tokio::test]
    async fn sends_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "content": "ok" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let executor = executor_for(&server).await.with_api_key("secret");
        assert!(executor.execute("x").await.unwrap().success);
    }

    #[tokio::test]
    async fn service_error_payload_is_a_failure_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": false, "error": "rate limited" })),
            )
            .mount(&server)
            .await;

        let response = executor_for(&server).await.execute("x").await.unwrap();
        assert_eq!(response, ExecutionResponse::failure("rate limited"));
    }

    #[tokio::test]
    async fn non_2xx_status_is_a_failure_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let response = executor_for(&server).await.execute("x").await.unwrap();
        assert!(!response.success);
        assert!(response.error.unwrap().contains("maintenance"));
    }

    #[tokio::test]
    async fn non_2xx_with_error_payload_keeps_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "success": false, "error": "model crashed" })),
            )
            .mount(&server)
            .await;

        let response = executor_for(&server).await.execute("x").await.unwrap();
        assert_eq!(response.error.as_deref(), Some("model crashed"));
    }

    #[tokio::test]
    async fn garbage_body_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = executor_for(&server).await.execute("x").await.unwrap_err();
        assert!(matches!(
            err,
            PromptbenchError::Application(ApplicationError::TransportFailed { .. })
        ));
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "content": "late" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let executor = HttpExecutor::new(
            format!("{}/run-prompt", server.uri()),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = executor.execute("x").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Port 9 (discard) is essentially never listening on loopback.
        let executor =
            HttpExecutor::new("http://127.0.0.1:9/run-prompt", Duration::from_secs(2)).unwrap();
        assert!(executor.execute("x").await.is_err());
    }
}
