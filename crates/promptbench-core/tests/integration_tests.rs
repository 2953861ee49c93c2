//! Integration tests for promptbench-core.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use promptbench_core::{
    application::ApplicationError,
    domain::{DomainError, compile, extract_variables, insert_placeholder},
    prelude::*,
};

/// Records every prompt; answers from a fixed script.
#[derive(Clone, Default)]
struct ScriptedExecutor {
    calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl PromptExecutor for ScriptedExecutor {
    async fn execute(&self, prompt: &str) -> PromptbenchResult<ExecutionResponse> {
        self.calls.lock().unwrap().push(prompt.to_owned());
        if self.fail {
            Err(ApplicationError::TransportFailed {
                reason: "network down".into(),
            }
            .into())
        } else {
            Ok(ExecutionResponse::success(format!("ran: {prompt}")))
        }
    }
}

fn ids() -> Box<dyn IdGenerator> {
    let n = AtomicUsize::new(0);
    Box::new(move || format!("{}", n.fetch_add(1, Ordering::SeqCst)))
}

#[test]
fn substitution_example() {
    let t = "Hello {{name}}, your {{name}} is ready. {{other}}";
    let bindings = VariableBindings::new().with("name", "Bob");
    assert_eq!(compile(t, &bindings), "Hello Bob, your Bob is ready. {{other}}");
}

#[test]
fn first_occurrence_order() {
    assert_eq!(extract_variables("{{b}} {{a}} {{b}}").names(), ["b", "a"]);
}

#[test]
fn insertion_example() {
    assert_eq!(insert_placeholder("ab", 1, "x"), ("a{{x}}b".to_string(), 6));
}

#[test]
fn compiled_output_keeps_original_variable_set() {
    let t = "{{role}}: answer {{question}} in {{language}}";
    let before = extract_variables(t);

    let bindings: VariableBindings = before
        .iter()
        .map(|name| (name.as_str(), format!("value of {name}")))
        .collect();
    let compiled = compile(t, &bindings);

    assert!(extract_variables(compiled.as_str()).is_empty());
    assert_eq!(extract_variables(t), before);
}

#[tokio::test]
async fn preview_allows_exactly_one_remote_call() {
    let executor = ScriptedExecutor::default();
    let calls = Arc::clone(&executor.calls);

    let mut preview = PreviewSession::new("Explain {{topic}}", Box::new(executor));
    preview.set_variable("topic", "lifetimes").unwrap();

    let first = preview.run().await.unwrap();
    assert_eq!(first.text(), Some("ran: Explain lifetimes"));
    assert_eq!(preview.state(), RunState::Consumed);

    let second = preview.run().await.unwrap_err();
    assert!(matches!(
        second,
        PromptbenchError::Domain(DomainError::RunAlreadyConsumed)
    ));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn preview_failure_consumes_the_run() {
    let executor = ScriptedExecutor {
        fail: true,
        ..Default::default()
    };
    let calls = Arc::clone(&executor.calls);

    let mut preview = PreviewSession::new("Explain borrowing", Box::new(executor));
    assert!(preview.run().await.is_err());
    assert_eq!(preview.state(), RunState::Consumed);
    assert!(preview.run().await.is_err());
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn editor_runs_without_limit_and_follows_edits() {
    let executor = ScriptedExecutor::default();
    let calls = Arc::clone(&executor.calls);

    let mut editor = EditorSession::new("Translate {{text}}", Box::new(executor), ids());
    editor.set_value_by_name("text", "hola").unwrap();
    editor.run().await.unwrap();

    editor.set_content("Translate {{text}} into {{language}}");
    editor.set_value_by_name("language", "English").unwrap();
    editor.run().await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            "Translate hola".to_string(),
            "Translate hola into English".to_string()
        ]
    );
    assert_eq!(editor.run_count(), 2);
}
