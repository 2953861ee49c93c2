//! `promptbench run`: compile and execute a template.
//!
//! Without `--preview` the template runs through an editor session (no run
//! limit). With `--preview` it runs through a preview session, which allows
//! a single execution and rejects bindings for names the template lacks.
//! With `--id` a saved prompt is resumed in an editor session and the
//! completed run is written back to the store.

use serde::Serialize;
use tracing::{debug, info, instrument};

use promptbench_adapters::{JsonFilePromptStore, UuidGenerator};
use promptbench_core::{
    application::{
        EditorSession, PreviewSession, RunOutcome,
        ports::{PromptExecutor, PromptStore},
    },
    domain::{CompiledOutput, SavedPrompt, Template},
};

use crate::{
    cli::RunArgs,
    commands::{block_on, build_executor, prompt_store, read_template},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct RunReport<'a> {
    mode: &'static str,
    prompt: &'a str,
    output: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    run_count: Option<u32>,
}

/// What a session produced; `saved` is set when the run was recorded.
struct Finished {
    compiled: CompiledOutput,
    outcome: RunOutcome,
    saved: Option<SavedPrompt>,
}

enum Source {
    Text(Template),
    Saved(String),
}

#[instrument(skip_all, fields(preview = args.preview, mock = args.mock))]
pub fn execute(args: RunArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let source = match (args.id, &args.template) {
        (Some(id), _) => Source::Saved(id),
        (None, Some(path)) => Source::Text(read_template(path)?),
        (None, None) => {
            return Err(CliError::InvalidInput {
                message: "a TEMPLATE or --id is required".into(),
                source: None,
            });
        }
    };

    let store = prompt_store(&config);
    let mut executor_config = config.executor;
    if let Some(endpoint) = args.endpoint {
        executor_config.endpoint = endpoint;
    }
    if let Some(timeout) = args.timeout {
        executor_config.timeout_secs = timeout;
    }
    let executor = build_executor(&executor_config, args.mock)?;

    let spinner = output.spinner("Running prompt...");
    let result = match source {
        Source::Saved(id) => run_saved(&store, &id, args.bindings.vars, executor),
        Source::Text(template) if args.preview => {
            run_preview(template, args.bindings.vars, executor)
        }
        Source::Text(template) => run_editor(template, args.bindings.vars, executor),
    };
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let finished = result?;

    let mode = if args.preview { "preview" } else { "editor" };
    if output.is_json() {
        output.json(&RunReport {
            mode,
            prompt: finished.compiled.as_str(),
            output: finished.outcome.text(),
            id: finished.saved.as_ref().map(|p| p.id.as_str()),
            run_count: finished.saved.as_ref().map(|p| p.run_count),
        })?;
        return Ok(());
    }

    match &finished.outcome {
        RunOutcome::Completed(text) => {
            output.result(text)?;
            if args.preview {
                output.info("Preview run used")?;
            }
            if let Some(saved) = &finished.saved {
                output.info(&format!(
                    "Run {} recorded for '{}'",
                    saved.run_count, saved.title
                ))?;
            }
        }
        RunOutcome::Skipped => {
            output.warning("Compiled prompt is empty; nothing was sent")?;
        }
    }
    Ok(())
}

fn run_preview(
    template: Template,
    vars: Vec<(String, String)>,
    executor: Box<dyn PromptExecutor>,
) -> CliResult<Finished> {
    let mut session = PreviewSession::new(template, executor);
    for (name, value) in vars {
        session.set_variable(&name, value)?;
    }

    let compiled = session.compiled();
    let outcome = block_on(session.run())??;
    debug!(state = %session.state(), "Preview session finished");
    Ok(Finished {
        compiled,
        outcome,
        saved: None,
    })
}

fn run_editor(
    template: Template,
    vars: Vec<(String, String)>,
    executor: Box<dyn PromptExecutor>,
) -> CliResult<Finished> {
    let mut session = EditorSession::new(template, executor, Box::new(UuidGenerator));
    for (name, value) in vars {
        session.set_value_by_name(&name, value)?;
    }

    let compiled = session.compiled();
    let outcome = block_on(session.run())??;
    info!(runs = session.run_count(), "Editor session finished");
    Ok(Finished {
        compiled,
        outcome,
        saved: None,
    })
}

/// Only a completed run is written back; a skipped one changes nothing.
fn run_saved(
    store: &JsonFilePromptStore,
    id: &str,
    vars: Vec<(String, String)>,
    executor: Box<dyn PromptExecutor>,
) -> CliResult<Finished> {
    let mut session = EditorSession::from_saved(store.get(id)?, executor, Box::new(UuidGenerator));
    for (name, value) in vars {
        session.set_value_by_name(&name, value)?;
    }

    let compiled = session.compiled();
    let outcome = block_on(session.run())??;
    let saved = match outcome {
        RunOutcome::Completed(_) => {
            let title = session.title().to_owned();
            Some(session.save(store, title)?)
        }
        RunOutcome::Skipped => None,
    };
    info!(prompt_id = id, runs = session.run_count(), "Saved prompt run");
    Ok(Finished {
        compiled,
        outcome,
        saved,
    })
}
