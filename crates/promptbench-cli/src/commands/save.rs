//! `promptbench save`: store a template and its values.

use promptbench_adapters::{MockExecutor, UuidGenerator};
use promptbench_core::application::{EditorSession, ports::PromptStore};

use crate::{
    cli::SaveArgs,
    commands::{prompt_store, read_template},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: SaveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let template = read_template(&args.source.template)?;
    let store = prompt_store(&config);
    // Saving never executes, so executor settings are not consulted.
    let executor = Box::new(MockExecutor::new());
    let ids = Box::new(UuidGenerator);

    let mut session = match &args.id {
        Some(id) => {
            let mut session = EditorSession::from_saved(store.get(id)?, executor, ids);
            session.set_content(template);
            session
        }
        None => EditorSession::new(template, executor, ids),
    };
    if args.description.is_some() {
        session.set_description(args.description);
    }
    for (name, value) in args.bindings.vars {
        session.set_value_by_name(&name, value)?;
    }

    let saved = session.save(&store, args.title)?;

    if output.is_json() {
        output.json(&saved)?;
    } else {
        output.result(&saved.id)?;
        output.success(&format!(
            "Saved '{}' ({} variables) to {}",
            saved.title,
            saved.variables.len(),
            store.root().display()
        ))?;
    }
    Ok(())
}
