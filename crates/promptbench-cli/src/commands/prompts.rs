//! `promptbench prompts`: list, show and delete saved prompts.

use promptbench_core::{application::ports::PromptStore, domain::SavedPrompt};

use crate::{
    cli::{ListFormat, PromptsArgs, PromptsCommands},
    commands::prompt_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: PromptsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let store = prompt_store(&config);

    match args.command.unwrap_or(PromptsCommands::List {
        format: ListFormat::Table,
        search: None,
    }) {
        PromptsCommands::List { format, search } => {
            let mut prompts = store.list()?;
            if let Some(query) = &search {
                prompts.retain(|p| p.matches(query));
            }

            if output.is_json() || format == ListFormat::Json {
                output.json(&prompts)?;
            } else if prompts.is_empty() {
                match &search {
                    Some(query) => output.info(&format!("No saved prompts match '{query}'"))?,
                    None => {
                        output.info(&format!("No saved prompts in {}", store.root().display()))?
                    }
                }
            } else {
                list(&prompts, format, &output)?;
            }
        }

        PromptsCommands::Show { id } => {
            let prompt = store.get(&id)?;
            if output.is_json() {
                output.json(&prompt)?;
            } else {
                show(&prompt, &output)?;
            }
        }

        PromptsCommands::Rm { id } => {
            store.remove(&id)?;
            output.success(&format!("Removed prompt {id}"))?;
        }
    }

    Ok(())
}

fn list(prompts: &[SavedPrompt], format: ListFormat, output: &OutputManager) -> CliResult<()> {
    if format == ListFormat::List {
        for prompt in prompts {
            output.result(&format!("{}\t{}", prompt.id, prompt.title))?;
        }
        return Ok(());
    }

    output.header("Saved prompts:")?;
    for prompt in prompts {
        let detail = format!(
            "{} variables, {} runs, updated {}",
            prompt.variables.len(),
            prompt.run_count,
            prompt.updated_at.format("%Y-%m-%d %H:%M")
        );
        output.result(&format!(
            "  {}  {}  {}",
            prompt.id,
            prompt.title,
            output.dim(&detail)
        ))?;
    }
    Ok(())
}

fn show(prompt: &SavedPrompt, output: &OutputManager) -> CliResult<()> {
    output.header(&prompt.title)?;
    output.print(&output.dim(&format!("id: {}", prompt.id)))?;
    if let Some(description) = &prompt.description {
        output.print(description)?;
    }
    output.result(prompt.content.as_str())?;

    if !prompt.variables.is_empty() {
        output.header("Variables:")?;
        for item in &prompt.variables {
            output.result(&format!("  {} = {}", item.name, item.value))?;
        }
    }
    if let Some(at) = prompt.last_run_at {
        output.print(&output.dim(&format!(
            "last run {} ({} total)",
            at.format("%Y-%m-%d %H:%M"),
            prompt.run_count
        )))?;
    }
    Ok(())
}
