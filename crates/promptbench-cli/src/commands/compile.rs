//! `promptbench compile`: substitute variables and print the result.

use serde::Serialize;

use promptbench_core::domain::VariableBindings;

use crate::{
    cli::CompileArgs, commands::read_template, error::CliResult, output::OutputManager,
};

#[derive(Serialize)]
struct CompileReport<'a> {
    variables: Vec<&'a str>,
    unbound: Vec<&'a str>,
    compiled: &'a str,
}

pub fn execute(args: CompileArgs, output: OutputManager) -> CliResult<()> {
    let template = read_template(&args.source.template)?;
    let variables = template.variables();
    let bindings: VariableBindings = args.bindings.vars.into_iter().collect();

    for (name, _) in bindings.iter() {
        if !variables.contains(name) {
            output.warning(&format!("'{name}' does not appear in the template"))?;
        }
    }

    let compiled = template.compile(&bindings);
    let unbound: Vec<&str> = variables
        .iter()
        .map(String::as_str)
        .filter(|name| !bindings.contains(name))
        .collect();

    if output.is_json() {
        output.json(&CompileReport {
            variables: variables.iter().map(String::as_str).collect(),
            unbound,
            compiled: compiled.as_str(),
        })?;
        return Ok(());
    }

    output.result(compiled.as_str())?;
    if !unbound.is_empty() {
        output.info(&format!("Left unbound: {}", unbound.join(", ")))?;
    }
    Ok(())
}
