//! `promptbench vars`: list the variables a template uses.

use crate::{
    cli::{ListFormat, VarsArgs},
    commands::read_template,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: VarsArgs, output: OutputManager) -> CliResult<()> {
    let template = read_template(&args.source.template)?;
    let variables = template.variables();

    if output.is_json() || args.format == ListFormat::Json {
        output.json(&variables)?;
        return Ok(());
    }

    match args.format {
        ListFormat::Table => {
            if variables.is_empty() {
                output.info("No {{variables}} found in template")?;
                return Ok(());
            }
            output.header(&format!("Variables ({}):", variables.len()))?;
            for (index, name) in variables.iter().enumerate() {
                output.result(&format!("  {:>2}. {}", index + 1, name))?;
            }
        }
        ListFormat::List | ListFormat::Json => {
            for name in &variables {
                output.result(name)?;
            }
        }
    }

    Ok(())
}
