//! `promptbench insert`: put a `{{name}}` placeholder at a cursor offset.

use serde::Serialize;

use promptbench_core::domain::{
    complete_trigger, insert_placeholder, is_valid_variable_name, next_variable_name,
};

use crate::{
    cli::InsertArgs,
    commands::read_template,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct InsertReport<'a> {
    template: &'a str,
    cursor: usize,
}

pub fn execute(args: InsertArgs, output: OutputManager) -> CliResult<()> {
    let template = read_template(&args.source.template)?;

    let name = match args.name {
        Some(name) if is_valid_variable_name(&name) => name,
        Some(name) => {
            return Err(CliError::InvalidInput {
                message: format!(
                    "'{name}' is not a valid variable name (letters, digits, underscore)"
                ),
                source: None,
            });
        }
        None => next_variable_name(template.variables().len()),
    };

    if args.offset > template.char_len() {
        output.warning(&format!(
            "Offset {} is past the end; inserting at {}",
            args.offset,
            template.char_len()
        ))?;
    }

    let (text, cursor) = if args.trigger {
        complete_trigger(template.as_str(), args.offset, &name)
    } else {
        insert_placeholder(template.as_str(), args.offset, &name)
    };

    if output.is_json() {
        output.json(&InsertReport {
            template: &text,
            cursor,
        })?;
    } else {
        output.result(&text)?;
        output.info(&format!("cursor: {cursor}"))?;
    }
    Ok(())
}
