//! Command handlers, one module per subcommand.

pub mod compile;
pub mod completions;
pub mod config;
pub mod init;
pub mod insert;
pub mod prompts;
pub mod run;
pub mod save;
pub mod vars;

use std::future::Future;
use std::io::Read as _;
use std::path::Path;

use promptbench_adapters::{HttpExecutor, JsonFilePromptStore, MockExecutor};
use promptbench_core::{application::ports::PromptExecutor, domain::Template};
use tracing::debug;

use crate::{
    config::{AppConfig, ExecutorConfig},
    error::{CliResult, IntoCli},
};

/// Read the template from a file, or from stdin for `-`.
pub(crate) fn read_template(path: &Path) -> CliResult<Template> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_cli_context(|| "Failed to read template from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_cli_context(|| format!("Failed to read template '{}'", path.display()))?
    };
    debug!(chars = text.chars().count(), "Template loaded");
    Ok(Template::new(text))
}

/// The configured HTTP executor, or the offline mock.
pub(crate) fn build_executor(
    config: &ExecutorConfig,
    mock: bool,
) -> CliResult<Box<dyn PromptExecutor>> {
    if mock {
        debug!("Using mock executor");
        return Ok(Box::new(MockExecutor::new()));
    }

    let mut executor = HttpExecutor::new(config.endpoint.clone(), config.timeout())?;
    if let Some(key) = &config.api_key {
        executor = executor.with_api_key(key.clone());
    }
    debug!(endpoint = %config.endpoint, "Using HTTP executor");
    Ok(Box::new(executor))
}

pub(crate) fn prompt_store(config: &AppConfig) -> JsonFilePromptStore {
    JsonFilePromptStore::new(config.store_directory())
}

/// Drive one future to completion on a current-thread runtime.
pub(crate) fn block_on<F: Future>(future: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_cli_context(|| "Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
