//! `promptbench config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config.redacted(), &key)?;
            output.result(&value)?;
        }

        ConfigCommands::List => {
            let redacted = config.redacted();
            if output.is_json() {
                output.json(&redacted)?;
            } else {
                let serialised =
                    toml::to_string_pretty(&redacted).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.header("Current Configuration:")?;
                output.result(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.result(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "executor.endpoint" => Ok(config.executor.endpoint.clone()),
        "executor.api_key" => Ok(config.executor.api_key.clone().unwrap_or_default()),
        "executor.timeout_secs" => Ok(config.executor.timeout_secs.to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "store.directory" => Ok(config.store_directory().display().to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "executor.timeout_secs").unwrap(), "60");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn api_key_is_never_printed() {
        let mut cfg = AppConfig::default();
        cfg.executor.api_key = Some("sk-live".into());
        let shown = get_config_value(&cfg.redacted(), "executor.api_key").unwrap();
        assert!(!shown.contains("sk-live"));
    }

    #[test]
    fn store_directory_prefers_configured_value() {
        let mut cfg = AppConfig::default();
        cfg.store.directory = Some(PathBuf::from("/srv/prompts"));
        assert_eq!(
            get_config_value(&cfg, "store.directory").unwrap(),
            "/srv/prompts"
        );
    }
}
