//! CLI argument definitions using the clap derive API.
//!
//! This module is the only place that knows about argument names, aliases,
//! help text and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use promptbench_core::domain::is_valid_variable_name;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "promptbench",
    bin_name = "promptbench",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{270e} Prompt template workbench",
    long_about = "promptbench finds {{variable}} placeholders in prompt templates, \
                  fills them in, and runs the result against a text-generation endpoint.",
    after_help = "EXAMPLES:\n\
        \x20 promptbench vars prompt.txt\n\
        \x20 promptbench compile prompt.txt --var name=Bob --var tone=friendly\n\
        \x20 echo 'Hi {{name}}' | promptbench run - --var name=Ada --preview\n\
        \x20 promptbench completions bash > ~/.local/share/bash-completion/completions/promptbench",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the variables a template uses.
    #[command(
        visible_alias = "v",
        about = "List template variables",
        after_help = "EXAMPLES:\n\
            \x20 promptbench vars prompt.txt\n\
            \x20 promptbench vars prompt.txt --format json\n\
            \x20 cat prompt.txt | promptbench vars -"
    )]
    Vars(VarsArgs),

    /// Substitute variables and print the result.
    #[command(
        visible_alias = "c",
        about = "Compile a template",
        after_help = "EXAMPLES:\n\
            \x20 promptbench compile prompt.txt --var name=Bob\n\
            \x20 promptbench compile prompt.txt --var name=   # prints [name]"
    )]
    Compile(CompileArgs),

    /// Insert a placeholder at a character offset.
    #[command(
        about = "Insert a {{variable}} placeholder",
        after_help = "EXAMPLES:\n\
            \x20 promptbench insert prompt.txt --offset 6 --name user\n\
            \x20 promptbench insert prompt.txt --offset 7 --name user --trigger\n\
            \x20 promptbench insert prompt.txt --offset 0   # inserts variable_N"
    )]
    Insert(InsertArgs),

    /// Compile and execute against the configured endpoint.
    #[command(
        visible_alias = "r",
        about = "Run a compiled prompt",
        after_help = "EXAMPLES:\n\
            \x20 promptbench run prompt.txt --var topic=rust\n\
            \x20 promptbench run prompt.txt --var topic=rust --preview\n\
            \x20 promptbench run prompt.txt --mock\n\
            \x20 promptbench run --id <ID> --var topic=rust"
    )]
    Run(RunArgs),

    /// Save a template and its values to the prompt store.
    #[command(
        about = "Save a prompt",
        after_help = "EXAMPLES:\n\
            \x20 promptbench save prompt.txt --title \"Code review\" --var language=rust\n\
            \x20 promptbench save prompt.txt --title \"Code review\" -d \"Strict reviewer\""
    )]
    Save(SaveArgs),

    /// Inspect saved prompts.
    #[command(
        visible_alias = "ls",
        about = "List and manage saved prompts",
        after_help = "EXAMPLES:\n\
            \x20 promptbench prompts\n\
            \x20 promptbench prompts list --format json\n\
            \x20 promptbench prompts list --search review\n\
            \x20 promptbench prompts show <ID>\n\
            \x20 promptbench prompts rm <ID>"
    )]
    Prompts(PromptsArgs),

    /// Initialise a promptbench configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 promptbench init           # platform config directory\n\
            \x20 promptbench init --local   # ./.promptbench.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 promptbench completions bash > ~/.local/share/bash-completion/completions/promptbench\n\
            \x20 promptbench completions zsh  > ~/.zfunc/_promptbench\n\
            \x20 promptbench completions fish > ~/.config/fish/completions/promptbench.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 promptbench config get executor.endpoint\n\
            \x20 promptbench config list\n\
            \x20 promptbench config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where the template text comes from.
#[derive(Debug, Args)]
pub struct TemplateArg {
    /// Template file, or `-` to read standard input.
    #[arg(value_name = "TEMPLATE", help = "Template file path, or - for stdin")]
    pub template: PathBuf,
}

/// Repeatable `--var name=value` bindings.
#[derive(Debug, Args)]
pub struct VarArgs {
    /// Bind a variable. `name=` binds an empty value.
    #[arg(
        long = "var",
        value_name = "NAME=VALUE",
        value_parser = parse_binding,
        help = "Bind a variable (repeatable)"
    )]
    pub vars: Vec<(String, String)>,
}

/// Parse `name=value`, splitting at the first `=`.
pub fn parse_binding(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if !is_valid_variable_name(name) {
        return Err(format!(
            "'{name}' is not a valid variable name (letters, digits, underscore)"
        ));
    }
    Ok((name.to_owned(), value.to_owned()))
}

// ── vars ──────────────────────────────────────────────────────────────────────

/// Arguments for `promptbench vars`.
#[derive(Debug, Args)]
pub struct VarsArgs {
    #[command(flatten)]
    pub source: TemplateArg,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One entry per line.
    List,
    /// JSON array.
    Json,
}

// ── compile ───────────────────────────────────────────────────────────────────

/// Arguments for `promptbench compile`.
#[derive(Debug, Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub source: TemplateArg,

    #[command(flatten)]
    pub bindings: VarArgs,
}

// ── insert ────────────────────────────────────────────────────────────────────

/// Arguments for `promptbench insert`.
#[derive(Debug, Args)]
pub struct InsertArgs {
    #[command(flatten)]
    pub source: TemplateArg,

    /// Cursor position in characters. Clamped to the template length.
    #[arg(long = "offset", value_name = "N", help = "Cursor offset in characters")]
    pub offset: usize,

    /// Variable name. Defaults to the next `variable_N`.
    #[arg(long = "name", value_name = "NAME", help = "Variable name to insert")]
    pub name: Option<String>,

    /// Treat a `{` just before the cursor as a typed trigger and replace it.
    #[arg(long = "trigger", help = "Replace a preceding '{' typed at the cursor")]
    pub trigger: bool,
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `promptbench run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Template file, or `-` to read standard input.
    #[arg(
        value_name = "TEMPLATE",
        required_unless_present = "id",
        help = "Template file path, or - for stdin"
    )]
    pub template: Option<PathBuf>,

    /// Run a saved prompt and record the run on it.
    #[arg(
        long = "id",
        value_name = "ID",
        conflicts_with_all = ["template", "preview"],
        help = "Run the saved prompt with this id"
    )]
    pub id: Option<String>,

    #[command(flatten)]
    pub bindings: VarArgs,

    /// Use the single-run preview session.
    #[arg(long = "preview", help = "Run through the one-shot preview session")]
    pub preview: bool,

    /// Answer locally instead of calling the endpoint.
    #[arg(long = "mock", help = "Use the offline mock executor")]
    pub mock: bool,

    /// Override `executor.endpoint`.
    #[arg(long = "endpoint", value_name = "URL", help = "Execution endpoint URL")]
    pub endpoint: Option<String>,

    /// Override `executor.timeout_secs`.
    #[arg(long = "timeout", value_name = "SECS", help = "Request timeout in seconds")]
    pub timeout: Option<u64>,
}

// ── save ──────────────────────────────────────────────────────────────────────

/// Arguments for `promptbench save`.
#[derive(Debug, Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub source: TemplateArg,

    #[command(flatten)]
    pub bindings: VarArgs,

    /// Title shown in `promptbench prompts`.
    #[arg(short = 't', long = "title", value_name = "TITLE", help = "Prompt title")]
    pub title: String,

    /// Short note shown by `promptbench prompts show` and matched by `--search`.
    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "Prompt description"
    )]
    pub description: Option<String>,

    /// Overwrite an existing saved prompt instead of creating a new one.
    #[arg(long = "id", value_name = "ID", help = "Update the prompt with this id")]
    pub id: Option<String>,
}

// ── prompts ───────────────────────────────────────────────────────────────────

/// Arguments for `promptbench prompts`.
#[derive(Debug, Args)]
pub struct PromptsArgs {
    /// Defaults to `list`.
    #[command(subcommand)]
    pub command: Option<PromptsCommands>,
}

/// Subcommands for `promptbench prompts`.
#[derive(Debug, Subcommand)]
pub enum PromptsCommands {
    /// List saved prompts, most recent first.
    List {
        #[arg(long = "format", value_enum, default_value = "table")]
        format: ListFormat,

        /// Case-insensitive match on title or description.
        #[arg(short = 's', long = "search", value_name = "QUERY")]
        search: Option<String>,
    },
    /// Print a saved prompt's template and values.
    Show {
        /// Prompt id.
        id: String,
    },
    /// Delete a saved prompt.
    #[command(visible_alias = "remove")]
    Rm {
        /// Prompt id.
        id: String,
    },
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `promptbench init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.promptbench.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `promptbench completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `promptbench config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `executor.endpoint`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_binding_splits_at_first_equals() {
        assert_eq!(
            parse_binding("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn parse_binding_allows_empty_value() {
        assert_eq!(
            parse_binding("name=").unwrap(),
            ("name".to_string(), String::new())
        );
    }

    #[test]
    fn parse_binding_rejects_bad_input() {
        assert!(parse_binding("novalue").is_err());
        assert!(parse_binding("bad-name=x").is_err());
        assert!(parse_binding("=x").is_err());
    }

    #[test]
    fn parse_compile_with_vars() {
        let cli = Cli::parse_from([
            "promptbench",
            "compile",
            "prompt.txt",
            "--var",
            "name=Bob",
            "--var",
            "tone=",
        ]);
        let Commands::Compile(args) = cli.command else {
            panic!("expected Compile command");
        };
        assert_eq!(args.bindings.vars.len(), 2);
        assert_eq!(args.bindings.vars[1], ("tone".into(), String::new()));
    }

    #[test]
    fn stdin_template_is_detected() {
        let cli = Cli::parse_from(["promptbench", "vars", "-"]);
        let Commands::Vars(args) = cli.command else {
            panic!("expected Vars command");
        };
        assert_eq!(args.source.template, PathBuf::from("-"));
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn run_flags() {
        let cli = Cli::parse_from([
            "promptbench", "run", "p.txt", "--preview", "--mock", "--timeout", "5",
        ]);
        let Commands::Run(args) = cli.command else {
            panic!("expected Run command");
        };
        assert!(args.preview && args.mock);
        assert_eq!(args.timeout, Some(5));
    }

    #[test]
    fn run_takes_template_or_saved_id() {
        let cli = Cli::parse_from(["promptbench", "run", "--id", "abc", "--mock"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected Run command");
        };
        assert_eq!(args.id.as_deref(), Some("abc"));
        assert!(args.template.is_none());

        assert!(Cli::try_parse_from(["promptbench", "run"]).is_err());
        assert!(Cli::try_parse_from(["promptbench", "run", "p.txt", "--id", "abc"]).is_err());
        assert!(Cli::try_parse_from(["promptbench", "run", "--id", "abc", "--preview"]).is_err());
    }

    #[test]
    fn prompts_list_search() {
        let cli = Cli::parse_from(["promptbench", "prompts", "list", "--search", "Review"]);
        let Commands::Prompts(PromptsArgs {
            command: Some(PromptsCommands::List { search, .. }),
        }) = cli.command
        else {
            panic!("expected prompts list");
        };
        assert_eq!(search.as_deref(), Some("Review"));
    }

    #[test]
    fn prompts_defaults_to_list() {
        let cli = Cli::parse_from(["promptbench", "prompts"]);
        let Commands::Prompts(args) = cli.command else {
            panic!("expected Prompts command");
        };
        assert!(args.command.is_none());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["promptbench", "--quiet", "--verbose", "prompts"]);
        assert!(result.is_err());
    }
}
