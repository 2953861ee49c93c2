//! Editor Session - the prompt workbench.
//!
//! Owns the editable template text and the variable list. Every text change
//! reconciles the list (see [`crate::domain::variables`]). Runs are unlimited;
//! a failed run leaves the session usable.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ports::{IdGenerator, PromptExecutor, PromptStore},
        services::{RunOutcome, response_text},
    },
    domain::{
        CompiledOutput, DomainError, SavedPrompt, Template, VariableItem, VariableList,
        complete_trigger, insert_placeholder, is_valid_variable_name, next_variable_name,
    },
    error::PromptbenchResult,
};

/// Editable prompt with unlimited compile-and-execute.
pub struct EditorSession {
    id: String,
    title: String,
    description: Option<String>,
    content: Template,
    variables: VariableList,
    output: Option<String>,
    run_count: u32,
    last_run_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    executor: Box<dyn PromptExecutor>,
    ids: Box<dyn IdGenerator>,
}

impl EditorSession {
    /// Start a new, unsaved prompt.
    pub fn new(
        initial_content: impl Into<Template>,
        executor: Box<dyn PromptExecutor>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let mut session = Self {
            id: ids.next_id(),
            title: String::new(),
            description: None,
            content: Template::default(),
            variables: VariableList::new(),
            output: None,
            run_count: 0,
            last_run_at: None,
            created_at: Utc::now(),
            executor,
            ids,
        };
        session.set_content(initial_content);
        session
    }

    /// Resume editing a saved prompt, keeping its ids and values.
    pub fn from_saved(
        saved: SavedPrompt,
        executor: Box<dyn PromptExecutor>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let mut session = Self {
            id: saved.id,
            title: saved.title,
            description: saved.description,
            content: Template::default(),
            variables: VariableList::from_items(saved.variables),
            output: None,
            run_count: saved.run_count,
            last_run_at: saved.last_run_at,
            created_at: saved.created_at,
            executor,
            ids,
        };
        // Stored items may be stale relative to the stored text.
        session.set_content(saved.content);
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// `None` clears it.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.trim().is_empty());
    }

    pub fn content(&self) -> &Template {
        &self.content
    }

    pub fn variables(&self) -> &VariableList {
        &self.variables
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    /// Replace the text and reconcile the variable list.
    pub fn set_content(&mut self, content: impl Into<Template>) {
        self.content = content.into();
        let found = self.content.variables();
        let ids = &self.ids;
        self.variables.reconcile(&found, || ids.next_id());
        debug!(variables = self.variables.len(), "Variables reconciled");
    }

    /// Insert `{{name}}` at `cursor`; returns the new cursor.
    pub fn insert_variable(&mut self, cursor: usize, name: &str) -> PromptbenchResult<usize> {
        ensure_valid_name(name)?;
        let (text, cursor) = insert_placeholder(self.content.as_str(), cursor, name);
        self.set_content(text);
        Ok(cursor)
    }

    /// Finish a `{{` trigger at `cursor` with `name`; returns the new cursor.
    pub fn complete_trigger(&mut self, cursor: usize, name: &str) -> PromptbenchResult<usize> {
        ensure_valid_name(name)?;
        let (text, cursor) = complete_trigger(self.content.as_str(), cursor, name);
        self.set_content(text);
        Ok(cursor)
    }

    /// Insert a generated `variable_N` placeholder; returns the new cursor.
    pub fn add_new_variable(&mut self, cursor: usize) -> usize {
        let name = next_variable_name(self.variables.len());
        let (text, cursor) = insert_placeholder(self.content.as_str(), cursor, &name);
        self.set_content(text);
        cursor
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> PromptbenchResult<()> {
        Ok(self.variables.set_value(id, value)?)
    }

    pub fn set_value_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> PromptbenchResult<()> {
        Ok(self.variables.set_value_by_name(name, value)?)
    }

    /// Every listed variable is bound, so empty inputs compile to `[name]`.
    pub fn compiled(&self) -> CompiledOutput {
        self.content.compile(&self.variables.bindings())
    }

    /// Execute the compiled prompt. Blank prompts are skipped.
    #[instrument(skip_all, fields(prompt_id = %self.id, runs = self.run_count))]
    pub async fn run(&mut self) -> PromptbenchResult<RunOutcome> {
        let compiled = self.compiled();
        if compiled.is_blank() {
            warn!("Prompt is empty, nothing to run");
            return Ok(RunOutcome::Skipped);
        }

        let text = self
            .executor
            .execute(compiled.as_str())
            .await
            .and_then(response_text)?;

        self.run_count += 1;
        self.last_run_at = Some(Utc::now());
        self.output = Some(text.clone());
        info!(chars = text.len(), "Editor run completed");

        Ok(RunOutcome::Completed(text))
    }

    /// Current state as a storable record.
    pub fn snapshot(&self) -> SavedPrompt {
        SavedPrompt {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            variables: self.variables.items().to_vec(),
            compiled_content: self.compiled().into_string(),
            run_count: self.run_count,
            last_run_at: self.last_run_at,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// Persist under `title`; returns what was stored.
    #[instrument(skip_all, fields(prompt_id = %self.id))]
    pub fn save(
        &mut self,
        store: &dyn PromptStore,
        title: impl Into<String>,
    ) -> PromptbenchResult<SavedPrompt> {
        self.title = title.into();
        let snapshot = self.snapshot();
        store.save(snapshot.clone())?;
        info!(title = %snapshot.title, "Prompt saved");
        Ok(snapshot)
    }

    /// Items in display order.
    pub fn items(&self) -> &[VariableItem] {
        self.variables.items()
    }
}

fn ensure_valid_name(name: &str) -> Result<(), DomainError> {
    if is_valid_variable_name(name) {
        Ok(())
    } else {
        Err(DomainError::InvalidVariableName {
            name: name.to_owned(),
        })
    }
}
