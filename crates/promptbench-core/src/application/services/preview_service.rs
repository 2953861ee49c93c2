//! Preview Session - one free run of a catalog prompt.
//!
//! The template comes from product data and never changes for the lifetime
//! of the session. The user fills variables, may compile any number of
//! times, and may execute exactly once:
//!
//! 1. A consumed (or in-flight) session rejects the run, no remote call
//! 2. A blank compiled prompt is skipped, the run stays available
//! 3. Otherwise the run is claimed, executed, and consumed whatever the result

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::PromptExecutor,
        services::{RunOutcome, response_text},
    },
    domain::{
        CompiledOutput, DomainError, RunCompletion, RunLimiter, RunState, Template,
        VariableBindings, VariableSet,
    },
    error::PromptbenchResult,
};

/// Run-limited compile-and-execute context for one template.
pub struct PreviewSession {
    template: Template,
    variables: VariableSet,
    bindings: VariableBindings,
    limiter: RunLimiter,
    output: Option<String>,
    executor: Box<dyn PromptExecutor>,
}

impl PreviewSession {
    /// Open a preview for `template`; variables start unbound.
    pub fn new(template: impl Into<Template>, executor: Box<dyn PromptExecutor>) -> Self {
        let template = template.into();
        let variables = template.variables();
        Self {
            template,
            variables,
            bindings: VariableBindings::new(),
            limiter: RunLimiter::new(),
            output: None,
            executor,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// One input per entry, in first-occurrence order.
    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn bindings(&self) -> &VariableBindings {
        &self.bindings
    }

    /// Bind a value. Only names that occur in the template are accepted.
    pub fn set_variable(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> PromptbenchResult<()> {
        if !self.variables.contains(name) {
            return Err(DomainError::UnknownVariable {
                key: name.to_owned(),
            }
            .into());
        }
        self.bindings.set(name, value);
        Ok(())
    }

    pub fn compiled(&self) -> CompiledOutput {
        self.template.compile(&self.bindings)
    }

    pub fn state(&self) -> RunState {
        self.limiter.state()
    }

    pub fn can_run(&self) -> bool {
        self.limiter.can_run()
    }

    /// Text from the successful run, if there was one.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Execute the compiled prompt, at most once per session.
    #[instrument(skip_all, fields(state = %self.limiter.state()))]
    pub async fn run(&mut self) -> PromptbenchResult<RunOutcome> {
        self.limiter.check()?;

        let compiled = self.compiled();
        if compiled.is_blank() {
            info!("Compiled prompt is blank, skipping execution");
            return Ok(RunOutcome::Skipped);
        }

        self.limiter.begin()?;
        let result = self
            .executor
            .execute(compiled.as_str())
            .await
            .and_then(response_text);

        match result {
            Ok(text) => {
                self.limiter.finish(RunCompletion::Succeeded);
                info!(chars = text.len(), "Preview run completed");
                self.output = Some(text.clone());
                Ok(RunOutcome::Completed(text))
            }
            Err(e) => {
                self.limiter.finish(RunCompletion::Failed);
                warn!(error = %e, "Preview run failed; the free run is used up");
                Err(e)
            }
        }
    }
}
