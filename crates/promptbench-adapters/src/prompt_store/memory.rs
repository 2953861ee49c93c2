//! In-memory prompt store.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use promptbench_core::{
    application::{ApplicationError, ports::PromptStore},
    domain::SavedPrompt,
    error::PromptbenchResult,
};

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromptStore {
    inner: Arc<RwLock<HashMap<String, SavedPrompt>>>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PromptStore for InMemoryPromptStore {
    fn save(&self, prompt: SavedPrompt) -> PromptbenchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let merged = match inner.remove(&prompt.id) {
            Some(existing) => existing.updated_from(prompt),
            None => prompt,
        };
        inner.insert(merged.id.clone(), merged);
        Ok(())
    }

    fn get(&self, id: &str) -> PromptbenchResult<SavedPrompt> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::PromptNotFound { id: id.to_owned() }.into()
        })
    }

    fn list(&self) -> PromptbenchResult<Vec<SavedPrompt>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut prompts: Vec<SavedPrompt> = inner.values().cloned().collect();
        super::sort_recent_first(&mut prompts);
        Ok(prompts)
    }

    fn remove(&self, id: &str) -> PromptbenchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::PromptNotFound { id: id.to_owned() }.into())
    }
}
