//! Directory-backed prompt store: one `<id>.json` file per prompt.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use promptbench_core::{
    application::{ApplicationError, ports::PromptStore},
    domain::SavedPrompt,
    error::{PromptbenchError, PromptbenchResult},
};

/// Prompts persisted as pretty-printed JSON under one directory.
///
/// The directory is created on first save. Files that fail to parse are
/// skipped by `list` with a warning.
#[derive(Debug, Clone)]
pub struct JsonFilePromptStore {
    root: PathBuf,
}

impl JsonFilePromptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PromptbenchResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ApplicationError::PromptNotFound { id: id.to_owned() }.into());
        }
        Ok(self.root.join(format!("{id}.json")))
    }

    fn read(path: &Path) -> PromptbenchResult<SavedPrompt> {
        let raw = fs::read_to_string(path).map_err(|e| store_failed(path, e))?;
        serde_json::from_str(&raw).map_err(|e| store_failed(path, e))
    }
}

impl PromptStore for JsonFilePromptStore {
    #[instrument(skip_all, fields(id = %prompt.id))]
    fn save(&self, prompt: SavedPrompt) -> PromptbenchResult<()> {
        let path = self.path_for(&prompt.id)?;
        fs::create_dir_all(&self.root).map_err(|e| store_failed(&self.root, e))?;

        // An unreadable record is an error, not a fresh prompt.
        let merged = if path.is_file() {
            Self::read(&path)?.updated_from(prompt)
        } else {
            prompt
        };

        let json = serde_json::to_string_pretty(&merged).map_err(|e| store_failed(&path, e))?;
        fs::write(&path, json).map_err(|e| store_failed(&path, e))?;
        debug!(path = %path.display(), "Saved prompt");
        Ok(())
    }

    fn get(&self, id: &str) -> PromptbenchResult<SavedPrompt> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(ApplicationError::PromptNotFound { id: id.to_owned() }.into());
        }
        Self::read(&path)
    }

    fn list(&self) -> PromptbenchResult<Vec<SavedPrompt>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut prompts = Vec::new();
        for walk_entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let walk_entry = walk_entry.map_err(|e| ApplicationError::StoreFailed {
                reason: e.to_string(),
            })?;
            let path = walk_entry.path();
            if !walk_entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }

            match Self::read(path) {
                Ok(prompt) => prompts.push(prompt),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable prompt"),
            }
        }

        super::sort_recent_first(&mut prompts);
        Ok(prompts)
    }

    fn remove(&self, id: &str) -> PromptbenchResult<()> {
        let path = self.path_for(id)?;
        fs::remove_file(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ApplicationError::PromptNotFound { id: id.to_owned() }.into()
            } else {
                store_failed(&path, e)
            }
        })
    }
}

fn store_failed(path: &Path, e: impl std::fmt::Display) -> PromptbenchError {
    ApplicationError::StoreFailed {
        reason: format!("{}: {}", path.display(), e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt_store::tests::prompt_at;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonFilePromptStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePromptStore::new(dir.path().join("prompts"));
        (dir, store)
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn save_writes_one_file_per_prompt() {
        let (_dir, store) = store();
        store.save(prompt_at("p1", "One", 1)).unwrap();
        store.save(prompt_at("p2", "Two", 2)).unwrap();

        assert!(store.root().join("p1.json").is_file());
        assert_eq!(store.get("p2").unwrap().title, "Two");
    }

    #[test]
    fn resave_keeps_created_at() {
        let (_dir, store) = store();
        let first = prompt_at("p1", "One", 1);
        let created = first.created_at;
        store.save(first).unwrap();

        let mut newer = prompt_at("p1", "Uno", 3);
        newer.created_at = newer.updated_at;
        store.save(newer).unwrap();

        let stored = store.get("p1").unwrap();
        assert_eq!(stored.title, "Uno");
        assert_eq!(stored.created_at, created);
    }

    #[test]
    fn save_over_corrupt_record_fails_and_leaves_it() {
        let (_dir, store) = store();
        fs::create_dir_all(store.root()).unwrap();
        let path = store.root().join("p1.json");
        fs::write(&path, "{ not json").unwrap();

        let err = store.save(prompt_at("p1", "One", 1)).unwrap_err();
        assert!(matches!(
            err,
            PromptbenchError::Application(ApplicationError::StoreFailed { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn list_sorts_and_skips_foreign_files() {
        let (_dir, store) = store();
        store.save(prompt_at("old", "Old", 1)).unwrap();
        store.save(prompt_at("new", "New", 7)).unwrap();
        fs::write(store.root().join("notes.txt"), "ignored").unwrap();
        fs::write(store.root().join("broken.json"), "{").unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[test]
    fn missing_and_path_like_ids_are_not_found() {
        let (_dir, store) = store();
        for id in ["absent", "../escape", ""] {
            assert!(matches!(
                store.get(id).unwrap_err(),
                PromptbenchError::Application(ApplicationError::PromptNotFound { .. })
            ));
        }
    }

    #[test]
    fn remove_deletes_file() {
        let (_dir, store) = store();
        store.save(prompt_at("p1", "One", 1)).unwrap();
        store.remove("p1").unwrap();
        assert!(!store.root().join("p1.json").exists());
        assert!(store.remove("p1").is_err());
    }
}
