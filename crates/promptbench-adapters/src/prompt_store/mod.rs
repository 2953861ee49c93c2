//! Saved prompt storage.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFilePromptStore;
pub use memory::InMemoryPromptStore;

use promptbench_core::domain::SavedPrompt;

fn sort_recent_first(prompts: &mut [SavedPrompt]) {
    prompts.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
