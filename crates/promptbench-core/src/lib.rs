//! promptbench Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for promptbench:
//! a `{{variable}}` template compiler plus the preview (single free run) and
//! editor (unlimited runs) sessions that wrap it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        promptbench-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (PreviewSession, EditorSession)      │
//! │        Run policy + orchestration       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Executor, IdGenerator, Store)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │  promptbench-adapters (Infrastructure)  │
//! │ (HttpExecutor, UuidGenerator, stores)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Template, VariableList, RunLimiter)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use promptbench_core::domain::{Template, VariableBindings};
//!
//! let template = Template::from("Hello {{name}}, your {{name}} is ready. {{other}}");
//! assert_eq!(template.variables().names(), ["name", "other"]);
//!
//! let bindings = VariableBindings::new().with("name", "Bob");
//! assert_eq!(
//!     template.compile(&bindings).as_str(),
//!     "Hello Bob, your Bob is ready. {{other}}"
//! );
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        EditorSession, PreviewSession, RunOutcome,
        ports::{ExecutionResponse, IdGenerator, PromptExecutor, PromptStore},
    };
    pub use crate::domain::{
        CompiledOutput, RunState, SavedPrompt, Template, VariableBindings, VariableItem,
        VariableList, VariableSet,
    };
    pub use crate::error::{PromptbenchError, PromptbenchResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
