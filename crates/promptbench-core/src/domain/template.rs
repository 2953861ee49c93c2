//! Template compiler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Template        "Hello {{name}}, your {{name}} is ready"   │
//! │   │                                                         │
//! │   ├── extract_variables() ──► VariableSet ["name"]          │
//! │   │                                                         │
//! │   └── compile(bindings)   ──► CompiledOutput                │
//! │                               "Hello Bob, your Bob is ready"│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Placeholder grammar
//!
//! A placeholder is `{{name}}` where `name` is one or more ASCII word
//! characters (`[A-Za-z0-9_]`). Anything else between the braces
//! (`{{first name}}`, `{{a-b}}`, `{{}}`) is ordinary text. Unclosed braces are
//! ordinary text. None of this is an error.
//!
//! ## Substitution rules
//!
//! | Binding state        | Output for `{{x}}` |
//! |----------------------|--------------------|
//! | `x = "value"`        | `value`            |
//! | `x = ""`             | `[x]`              |
//! | `x` not bound at all | `{{x}}` (literal)  |
//!
//! Compilation is a single left-to-right pass over the template, so a bound
//! value is never re-scanned: a value that itself contains `{{y}}` is emitted
//! verbatim and cannot pull in the binding for `y`.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Matches `{{name}}`; group 1 is the name.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is a valid regex")
});

/// Matches a whole string made of ASCII word characters.
static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("name pattern is a valid regex"));

/// Variable names offered by the editor's insert menu.
pub const SUGGESTED_VARIABLES: &[&str] = &[
    "task_description",
    "context",
    "requirements",
    "input_data",
    "output_format",
    "tone",
    "language",
    "constraints",
];

// ============================================================================
// Template
// ============================================================================

/// An immutable template string.
///
/// Edits never mutate a `Template` in place; the editor replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of characters (Unicode scalar values), the unit cursor offsets use.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// See [`extract_variables`].
    pub fn variables(&self) -> VariableSet {
        extract_variables(&self.0)
    }

    /// See [`compile`].
    pub fn compile(&self, bindings: &VariableBindings) -> CompiledOutput {
        compile(&self.0, bindings)
    }

    /// See [`insert_placeholder`].
    pub fn with_placeholder(&self, cursor: usize, name: &str) -> (Template, usize) {
        let (text, cursor) = insert_placeholder(&self.0, cursor, name);
        (Template(text), cursor)
    }
}

impl AsRef<str> for Template {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Template {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// VariableSet
// ============================================================================

/// Variable names of a template, unique, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableSet(Vec<String>);

impl VariableSet {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// VariableBindings
// ============================================================================

/// Values supplied for template variables.
///
/// A name may be bound to an empty string, which is distinct from not being
/// bound at all (see the module docs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableBindings(HashMap<String, String>);

impl VariableBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for VariableBindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for VariableBindings {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

// ============================================================================
// CompiledOutput
// ============================================================================

/// A template after substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledOutput(String);

impl CompiledOutput {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// `true` when there is nothing worth sending to an executor.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for CompiledOutput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompiledOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for CompiledOutput {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Collect placeholder names, unique, in order of first appearance.
pub fn extract_variables(template: &str) -> VariableSet {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_owned());
        }
    }
    VariableSet(names)
}

/// Substitute bound placeholders.
///
/// Bound to a non-empty value: the value. Bound to `""`: `[name]`.
/// Not bound: left as `{{name}}`.
pub fn compile(template: &str, bindings: &VariableBindings) -> CompiledOutput {
    let compiled = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[1];
        match bindings.get(name) {
            Some("") => format!("[{name}]"),
            Some(value) => value.to_owned(),
            None => caps[0].to_owned(),
        }
    });

    trace!(
        template_len = template.len(),
        bindings = bindings.len(),
        "Template compiled"
    );

    CompiledOutput(compiled.into_owned())
}

/// Insert `{{name}}` at a character offset.
///
/// Returns the new text and the cursor offset just past the inserted token.
/// Offsets past the end clamp to the end.
pub fn insert_placeholder(template: &str, cursor: usize, name: &str) -> (String, usize) {
    let cursor = cursor.min(template.chars().count());
    let at = byte_offset(template, cursor);
    let token = placeholder(name);

    let mut out = String::with_capacity(template.len() + token.len());
    out.push_str(&template[..at]);
    out.push_str(&token);
    out.push_str(&template[at..]);

    (out, cursor + token.chars().count())
}

/// Complete a `{{` trigger typed in the editor.
///
/// The editor intercepts the second `{` keystroke, so only one `{` sits
/// before the cursor. That brace is replaced by `{{name}}`. Without a
/// preceding `{` this is a plain [`insert_placeholder`].
pub fn complete_trigger(template: &str, cursor: usize, name: &str) -> (String, usize) {
    let cursor = cursor.min(template.chars().count());
    let preceded_by_brace = cursor > 0 && template.chars().nth(cursor - 1) == Some('{');
    if !preceded_by_brace {
        return insert_placeholder(template, cursor, name);
    }

    let start = byte_offset(template, cursor - 1);
    let end = byte_offset(template, cursor);
    let token = placeholder(name);

    let mut out = String::with_capacity(template.len() + token.len());
    out.push_str(&template[..start]);
    out.push_str(&token);
    out.push_str(&template[end..]);

    (out, cursor - 1 + token.chars().count())
}

/// `true` if `name` would be recognised inside `{{...}}`.
pub fn is_valid_variable_name(name: &str) -> bool {
    VARIABLE_NAME.is_match(name)
}

/// Name for the editor's "add variable" action, given how many exist.
pub fn next_variable_name(existing: usize) -> String {
    format!("variable_{}", existing + 1)
}

/// `{{name}}`
pub fn placeholder(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
