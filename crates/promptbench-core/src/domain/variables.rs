//! Editor variable list and its reconciliation against a template.
//!
//! The editor shows one input per variable. Whenever the template text
//! changes the list is reconciled with the new [`VariableSet`]:
//!
//! - names still present keep their id and value
//! - names no longer present are dropped
//! - new names get a fresh id and an empty value
//!
//! and the result follows the variable set's first-occurrence order.

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    template::{VariableBindings, VariableSet},
};

/// One editor input: a variable and the value typed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableItem {
    pub id: String,
    pub name: String,
    pub value: String,
}

impl VariableItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: String::new(),
        }
    }
}

/// Reconcile `previous` with `variables`, drawing ids for new names from `next_id`.
pub fn reconcile(
    previous: &[VariableItem],
    variables: &VariableSet,
    mut next_id: impl FnMut() -> String,
) -> Vec<VariableItem> {
    variables
        .iter()
        .map(|name| {
            previous
                .iter()
                .find(|item| &item.name == name)
                .cloned()
                .unwrap_or_else(|| VariableItem::new(next_id(), name.clone()))
        })
        .collect()
}

/// Ordered list of editor variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableList {
    items: Vec<VariableItem>,
}

impl VariableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<VariableItem>) -> Self {
        Self { items }
    }

    /// Replace the list with its reconciliation against `variables`.
    pub fn reconcile(&mut self, variables: &VariableSet, next_id: impl FnMut() -> String) {
        self.items = reconcile(&self.items, variables, next_id);
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), DomainError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::UnknownVariable { key: id.to_owned() })?;
        item.value = value.into();
        Ok(())
    }

    pub fn set_value_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.name == name)
            .ok_or_else(|| DomainError::UnknownVariable {
                key: name.to_owned(),
            })?;
        item.value = value.into();
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&VariableItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Every listed variable is bound, so empty values compile to `[name]`.
    pub fn bindings(&self) -> VariableBindings {
        self.items
            .iter()
            .map(|item| (item.name.as_str(), item.value.as_str()))
            .collect()
    }

    pub fn items(&self) -> &[VariableItem] {
        &self.items
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<VariableItem> {
        self.items
    }
}
