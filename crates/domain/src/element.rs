//! Element: an opaque handle to a UI node on the device under test.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, ValidationError};

/// A UI node as reported by a backend.
///
/// The handle is only meaningful to the backend that produced it and only as
/// long as the device's UI tree has not changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub parent_id: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl Element {
    /// Create a builder for constructing an [`Element`].
    #[must_use]
    pub fn builder() -> ElementBuilder {
        ElementBuilder::default()
    }

    /// Look up a property value by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Whether `ancestor_id` is a strict ancestor of this element, judged by
    /// dotted path ids (`0.2` is an ancestor of `0.2.1`).
    #[must_use]
    pub fn is_descendant_of(&self, ancestor_id: &str) -> bool {
        self.id
            .strip_prefix(ancestor_id)
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// Step-by-step builder for [`Element`].
#[derive(Debug, Default)]
pub struct ElementBuilder {
    id: Option<String>,
    parent_id: Option<String>,
    properties: BTreeMap<String, String>,
}

impl ElementBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Consume the builder and return an [`Element`].
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Validation`] if `id` is missing or empty.
    pub fn build(self) -> Result<Element, DriverError> {
        let id = self.id.unwrap_or_default();
        if id.is_empty() {
            return Err(ValidationError::EmptyElementId.into());
        }
        Ok(Element {
            id,
            parent_id: self.parent_id,
            properties: self.properties,
        })
    }
}
