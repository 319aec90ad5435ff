use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessorError {
    #[error("no accessor '{accessor}' for property '{property}'")]
    NotFound { property: String, accessor: String },
}

/// Reads one field of an entity as JSON
pub type Accessor<E> = fn(&E) -> Value;

/// Field accessors of an entity type, keyed by getter name.
///
/// Fields are registered by their snake_case name and stored under the
/// getter convention (`created_at` -> `getCreatedAt`), so lookups from
/// templates go through the same [`getter_name`] conversion. Matching is
/// ASCII case-insensitive.
pub struct AccessorTable<E> {
    getters: HashMap<String, Accessor<E>>,
}

impl<E> AccessorTable<E> {
    pub fn new() -> Self {
        Self {
            getters: HashMap::new(),
        }
    }

    pub fn with(mut self, field: &str, accessor: Accessor<E>) -> Self {
        self.getters
            .insert(getter_name(field).to_ascii_lowercase(), accessor);
        self
    }

    pub fn get(&self, property: &str) -> Option<Accessor<E>> {
        self.getters
            .get(&getter_name(property).to_ascii_lowercase())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.getters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty()
    }
}

impl<E> Default for AccessorTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entity types exposing their fields to the metadata bridge
pub trait Accessible: Sized + 'static {
    fn accessors() -> &'static AccessorTable<Self>;
}

/// Build the getter name for a property: `get` followed by every
/// underscore-delimited segment with its first letter upper-cased.
pub fn getter_name(property: &str) -> String {
    let mut getter = String::with_capacity(property.len() + 3);
    getter.push_str("get");

    for part in property.split('_') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            getter.extend(first.to_uppercase());
            getter.push_str(chars.as_str());
        }
    }

    getter
}

/// Read `property` from `entity` through its accessor table.
///
/// A missing entity reads as `None` without touching any accessor.
pub fn read_field<E: Accessible>(
    property: &str,
    entity: Option<&E>,
) -> Result<Option<Value>, AccessorError> {
    let Some(entity) = entity else {
        return Ok(None);
    };

    let accessor = E::accessors()
        .get(property)
        .ok_or_else(|| AccessorError::NotFound {
            property: property.to_string(),
            accessor: getter_name(property),
        })?;

    Ok(Some(accessor(entity)))
}
