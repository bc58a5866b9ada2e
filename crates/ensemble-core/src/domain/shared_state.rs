//! Shared state: the one mutable object synchronized across applications.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The shared state object: an opaque field-name to JSON-value mapping.
///
/// Exactly one lives per running session, inside the global state store.
/// Mutation is a shallow merge: top-level keys are replaced wholesale,
/// nested objects are never deep-merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedState(Map<String, Value>);

impl SharedState {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from a JSON value. The state is always an object; any other
    /// value is treated as empty.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Shallow-merge `partial` into this state.
    pub fn merge(&mut self, partial: SharedState) {
        for (field, value) in partial.0 {
            self.0.insert(field, value);
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
