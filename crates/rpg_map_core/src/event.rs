//! Map events (NPCs, doors, triggers) placed on cells

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// An event placed on a map cell.
///
/// Editing code only reads events, e.g. to decide what the events marker
/// layer shows. Their payload is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEvent {
    /// Unique identifier for this event
    pub id: Uuid,
    pub name: String,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,
}

impl MapEvent {
    /// Create a new event at a cell
    pub fn new(name: String, x: i32, y: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            x,
            y,
            properties: HashMap::new(),
        }
    }

    /// Set a property
    pub fn with_property(mut self, key: String, value: serde_json::Value) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Get a property
    pub fn get_property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}
