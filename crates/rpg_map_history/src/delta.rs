//! Recorded cell changes and the entries that group them

use rpg_map_core::{MapLayer, TileGrid, TileStack};
use std::fmt;
use uuid::Uuid;

/// Which way a delta is being replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDirection {
    Undo,
    Redo,
}

/// One recorded change: full snapshots of a cell's stack before and after.
///
/// Snapshots, not diffs, so replay never has to rebuild a stack tile by tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDelta {
    pub x: i32,
    pub y: i32,
    pub layer: MapLayer,
    pub old_stack: Option<TileStack>,
    pub new_stack: Option<TileStack>,
}

impl TileDelta {
    /// Create a delta. Empty stacks are stored as `None`.
    pub fn new(
        x: i32,
        y: i32,
        layer: MapLayer,
        old_stack: Option<TileStack>,
        new_stack: Option<TileStack>,
    ) -> Self {
        Self {
            x,
            y,
            layer,
            old_stack: old_stack.filter(|s| !s.is_empty()),
            new_stack: new_stack.filter(|s| !s.is_empty()),
        }
    }

    /// Snapshot the current stack at a cell as the "before" side
    pub fn capture<G: TileGrid + ?Sized>(
        grid: &G,
        layer: MapLayer,
        x: i32,
        y: i32,
        new_stack: Option<TileStack>,
    ) -> Self {
        let old_stack = grid.get_stack(layer, x, y).cloned();
        Self::new(x, y, layer, old_stack, new_stack)
    }

    /// True when applying the delta would not change the cell
    pub fn is_noop(&self) -> bool {
        self.old_stack == self.new_stack
    }

    /// The snapshot to write when replaying in `direction`
    pub fn stack_for(&self, direction: ReplayDirection) -> Option<&TileStack> {
        match direction {
            ReplayDirection::Undo => self.old_stack.as_ref(),
            ReplayDirection::Redo => self.new_stack.as_ref(),
        }
    }
}

/// Unique identifier of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named group of deltas that undo and redo together
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: EntryId,
    /// Human-readable label shown in the Edit menu
    pub label: String,
    /// Deltas in the order they were recorded
    pub deltas: Vec<TileDelta>,
}

impl HistoryEntry {
    /// Create an empty entry with a fresh id
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            label: label.into(),
            deltas: Vec::new(),
        }
    }

    pub fn push(&mut self, delta: TileDelta) {
        self.deltas.push(delta);
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }
}
