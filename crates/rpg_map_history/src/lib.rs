//! Undo/redo history for tile map editing
//!
//! Edits are recorded as [`TileDelta`]s, full before/after snapshots of one
//! cell's stack, grouped into [`HistoryEntry`]s that undo and redo as a unit.
//! Replaying a delta writes the snapshot back into the map and tells the
//! renderer about the cell and its eight neighbours, whose autotile
//! variants may have changed with it.
//!
//! The history never reaches for an "active map". Every replay takes a
//! [`SyncTarget`] naming the grid and renderer to work on.
//!
//! # Example
//!
//! ```rust,ignore
//! use rpg_map_core::{MapLayer, TileMap, TileSelection};
//! use rpg_map_history::{tools, RenderQueue, SyncTarget, TileHistory};
//!
//! let mut map = TileMap::new("Field".to_string(), 20, 15);
//! let mut queue = RenderQueue::new();
//! let mut history = TileHistory::default();
//!
//! history.begin_entry("Paint");
//! tools::paint_tile(
//!     &mut history,
//!     &mut SyncTarget::new(&mut map, &mut queue),
//!     MapLayer::Ground,
//!     3,
//!     4,
//!     TileSelection::autotile("A2", 0, 0),
//! );
//! history.commit_entry();
//!
//! history.undo(&mut SyncTarget::new(&mut map, &mut queue));
//! ```

pub mod config;
pub mod delta;
pub mod history;
pub mod sync;
pub mod tools;

pub use config::{ConfigError, HistoryConfig, DEFAULT_MAX_ENTRIES};
pub use delta::{EntryId, HistoryEntry, ReplayDirection, TileDelta};
pub use history::TileHistory;
pub use sync::{RenderQueue, RenderRequest, RenderSync, SyncTarget, NEIGHBOR_OFFSETS};

// Re-export rpg_map_core
pub use rpg_map_core;
