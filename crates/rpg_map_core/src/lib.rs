//! Core data structures for rpg_map_editor
//!
//! This crate provides the fundamental types for representing RPG tile maps:
//! - `TileSelection` - A reference to one cell of a tileset image
//! - `TileStack` - The ordered tiles painted into one cell of one layer
//! - `MapLayer` / `LayerGrid` - The fixed layers and their cell grids
//! - `TileMap` - A complete map with layers and events
//! - `TileGrid` - The get/set primitives editing code talks to
//!
//! The map itself has no history awareness. Undo/redo lives in
//! `rpg_map_history`, visual tile resolution in `rpg_map_autotile`.

mod event;
mod layer;
mod map;
mod tile;

pub use event::MapEvent;
pub use layer::{LayerGrid, MapLayer};
pub use map::{TileGrid, TileMap};
pub use tile::{TileSelection, TileStack};

use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or saving maps
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid map shape: {0}")]
    InvalidShape(String),
}

/// Load a map from a JSON file
pub fn load_map(path: &Path) -> Result<TileMap, MapError> {
    let content = std::fs::read_to_string(path).map_err(|e| MapError::IoError(e.to_string()))?;

    TileMap::from_json(&content)
}

/// Save a map to a JSON file
pub fn save_map(map: &TileMap, path: &Path) -> Result<(), MapError> {
    let content = map.to_json()?;

    std::fs::write(path, content).map_err(|e| MapError::IoError(e.to_string()))?;

    Ok(())
}
