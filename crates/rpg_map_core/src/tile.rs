//! Tile selections and per-cell tile stacks

use serde::{Deserialize, Serialize};

/// A reference to a drawable tile: one cell of a tileset's grid.
///
/// Compared structurally. Two selections with the same tileset and
/// coordinates but different flags are different tiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSelection {
    /// Source tileset identifier (e.g. "A2", "B")
    pub tileset_id: String,
    /// Column within the tileset grid
    pub x: u32,
    /// Row within the tileset grid
    pub y: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_autotile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_wall: Option<bool>,
}

impl TileSelection {
    /// Create a plain (non-autotile) selection
    pub fn new(tileset_id: impl Into<String>, x: u32, y: u32) -> Self {
        Self {
            tileset_id: tileset_id.into(),
            x,
            y,
            is_autotile: None,
            is_wall: None,
        }
    }

    /// Create an autotile selection
    pub fn autotile(tileset_id: impl Into<String>, x: u32, y: u32) -> Self {
        Self::new(tileset_id, x, y).with_autotile(true)
    }

    pub fn with_autotile(mut self, is_autotile: bool) -> Self {
        self.is_autotile = Some(is_autotile);
        self
    }

    pub fn with_wall(mut self, is_wall: bool) -> Self {
        self.is_wall = Some(is_wall);
        self
    }

    pub fn is_autotile(&self) -> bool {
        self.is_autotile.unwrap_or(false)
    }

    pub fn is_wall(&self) -> bool {
        self.is_wall.unwrap_or(false)
    }

    /// Whether `other` points at the same tileset cell, ignoring flags.
    ///
    /// This is the adjacency test autotiling uses.
    pub fn same_source(&self, other: &TileSelection) -> bool {
        self.tileset_id == other.tileset_id && self.x == other.x && self.y == other.y
    }
}

/// Ordered tiles occupying one cell on one layer. Index 0 is the bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileStack(Vec<TileSelection>);

impl TileStack {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a stack holding one tile
    pub fn single(tile: TileSelection) -> Self {
        Self(vec![tile])
    }

    pub fn from_tiles(tiles: Vec<TileSelection>) -> Self {
        Self(tiles)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The bottom-most tile, the one autotile adjacency is decided on
    pub fn bottom(&self) -> Option<&TileSelection> {
        self.0.first()
    }

    /// The most recently painted tile
    pub fn top(&self) -> Option<&TileSelection> {
        self.0.last()
    }

    /// Paint a tile on top of the stack
    pub fn push(&mut self, tile: TileSelection) {
        self.0.push(tile);
    }

    pub fn tiles(&self) -> &[TileSelection] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileSelection> {
        self.0.iter()
    }

    pub fn into_tiles(self) -> Vec<TileSelection> {
        self.0
    }
}

impl From<Vec<TileSelection>> for TileStack {
    fn from(tiles: Vec<TileSelection>) -> Self {
        Self(tiles)
    }
}

impl<'a> IntoIterator for &'a TileStack {
    type Item = &'a TileSelection;
    type IntoIter = std::slice::Iter<'a, TileSelection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
