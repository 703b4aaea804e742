//! Autotile configuration

use serde::{Deserialize, Serialize};

/// Default tile size in pixels
pub const DEFAULT_TILE_SIZE: u32 = 48;

/// Configuration for resolving autotile offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutotileConfig {
    /// Tile size in pixels (square tiles). Quadrants are half of this.
    pub tile_size: u32,
}

impl Default for AutotileConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl AutotileConfig {
    pub fn new(tile_size: u32) -> Self {
        Self { tile_size }
    }

    /// Size of one quadrant in pixels
    pub fn half_tile(&self) -> u32 {
        self.tile_size / 2
    }

    /// Quadrants need an even, non-zero tile size
    pub fn is_valid(&self) -> bool {
        self.tile_size > 0 && self.tile_size % 2 == 0
    }
}
