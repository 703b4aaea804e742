//! Quadrant-based autotile resolver for RPG-style tilesets
//!
//! Autotiles are drawn as four independent quadrants. Each quadrant looks at
//! three neighbours (horizontal, vertical, diagonal) and picks a half-tile
//! sub-image out of the autotile's block in the tileset image, so painted
//! areas of the same tile blend into one continuous shape.
//!
//! # Features
//! - Blob (ground) autotiles with inner and outer corners
//! - Wall autotiles keyed on horizontal/vertical neighbours only
//! - Map edges treated as continuous terrain
//!
//! # Example
//!
//! ```rust,ignore
//! use rpg_map_autotile::{AutotileConfig, AutotileResolver, Quadrant};
//! use rpg_map_core::{MapLayer, TileMap, TileSelection};
//!
//! let map = TileMap::new("Field".to_string(), 20, 15);
//! let resolver = AutotileResolver::new(AutotileConfig::default());
//! let grass = TileSelection::autotile("A2", 0, 0);
//!
//! let top_left = Quadrant::TOP_LEFT;
//! let offset = resolver.resolve_quadrant_offset(&grass, (3, 4), top_left, &map, MapLayer::Ground);
//! ```

pub mod config;
pub mod resolver;
pub mod tables;

pub use config::AutotileConfig;
pub use resolver::{neighbor_matches, AutotileResolver, NeighborMatches, PixelOffset, Quadrant};
pub use tables::{half_tile_offset, AutotileFamily, HalfTile, NeighborCase};

// Re-export rpg_map_core
pub use rpg_map_core;
