//! Fixed map layers and their cell grids

use serde::{Deserialize, Serialize};

use crate::TileStack;

/// One of the fixed layers every map carries, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapLayer {
    Ground,
    Walls,
    Decoration,
    Highest,
    /// Marker layer drawn over event positions
    Events,
}

impl MapLayer {
    /// All layers in draw order
    pub const ALL: [MapLayer; 5] = [
        MapLayer::Ground,
        MapLayer::Walls,
        MapLayer::Decoration,
        MapLayer::Highest,
        MapLayer::Events,
    ];

    /// Position of this layer in draw order
    pub fn index(self) -> usize {
        match self {
            MapLayer::Ground => 0,
            MapLayer::Walls => 1,
            MapLayer::Decoration => 2,
            MapLayer::Highest => 3,
            MapLayer::Events => 4,
        }
    }

    /// Display name of the layer
    pub fn name(self) -> &'static str {
        match self {
            MapLayer::Ground => "Ground",
            MapLayer::Walls => "Walls",
            MapLayer::Decoration => "Decoration",
            MapLayer::Highest => "Highest",
            MapLayer::Events => "Events",
        }
    }
}

/// The cell grid of one layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerGrid {
    pub layer: MapLayer,
    /// Row-major cells - None means empty, never `Some` of an empty stack
    pub cells: Vec<Option<TileStack>>,
}

impl LayerGrid {
    /// Create an empty grid sized for a `width` x `height` map
    pub fn new(layer: MapLayer, width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            layer,
            cells: vec![None; size],
        }
    }

    /// Number of non-empty cells
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }
}
