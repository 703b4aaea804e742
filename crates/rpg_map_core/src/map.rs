//! The tile map and the grid primitives editing code uses

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LayerGrid, MapError, MapEvent, MapLayer, TileSelection, TileStack};

/// Read/write access to the tile stacks of a map.
///
/// Coordinates are signed so callers can probe neighbours at the map edge
/// without underflow. Out-of-range reads return `None` and out-of-range
/// writes are ignored.
pub trait TileGrid {
    /// Map size as (width, height) in cells
    fn dimensions(&self) -> (u32, u32);

    /// Get the stack at a cell, `None` if empty or out of range
    fn get_stack(&self, layer: MapLayer, x: i32, y: i32) -> Option<&TileStack>;

    /// Replace the whole stack at a cell. An empty stack clears the cell.
    fn set_stack(&mut self, layer: MapLayer, x: i32, y: i32, stack: Option<TileStack>);

    /// Check whether a cell lies inside the map
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.dimensions();
        x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
    }
}

/// A complete map: fixed layers of tile stacks plus events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    pub id: Uuid,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// One grid per `MapLayer`, in draw order
    pub layers: Vec<LayerGrid>,
    #[serde(default)]
    pub events: Vec<MapEvent>,
}

impl TileMap {
    /// Create an empty map with every layer allocated
    pub fn new(name: String, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            width,
            height,
            layers: MapLayer::ALL
                .iter()
                .map(|&layer| LayerGrid::new(layer, width, height))
                .collect(),
            events: Vec::new(),
        }
    }

    /// Row-major index of a cell, `None` when out of range
    pub fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Number of cells per layer, `None` if `width * height` overflows
    pub fn cell_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Get the grid for a layer
    pub fn layer(&self, layer: MapLayer) -> Option<&LayerGrid> {
        self.layers.iter().find(|g| g.layer == layer)
    }

    fn layer_mut(&mut self, layer: MapLayer) -> Option<&mut LayerGrid> {
        self.layers.iter_mut().find(|g| g.layer == layer)
    }

    /// The bottom tile of a cell's stack
    pub fn bottom_tile(&self, layer: MapLayer, x: i32, y: i32) -> Option<&TileSelection> {
        self.get_stack(layer, x, y).and_then(|s| s.bottom())
    }

    /// Empty every cell of a layer
    pub fn clear_layer(&mut self, layer: MapLayer) {
        if let Some(grid) = self.layer_mut(layer) {
            grid.clear();
        }
    }

    /// Add an event
    pub fn add_event(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    /// Events standing on a cell
    pub fn events_at(&self, x: i32, y: i32) -> impl Iterator<Item = &MapEvent> {
        self.events.iter().filter(move |e| e.is_at(x, y))
    }

    /// Check the grid shape invariant: every layer present once, each with
    /// exactly `width * height` cells.
    pub fn validate(&self) -> Result<(), MapError> {
        let size = self.cell_count().ok_or_else(|| {
            MapError::InvalidShape(format!(
                "{}x{} cells do not fit in memory",
                self.width, self.height
            ))
        })?;
        for layer in MapLayer::ALL {
            let count = self.layers.iter().filter(|g| g.layer == layer).count();
            if count != 1 {
                return Err(MapError::InvalidShape(format!(
                    "layer {} appears {} times",
                    layer.name(),
                    count
                )));
            }
        }
        for grid in &self.layers {
            if grid.cells.len() != size {
                return Err(MapError::InvalidShape(format!(
                    "layer {} has {} cells, expected {}x{} = {}",
                    grid.layer.name(),
                    grid.cells.len(),
                    self.width,
                    self.height,
                    size
                )));
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Parse a map from JSON, checking the grid shape.
    ///
    /// Layers are put back into draw order and stored empty stacks are
    /// turned into empty cells.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let mut map: TileMap =
            serde_json::from_str(json).map_err(|e| MapError::ParseError(e.to_string()))?;

        map.validate()?;
        map.layers.sort_by_key(|g| g.layer.index());
        for grid in &mut map.layers {
            for cell in &mut grid.cells {
                if cell.as_ref().is_some_and(|s| s.is_empty()) {
                    *cell = None;
                }
            }
        }

        Ok(map)
    }

    /// Serialize the map to pretty JSON
    pub fn to_json(&self) -> Result<String, MapError> {
        serde_json::to_string_pretty(self).map_err(|e| MapError::ParseError(e.to_string()))
    }
}

impl TileGrid for TileMap {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn get_stack(&self, layer: MapLayer, x: i32, y: i32) -> Option<&TileStack> {
        let idx = self.cell_index(x, y)?;
        self.layer(layer)?.cells.get(idx)?.as_ref()
    }

    fn set_stack(&mut self, layer: MapLayer, x: i32, y: i32, stack: Option<TileStack>) {
        let Some(idx) = self.cell_index(x, y) else {
            return;
        };
        let Some(grid) = self.layer_mut(layer) else {
            return;
        };
        if let Some(cell) = grid.cells.get_mut(idx) {
            *cell = stack.filter(|s| !s.is_empty());
        }
    }
}
