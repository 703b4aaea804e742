//! The boundary between map data and the renderer
//!
//! After any write to a cell the renderer is told about the cell and about
//! its eight neighbours, since an autotile's variant depends on what
//! surrounds it.

use rpg_map_core::{MapLayer, TileGrid, TileStack};
use std::collections::BTreeSet;
use tracing::debug;

/// Offsets of the eight cells surrounding a cell, row by row
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Receives tile notifications after map data changes.
///
/// Implemented by the renderer. Whether it redraws immediately or on the
/// next frame is up to the implementation.
pub trait RenderSync {
    /// Redraw a cell with the given stack
    fn request_tile_update(&mut self, x: i32, y: i32, stack: &TileStack, layer: MapLayer);

    /// Remove whatever is drawn at a cell
    fn clear_tile_at(&mut self, x: i32, y: i32, layer: MapLayer);
}

/// A buffered render notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    Update {
        x: i32,
        y: i32,
        layer: MapLayer,
        stack: TileStack,
    },
    Clear {
        x: i32,
        y: i32,
        layer: MapLayer,
    },
}

impl RenderRequest {
    pub fn position(&self) -> (i32, i32) {
        match self {
            RenderRequest::Update { x, y, .. } | RenderRequest::Clear { x, y, .. } => (*x, *y),
        }
    }

    pub fn layer(&self) -> MapLayer {
        match self {
            RenderRequest::Update { layer, .. } | RenderRequest::Clear { layer, .. } => *layer,
        }
    }
}

/// Collects render notifications for a frame-driven renderer to drain
#[derive(Debug, Default)]
pub struct RenderQueue {
    requests: Vec<RenderRequest>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending request, oldest first
    pub fn drain(&mut self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn requests(&self) -> &[RenderRequest] {
        &self.requests
    }

    /// Distinct cells with pending requests, as (layer, x, y)
    pub fn dirty_cells(&self) -> BTreeSet<(MapLayer, i32, i32)> {
        self.requests
            .iter()
            .map(|r| {
                let (x, y) = r.position();
                (r.layer(), x, y)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl RenderSync for RenderQueue {
    fn request_tile_update(&mut self, x: i32, y: i32, stack: &TileStack, layer: MapLayer) {
        self.requests.push(RenderRequest::Update {
            x,
            y,
            layer,
            stack: stack.clone(),
        });
    }

    fn clear_tile_at(&mut self, x: i32, y: i32, layer: MapLayer) {
        self.requests.push(RenderRequest::Clear { x, y, layer });
    }
}

/// The grid and renderer a write or replay acts on.
///
/// Either side may be missing: without a grid nothing is written, without a
/// renderer data is written but nobody is notified.
pub struct SyncTarget<'a> {
    pub grid: Option<&'a mut dyn TileGrid>,
    pub render: Option<&'a mut dyn RenderSync>,
}

impl<'a> SyncTarget<'a> {
    pub fn new(grid: &'a mut dyn TileGrid, render: &'a mut dyn RenderSync) -> Self {
        Self {
            grid: Some(grid),
            render: Some(render),
        }
    }

    /// Write to a grid without notifying a renderer
    pub fn grid_only(grid: &'a mut dyn TileGrid) -> Self {
        Self {
            grid: Some(grid),
            render: None,
        }
    }

    /// No grid, no renderer. Replays only move history bookkeeping.
    pub fn detached() -> Self {
        Self {
            grid: None,
            render: None,
        }
    }

    pub fn has_grid(&self) -> bool {
        self.grid.is_some()
    }

    pub fn grid(&self) -> Option<&(dyn TileGrid + 'a)> {
        self.grid.as_deref()
    }

    /// Replace the whole stack at a cell, then notify the renderer about the
    /// cell and every painted neighbour on the same layer.
    ///
    /// Returns false without touching anything when there is no grid or the
    /// cell is out of range.
    pub fn write_stack(
        &mut self,
        layer: MapLayer,
        x: i32,
        y: i32,
        stack: Option<&TileStack>,
    ) -> bool {
        let Some(grid) = self.grid.as_deref_mut() else {
            return false;
        };
        if !grid.in_bounds(x, y) {
            return false;
        }

        let stack = stack.filter(|s| !s.is_empty());
        grid.set_stack(layer, x, y, stack.cloned());

        let Some(render) = self.render.as_deref_mut() else {
            debug!(
                x,
                y,
                layer = layer.name(),
                "no render sync attached, skipping notifications"
            );
            return true;
        };

        match stack {
            Some(stack) => render.request_tile_update(x, y, stack, layer),
            None => render.clear_tile_at(x, y, layer),
        }

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (nx, ny) = (x + dx, y + dy);
            if let Some(neighbor) = grid.get_stack(layer, nx, ny) {
                if !neighbor.is_empty() {
                    render.request_tile_update(nx, ny, neighbor, layer);
                }
            }
        }

        true
    }
}
