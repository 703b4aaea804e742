//! Editing tools that record their changes into a [`TileHistory`]
//!
//! Each tool snapshots the cells it touches, writes through the same
//! [`SyncTarget::write_stack`] path replays use, and adds one delta per
//! changed cell to the open entry. Callers open and commit the entry so a
//! whole drag or fill undoes as one step.
//!
//! Tools return the number of cells they changed. Cells that already hold
//! the requested stack are skipped and record nothing.

use rpg_map_core::{MapLayer, TileSelection, TileStack};
use std::collections::HashSet;

use crate::delta::TileDelta;
use crate::history::TileHistory;
use crate::sync::SyncTarget;

/// Replace the stack at a cell with a single tile
pub fn paint_tile(
    history: &mut TileHistory,
    target: &mut SyncTarget<'_>,
    layer: MapLayer,
    x: i32,
    y: i32,
    tile: TileSelection,
) -> usize {
    set_cell(history, target, layer, x, y, Some(TileStack::single(tile)))
}

/// Paint a tile on top of the existing stack
pub fn stack_tile(
    history: &mut TileHistory,
    target: &mut SyncTarget<'_>,
    layer: MapLayer,
    x: i32,
    y: i32,
    tile: TileSelection,
) -> usize {
    let Some(grid) = target.grid() else {
        return 0;
    };
    let mut stack = grid.get_stack(layer, x, y).cloned().unwrap_or_default();
    if stack.top() == Some(&tile) {
        return 0;
    }
    stack.push(tile);
    set_cell(history, target, layer, x, y, Some(stack))
}

/// Clear a cell
pub fn erase_tile(
    history: &mut TileHistory,
    target: &mut SyncTarget<'_>,
    layer: MapLayer,
    x: i32,
    y: i32,
) -> usize {
    set_cell(history, target, layer, x, y, None)
}

/// Paint every cell of the rectangle spanned by two corners (inclusive).
///
/// The rectangle is clipped to the map first, so corners far outside it
/// cost nothing.
pub fn fill_rect(
    history: &mut TileHistory,
    target: &mut SyncTarget<'_>,
    layer: MapLayer,
    from: (i32, i32),
    to: (i32, i32),
    tile: TileSelection,
) -> usize {
    let Some(grid) = target.grid() else {
        return 0;
    };
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return 0;
    }
    let last_x = i32::try_from(width - 1).unwrap_or(i32::MAX);
    let last_y = i32::try_from(height - 1).unwrap_or(i32::MAX);

    let min_x = from.0.min(to.0).max(0);
    let max_x = from.0.max(to.0).min(last_x);
    let min_y = from.1.min(to.1).max(0);
    let max_y = from.1.max(to.1).min(last_y);

    let mut changed = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            changed += set_cell(
                history,
                target,
                layer,
                x,
                y,
                Some(TileStack::single(tile.clone())),
            );
        }
    }
    changed
}

/// Flood fill the 4-connected region of cells whose stack equals the stack
/// at `(x, y)`, replacing each with `tile`.
pub fn bucket_fill(
    history: &mut TileHistory,
    target: &mut SyncTarget<'_>,
    layer: MapLayer,
    x: i32,
    y: i32,
    tile: TileSelection,
) -> usize {
    let Some(grid) = target.grid() else {
        return 0;
    };
    if !grid.in_bounds(x, y) {
        return 0;
    }

    let replacement = TileStack::single(tile);
    let region_stack = grid.get_stack(layer, x, y).cloned();
    if region_stack.as_ref() == Some(&replacement) {
        return 0;
    }

    let mut region = Vec::new();
    let mut visited = HashSet::new();
    let mut pending = vec![(x, y)];
    while let Some((cx, cy)) = pending.pop() {
        if !grid.in_bounds(cx, cy) || !visited.insert((cx, cy)) {
            continue;
        }
        if grid.get_stack(layer, cx, cy) != region_stack.as_ref() {
            continue;
        }
        region.push((cx, cy));
        pending.extend([(cx - 1, cy), (cx + 1, cy), (cx, cy - 1), (cx, cy + 1)]);
    }

    region
        .into_iter()
        .map(|(cx, cy)| set_cell(history, target, layer, cx, cy, Some(replacement.clone())))
        .sum()
}

/// Snapshot, write and record one cell
fn set_cell(
    history: &mut TileHistory,
    target: &mut SyncTarget<'_>,
    layer: MapLayer,
    x: i32,
    y: i32,
    stack: Option<TileStack>,
) -> usize {
    let Some(grid) = target.grid() else {
        return 0;
    };
    if !grid.in_bounds(x, y) {
        return 0;
    }

    let delta = TileDelta::capture(grid, layer, x, y, stack);
    if delta.is_noop() {
        return 0;
    }

    target.write_stack(layer, x, y, delta.new_stack.as_ref());
    history.add_delta(delta);
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{RenderQueue, RenderRequest};
    use rpg_map_core::{TileGrid, TileMap};

    fn grass() -> TileSelection {
        TileSelection::autotile("A2", 0, 0)
    }

    fn flower() -> TileSelection {
        TileSelection::new("B", 1, 4)
    }

    #[test]
    fn test_paint_records_and_notifies() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        let mut queue = RenderQueue::new();
        let mut history = TileHistory::default();

        history.begin_entry("Paint");
        let mut target = SyncTarget::new(&mut map, &mut queue);
        let changed = paint_tile(&mut history, &mut target, MapLayer::Ground, 1, 1, grass());
        history.commit_entry();

        assert_eq!(changed, 1);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(
            queue.drain(),
            vec![RenderRequest::Update {
                x: 1,
                y: 1,
                layer: MapLayer::Ground,
                stack: TileStack::single(grass()),
            }]
        );

        history.undo(&mut SyncTarget::new(&mut map, &mut queue));
        assert_eq!(map.get_stack(MapLayer::Ground, 1, 1), None);
    }

    #[test]
    fn test_repainting_same_tile_records_nothing() {
        let mut map = TileMap::new("Field".to_string(), 2, 2);
        let mut history = TileHistory::default();

        history.begin_entry("Paint");
        let mut target = SyncTarget::grid_only(&mut map);
        paint_tile(&mut history, &mut target, MapLayer::Ground, 0, 0, grass());
        history.commit_entry();

        history.begin_entry("Paint");
        let changed = paint_tile(&mut history, &mut target, MapLayer::Ground, 0, 0, grass());
        history.commit_entry();

        assert_eq!(changed, 0);
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_stack_and_erase() {
        let mut map = TileMap::new("Field".to_string(), 2, 2);
        let mut history = TileHistory::default();

        history.begin_entry("Decorate");
        {
            let mut target = SyncTarget::grid_only(&mut map);
            paint_tile(&mut history, &mut target, MapLayer::Ground, 0, 0, grass());
            assert_eq!(
                stack_tile(&mut history, &mut target, MapLayer::Ground, 0, 0, flower()),
                1
            );
            assert_eq!(
                stack_tile(&mut history, &mut target, MapLayer::Ground, 0, 0, flower()),
                0
            );
        }
        history.commit_entry();
        assert_eq!(
            map.get_stack(MapLayer::Ground, 0, 0),
            Some(&TileStack::from_tiles(vec![grass(), flower()]))
        );

        history.begin_entry("Erase");
        let mut target = SyncTarget::grid_only(&mut map);
        assert_eq!(
            erase_tile(&mut history, &mut target, MapLayer::Ground, 0, 0),
            1
        );
        history.commit_entry();
        assert_eq!(map.get_stack(MapLayer::Ground, 0, 0), None);

        history.undo(&mut SyncTarget::grid_only(&mut map));
        assert_eq!(
            map.get_stack(MapLayer::Ground, 0, 0),
            Some(&TileStack::from_tiles(vec![grass(), flower()]))
        );
    }

    #[test]
    fn test_fill_rect_clips_to_map() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        let mut history = TileHistory::default();

        history.begin_entry("Rectangle");
        let mut target = SyncTarget::grid_only(&mut map);
        let layer = MapLayer::Walls;
        let changed = fill_rect(&mut history, &mut target, layer, (2, 2), (1, 5), grass());
        history.commit_entry();

        assert_eq!(changed, 2);
        assert_eq!(history.undo_entries().next().unwrap().len(), 2);
        assert!(map.get_stack(MapLayer::Walls, 1, 2).is_some());
        assert!(map.get_stack(MapLayer::Walls, 2, 2).is_some());
    }

    #[test]
    fn test_fill_rect_extreme_corners() {
        let mut map = TileMap::new("Field".to_string(), 4, 3);
        let mut history = TileHistory::default();

        history.begin_entry("Rectangle");
        let mut target = SyncTarget::grid_only(&mut map);
        let row = fill_rect(
            &mut history,
            &mut target,
            MapLayer::Ground,
            (i32::MIN, 0),
            (i32::MAX, 0),
            grass(),
        );
        let whole = fill_rect(
            &mut history,
            &mut target,
            MapLayer::Walls,
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MIN),
            flower(),
        );
        history.commit_entry();

        assert_eq!(row, 4);
        assert_eq!(whole, 12);
        assert_eq!(history.undo_entries().next().unwrap().len(), 16);
        assert_eq!(
            map.get_stack(MapLayer::Ground, 3, 0),
            Some(&TileStack::single(grass()))
        );
        assert_eq!(map.get_stack(MapLayer::Ground, 0, 1), None);
    }

    #[test]
    fn test_fill_rect_outside_map() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        let mut history = TileHistory::default();

        let mut target = SyncTarget::grid_only(&mut map);
        let layer = MapLayer::Ground;
        let changed = fill_rect(&mut history, &mut target, layer, (5, 5), (9, 9), grass());

        assert_eq!(changed, 0);
        assert_eq!(history.pending_delta_count(), 0);
    }

    #[test]
    fn test_bucket_fill_region() {
        let mut map = TileMap::new("Field".to_string(), 4, 3);
        // a wall of flowers splits column 0-1 from column 3
        for y in 0..3 {
            map.set_stack(MapLayer::Ground, 2, y, Some(TileStack::single(flower())));
        }
        let mut history = TileHistory::default();

        history.begin_entry("Fill");
        let mut target = SyncTarget::grid_only(&mut map);
        let changed = bucket_fill(&mut history, &mut target, MapLayer::Ground, 0, 0, grass());
        history.commit_entry();

        assert_eq!(changed, 6);
        assert_eq!(map.get_stack(MapLayer::Ground, 3, 1), None);
        assert_eq!(
            map.get_stack(MapLayer::Ground, 1, 2),
            Some(&TileStack::single(grass()))
        );

        history.undo(&mut SyncTarget::grid_only(&mut map));
        assert_eq!(map.get_stack(MapLayer::Ground, 1, 2), None);
        assert_eq!(
            map.get_stack(MapLayer::Ground, 2, 1),
            Some(&TileStack::single(flower()))
        );
    }

    #[test]
    fn test_bucket_fill_same_tile_is_noop() {
        let mut map = TileMap::new("Field".to_string(), 2, 2);
        map.set_stack(MapLayer::Ground, 0, 0, Some(TileStack::single(grass())));
        let mut history = TileHistory::default();

        let mut target = SyncTarget::grid_only(&mut map);
        let changed = bucket_fill(&mut history, &mut target, MapLayer::Ground, 0, 0, grass());

        assert_eq!(changed, 0);
        assert!(!history.is_recording());
    }

    #[test]
    fn test_tools_without_grid() {
        let mut history = TileHistory::default();
        let mut target = SyncTarget::detached();

        assert_eq!(
            paint_tile(&mut history, &mut target, MapLayer::Ground, 0, 0, grass()),
            0
        );
        assert_eq!(
            bucket_fill(&mut history, &mut target, MapLayer::Ground, 0, 0, grass()),
            0
        );
        assert_eq!(history.pending_delta_count(), 0);
    }
}
