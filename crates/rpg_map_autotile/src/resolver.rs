//! Per-quadrant neighbour matching and pixel offset resolution

use rpg_map_core::{MapLayer, TileGrid, TileSelection};
use serde::{Deserialize, Serialize};

use crate::config::AutotileConfig;
use crate::tables::{half_tile_offset, AutotileFamily, NeighborCase};

/// One of the four sub-cells of a tile image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quadrant {
    qx: u8,
    qy: u8,
}

impl Quadrant {
    pub const TOP_LEFT: Self = Quadrant { qx: 0, qy: 0 };
    pub const TOP_RIGHT: Self = Quadrant { qx: 1, qy: 0 };
    pub const BOTTOM_LEFT: Self = Quadrant { qx: 0, qy: 1 };
    pub const BOTTOM_RIGHT: Self = Quadrant { qx: 1, qy: 1 };

    /// All quadrants in row-major order
    pub const ALL: [Quadrant; 4] = [
        Self::TOP_LEFT,
        Self::TOP_RIGHT,
        Self::BOTTOM_LEFT,
        Self::BOTTOM_RIGHT,
    ];

    /// Returns `None` unless both coordinates are 0 or 1
    pub fn new(qx: u8, qy: u8) -> Option<Self> {
        (qx < 2 && qy < 2).then_some(Quadrant { qx, qy })
    }

    /// 0 = left, 1 = right
    pub fn qx(self) -> u8 {
        self.qx
    }

    /// 0 = top, 1 = bottom
    pub fn qy(self) -> u8 {
        self.qy
    }

    pub fn index(self) -> usize {
        (self.qy * 2 + self.qx) as usize
    }

    /// Direction of the horizontal/vertical neighbours this quadrant faces
    pub fn direction(self) -> (i32, i32) {
        let dx = if self.qx == 0 { -1 } else { 1 };
        let dy = if self.qy == 0 { -1 } else { 1 };
        (dx, dy)
    }
}

/// Same-tile test results for the three neighbours a quadrant faces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NeighborMatches {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
}

/// Pixel offset into the source tileset image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelOffset {
    pub x: u32,
    pub y: u32,
}

/// Test the horizontal, vertical and diagonal neighbours of `pos` for the
/// given quadrant.
///
/// A neighbour matches when its bottom tile comes from the same tileset cell
/// as `tile`. Cells outside the map always match, so painted areas run off
/// the edge without a border.
pub fn neighbor_matches<G: TileGrid + ?Sized>(
    grid: &G,
    layer: MapLayer,
    tile: &TileSelection,
    pos: (i32, i32),
    quadrant: Quadrant,
) -> NeighborMatches {
    let (x, y) = pos;
    let (dx, dy) = quadrant.direction();

    let is_same = |nx: i32, ny: i32| {
        if !grid.in_bounds(nx, ny) {
            return true;
        }
        grid.get_stack(layer, nx, ny)
            .and_then(|stack| stack.bottom())
            .is_some_and(|bottom| bottom.same_source(tile))
    };

    NeighborMatches {
        horizontal: is_same(x + dx, y),
        vertical: is_same(x, y + dy),
        diagonal: is_same(x + dx, y + dy),
    }
}

/// Resolves which sub-image each quadrant of a painted cell shows
#[derive(Debug, Clone, Default)]
pub struct AutotileResolver {
    config: AutotileConfig,
}

impl AutotileResolver {
    pub fn new(config: AutotileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AutotileConfig {
        &self.config
    }

    /// Pixel offset of one quadrant of `tile` drawn at `pos`.
    ///
    /// Plain tiles return the matching quadrant of their own image. Autotiles
    /// pick a half-tile from their block based on the neighbours on `layer`.
    pub fn resolve_quadrant_offset<G: TileGrid + ?Sized>(
        &self,
        tile: &TileSelection,
        pos: (i32, i32),
        quadrant: Quadrant,
        grid: &G,
        layer: MapLayer,
    ) -> PixelOffset {
        let tile_size = self.config.tile_size;
        let half = self.config.half_tile();
        let origin_x = tile.x * tile_size;
        let origin_y = tile.y * tile_size;

        let Some(family) = AutotileFamily::of(tile) else {
            return PixelOffset {
                x: origin_x + u32::from(quadrant.qx()) * half,
                y: origin_y + u32::from(quadrant.qy()) * half,
            };
        };

        let matches = neighbor_matches(grid, layer, tile, pos, quadrant);
        let case = NeighborCase::classify(family, matches);
        let offset = half_tile_offset(family, quadrant, case);

        PixelOffset {
            x: origin_x + offset.x * half,
            y: origin_y + offset.y * half,
        }
    }

    /// Offsets for all four quadrants, in `Quadrant::ALL` order
    pub fn resolve_cell<G: TileGrid + ?Sized>(
        &self,
        tile: &TileSelection,
        pos: (i32, i32),
        grid: &G,
        layer: MapLayer,
    ) -> [PixelOffset; 4] {
        Quadrant::ALL.map(|q| self.resolve_quadrant_offset(tile, pos, q, grid, layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_map_core::{TileMap, TileStack};

    fn grass() -> TileSelection {
        TileSelection::autotile("A2", 0, 0)
    }

    fn paint(map: &mut TileMap, x: i32, y: i32, tile: TileSelection) {
        map.set_stack(MapLayer::Ground, x, y, Some(TileStack::single(tile)));
    }

    fn ground_matches(map: &TileMap, pos: (i32, i32), quadrant: Quadrant) -> NeighborMatches {
        neighbor_matches(map, MapLayer::Ground, &grass(), pos, quadrant)
    }

    fn resolver() -> AutotileResolver {
        AutotileResolver::new(AutotileConfig::default())
    }

    #[test]
    fn test_convex_corner_quadrant() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        paint(&mut map, 1, 1, grass());
        paint(&mut map, 0, 1, grass());
        paint(&mut map, 1, 0, grass());

        let matches = ground_matches(&map, (1, 1), Quadrant::TOP_LEFT);
        assert_eq!(
            matches,
            NeighborMatches {
                horizontal: true,
                vertical: true,
                diagonal: false
            }
        );

        let offset = resolver().resolve_quadrant_offset(
            &grass(),
            (1, 1),
            Quadrant::TOP_LEFT,
            &map,
            MapLayer::Ground,
        );
        // inner corner (2, 0) in half tiles, not the filled (2, 4)
        assert_eq!(offset, PixelOffset { x: 48, y: 0 });
    }

    #[test]
    fn test_filled_quadrant() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        for y in 0..3 {
            for x in 0..3 {
                paint(&mut map, x, y, grass());
            }
        }

        let offsets = resolver().resolve_cell(&grass(), (1, 1), &map, MapLayer::Ground);
        assert_eq!(offsets[0], PixelOffset { x: 48, y: 96 });
        assert_eq!(offsets[3], PixelOffset { x: 24, y: 72 });
    }

    #[test]
    fn test_map_edge_counts_as_match() {
        let mut map = TileMap::new("Field".to_string(), 1, 1);
        paint(&mut map, 0, 0, grass());

        let matches = ground_matches(&map, (0, 0), Quadrant::BOTTOM_RIGHT);
        assert!(matches.horizontal && matches.vertical && matches.diagonal);
    }

    #[test]
    fn test_isolated_tile_uses_outer_corners() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        paint(&mut map, 1, 1, grass());

        let offsets = resolver().resolve_cell(&grass(), (1, 1), &map, MapLayer::Ground);
        assert_eq!(offsets[0], PixelOffset { x: 0, y: 48 });
        assert_eq!(offsets[1], PixelOffset { x: 72, y: 48 });
        assert_eq!(offsets[2], PixelOffset { x: 0, y: 120 });
        assert_eq!(offsets[3], PixelOffset { x: 72, y: 120 });
    }

    #[test]
    fn test_only_bottom_tile_matches() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        paint(&mut map, 1, 1, grass());
        // grass on top of dirt does not blend with grass
        map.set_stack(
            MapLayer::Ground,
            0,
            1,
            Some(TileStack::from_tiles(vec![TileSelection::autotile("A2", 2, 0), grass()])),
        );
        // different flags, same tileset cell: still the same tile
        paint(&mut map, 1, 0, TileSelection::new("A2", 0, 0));

        let matches = ground_matches(&map, (1, 1), Quadrant::TOP_LEFT);
        assert!(!matches.horizontal);
        assert!(matches.vertical);
    }

    #[test]
    fn test_other_layers_ignored() {
        let mut map = TileMap::new("Field".to_string(), 3, 3);
        map.set_stack(MapLayer::Decoration, 0, 1, Some(TileStack::single(grass())));

        let matches = ground_matches(&map, (1, 1), Quadrant::TOP_LEFT);
        assert!(!matches.horizontal);
    }

    #[test]
    fn test_wall_ignores_diagonal() {
        let wall = TileSelection::autotile("A4", 0, 3).with_wall(true);
        let mut map = TileMap::new("Town".to_string(), 3, 3);
        paint(&mut map, 1, 1, wall.clone());
        paint(&mut map, 0, 1, wall.clone());
        paint(&mut map, 1, 0, wall.clone());

        let resolver = resolver();
        let top_left = |map: &TileMap| {
            resolver.resolve_quadrant_offset(
                &wall,
                (1, 1),
                Quadrant::TOP_LEFT,
                map,
                MapLayer::Ground,
            )
        };

        let without_diagonal = top_left(&map);
        paint(&mut map, 0, 0, wall.clone());
        let with_diagonal = top_left(&map);

        assert_eq!(without_diagonal, with_diagonal);
        // block origin (0, 144) plus filled wall quadrant (2, 2) half tiles
        assert_eq!(with_diagonal, PixelOffset { x: 48, y: 192 });
    }

    #[test]
    fn test_plain_tile_quadrants() {
        let map = TileMap::new("Field".to_string(), 3, 3);
        let tile = TileSelection::new("B", 2, 1);

        let resolver = AutotileResolver::new(AutotileConfig::new(32));

        let offsets = resolver.resolve_cell(&tile, (1, 1), &map, MapLayer::Decoration);
        assert_eq!(offsets[0], PixelOffset { x: 64, y: 32 });
        assert_eq!(offsets[3], PixelOffset { x: 80, y: 48 });
    }

    #[test]
    fn test_resolver_is_idempotent() {
        let mut map = TileMap::new("Field".to_string(), 4, 4);
        paint(&mut map, 1, 1, grass());
        paint(&mut map, 2, 1, grass());
        paint(&mut map, 1, 2, grass());
        let resolver = resolver();

        for q in Quadrant::ALL {
            let first =
                resolver.resolve_quadrant_offset(&grass(), (1, 1), q, &map, MapLayer::Ground);
            let second =
                resolver.resolve_quadrant_offset(&grass(), (1, 1), q, &map, MapLayer::Ground);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_quadrant_new() {
        assert_eq!(Quadrant::new(1, 0), Some(Quadrant::TOP_RIGHT));
        assert_eq!(Quadrant::new(2, 0), None);
        assert_eq!(Quadrant::BOTTOM_LEFT.index(), 2);
        assert_eq!(Quadrant::BOTTOM_LEFT.direction(), (-1, 1));
    }

    #[test]
    fn test_quadrant_coordinates_stay_in_range() {
        for qy in 0..4 {
            for qx in 0..4 {
                match Quadrant::new(qx, qy) {
                    Some(q) => {
                        assert_eq!((q.qx(), q.qy()), (qx, qy));
                        assert!(q.index() < 4);
                    }
                    None => assert!(qx > 1 || qy > 1),
                }
            }
        }
        for (i, q) in Quadrant::ALL.into_iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }
}
