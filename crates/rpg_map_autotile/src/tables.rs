//! Autotile offset tables
//!
//! Offsets are in half-tile units relative to the top-left of the autotile's
//! block in the tileset image.
//!
//! Blob block (2x3 tiles, 4x6 half tiles):
//!   row 0-1 | preview | inner corners |
//!   row 2-5 |  outer corners, edges and fill  |
//!
//! Wall block (2x2 tiles, 4x4 half tiles): corners at the outside, edges
//! and fill towards the middle.

use rpg_map_core::TileSelection;

use crate::resolver::{NeighborMatches, Quadrant};

/// Tilesets whose autotiles are walls regardless of the `is_wall` flag
pub const WALL_TILESETS: &[&str] = &["A3"];

/// Which rule table an autotile uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutotileFamily {
    /// Wall-like tiles, horizontal and vertical blend independently
    Wall,
    /// Ground/blob tiles with inner-corner art
    Blob,
}

impl AutotileFamily {
    /// Classify a selection. Plain tiles have no family.
    pub fn of(tile: &TileSelection) -> Option<Self> {
        if !tile.is_autotile() {
            return None;
        }
        if tile.is_wall() || WALL_TILESETS.contains(&tile.tileset_id.as_str()) {
            Some(AutotileFamily::Wall)
        } else {
            Some(AutotileFamily::Blob)
        }
    }
}

/// The neighbour configuration of one quadrant, after family rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborCase {
    /// Neither horizontal nor vertical neighbour matches (outer corner)
    Isolated,
    /// Only the horizontal neighbour matches
    Horizontal,
    /// Only the vertical neighbour matches
    Vertical,
    /// Horizontal and vertical match but the diagonal does not
    InnerCorner,
    /// All three neighbours match
    Filled,
}

impl NeighborCase {
    pub const ALL: [NeighborCase; 5] = [
        NeighborCase::Isolated,
        NeighborCase::Horizontal,
        NeighborCase::Vertical,
        NeighborCase::InnerCorner,
        NeighborCase::Filled,
    ];

    /// Column of this case in the offset tables
    pub fn index(self) -> usize {
        match self {
            NeighborCase::Isolated => 0,
            NeighborCase::Horizontal => 1,
            NeighborCase::Vertical => 2,
            NeighborCase::InnerCorner => 3,
            NeighborCase::Filled => 4,
        }
    }

    /// Collapse neighbour matches into a case. Walls ignore the diagonal.
    pub fn classify(family: AutotileFamily, matches: NeighborMatches) -> Self {
        match (matches.horizontal, matches.vertical) {
            (false, false) => NeighborCase::Isolated,
            (true, false) => NeighborCase::Horizontal,
            (false, true) => NeighborCase::Vertical,
            (true, true) => match family {
                AutotileFamily::Blob if !matches.diagonal => NeighborCase::InnerCorner,
                _ => NeighborCase::Filled,
            },
        }
    }
}

/// Offset in half-tile units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HalfTile {
    pub x: u32,
    pub y: u32,
}

const fn h(x: u32, y: u32) -> HalfTile {
    HalfTile { x, y }
}

/// Blob table: [quadrant][case]
/// Columns: Isolated, Horizontal, Vertical, InnerCorner, Filled
const BLOB_TABLE: [[HalfTile; 5]; 4] = [
    // top-left
    [h(0, 2), h(2, 2), h(0, 4), h(2, 0), h(2, 4)],
    // top-right
    [h(3, 2), h(1, 2), h(3, 4), h(3, 0), h(1, 4)],
    // bottom-left
    [h(0, 5), h(2, 5), h(0, 3), h(2, 1), h(2, 3)],
    // bottom-right
    [h(3, 5), h(1, 5), h(3, 3), h(3, 1), h(1, 3)],
];

/// Wall table: [quadrant][case]
/// The InnerCorner column repeats Filled; walls never classify as InnerCorner.
const WALL_TABLE: [[HalfTile; 5]; 4] = [
    // top-left
    [h(0, 0), h(2, 0), h(0, 2), h(2, 2), h(2, 2)],
    // top-right
    [h(3, 0), h(1, 0), h(3, 2), h(1, 2), h(1, 2)],
    // bottom-left
    [h(0, 3), h(2, 3), h(0, 1), h(2, 1), h(2, 1)],
    // bottom-right
    [h(3, 3), h(1, 3), h(3, 1), h(1, 1), h(1, 1)],
];

/// Look up the half-tile offset for a family, quadrant and case
pub fn half_tile_offset(
    family: AutotileFamily,
    quadrant: Quadrant,
    case: NeighborCase,
) -> HalfTile {
    let table = match family {
        AutotileFamily::Blob => &BLOB_TABLE,
        AutotileFamily::Wall => &WALL_TABLE,
    };
    table[quadrant.index()][case.index()]
}
