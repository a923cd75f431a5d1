//! Per-cell terrain state.

use crate::brush::HexDirection;

/// Mutable state of one hex cell.
///
/// River and road topology spans two cells per segment and is managed by
/// [`CellMap`](super::map::CellMap), which keeps both endpoints consistent;
/// the fields here are the single-cell view of that state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexCell {
    /// Index into the terrain color palette.
    pub color_index: usize,
    /// Terrain height in elevation steps.
    pub elevation: i32,
    /// Water surface height in elevation steps. Water shows when this
    /// exceeds `elevation`.
    pub water_level: i32,
    /// Building density, 0 = none.
    pub urban_level: u8,
    /// Farm density, 0 = none.
    pub farm_level: u8,
    /// Plant density, 0 = none.
    pub plant_level: u8,
    /// Whether the cell perimeter carries a wall.
    pub walled: bool,
    /// Direction a river flows into this cell from, if any.
    pub incoming_river: Option<HexDirection>,
    /// Direction a river leaves this cell in, if any.
    pub outgoing_river: Option<HexDirection>,
    /// Road presence per edge, indexed by `HexDirection as usize`.
    pub roads: [bool; 6],
}

impl HexCell {
    /// Whether any river touches this cell.
    pub fn has_river(&self) -> bool {
        self.incoming_river.is_some() || self.outgoing_river.is_some()
    }

    /// Whether a river crosses the edge in `direction`.
    pub fn has_river_through_edge(&self, direction: HexDirection) -> bool {
        self.incoming_river == Some(direction) || self.outgoing_river == Some(direction)
    }

    /// Whether a road crosses the edge in `direction`.
    pub fn has_road(&self, direction: HexDirection) -> bool {
        self.roads[direction as usize]
    }

    /// Whether any edge of this cell carries a road.
    pub fn has_roads(&self) -> bool {
        self.roads.iter().any(|&road| road)
    }

    /// Whether the water surface sits above the terrain.
    pub fn is_underwater(&self) -> bool {
        self.water_level > self.elevation
    }
}
