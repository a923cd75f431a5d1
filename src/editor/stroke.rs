//! Applies an [`EditRequest`] across a brush footprint.

use bevy::platform::collections::HashSet;
use hexx::Hex;

use super::entities::{EditRequest, OptionalToggle};
use crate::brush::{self, HexDirection};
use crate::grid::CellMap;

/// Applies `request` to every cell of the brush footprint around `center`,
/// recording touched cells in `dirty`.
///
/// `drag` is the active drag direction when the pointer just moved between
/// adjacent cells. Rivers and roads painted during a drag anchor on each
/// cell's neighbor *behind* the stroke and point forward, so the stroke lays
/// a connection between the previous cell and each newly entered cell.
pub fn paint_stroke(
    map: &mut CellMap,
    center: Hex,
    request: &EditRequest,
    drag: Option<HexDirection>,
    radius: u32,
    dirty: &mut HashSet<Hex>,
) {
    for hex in brush::brush_footprint(center, radius) {
        if apply_to_cell(map, hex, request, drag) {
            dirty.insert(hex);
        }
    }
}

/// Applies `request` to a single cell. A no-op (returning `false`) when the
/// coordinate is off-grid.
fn apply_to_cell(
    map: &mut CellMap,
    hex: Hex,
    request: &EditRequest,
    drag: Option<HexDirection>,
) -> bool {
    if !map.contains(hex) {
        return false;
    }

    if let Some(color_index) = request.color_index
        && let Some(cell) = map.get_mut(hex)
    {
        cell.color_index = color_index;
    }
    if let Some(elevation) = request.elevation {
        map.set_elevation(hex, elevation);
    }
    if let Some(water_level) = request.water_level
        && let Some(cell) = map.get_mut(hex)
    {
        cell.water_level = water_level;
    }
    if let Some(urban_level) = request.urban_level
        && let Some(cell) = map.get_mut(hex)
    {
        cell.urban_level = urban_level;
    }
    if let Some(farm_level) = request.farm_level
        && let Some(cell) = map.get_mut(hex)
    {
        cell.farm_level = farm_level;
    }
    if let Some(plant_level) = request.plant_level
        && let Some(cell) = map.get_mut(hex)
    {
        cell.plant_level = plant_level;
    }
    if request.river_mode == OptionalToggle::No {
        map.remove_river(hex);
    }
    if request.road_mode == OptionalToggle::No {
        map.remove_roads(hex);
    }
    if request.wall_mode != OptionalToggle::Ignore
        && let Some(cell) = map.get_mut(hex)
    {
        cell.walled = request.wall_mode == OptionalToggle::Yes;
    }

    if let Some(direction) = drag
        && let Some(behind) = map.neighbor(hex, direction.opposite())
    {
        if request.river_mode == OptionalToggle::Yes {
            map.set_outgoing_river(behind, direction);
        }
        if request.road_mode == OptionalToggle::Yes {
            map.add_road(behind, direction);
        }
    }

    true
}
