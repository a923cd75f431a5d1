use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use hexx::Hex;

use super::map::CellMap;

/// Central component holding the editable cell map.
///
/// Spawned as a single entity that parents all [`CellColumn`] and
/// [`WaterSurface`] entities.
#[derive(Component)]
pub struct HexGrid {
    /// Encapsulated layout and cell storage.
    pub map: CellMap,
}

/// Column mesh of one cell.
#[derive(Component, Reflect)]
pub struct CellColumn {
    /// The hex coordinate this column represents.
    pub hex: Hex,
}

/// Water surface disc of one cell. Visible only while the cell is underwater.
#[derive(Component, Reflect)]
pub struct WaterSurface {
    /// The hex coordinate this surface belongs to.
    pub hex: Hex,
}

/// Cells whose visuals must be rebuilt.
///
/// Filled by the editor stroke, drained by
/// [`refresh_dirty_cells`](super::systems::refresh_dirty_cells).
#[derive(Resource, Default)]
pub struct DirtyCells {
    /// Coordinates touched since the last refresh.
    pub cells: HashSet<Hex>,
}

/// Overlay visibility, driven by the tool panel.
#[derive(Resource, Default, Reflect)]
pub struct OverlaySettings {
    /// Whether screen-projected cell coordinate labels are drawn.
    pub show_labels: bool,
}

/// Shared material handles for cell columns, one per palette entry.
///
/// Color edits swap a column's material to the handle at the painted index.
#[derive(Resource)]
pub struct PaletteMaterials {
    /// Handles in palette order.
    pub handles: Vec<Handle<StandardMaterial>>,
}
