use bevy::prelude::*;
use hexx::Hex;

/// Tri-state for river, road, and wall edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum OptionalToggle {
    /// Leave the attribute untouched.
    #[default]
    Ignore,
    /// Paint the attribute.
    Yes,
    /// Erase the attribute.
    No,
}

/// One brush pass worth of edits.
///
/// Built from [`PanelState`] at each input sample and passed explicitly into
/// the stroke; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditRequest {
    /// Palette index to paint, if color editing is enabled.
    pub color_index: Option<usize>,
    /// Elevation to paint, if enabled.
    pub elevation: Option<i32>,
    /// Water level to paint, if enabled.
    pub water_level: Option<i32>,
    /// Urban density to paint, if enabled.
    pub urban_level: Option<u8>,
    /// Farm density to paint, if enabled.
    pub farm_level: Option<u8>,
    /// Plant density to paint, if enabled.
    pub plant_level: Option<u8>,
    /// River paint/erase/ignore mode.
    pub river_mode: OptionalToggle,
    /// Road paint/erase/ignore mode.
    pub road_mode: OptionalToggle,
    /// Wall paint/erase/ignore mode.
    pub wall_mode: OptionalToggle,
}

/// Mutable tool-panel state bound to the egui widgets.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct PanelState {
    /// Whether color painting is enabled.
    pub apply_color: bool,
    /// Selected palette index.
    pub color_index: usize,
    /// Whether elevation painting is enabled.
    pub apply_elevation: bool,
    /// Selected elevation.
    pub elevation: i32,
    /// Whether water-level painting is enabled.
    pub apply_water_level: bool,
    /// Selected water level.
    pub water_level: i32,
    /// Whether urban-density painting is enabled.
    pub apply_urban_level: bool,
    /// Selected urban density.
    pub urban_level: u8,
    /// Whether farm-density painting is enabled.
    pub apply_farm_level: bool,
    /// Selected farm density.
    pub farm_level: u8,
    /// Whether plant-density painting is enabled.
    pub apply_plant_level: bool,
    /// Selected plant density.
    pub plant_level: u8,
    /// River tri-state.
    pub river_mode: OptionalToggle,
    /// Road tri-state.
    pub road_mode: OptionalToggle,
    /// Wall tri-state.
    pub wall_mode: OptionalToggle,
    /// Brush radius in cells.
    pub brush_radius: u32,
    /// Whether cell coordinate labels are shown.
    pub show_labels: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        // Color painting starts enabled on the first palette entry, matching
        // an editor that selects its first color on startup.
        Self {
            apply_color: true,
            color_index: 0,
            apply_elevation: false,
            elevation: 0,
            apply_water_level: false,
            water_level: 0,
            apply_urban_level: false,
            urban_level: 0,
            apply_farm_level: false,
            farm_level: 0,
            apply_plant_level: false,
            plant_level: 0,
            river_mode: OptionalToggle::Ignore,
            road_mode: OptionalToggle::Ignore,
            wall_mode: OptionalToggle::Ignore,
            brush_radius: 0,
            show_labels: false,
        }
    }
}

impl PanelState {
    /// The immutable edit bundle for one brush pass.
    pub fn request(&self) -> EditRequest {
        EditRequest {
            color_index: self.apply_color.then_some(self.color_index),
            elevation: self.apply_elevation.then_some(self.elevation),
            water_level: self.apply_water_level.then_some(self.water_level),
            urban_level: self.apply_urban_level.then_some(self.urban_level),
            farm_level: self.apply_farm_level.then_some(self.farm_level),
            plant_level: self.apply_plant_level.then_some(self.plant_level),
            river_mode: self.river_mode,
            road_mode: self.road_mode,
            wall_mode: self.wall_mode,
        }
    }
}

/// Pointer drag tracking across input samples.
///
/// `previous` survives only while the button stays held and the pointer keeps
/// resolving to a cell; every other outcome resets it to idle.
#[derive(Resource, Default)]
pub struct DragState {
    /// The cell the pointer resolved to on the previous sample.
    pub previous: Option<Hex>,
}
