//! Hex map grid: cell storage, column meshes, water surfaces, and overlays.

mod cell;
mod entities;
mod map;
pub(crate) mod systems;

// Re-exported for the editor's stroke tests (`crate::grid::HexCell`); the
// non-test binary reaches `HexCell` through `super::cell::HexCell` directly.
#[allow(unused_imports)]
pub use cell::HexCell;
pub use entities::{CellColumn, DirtyCells, HexGrid, OverlaySettings, WaterSurface};
pub use map::CellMap;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// Configuration for the grid subsystem.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct GridConfig {
    /// Map layout, noise, and editing ranges.
    pub map: MapSettings,
    /// Terrain color palette selectable from the tool panel.
    pub palette: Vec<PaletteEntry>,
    /// Visual column radius as a fraction of the cell spacing.
    pub column_inset: f32,
    /// Column height of an elevation-0 cell.
    pub base_thickness: f32,
    /// Water surface color (alpha-blended).
    pub water_color: Color,
    /// River overlay color.
    pub river_color: Color,
    /// Road overlay color.
    pub road_color: Color,
    /// Wall overlay color.
    pub wall_color: Color,
    /// Density marker colors for urban, farm, and plant rows.
    pub feature_colors: [Color; 3],
    /// Cells beyond this distance from the camera skip their labels.
    pub label_distance: f32,
    /// Background clear color.
    pub clear_color: Color,
}

/// Map layout, noise, and editing ranges.
#[derive(Clone, Debug, Reflect)]
pub struct MapSettings {
    /// Number of hex rings around the origin.
    pub map_radius: u32,
    /// Distance in world-units between adjacent cell centers.
    pub cell_spacing: f32,
    /// World-units of height per elevation step.
    pub elevation_step: f32,
    /// Highest elevation the editor can paint.
    pub max_elevation: i32,
    /// Highest water level the editor can paint.
    pub max_water_level: i32,
    /// Highest urban/farm/plant density the editor can paint.
    pub max_feature_level: u8,
    /// Seed for the elevation noise generator.
    pub seed: u32,
    /// Number of octaves for elevation noise.
    pub noise_octaves: usize,
    /// Spatial scale divisor for elevation noise sampling.
    pub noise_scale: f64,
}

/// A named palette color.
#[derive(Clone, Debug, Reflect)]
pub struct PaletteEntry {
    /// Name shown in the tool panel.
    pub name: String,
    /// Material base color.
    pub color: Color,
}

impl PaletteEntry {
    fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            map: MapSettings {
                map_radius: 12,
                cell_spacing: 2.0,
                elevation_step: 0.6,
                max_elevation: 6,
                max_water_level: 6,
                max_feature_level: 3,
                seed: 42,
                noise_octaves: 4,
                noise_scale: 40.0,
            },
            palette: vec![
                PaletteEntry::new("Sand", Color::srgb(0.85, 0.78, 0.55)),
                PaletteEntry::new("Grass", Color::srgb(0.3, 0.6, 0.25)),
                PaletteEntry::new("Forest", Color::srgb(0.16, 0.42, 0.2)),
                PaletteEntry::new("Stone", Color::srgb(0.45, 0.45, 0.48)),
                PaletteEntry::new("Snow", Color::srgb(0.92, 0.93, 0.95)),
            ],
            column_inset: 0.95,
            base_thickness: 0.25,
            water_color: Color::srgba(0.2, 0.45, 0.85, 0.55),
            river_color: Color::srgb(0.25, 0.55, 1.0),
            road_color: Color::srgb(0.55, 0.4, 0.25),
            wall_color: Color::srgb(0.85, 0.8, 0.7),
            feature_colors: [
                Color::srgb(0.6, 0.6, 0.68),
                Color::srgb(0.8, 0.75, 0.3),
                Color::srgb(0.1, 0.5, 0.15),
            ],
            label_distance: 60.0,
            clear_color: Color::srgb(0.01, 0.01, 0.02),
        }
    }
}

/// Grid plugin: generation at startup, mesh refresh and overlays at runtime.
pub struct GridPlugin(pub GridConfig);

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GridConfig>()
            .register_type::<CellColumn>()
            .register_type::<WaterSurface>()
            .register_type::<OverlaySettings>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .init_resource::<DirtyCells>()
            .init_resource::<OverlaySettings>()
            .add_systems(Startup, systems::generate_grid)
            .add_systems(Update, systems::refresh_dirty_cells)
            .add_systems(Update, systems::draw_overlays)
            .add_systems(
                EguiPrimaryContextPass,
                systems::draw_cell_labels
                    .run_if(|overlays: Res<OverlaySettings>| overlays.show_labels),
            );
    }
}
