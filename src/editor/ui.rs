use bevy::prelude::*;
use bevy_egui::egui;

use super::EditorConfig;
use super::entities::{OptionalToggle, PanelState};
use crate::grid::{GridConfig, OverlaySettings};

/// The left-hand tool panel: one widget per optional edit, the brush size,
/// and the cell-label visibility toggle (forwarded to the grid overlays).
pub fn tool_panel(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut panel: ResMut<PanelState>,
    mut overlays: ResMut<OverlaySettings>,
    grid_cfg: Res<GridConfig>,
    editor_cfg: Res<EditorConfig>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    egui::SidePanel::left("tool-panel")
        .resizable(false)
        .show(ctx.get_mut(), |ui| {
            ui.heading("Terrain");
            ui.checkbox(&mut panel.apply_color, "Color");
            ui.horizontal_wrapped(|ui| {
                for (index, entry) in grid_cfg.palette.iter().enumerate() {
                    ui.selectable_value(&mut panel.color_index, index, &entry.name);
                }
            });

            ui.checkbox(&mut panel.apply_elevation, "Elevation");
            ui.add_enabled(
                panel.apply_elevation,
                egui::Slider::new(&mut panel.elevation, 0..=grid_cfg.map.max_elevation),
            );
            ui.checkbox(&mut panel.apply_water_level, "Water Level");
            ui.add_enabled(
                panel.apply_water_level,
                egui::Slider::new(&mut panel.water_level, 0..=grid_cfg.map.max_water_level),
            );

            ui.separator();
            ui.heading("Features");
            let max_level = grid_cfg.map.max_feature_level;
            ui.checkbox(&mut panel.apply_urban_level, "Urban");
            ui.add_enabled(
                panel.apply_urban_level,
                egui::Slider::new(&mut panel.urban_level, 0..=max_level),
            );
            ui.checkbox(&mut panel.apply_farm_level, "Farm");
            ui.add_enabled(
                panel.apply_farm_level,
                egui::Slider::new(&mut panel.farm_level, 0..=max_level),
            );
            ui.checkbox(&mut panel.apply_plant_level, "Plant");
            ui.add_enabled(
                panel.apply_plant_level,
                egui::Slider::new(&mut panel.plant_level, 0..=max_level),
            );

            ui.separator();
            ui.heading("Rivers & Roads");
            tri_state(ui, "River", &mut panel.river_mode);
            tri_state(ui, "Road", &mut panel.road_mode);
            tri_state(ui, "Wall", &mut panel.wall_mode);

            ui.separator();
            ui.add(
                egui::Slider::new(&mut panel.brush_radius, 0..=editor_cfg.max_brush_radius)
                    .text("Brush Size"),
            );
            ui.checkbox(&mut panel.show_labels, "Cell Labels");
        });

    overlays.show_labels = panel.show_labels;
}

fn tri_state(ui: &mut egui::Ui, label: &str, value: &mut OptionalToggle) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.selectable_value(value, OptionalToggle::Ignore, "--");
        ui.selectable_value(value, OptionalToggle::Yes, "Yes");
        ui.selectable_value(value, OptionalToggle::No, "No");
    });
}
