use bevy::prelude::*;
use hexx::Hex;

use super::entities::{DragState, PanelState};
use super::stroke;
use crate::brush;
use crate::camera::EditorCamera;
use crate::grid::{CellMap, DirtyCells, GridConfig, HexGrid};
use crate::math;

/// Samples the pointer once per frame and paints the brush while the left
/// button is held over the grid.
///
/// Any failure along the chain — button up, pointer captured by the panel,
/// cursor off-window, ray missing the ground, off-grid coordinate — resets
/// the drag state to idle instead of raising an error.
#[allow(clippy::too_many_arguments)]
pub fn paint(
    buttons: Res<ButtonInput<MouseButton>>,
    window_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut grid_q: Query<&mut HexGrid>,
    cfg: Res<GridConfig>,
    panel: Res<PanelState>,
    mut drag: ResMut<DragState>,
    mut dirty: ResMut<DirtyCells>,
) {
    let pointer_captured = match egui_ctx.single_mut() {
        Ok(mut ctx) => ctx.get_mut().wants_pointer_input(),
        Err(_) => false,
    };
    if !buttons.pressed(MouseButton::Left) || pointer_captured {
        drag.previous = None;
        return;
    }

    let Ok(window) = window_q.single() else { return };
    let Some(cursor) = window.cursor_position() else {
        drag.previous = None;
        return;
    };
    let Ok((camera, cam_tf)) = camera_q.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_tf, cursor) else {
        drag.previous = None;
        return;
    };
    let Ok(mut grid) = grid_q.single_mut() else { return };

    let Some(current) = pick_cell(&grid.map, &cfg, ray.origin, *ray.direction) else {
        drag.previous = None;
        return;
    };

    // A drag is active iff the pointer just moved to one of the previous
    // cell's six neighbors.
    let drag_direction = match drag.previous {
        Some(previous) if previous != current => brush::drag_direction(previous, current),
        _ => None,
    };

    let request = panel.request();
    stroke::paint_stroke(
        &mut grid.map,
        current,
        &request,
        drag_direction,
        panel.brush_radius,
        &mut dirty.cells,
    );
    drag.previous = Some(current);
}

/// Resolves the cursor ray to a grid cell: ground-plane hit first, then one
/// refinement against the picked cell's surface height so tall columns pick
/// the cell actually under the cursor.
fn pick_cell(map: &CellMap, cfg: &GridConfig, origin: Vec3, direction: Vec3) -> Option<Hex> {
    let ground_hit = math::ray_plane_y(origin, direction, 0.0)?;
    let first = map.world_pos_to_hex(Vec2::new(ground_hit.x, ground_hit.z));
    let cell = map.get(first)?;

    let surface = math::surface_height(cell.elevation, cfg.map.elevation_step, cfg.base_thickness);
    if let Some(raised_hit) = math::ray_plane_y(origin, direction, surface) {
        let refined = map.world_pos_to_hex(Vec2::new(raised_hit.x, raised_hit.z));
        if map.contains(refined) {
            return Some(refined);
        }
    }
    Some(first)
}
