use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy_egui::egui;
use hexx::{Hex, HexLayout, HexOrientation, PlaneMeshBuilder};

use super::GridConfig;
use super::entities::{CellColumn, DirtyCells, HexGrid, PaletteMaterials, WaterSurface};
use super::map::CellMap;
use crate::brush::HexDirection;
use crate::math;

/// Keeps overlay lines and water discs from z-fighting the column tops.
const OVERLAY_LIFT: f32 = 0.05;
const WATER_LIFT: f32 = 0.02;

const MARKER_RADIUS: f32 = 0.12;
const MARKER_SPACING: f32 = 0.3;
const MARKER_ROW_SPACING: f32 = 0.35;

// ── Startup: grid generation ───────────────────────────────────────

/// Spawns the [`HexGrid`] entity, shared assets, lighting, and per-cell
/// column/water visuals.
pub fn generate_grid(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GridConfig>,
) {
    let map = CellMap::from_settings(&cfg.map, cfg.palette.len());
    info!(
        "generated {} cells (map radius {})",
        map.cell_count(),
        cfg.map.map_radius
    );

    // Shared meshes: unit hexagonal prism scaled per cell, and a flat hex
    // disc at layout scale for water surfaces.
    let column_mesh = meshes.add(Cylinder::new(1.0, 1.0).mesh().resolution(6));

    let water_layout = HexLayout {
        orientation: HexOrientation::Pointy,
        scale: Vec2::splat(cfg.map.cell_spacing),
        ..default()
    };
    let water_mesh_info = PlaneMeshBuilder::new(&water_layout).build();
    let water_mesh = meshes.add(
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, water_mesh_info.vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, water_mesh_info.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, water_mesh_info.uvs)
        .with_inserted_indices(Indices::U16(water_mesh_info.indices)),
    );

    let palette: Vec<Handle<StandardMaterial>> = cfg
        .palette
        .iter()
        .map(|entry| {
            materials.add(StandardMaterial {
                base_color: entry.color,
                perceptual_roughness: 0.9,
                ..default()
            })
        })
        .collect();
    let water_material = materials.add(StandardMaterial {
        base_color: cfg.water_color,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -1.0, 0.6, 0.0)),
    ));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
        ..default()
    });

    let grid_entity = commands
        .spawn((
            Name::new("HexGrid"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for (hex, cell) in map.iter() {
        let center = map.hex_to_world_pos(hex);
        let surface =
            math::surface_height(cell.elevation, cfg.map.elevation_step, cfg.base_thickness);

        let column = commands
            .spawn((
                Name::new(format!("Cell({},{})", hex.x, hex.y)),
                CellColumn { hex },
                Mesh3d(column_mesh.clone()),
                MeshMaterial3d(palette[cell.color_index].clone()),
                math::column_transform(center, surface, cfg.map.cell_spacing * cfg.column_inset),
            ))
            .id();

        let water_height =
            math::surface_height(cell.water_level, cfg.map.elevation_step, cfg.base_thickness);
        let water = commands
            .spawn((
                Name::new(format!("Water({},{})", hex.x, hex.y)),
                WaterSurface { hex },
                Mesh3d(water_mesh.clone()),
                MeshMaterial3d(water_material.clone()),
                Transform::from_xyz(center.x, water_height + WATER_LIFT, center.y),
                if cell.is_underwater() {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                },
            ))
            .id();

        commands.entity(grid_entity).add_children(&[column, water]);
    }

    commands.entity(grid_entity).insert(HexGrid { map });
    commands.insert_resource(PaletteMaterials { handles: palette });
}

// ── Update: mesh refresh ───────────────────────────────────────────

/// Rebuilds transforms, materials, and water visibility for edited cells.
pub fn refresh_dirty_cells(
    mut dirty: ResMut<DirtyCells>,
    grid_q: Query<&HexGrid>,
    palette: Res<PaletteMaterials>,
    cfg: Res<GridConfig>,
    mut column_q: Query<(&CellColumn, &mut Transform, &mut MeshMaterial3d<StandardMaterial>)>,
    mut water_q: Query<(&WaterSurface, &mut Transform, &mut Visibility), Without<CellColumn>>,
) {
    if dirty.cells.is_empty() {
        return;
    }
    let Ok(grid) = grid_q.single() else { return };

    for (column, mut transform, mut material) in &mut column_q {
        if !dirty.cells.contains(&column.hex) {
            continue;
        }
        let Some(cell) = grid.map.get(column.hex) else {
            continue;
        };
        let center = grid.map.hex_to_world_pos(column.hex);
        let surface =
            math::surface_height(cell.elevation, cfg.map.elevation_step, cfg.base_thickness);
        *transform =
            math::column_transform(center, surface, cfg.map.cell_spacing * cfg.column_inset);
        if let Some(handle) = palette.handles.get(cell.color_index) {
            material.0 = handle.clone();
        }
    }

    for (water, mut transform, mut visibility) in &mut water_q {
        if !dirty.cells.contains(&water.hex) {
            continue;
        }
        let Some(cell) = grid.map.get(water.hex) else {
            continue;
        };
        let water_height =
            math::surface_height(cell.water_level, cfg.map.elevation_step, cfg.base_thickness);
        transform.translation.y = water_height + WATER_LIFT;
        *visibility = if cell.is_underwater() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    dirty.cells.clear();
}

// ── Update: overlays ───────────────────────────────────────────────

/// Immediate-mode overlays redrawn each frame from current cell state:
/// river and road half-segments, wall perimeter loops, and density markers.
pub fn draw_overlays(grid_q: Query<&HexGrid>, cfg: Res<GridConfig>, mut gizmos: Gizmos) {
    let Ok(grid) = grid_q.single() else { return };

    for (hex, cell) in grid.map.iter() {
        let center = grid.map.hex_to_world_pos(hex);
        let surface = surface_of(&cfg, cell.elevation);
        let top = Vec3::new(center.x, surface + OVERLAY_LIFT, center.y);

        if cell.has_river() {
            if let Some(direction) = cell.outgoing_river {
                gizmos.line(top, edge_point(grid, &cfg, hex, direction), cfg.river_color);
            }
            if let Some(direction) = cell.incoming_river {
                gizmos.line(top, edge_point(grid, &cfg, hex, direction), cfg.river_color);
            }
        }

        if cell.has_roads() {
            for direction in HexDirection::ALL {
                if cell.has_road(direction) {
                    gizmos.line(top, edge_point(grid, &cfg, hex, direction), cfg.road_color);
                }
            }
        }

        if cell.walled {
            let corners = grid.map.corner_offsets();
            let ring = corners.iter().chain(corners.first()).map(|corner| {
                Vec3::new(
                    center.x + corner.x,
                    surface + OVERLAY_LIFT,
                    center.y + corner.y,
                )
            });
            gizmos.linestrip(ring, cfg.wall_color);
        }

        draw_density_row(&mut gizmos, top, cell.urban_level, cfg.feature_colors[0], 0);
        draw_density_row(&mut gizmos, top, cell.farm_level, cfg.feature_colors[1], 1);
        draw_density_row(&mut gizmos, top, cell.plant_level, cfg.feature_colors[2], 2);
    }
}

/// Midpoint of the shared edge toward `direction`, at the averaged surface
/// height of the two cells so segments follow slopes.
fn edge_point(grid: &HexGrid, cfg: &GridConfig, hex: Hex, direction: HexDirection) -> Vec3 {
    let center = grid.map.hex_to_world_pos(hex);
    let neighbor = direction.neighbor(hex);
    let neighbor_center = grid.map.hex_to_world_pos(neighbor);
    let mid = (center + neighbor_center) / 2.0;

    let own = grid.map.get(hex).map_or(0, |cell| cell.elevation);
    let other = grid.map.get(neighbor).map_or(own, |cell| cell.elevation);
    let height = (surface_of(cfg, own) + surface_of(cfg, other)) / 2.0;
    Vec3::new(mid.x, height + OVERLAY_LIFT, mid.y)
}

fn draw_density_row(gizmos: &mut Gizmos, top: Vec3, level: u8, color: Color, row: usize) {
    if level == 0 {
        return;
    }
    let z = top.z + (row as f32 - 1.0) * MARKER_ROW_SPACING;
    for i in 0..level {
        let x = top.x + (i as f32 - (level - 1) as f32 / 2.0) * MARKER_SPACING;
        gizmos.circle(
            Isometry3d::new(
                Vec3::new(x, top.y, z),
                Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            ),
            MARKER_RADIUS,
            color,
        );
    }
}

fn surface_of(cfg: &GridConfig, elevation: i32) -> f32 {
    math::surface_height(elevation, cfg.map.elevation_step, cfg.base_thickness)
}

// ── Labels ─────────────────────────────────────────────────────────

/// Draws each cell's axial coordinates as a screen-projected egui label.
pub fn draw_cell_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<crate::camera::EditorCamera>>,
    grid_q: Query<&HexGrid>,
    cfg: Res<GridConfig>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(grid) = grid_q.single() else { return };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let cam_pos = cam_gt.translation();

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for (hex, cell) in grid.map.iter() {
        let center = grid.map.hex_to_world_pos(hex);
        let world_pos = Vec3::new(center.x, surface_of(&cfg, cell.elevation), center.y);
        if cam_pos.distance(world_pos) > cfg.label_distance {
            continue;
        }
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, world_pos) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                format!("{},{}", hex.x, hex.y),
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }
}
