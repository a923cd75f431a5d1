#![warn(missing_docs)]
//! Interactive hex map editor.
//!
//! A hexagonal terrain grid painted with a configurable brush: colors,
//! elevation, water levels, urban/farm/plant densities, rivers, roads, and
//! walls. An egui side panel hosts the tool controls; WASD/Q/E/scroll drive
//! the camera.

mod brush;
mod camera;
mod editor;
mod grid;
pub mod math;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

#[cfg(feature = "native")]
use clap::Parser;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Painting tools active.
    #[default]
    Editing,
    /// World inspector overlay active (Tab to toggle).
    Inspecting,
}

/// Command-line overrides for map generation (native builds only).
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about = "Interactive hex map editor")]
struct Cli {
    /// Number of hex rings around the origin.
    #[arg(long)]
    map_radius: Option<u32>,
    /// Seed for the elevation noise generator.
    #[arg(long)]
    seed: Option<u32>,
}

fn main() {
    #[cfg_attr(
        not(feature = "native"),
        expect(unused_mut, reason = "mutated only by native CLI overrides")
    )]
    let mut grid_config = grid::GridConfig::default();
    #[cfg(feature = "native")]
    {
        let cli = Cli::parse();
        if let Some(radius) = cli.map_radius {
            grid_config.map.map_radius = radius;
        }
        if let Some(seed) = cli.seed {
            grid_config.map.seed = seed;
        }
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Map Editor".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(grid::GridPlugin(grid_config))
    .add_plugins(editor::EditorPlugin(editor::EditorConfig::default()))
    .add_plugins(camera::CameraPlugin(camera::CameraConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Inspecting)));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Editing => GameState::Inspecting,
            GameState::Inspecting => GameState::Editing,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
