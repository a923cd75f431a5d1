//! Interactive painting: the tool panel, pointer sampling, and brush strokes.

mod entities;
mod stroke;
mod systems;
mod ui;

pub use entities::{DragState, PanelState};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::GameState;

/// Configuration for the editing tools.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct EditorConfig {
    /// Largest selectable brush radius.
    pub max_brush_radius: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_brush_radius: 4,
        }
    }
}

/// Editor plugin: egui tool panel plus per-frame paint sampling.
pub struct EditorPlugin(pub EditorConfig);

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EditorConfig>()
            .register_type::<PanelState>()
            .insert_resource(self.0.clone())
            .init_resource::<PanelState>()
            .init_resource::<DragState>()
            .add_systems(
                EguiPrimaryContextPass,
                ui::tool_panel.run_if(in_state(GameState::Editing)),
            )
            .add_systems(
                Update,
                systems::paint
                    .before(crate::grid::systems::refresh_dirty_cells)
                    .run_if(in_state(GameState::Editing)),
            );
    }
}
