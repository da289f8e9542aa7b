//! Plugin for vertex color painting.
use bevy::prelude::*;

use crate::brush::Brush;
use crate::input::{
    PainterKeyBindings, StrokeState, adjust_brush_from_keys, draw_brush_outline,
    handle_stroke_input, pick_hovered_object, update_brush_hit,
};
use crate::material::{
    VertexColorPreviewMaterial, create_default_preview_material, sync_preview_channel,
};
use crate::selection::{PaintSelection, PainterCommand, apply_painter_commands};

/// System sets run by [`VertexPainterPlugin`], chained in this order in `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PainterSystems {
    /// Reads scene input and emits [`PainterCommand`]s.
    Input,
    /// Applies queued [`PainterCommand`]s to the selection and meshes.
    Apply,
    /// Brush outline and preview material upkeep.
    Preview,
}

/// Painter configuration.
#[derive(Resource, Clone, Debug, Default)]
pub struct PainterSettings {
    /// Material swapped in while previewing raw painting.
    ///
    /// Previewing fails (logged) while this is `None`.
    pub preview_material: Option<Handle<VertexColorPreviewMaterial>>,

    /// Show only the brush channel, as grayscale, while previewing.
    ///
    /// Default: `false` (RGB preview)
    pub isolate_brush_channel: bool,
}

/// Plugin that adds vertex color painting to Bevy.
///
/// This plugin registers:
/// - [`VertexColorPreviewMaterial`] as a material type, with its embedded shader
/// - the [`Brush`], [`PaintSelection`] and [`PainterSettings`] resources
/// - the [`PainterCommand`] message and the systems that apply it
/// - scene input (hover picking, painting, keyboard controls), if enabled
///
/// Scene input draws gizmos and casts rays against meshes, so it expects
/// `DefaultPlugins`.
///
/// # Example
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_vertex_painter::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(VertexPainterPlugin::default())
///     .run();
/// ```
pub struct VertexPainterPlugin {
    /// Add the mouse/keyboard systems in [`PainterSystems::Input`].
    ///
    /// Default: `true`
    pub scene_input: bool,

    /// Create a preview material at startup when none is configured.
    ///
    /// Default: `true`
    pub default_preview_material: bool,
}

impl Default for VertexPainterPlugin {
    fn default() -> Self {
        Self {
            scene_input: true,
            default_preview_material: true,
        }
    }
}

impl Plugin for VertexPainterPlugin {
    fn build(&self, app: &mut App) {
        // Embed the shader into the binary
        crate::material::register_embedded_assets(app);
        app.add_plugins(MaterialPlugin::<VertexColorPreviewMaterial>::default())
            .init_resource::<Brush>()
            .init_resource::<PaintSelection>()
            .init_resource::<PainterSettings>()
            .add_message::<PainterCommand>()
            .configure_sets(
                Update,
                (
                    PainterSystems::Input,
                    PainterSystems::Apply,
                    PainterSystems::Preview,
                )
                    .chain(),
            )
            .add_systems(Update, apply_painter_commands.in_set(PainterSystems::Apply))
            .add_systems(Update, sync_preview_channel.in_set(PainterSystems::Preview));

        if self.default_preview_material {
            app.add_systems(Startup, create_default_preview_material);
        }

        if self.scene_input {
            app.init_resource::<StrokeState>()
                .init_resource::<PainterKeyBindings>()
                .add_systems(
                    Update,
                    (
                        adjust_brush_from_keys,
                        pick_hovered_object,
                        update_brush_hit,
                        handle_stroke_input,
                    )
                        .chain()
                        .in_set(PainterSystems::Input),
                )
                .add_systems(Update, draw_brush_outline.in_set(PainterSystems::Preview));
        }
    }
}
