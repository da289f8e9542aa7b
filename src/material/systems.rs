//! Systems for managing the preview material.

use bevy::prelude::*;

use super::extension::{VertexColorPreviewMaterial, vertex_color_preview_material};
use crate::brush::Brush;
use crate::plugin::PainterSettings;

/// Creates a preview material at startup unless one was configured already.
pub fn create_default_preview_material(
    brush: Res<Brush>,
    mut settings: ResMut<PainterSettings>,
    mut materials: ResMut<Assets<VertexColorPreviewMaterial>>,
) {
    if settings.preview_material.is_some() {
        return;
    }

    let channel = settings
        .isolate_brush_channel
        .then_some(brush.channel);
    settings.preview_material = Some(materials.add(vertex_color_preview_material(channel)));
    debug!("Vertex painter: created default preview material");
}

/// Keeps the preview material's displayed channel in step with the brush.
///
/// Only active when [`PainterSettings::isolate_brush_channel`] is set.
pub fn sync_preview_channel(
    brush: Res<Brush>,
    settings: Res<PainterSettings>,
    mut materials: ResMut<Assets<VertexColorPreviewMaterial>>,
) {
    if !brush.is_changed() && !settings.is_changed() {
        return;
    }
    let Some(handle) = settings.preview_material.as_ref() else {
        return;
    };

    let wanted = settings.isolate_brush_channel.then_some(brush.channel);
    // Read first so an unchanged channel doesn't mark the asset modified.
    if materials.get(handle).is_some_and(|m| m.extension.channel == wanted) {
        return;
    }
    if let Some(material) = materials.get_mut(handle) {
        material.extension.channel = wanted;
    }
}
