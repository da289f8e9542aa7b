//! Preview material implementation.
//!
//! This module provides [`VertexColorPreviewExtension`], a material extension
//! over [`StandardMaterial`] that shows the painted vertex colors instead of
//! the object's normal appearance.

use bevy::asset::embedded_asset;
use bevy::prelude::*;

mod extension;
mod systems;

pub use extension::{
    VertexColorPreviewExtension, VertexColorPreviewMaterial, VertexColorPreviewSettings,
    vertex_color_preview_material,
};
pub use systems::{create_default_preview_material, sync_preview_channel};

/// Embeds the preview shader into the binary.
pub(crate) fn register_embedded_assets(app: &mut App) {
    embedded_asset!(app, "shaders/vertex_color_preview.wgsl");
}
