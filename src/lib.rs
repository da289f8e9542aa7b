//! # bevy_vertex_painter
//!
//! A Bevy plugin for painting per-vertex colors onto meshes at runtime.
//!
//! ## Features
//!
//! - Spherical brush with configurable radius, intensity and falloff curve
//! - Paints one color channel at a time, clamped to `[0, 1]`
//! - Hover selection with automatic ray cast collider setup and cleanup
//! - Unlit preview material showing the raw painted colors
//! - Reset of the selected mesh to transparent black
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_vertex_painter::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(VertexPainterPlugin::default())
//!         .insert_resource(Brush::default().with_channel(ColorChannel::Green))
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//! ) {
//!     // Any mesh with positions can be painted; colors are created on first stroke
//!     commands.spawn((
//!         Mesh3d(meshes.add(Sphere::new(1.0).mesh().ico(5).unwrap())),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//! }
//! ```
//!
//! Without scene input, drive the painter by writing [`PainterCommand`]s or
//! through [`PainterWorldExt`] from an exclusive system.
//!
//! [`PainterCommand`]: selection::PainterCommand
//! [`PainterWorldExt`]: selection::PainterWorldExt

pub mod brush;
pub mod error;
pub mod input;
pub mod material;
pub mod mesh;
mod plugin;
pub mod selection;

pub use plugin::{PainterSettings, PainterSystems, VertexPainterPlugin};

pub mod prelude {
    pub use crate::brush::{Brush, ColorChannel, FalloffCurve, Keyframe, apply_brush};
    pub use crate::error::PaintError;
    pub use crate::input::{BrushHit, PainterKeyBindings, StrokeState};
    pub use crate::material::{
        VertexColorPreviewExtension, VertexColorPreviewMaterial, vertex_color_preview_material,
    };
    pub use crate::mesh::MeshVertexColorExt;
    pub use crate::plugin::{PainterSettings, PainterSystems, VertexPainterPlugin};
    pub use crate::selection::{
        PaintCollider, PaintSelection, PainterCommand, PainterWorldExt, SelectionState,
    };
}
