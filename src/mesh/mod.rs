//! Vertex color buffer access for painted meshes.
//!
//! Painted colors live in [`Mesh::ATTRIBUTE_COLOR`] as `Float32x4`, one
//! linear RGBA value per vertex:
//! - `[0, 0, 0, 0]`: transparent black, the reset state
//! - each channel is kept in `[0, 1]` by the brush

use bevy::mesh::VertexAttributeValues;
use bevy::prelude::*;

/// Color every vertex receives when a color buffer is created or reset.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Extension trait for reading and writing per-vertex paint colors.
pub trait MeshVertexColorExt {
    /// World-independent vertex positions, if the mesh has `Float32x3` positions.
    fn vertex_positions(&self) -> Option<Vec<Vec3>>;

    /// Number of vertices, taken from the position attribute.
    fn paint_vertex_count(&self) -> Option<usize>;

    /// Painted colors, if a `Float32x4` color buffer matching the vertex count exists.
    fn vertex_colors(&self) -> Option<&[[f32; 4]]>;

    /// Mutable access to painted colors, with the same conditions as [`Self::vertex_colors`].
    fn vertex_colors_mut(&mut self) -> Option<&mut [[f32; 4]]>;

    /// Replace a missing, non-`Float32x4` or mismatched color buffer with
    /// [`CLEAR_COLOR`].
    ///
    /// Returns `true` if a new buffer was created.
    fn ensure_vertex_colors(&mut self) -> bool;

    /// Reset every vertex to [`CLEAR_COLOR`].
    ///
    /// Returns the number of vertices reset, or `None` without positions.
    fn reset_vertex_colors(&mut self) -> Option<usize>;
}

impl MeshVertexColorExt for Mesh {
    fn vertex_positions(&self) -> Option<Vec<Vec3>> {
        let positions = self.attribute(Mesh::ATTRIBUTE_POSITION)?.as_float3()?;
        Some(positions.iter().map(|p| Vec3::from_array(*p)).collect())
    }

    fn paint_vertex_count(&self) -> Option<usize> {
        self.attribute(Mesh::ATTRIBUTE_POSITION)?
            .as_float3()
            .map(|p| p.len())
    }

    fn vertex_colors(&self) -> Option<&[[f32; 4]]> {
        let count = self.paint_vertex_count()?;
        match self.attribute(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(colors)) if colors.len() == count => {
                Some(colors.as_slice())
            }
            _ => None,
        }
    }

    fn vertex_colors_mut(&mut self) -> Option<&mut [[f32; 4]]> {
        let count = self.paint_vertex_count()?;
        match self.attribute_mut(Mesh::ATTRIBUTE_COLOR) {
            Some(VertexAttributeValues::Float32x4(colors)) if colors.len() == count => {
                Some(colors.as_mut_slice())
            }
            _ => None,
        }
    }

    fn ensure_vertex_colors(&mut self) -> bool {
        let Some(count) = self.paint_vertex_count() else {
            return false;
        };
        if self.vertex_colors().is_some() {
            return false;
        }
        self.insert_attribute(Mesh::ATTRIBUTE_COLOR, vec![CLEAR_COLOR; count]);
        true
    }

    fn reset_vertex_colors(&mut self) -> Option<usize> {
        let count = self.paint_vertex_count()?;
        self.insert_attribute(Mesh::ATTRIBUTE_COLOR, vec![CLEAR_COLOR; count]);
        Some(count)
    }
}
