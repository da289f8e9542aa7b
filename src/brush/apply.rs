//! Brush application onto mesh vertex colors.

use bevy::prelude::*;

use super::{Brush, ColorChannel};
use crate::error::PaintError;
use crate::mesh::MeshVertexColorExt;

/// Blends one brush sample into `color`.
///
/// Adds `falloff(distance / radius) * intensity` to `channel` and clamps that
/// channel to `[0, 1]`. The other three channels are returned as-is.
///
/// A non-positive radius or a non-finite falloff result leaves the color
/// unchanged.
///
/// # Example
/// ```
/// use bevy_vertex_painter::brush::{apply_brush, ColorChannel};
///
/// let color = apply_brush(0.5, 1.0, 0.2, |t| 1.0 - t, ColorChannel::Blue, [0.0, 0.0, 0.95, 1.0]);
/// assert_eq!(color, [0.0, 0.0, 1.0, 1.0]);
/// ```
pub fn apply_brush<F>(
    distance: f32,
    radius: f32,
    intensity: f32,
    falloff: F,
    channel: ColorChannel,
    color: [f32; 4],
) -> [f32; 4]
where
    F: Fn(f32) -> f32,
{
    if radius <= 0.0 {
        return color;
    }
    blend_channel(color, channel, falloff(distance / radius) * intensity)
}

/// Adds `amount` to one channel and clamps it to `[0, 1]`.
///
/// A non-finite amount leaves the color unchanged.
fn blend_channel(color: [f32; 4], channel: ColorChannel, amount: f32) -> [f32; 4] {
    if !amount.is_finite() {
        return color;
    }

    let mut out = color;
    let i = channel.index();
    let blended = out[i] + amount;
    out[i] = if blended.is_nan() { 0.0 } else { blended.clamp(0.0, 1.0) };
    out
}

/// Paints every vertex of `mesh` within `brush.radius` of `center`.
///
/// `center` is in world space; vertex positions are brought into world space
/// through `transform`. The color buffer is (re)created as zeroed black first
/// if it is missing or doesn't match the vertex count.
///
/// Returns the number of vertices that were inside the brush.
pub fn paint_vertices(
    mesh: &mut Mesh,
    transform: &GlobalTransform,
    center: Vec3,
    brush: &Brush,
) -> Result<usize, PaintError> {
    let positions = mesh
        .vertex_positions()
        .ok_or(PaintError::MissingPositions)?;

    if mesh.ensure_vertex_colors() {
        debug!(
            "Vertex painter: set up black vertex colors for {} vertices",
            positions.len()
        );
    }

    let colors = mesh
        .vertex_colors_mut()
        .ok_or(PaintError::MissingPositions)?;

    let mut painted = 0;
    for (position, color) in positions.iter().zip(colors.iter_mut()) {
        let distance = transform.transform_point(*position).distance(center);
        if distance < brush.radius {
            *color = blend_channel(*color, brush.channel, brush.strength_at(distance));
            painted += 1;
        }
    }

    Ok(painted)
}
