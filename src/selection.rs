//! Selection state machine for the painted mesh.
//!
//! At most one entity is selected at a time:
//!
//! ```text
//! Empty ──select──▶ Selected ──preview on──▶ Previewing
//!   ▲                  │  ▲                      │
//!   └──select(None)────┘  └─────preview off──────┘
//! ```
//!
//! Leaving a selection restores the backed-up material if previewing and
//! removes the [`PaintCollider`] the painter added, so nothing it changed on
//! the entity outlives the selection.

use bevy::ecs::system::SystemState;
use bevy::prelude::*;

use crate::brush::{Brush, paint_vertices};
use crate::error::PaintError;
use crate::material::VertexColorPreviewMaterial;
use crate::mesh::MeshVertexColorExt;
use crate::plugin::PainterSettings;

/// Marks an entity as a target for brush ray casts.
///
/// The painter inserts one on selected entities that lack it and removes it
/// again on deselection. Entities that carry their own are left alone.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PaintCollider;

/// Coarse state of the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Selected,
    Previewing,
}

/// The entity currently being painted.
#[derive(Clone, Debug)]
pub struct SelectedObject {
    pub entity: Entity,
    /// Original material, held only while the preview material is shown.
    pub backup_material: Option<Handle<StandardMaterial>>,
    /// Whether the [`PaintCollider`] was added by the painter.
    pub owns_collider: bool,
}

impl SelectedObject {
    pub fn is_previewing(&self) -> bool {
        self.backup_material.is_some()
    }
}

/// Current painter selection.
#[derive(Resource, Clone, Debug, Default)]
pub struct PaintSelection {
    target: Option<SelectedObject>,
}

impl PaintSelection {
    pub fn target(&self) -> Option<&SelectedObject> {
        self.target.as_ref()
    }

    pub fn entity(&self) -> Option<Entity> {
        self.target.as_ref().map(|t| t.entity)
    }

    pub fn is_previewing(&self) -> bool {
        self.target.as_ref().is_some_and(SelectedObject::is_previewing)
    }

    pub fn state(&self) -> SelectionState {
        match &self.target {
            None => SelectionState::Empty,
            Some(t) if t.is_previewing() => SelectionState::Previewing,
            Some(_) => SelectionState::Selected,
        }
    }

    /// Label for a preview toggle button.
    pub fn preview_label(&self) -> &'static str {
        if self.is_previewing() {
            "Hide Raw Painting"
        } else {
            "Show Raw Painting"
        }
    }
}

/// Requests consumed by [`apply_painter_commands`].
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum PainterCommand {
    /// Select an entity, or clear the selection with `None`.
    Select(Option<Entity>),
    /// Turn the raw painting preview on or off.
    SetPreview(bool),
    TogglePreview,
    /// Reset the selected mesh to transparent black.
    ResetColors,
    /// Apply the brush at a world-space point.
    Paint { point: Vec3 },
}

/// Painter operations on a [`World`].
///
/// These are the state machine transitions. Each leaves the world unchanged
/// when it returns an error.
pub trait PainterWorldExt {
    /// Select `target`, or clear the selection with `None`.
    ///
    /// Selecting the current entity again does nothing. An entity without a
    /// [`Mesh3d`] is rejected and the previous selection is kept.
    fn select_paint_target(&mut self, target: Option<Entity>) -> Result<(), PaintError>;

    /// Swap the selected entity's material for the preview material, or back.
    fn set_paint_preview(&mut self, enabled: bool) -> Result<(), PaintError>;

    /// Reset the selected mesh's colors to transparent black.
    ///
    /// Returns the number of vertices reset (0 with nothing selected).
    fn reset_paint_colors(&mut self) -> Result<usize, PaintError>;

    /// Paint the selected mesh with the current [`Brush`] at `point`.
    ///
    /// Returns the number of vertices inside the brush (0 with nothing selected).
    fn paint_at(&mut self, point: Vec3) -> Result<usize, PaintError>;
}

impl PainterWorldExt for World {
    fn select_paint_target(&mut self, target: Option<Entity>) -> Result<(), PaintError> {
        if self.resource::<PaintSelection>().entity() == target {
            return Ok(());
        }

        let Some(entity) = target else {
            clear_selection(self);
            return Ok(());
        };

        let entity_ref = self
            .get_entity(entity)
            .map_err(|_| PaintError::MissingEntity(entity))?;
        if !entity_ref.contains::<Mesh3d>() {
            return Err(PaintError::NoMesh(entity));
        }

        clear_selection(self);

        let mut entity_mut = self
            .get_entity_mut(entity)
            .map_err(|_| PaintError::MissingEntity(entity))?;
        let owns_collider = !entity_mut.contains::<PaintCollider>();
        if owns_collider {
            entity_mut.insert(PaintCollider);
        }

        self.resource_mut::<PaintSelection>().target = Some(SelectedObject {
            entity,
            backup_material: None,
            owns_collider,
        });
        debug!("Vertex painter: selected {entity}");
        Ok(())
    }

    fn set_paint_preview(&mut self, enabled: bool) -> Result<(), PaintError> {
        let Some(target) = self.resource::<PaintSelection>().target.clone() else {
            debug!("Vertex painter: nothing selected to preview");
            return Ok(());
        };
        if target.is_previewing() == enabled {
            return Ok(());
        }

        if enabled {
            let preview = self
                .resource::<PainterSettings>()
                .preview_material
                .clone()
                .ok_or(PaintError::PreviewMaterialNotSet)?;

            let mut entity_mut = self
                .get_entity_mut(target.entity)
                .map_err(|_| PaintError::MissingEntity(target.entity))?;
            let original = entity_mut
                .get::<MeshMaterial3d<StandardMaterial>>()
                .map(|m| m.0.clone())
                .ok_or(PaintError::NoRenderMaterial(target.entity))?;

            entity_mut
                .remove::<MeshMaterial3d<StandardMaterial>>()
                .insert(MeshMaterial3d(preview));
            set_backup(self, Some(original));
            info!("Vertex painter: set preview material on {}", target.entity);
        } else {
            if let Some(original) = target.backup_material {
                if let Ok(mut entity_mut) = self.get_entity_mut(target.entity) {
                    entity_mut
                        .remove::<MeshMaterial3d<VertexColorPreviewMaterial>>()
                        .insert(MeshMaterial3d(original));
                }
            }
            set_backup(self, None);
            info!("Vertex painter: unset preview material on {}", target.entity);
        }
        Ok(())
    }

    fn reset_paint_colors(&mut self) -> Result<usize, PaintError> {
        let Some((entity, mesh)) = selected_mesh(self)? else {
            return Ok(0);
        };

        let mut meshes = self.resource_mut::<Assets<Mesh>>();
        let mesh = meshes
            .get_mut(&mesh)
            .ok_or(PaintError::MeshNotLoaded(entity))?;
        let count = mesh
            .reset_vertex_colors()
            .ok_or(PaintError::MissingPositions)?;
        debug!("Vertex painter: reset {count} vertex colors on {entity}");
        Ok(count)
    }

    fn paint_at(&mut self, point: Vec3) -> Result<usize, PaintError> {
        let Some((entity, mesh)) = selected_mesh(self)? else {
            return Ok(0);
        };

        let transform = self
            .get::<GlobalTransform>(entity)
            .copied()
            .unwrap_or_default();
        let brush = self.resource::<Brush>().clone();

        let mut meshes = self.resource_mut::<Assets<Mesh>>();
        let mesh = meshes
            .get_mut(&mesh)
            .ok_or(PaintError::MeshNotLoaded(entity))?;
        paint_vertices(mesh, &transform, point, &brush)
    }
}

/// Selected entity and its current mesh handle.
///
/// The mesh is read from the entity each time so a swapped [`Mesh3d`] is
/// painted rather than the one captured at selection time.
fn selected_mesh(world: &World) -> Result<Option<(Entity, Handle<Mesh>)>, PaintError> {
    let Some(target) = world.resource::<PaintSelection>().target() else {
        return Ok(None);
    };
    let entity = target.entity;
    let mesh = world
        .get::<Mesh3d>(entity)
        .map(|m| m.0.clone())
        .ok_or(PaintError::NoMesh(entity))?;
    Ok(Some((entity, mesh)))
}

fn set_backup(world: &mut World, backup: Option<Handle<StandardMaterial>>) {
    if let Some(target) = world.resource_mut::<PaintSelection>().target.as_mut() {
        target.backup_material = backup;
    }
}

/// Restore everything the painter changed on the selected entity and drop it.
fn clear_selection(world: &mut World) {
    if world.resource::<PaintSelection>().is_previewing() {
        if let Err(err) = world.set_paint_preview(false) {
            warn!("Vertex painter: failed to restore material: {err}");
        }
    }

    let Some(target) = world.resource_mut::<PaintSelection>().target.take() else {
        return;
    };
    if target.owns_collider {
        if let Ok(mut entity_mut) = world.get_entity_mut(target.entity) {
            entity_mut.remove::<PaintCollider>();
        }
    }
    debug!("Vertex painter: released {}", target.entity);
}

/// Applies queued [`PainterCommand`]s in order.
///
/// Failures are logged and leave the painter state as it was.
pub fn apply_painter_commands(
    world: &mut World,
    commands: &mut SystemState<MessageReader<PainterCommand>>,
) {
    // A despawned selection has nothing left to restore.
    if let Some(entity) = world.resource::<PaintSelection>().entity() {
        if world.get_entity(entity).is_err() {
            debug!("Vertex painter: selected {entity} was despawned");
            world.resource_mut::<PaintSelection>().target = None;
        }
    }

    let pending: Vec<PainterCommand> = commands.get_mut(world).read().copied().collect();
    for command in pending {
        let result = match command {
            PainterCommand::Select(target) => world.select_paint_target(target),
            PainterCommand::SetPreview(enabled) => world.set_paint_preview(enabled),
            PainterCommand::TogglePreview => {
                let enabled = !world.resource::<PaintSelection>().is_previewing();
                world.set_paint_preview(enabled)
            }
            PainterCommand::ResetColors => world.reset_paint_colors().map(|_| ()),
            PainterCommand::Paint { point } => world.paint_at(point).map(|_| ()),
        };

        if let Err(err) = result {
            error!("Vertex painter: {err}");
        }
    }
}
