//! Errors reported by painter operations.

use bevy::prelude::Entity;
use thiserror::Error;

/// Errors that can occur while selecting, previewing or painting a mesh.
///
/// None of these are fatal: the painter systems log them and leave the
/// selection and the mesh untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    #[error("Entity {0} does not exist")]
    MissingEntity(Entity),

    #[error("Vertex painter can not paint on entity {0}: it does not contain any mesh")]
    NoMesh(Entity),

    #[error("Can not preview entity {0}: it has no StandardMaterial to swap out")]
    NoRenderMaterial(Entity),

    #[error("Can not preview: preview material not set")]
    PreviewMaterialNotSet,

    #[error("Mesh of entity {0} is not loaded")]
    MeshNotLoaded(Entity),

    #[error("Mesh has no Float32x3 vertex positions")]
    MissingPositions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::world::World;

    #[test]
    fn test_messages_name_the_entity() {
        let entity = World::new().spawn_empty().id();
        let message = PaintError::NoMesh(entity).to_string();
        assert!(message.contains("does not contain any mesh"));
        assert!(message.contains(&entity.to_string()));
    }
}
