//! Mouse and keyboard input for painting in the scene.
//!
//! Controls (see [`PainterKeyBindings`]):
//! - Hover: select the mesh under the cursor
//! - Left click (hold): paint
//! - 1-4: brush channel (R, G, B, A)
//! - Scroll wheel: brush radius
//! - [ / ]: brush intensity
//! - P: toggle raw painting preview
//! - Escape: reset the selected mesh's colors

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::brush::{Brush, ColorChannel};
use crate::selection::{PaintCollider, PaintSelection, PainterCommand};

/// Where the brush currently touches the selected mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Per-frame brush stroke state.
#[derive(Resource, Clone, Debug, Default)]
pub struct StrokeState {
    /// Paint button is held.
    pub painting: bool,
    /// Brush hit under the cursor, if any.
    pub hit: Option<BrushHit>,
    /// Point of the last paint command in the current stroke.
    pub last_painted: Option<Vec3>,
}

/// Key and button bindings for scene input.
#[derive(Resource, Clone, Debug)]
pub struct PainterKeyBindings {
    /// Keys selecting R, G, B and A.
    pub channels: [KeyCode; 4],
    pub decrease_intensity: KeyCode,
    pub increase_intensity: KeyCode,
    pub toggle_preview: KeyCode,
    pub reset_colors: KeyCode,
    pub paint: MouseButton,
    /// Radius change per scroll line.
    pub radius_step: f32,
    /// Intensity change per key press.
    pub intensity_step: f32,
}

impl Default for PainterKeyBindings {
    fn default() -> Self {
        Self {
            channels: [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
            ],
            decrease_intensity: KeyCode::BracketLeft,
            increase_intensity: KeyCode::BracketRight,
            toggle_preview: KeyCode::KeyP,
            reset_colors: KeyCode::Escape,
            paint: MouseButton::Left,
            radius_step: 0.5,
            intensity_step: 0.01,
        }
    }
}

/// Ray from the active camera through the primary window's cursor.
fn cursor_ray(
    window_q: &Query<&Window, With<PrimaryWindow>>,
    camera_q: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Ray3d> {
    let window = window_q.single().ok()?;
    let cursor_pos = window.cursor_position()?;
    let (camera, cam_transform) = camera_q.iter().find(|(camera, _)| camera.is_active)?;
    camera.viewport_to_world(cam_transform, cursor_pos).ok()
}

/// Brush radius after `scroll_lines` of wheel movement.
fn scrolled_radius(radius: f32, scroll_lines: f32, step: f32) -> f32 {
    radius + scroll_lines * step
}

/// Channel, intensity, radius and preview controls.
pub fn adjust_brush_from_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    scroll: Res<AccumulatedMouseScroll>,
    bindings: Res<PainterKeyBindings>,
    mut brush: ResMut<Brush>,
    mut commands: MessageWriter<PainterCommand>,
) {
    for (key, channel) in bindings.channels.iter().zip(ColorChannel::ALL) {
        if keyboard.just_pressed(*key) && brush.channel != channel {
            brush.channel = channel;
            debug!("Vertex painter: brush channel {}", channel.label());
        }
    }

    if keyboard.just_pressed(bindings.decrease_intensity) {
        let intensity = brush.intensity - bindings.intensity_step;
        brush.set_intensity(intensity);
    }
    if keyboard.just_pressed(bindings.increase_intensity) {
        let intensity = brush.intensity + bindings.intensity_step;
        brush.set_intensity(intensity);
    }

    if scroll.delta.y != 0.0 {
        let radius = scrolled_radius(brush.radius, scroll.delta.y, bindings.radius_step);
        brush.set_radius(radius);
    }

    if keyboard.just_pressed(bindings.toggle_preview) {
        commands.write(PainterCommand::TogglePreview);
    }
}

/// Selects the mesh under the cursor whenever the cursor moves.
///
/// Hovering empty space clears the selection.
pub fn pick_hovered_object(
    window_q: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    stroke: Res<StrokeState>,
    selection: Res<PaintSelection>,
    mut ray_cast: MeshRayCast,
    mut last_cursor: Local<Option<Vec2>>,
    mut commands: MessageWriter<PainterCommand>,
) {
    // Keep the target fixed for the length of a stroke.
    if stroke.painting {
        return;
    }

    let cursor = window_q.single().ok().and_then(Window::cursor_position);
    if cursor == *last_cursor {
        return;
    }
    *last_cursor = cursor;

    let Some(ray) = cursor_ray(&window_q, &camera_q) else {
        return;
    };

    let hovered = hovered_entity(&mut ray_cast, ray, RayCastVisibility::VisibleInView);
    if hovered != selection.entity() {
        commands.write(PainterCommand::Select(hovered));
    }
}

/// Casts the brush ray against the selected mesh's collider.
pub fn update_brush_hit(
    window_q: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    colliders: Query<(), With<PaintCollider>>,
    selection: Res<PaintSelection>,
    mut ray_cast: MeshRayCast,
    mut stroke: ResMut<StrokeState>,
) {
    stroke.hit = None;

    let Some(target) = selection.entity() else {
        return;
    };
    let Some(ray) = cursor_ray(&window_q, &camera_q) else {
        return;
    };

    stroke.hit = brush_hit(
        &mut ray_cast,
        ray,
        target,
        &colliders,
        RayCastVisibility::VisibleInView,
    );
}

/// Nearest mesh along `ray`.
fn hovered_entity(
    ray_cast: &mut MeshRayCast,
    ray: Ray3d,
    visibility: RayCastVisibility,
) -> Option<Entity> {
    let settings = MeshRayCastSettings::default().with_visibility(visibility);
    ray_cast
        .cast_ray(ray, &settings)
        .first()
        .map(|(entity, _)| *entity)
}

/// Where `ray` hits `target`, if it carries a [`PaintCollider`].
///
/// Other meshes neither block nor receive the hit.
fn brush_hit(
    ray_cast: &mut MeshRayCast,
    ray: Ray3d,
    target: Entity,
    colliders: &Query<(), With<PaintCollider>>,
    visibility: RayCastVisibility,
) -> Option<BrushHit> {
    let filter = |entity: Entity| entity == target && colliders.contains(entity);
    let settings = MeshRayCastSettings::default()
        .with_visibility(visibility)
        .with_filter(&filter);
    ray_cast
        .cast_ray(ray, &settings)
        .first()
        .map(|(_, hit)| BrushHit {
            point: hit.point,
            normal: hit.normal,
        })
}

/// Emits paint and reset commands from mouse and keyboard state.
///
/// A stroke paints once when it starts and again each time the brush hit
/// moves. Holding the button still adds nothing.
pub fn handle_stroke_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<PainterKeyBindings>,
    mut stroke: ResMut<StrokeState>,
    mut commands: MessageWriter<PainterCommand>,
) {
    if mouse_buttons.just_pressed(bindings.paint) {
        stroke.painting = true;
    }
    if !mouse_buttons.pressed(bindings.paint) {
        stroke.painting = false;
        stroke.last_painted = None;
    }

    // Nothing is painted while the ray misses the mesh.
    if let Some(hit) = stroke.hit.filter(|_| stroke.painting) {
        if stroke.last_painted != Some(hit.point) {
            commands.write(PainterCommand::Paint { point: hit.point });
            stroke.last_painted = Some(hit.point);
        }
    }

    if keyboard.just_pressed(bindings.reset_colors) {
        commands.write(PainterCommand::ResetColors);
    }
}

/// Draws the brush footprint where it touches the mesh.
pub fn draw_brush_outline(stroke: Res<StrokeState>, brush: Res<Brush>, mut gizmos: Gizmos) {
    let Some(hit) = stroke.hit else {
        return;
    };
    let rotation = Quat::from_rotation_arc(Vec3::Z, hit.normal.normalize_or(Vec3::Z));
    gizmos.circle(
        Isometry3d::new(hit.point, rotation),
        brush.radius,
        Color::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::camera::primitives::Aabb;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_default_bindings() {
        let bindings = PainterKeyBindings::default();
        assert_eq!(bindings.channels[3], KeyCode::Digit4);
        assert_eq!(bindings.toggle_preview, KeyCode::KeyP);
        assert_eq!(bindings.paint, MouseButton::Left);
    }

    #[test]
    fn test_scrolled_radius() {
        assert_eq!(scrolled_radius(1.0, 2.0, 0.5), 2.0);
        assert_eq!(scrolled_radius(1.0, -1.0, 0.5), 0.5);
    }

    fn input_world() -> World {
        let mut world = World::new();
        world.init_resource::<ButtonInput<KeyCode>>();
        world.init_resource::<ButtonInput<MouseButton>>();
        world.init_resource::<AccumulatedMouseScroll>();
        world.init_resource::<PainterKeyBindings>();
        world.init_resource::<StrokeState>();
        world.init_resource::<Brush>();
        world.init_resource::<Messages<PainterCommand>>();
        world
    }

    fn drain(world: &mut World) -> Vec<PainterCommand> {
        world
            .resource_mut::<Messages<PainterCommand>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_keys_adjust_brush() {
        let mut world = input_world();
        {
            let mut keys = world.resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::Digit3);
            keys.press(KeyCode::BracketRight);
            keys.press(KeyCode::KeyP);
        }
        world.resource_mut::<AccumulatedMouseScroll>().delta = Vec2::new(0.0, 2.0);

        world.run_system_once(adjust_brush_from_keys).unwrap();

        let brush = world.resource::<Brush>();
        assert_eq!(brush.channel, ColorChannel::Blue);
        assert!((brush.intensity - 0.06).abs() < 1e-6);
        assert_eq!(brush.radius, 2.0);
        assert_eq!(drain(&mut world), vec![PainterCommand::TogglePreview]);
    }

    #[test]
    fn test_intensity_keys_clamp() {
        let mut world = input_world();
        world.resource_mut::<Brush>().intensity = 0.1;
        world
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::BracketRight);

        world.run_system_once(adjust_brush_from_keys).unwrap();
        assert_eq!(world.resource::<Brush>().intensity, 0.1);
    }

    #[test]
    fn test_stroke_paints_only_on_hit() {
        let mut world = input_world();
        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);

        world.run_system_once(handle_stroke_input).unwrap();
        assert!(world.resource::<StrokeState>().painting);
        assert!(drain(&mut world).is_empty());

        let point = Vec3::new(1.0, 2.0, 3.0);
        world.resource_mut::<StrokeState>().hit = Some(BrushHit {
            point,
            normal: Vec3::Y,
        });
        world.run_system_once(handle_stroke_input).unwrap();
        assert_eq!(drain(&mut world), vec![PainterCommand::Paint { point }]);

        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        world.run_system_once(handle_stroke_input).unwrap();
        assert!(!world.resource::<StrokeState>().painting);
        assert!(drain(&mut world).is_empty());
    }

    #[test]
    fn test_escape_resets_colors() {
        let mut world = input_world();
        world
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);

        world.run_system_once(handle_stroke_input).unwrap();
        assert_eq!(drain(&mut world), vec![PainterCommand::ResetColors]);
    }

    #[test]
    fn test_stationary_hold_paints_once() {
        let mut world = input_world();
        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        let point = Vec3::new(0.5, 0.0, 0.0);
        world.resource_mut::<StrokeState>().hit = Some(BrushHit {
            point,
            normal: Vec3::Y,
        });

        let mut painted = 0;
        for _ in 0..60 {
            world.run_system_once(handle_stroke_input).unwrap();
            world.resource_mut::<ButtonInput<MouseButton>>().clear();
            painted += drain(&mut world).len();
        }
        assert_eq!(painted, 1);

        let moved = Vec3::new(0.6, 0.0, 0.0);
        world.resource_mut::<StrokeState>().hit = Some(BrushHit {
            point: moved,
            normal: Vec3::Y,
        });
        world.run_system_once(handle_stroke_input).unwrap();
        assert_eq!(drain(&mut world), vec![PainterCommand::Paint { point: moved }]);
    }

    #[test]
    fn test_new_stroke_repaints_same_point() {
        let mut world = input_world();
        let point = Vec3::ZERO;
        world.resource_mut::<StrokeState>().hit = Some(BrushHit {
            point,
            normal: Vec3::Y,
        });

        for _ in 0..2 {
            world
                .resource_mut::<ButtonInput<MouseButton>>()
                .press(MouseButton::Left);
            world.run_system_once(handle_stroke_input).unwrap();
            assert_eq!(drain(&mut world), vec![PainterCommand::Paint { point }]);

            let mut buttons = world.resource_mut::<ButtonInput<MouseButton>>();
            buttons.release(MouseButton::Left);
            buttons.clear();
            world.run_system_once(handle_stroke_input).unwrap();
            assert_eq!(world.resource::<StrokeState>().last_painted, None);
        }
    }

    fn ray_world() -> World {
        bevy::tasks::ComputeTaskPool::get_or_init(bevy::tasks::TaskPool::default);
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world
    }

    fn spawn_cube(world: &mut World, translation: Vec3) -> Entity {
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Mesh::from(Cuboid::new(1.0, 1.0, 1.0)));
        world
            .spawn((
                Mesh3d(mesh),
                Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5)),
                Visibility::default(),
                Transform::from_translation(translation),
                GlobalTransform::from_translation(translation),
            ))
            .id()
    }

    fn down_ray(x: f32) -> Ray3d {
        Ray3d::new(Vec3::new(x, 10.0, 0.0), Dir3::NEG_Y)
    }

    fn cast_brush(world: &mut World, ray: Ray3d, target: Entity) -> Option<BrushHit> {
        world
            .run_system_once(
                move |mut ray_cast: MeshRayCast, colliders: Query<(), With<PaintCollider>>| {
                    brush_hit(&mut ray_cast, ray, target, &colliders, RayCastVisibility::Any)
                },
            )
            .unwrap()
    }

    fn cast_hover(world: &mut World, ray: Ray3d) -> Option<Entity> {
        world
            .run_system_once(move |mut ray_cast: MeshRayCast| {
                hovered_entity(&mut ray_cast, ray, RayCastVisibility::Any)
            })
            .unwrap()
    }

    #[test]
    fn test_brush_hit_needs_collider() {
        let mut world = ray_world();
        let target = spawn_cube(&mut world, Vec3::ZERO);

        assert_eq!(cast_brush(&mut world, down_ray(0.0), target), None);

        world.entity_mut(target).insert(PaintCollider);
        let hit = cast_brush(&mut world, down_ray(0.0), target).unwrap();
        assert!((hit.point - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_brush_hit_ignores_other_meshes() {
        let mut world = ray_world();
        let target = spawn_cube(&mut world, Vec3::ZERO);
        let blocker = spawn_cube(&mut world, Vec3::new(0.0, 3.0, 0.0));
        let beside = spawn_cube(&mut world, Vec3::new(5.0, 0.0, 0.0));
        world.entity_mut(target).insert(PaintCollider);
        world.entity_mut(blocker).insert(PaintCollider);
        world.entity_mut(beside).insert(PaintCollider);

        // The blocker sits between the ray origin and the target.
        let hit = cast_brush(&mut world, down_ray(0.0), target).unwrap();
        assert!((hit.point.y - 0.5).abs() < 1e-4);

        assert_eq!(cast_brush(&mut world, down_ray(5.0), target), None);
    }

    #[test]
    fn test_hover_picks_nearest_mesh() {
        let mut world = ray_world();
        spawn_cube(&mut world, Vec3::ZERO);
        let top = spawn_cube(&mut world, Vec3::new(0.0, 3.0, 0.0));

        assert_eq!(cast_hover(&mut world, down_ray(0.0)), Some(top));
        assert_eq!(cast_hover(&mut world, down_ray(5.0)), None);
    }
}
