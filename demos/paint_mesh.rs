//! Interactive vertex color painting example.
//!
//! Paint color channels onto meshes in real-time.
//!
//! Controls:
//! - Hover: select the mesh under the cursor
//! - Left click (hold): Paint the current channel
//! - 1-4: Select channel (1=red, 2=green, 3=blue, 4=alpha)
//! - Scroll wheel: Adjust brush size
//! - [ / ]: Adjust brush intensity (negative erases)
//! - P: Show / hide raw painting
//! - Escape: Reset the selected mesh

use bevy::prelude::*;
use bevy_vertex_painter::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(VertexPainterPlugin::default())
        .insert_resource(
            Brush::default()
                .with_radius(0.75)
                .with_falloff(FalloffCurve::Smooth),
        )
        .add_systems(Startup, setup)
        .add_systems(Update, (show_painted_colors, ui_text))
        .run();
}

#[derive(Component)]
struct UiText;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Dense meshes paint smoothly; the brush only touches vertices.
    let ground = Plane3d::default().mesh().size(8.0, 8.0).subdivisions(64);
    commands.spawn((
        Mesh3d(meshes.add(ground)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.6, 0.6, 0.6),
            ..default()
        })),
    ));

    if let Ok(sphere) = Sphere::new(1.0).mesh().ico(5) {
        commands.spawn((
            Mesh3d(meshes.add(sphere)),
            MeshMaterial3d(materials.add(StandardMaterial::default())),
            Transform::from_xyz(0.0, 1.5, 0.0),
        ));
    }

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(6.0, 6.0, 8.0).looking_at(Vec3::new(0.0, 0.5, 0.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.4, 0.0)),
    ));

    commands.spawn((
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        UiText,
    ));
}

/// Vertex colors multiply the base color, so keep them visible while
/// painting by giving freshly colored meshes a white base.
fn show_painted_colors(
    selection: Res<PaintSelection>,
    query: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !selection.is_changed() {
        return;
    }
    let Some(entity) = selection.entity() else { return };
    let Ok(material) = query.get(entity) else { return };
    if let Some(mat) = materials.get_mut(&material.0) {
        mat.base_color = Color::WHITE;
    }
}

fn ui_text(
    brush: Res<Brush>,
    selection: Res<PaintSelection>,
    mut text_q: Query<&mut Text, With<UiText>>,
) {
    let Ok(mut text) = text_q.single_mut() else { return };

    let channel_list: String = ColorChannel::ALL
        .iter()
        .enumerate()
        .map(|(i, channel)| {
            let marker = if *channel == brush.channel { ">" } else { " " };
            format!("{} {}: {}", marker, i + 1, channel.label())
        })
        .collect::<Vec<_>>()
        .join("\n");

    let target = match selection.entity() {
        Some(entity) => format!("{entity}"),
        None => "none".to_string(),
    };

    *text = Text::new(format!(
        "Paint Controls:\n\
         Left Click (hold): Paint channel\n\
         Scroll: Brush size ({:.2})\n\
         [ / ]: Intensity ({:+.2})\n\
         P: {}\n\
         Escape: Reset colors\n\
         \n\
         Selected: {}\n\
         \n\
         Channels (press 1-4):\n\
         {}\n",
        brush.radius,
        brush.intensity,
        selection.preview_label(),
        target,
        channel_list
    ));
}
