//! Material extension that visualizes raw vertex colors.

use bevy::ecs::system::SystemParamItem;
use bevy::pbr::{ExtendedMaterial, MaterialExtension, StandardMaterial};
use bevy::prelude::*;
use bevy::render::{
    render_resource::{
        AsBindGroup, AsBindGroupError, BindGroupLayout, BindGroupLayoutEntry, BindingResources,
        BindingType, BufferBindingType, BufferInitDescriptor, BufferUsages,
        OwnedBindingResource, ShaderStages, ShaderType, UnpreparedBindGroup,
    },
    renderer::RenderDevice,
};
use bevy::shader::ShaderRef;
use bytemuck::{Pod, Zeroable};

use crate::brush::ColorChannel;

/// Shader asset path (embedded).
const PREVIEW_SHADER_PATH: &str =
    "embedded://bevy_vertex_painter/material/shaders/vertex_color_preview.wgsl";

/// Convenience type alias for the complete preview material.
pub type VertexColorPreviewMaterial =
    ExtendedMaterial<StandardMaterial, VertexColorPreviewExtension>;

/// GPU-side settings for the preview shader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ShaderType, Pod, Zeroable)]
#[repr(C)]
pub struct VertexColorPreviewSettings {
    pub mode: u32,
    pub channel: u32,
    pub _padding0: u32,
    pub _padding1: u32,
}

impl VertexColorPreviewSettings {
    /// Show vertex RGB as-is.
    pub const MODE_RGB: u32 = 0;
    /// Show one channel as grayscale.
    pub const MODE_CHANNEL: u32 = 1;
}

/// Material extension that replaces shading with the raw vertex colors.
///
/// With `channel` set, only that channel is shown (as grayscale), which is
/// the only way to see what has been painted into alpha.
#[derive(Asset, TypePath, Clone, Debug, Default)]
pub struct VertexColorPreviewExtension {
    pub channel: Option<ColorChannel>,
}

impl VertexColorPreviewExtension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: ColorChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn build_settings(&self) -> VertexColorPreviewSettings {
        match self.channel {
            Some(channel) => VertexColorPreviewSettings {
                mode: VertexColorPreviewSettings::MODE_CHANNEL,
                channel: channel.index() as u32,
                ..default()
            },
            None => VertexColorPreviewSettings {
                mode: VertexColorPreviewSettings::MODE_RGB,
                ..default()
            },
        }
    }
}

/// Build the default preview material: unlit base, RGB display.
pub fn vertex_color_preview_material(channel: Option<ColorChannel>) -> VertexColorPreviewMaterial {
    ExtendedMaterial {
        base: StandardMaterial {
            unlit: true,
            ..default()
        },
        extension: VertexColorPreviewExtension { channel },
    }
}

impl AsBindGroup for VertexColorPreviewExtension {
    type Data = ();
    type Param = ();

    fn bind_group_data(&self) -> Self::Data {}

    fn unprepared_bind_group(
        &self,
        _layout: &BindGroupLayout,
        render_device: &RenderDevice,
        _param: &mut SystemParamItem<'_, '_, Self::Param>,
        _force_no_bindless: bool,
    ) -> Result<UnpreparedBindGroup, AsBindGroupError> {
        let settings = self.build_settings();
        let settings_buffer = render_device.create_buffer_with_data(&BufferInitDescriptor {
            label: Some("vertex_color_preview_settings"),
            contents: bytemuck::bytes_of(&settings),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        Ok(UnpreparedBindGroup {
            bindings: BindingResources(vec![(
                100,
                OwnedBindingResource::Buffer(settings_buffer),
            )]),
        })
    }

    fn bind_group_layout_entries(
        _render_device: &RenderDevice,
        _force_no_bindless: bool,
    ) -> Vec<BindGroupLayoutEntry>
    where
        Self: Sized,
    {
        vec![BindGroupLayoutEntry {
            binding: 100,
            visibility: ShaderStages::FRAGMENT,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Some(VertexColorPreviewSettings::min_size()),
            },
            count: None,
        }]
    }

    fn label() -> Option<&'static str> {
        Some("vertex_color_preview_extension")
    }
}

impl MaterialExtension for VertexColorPreviewExtension {
    fn fragment_shader() -> ShaderRef {
        PREVIEW_SHADER_PATH.into()
    }
}
