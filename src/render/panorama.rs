use super::helpers;
use crate::texture::DecodedImage;
use gallery_core::{inverted_sphere, PANORAMA_WGSL};
use wgpu::util::DeviceExt;

pub(crate) struct PanoramaResources {
    pipeline: wgpu::RenderPipeline,
    positions: wgpu::Buffer,
    uvs: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture_bg: wgpu::BindGroup,
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
}

/// Dark 1x1 stand-in until the first panorama arrives.
fn placeholder() -> DecodedImage {
    DecodedImage {
        width: 1,
        height: 1,
        rgba: vec![8, 8, 12, 255],
    }
}

pub(crate) fn create_panorama_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    scene_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    radius: f32,
    segments: (u32, u32),
) -> PanoramaResources {
    let mesh = inverted_sphere(radius, segments.0, segments.1);
    let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("panorama_positions"),
        contents: bytemuck::cast_slice(&mesh.positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uvs = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("panorama_uvs"),
        contents: bytemuck::cast_slice(&mesh.uvs),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("panorama_indices"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("panorama_tex_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("panorama_sampler"),
        // u wraps across the seam, v stops at the poles
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });
    let (texture, view) = helpers::upload_rgba_texture(device, queue, "panorama_tex", &placeholder());
    let texture_bg = texture_bind_group(device, &texture_bgl, &view, &sampler);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("panorama_shader"),
        source: wgpu::ShaderSource::Wgsl(PANORAMA_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("panorama_pl"),
        bind_group_layouts: &[scene_bgl, &texture_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("panorama_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![1 => Float32x2],
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // Seen from inside only; no culling needed.
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    PanoramaResources {
        pipeline,
        positions,
        uvs,
        indices,
        index_count: mesh.indices.len() as u32,
        texture_bgl,
        sampler,
        texture_bg,
        _texture: texture,
    }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("panorama_tex_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

impl PanoramaResources {
    /// Swap the sphere's texture.
    pub(crate) fn set_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
    ) {
        let (texture, view) = helpers::upload_rgba_texture(device, queue, "panorama_tex", image);
        self.texture_bg = texture_bind_group(device, &self.texture_bgl, &view, &self.sampler);
        self._texture = texture;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.texture_bg, &[]);
        rpass.set_vertex_buffer(0, self.positions.slice(..));
        rpass.set_vertex_buffer(1, self.uvs.slice(..));
        rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
