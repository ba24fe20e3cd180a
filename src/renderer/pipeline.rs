//! Forward render pipeline with uniform buffers.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt as _;

use crate::renderer::mesh::MeshVertex;

const FORWARD_SHADER: &str = include_str!("shaders/forward.wgsl");

/// Per-frame uniforms (camera and lighting).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _pad0: f32,
    pub ambient_color: [f32; 3],
    pub _pad1: f32,
    pub light_dir: [f32; 3],
    pub _pad2: f32,
    pub light_color: [f32; 3],
    pub _pad3: f32,
}

impl GlobalUniforms {
    #[must_use]
    pub fn new(
        view_proj: Mat4,
        camera_pos: Vec3,
        ambient_color: Vec3,
        light_dir: Vec3,
        light_color: Vec3,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.into(),
            _pad0: 0.0,
            ambient_color: ambient_color.into(),
            _pad1: 0.0,
            light_dir: light_dir.into(),
            _pad2: 0.0,
            light_color: light_color.into(),
            _pad3: 0.0,
        }
    }
}

/// Per-object uniforms (model matrix, color).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    /// mat3x3 columns padded to vec4 for uniform alignment
    pub normal_matrix: [[f32; 4]; 3],
    pub color: [f32; 4],
}

impl ObjectUniforms {
    #[must_use]
    pub fn new(model: Mat4, color: Vec4) -> Self {
        // Inverse transpose of the upper-left 3x3
        let n = Mat3::from_mat4(model).inverse().transpose();

        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: [
                [n.x_axis.x, n.x_axis.y, n.x_axis.z, 0.0],
                [n.y_axis.x, n.y_axis.y, n.y_axis.z, 0.0],
                [n.z_axis.x, n.z_axis.y, n.z_axis.z, 0.0],
            ],
            color: color.into(),
        }
    }
}

/// Pipeline and the bind group machinery around it.
pub struct ForwardPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub global_bind_group_layout: wgpu::BindGroupLayout,
    pub object_bind_group_layout: wgpu::BindGroupLayout,
    pub global_uniform_buffer: wgpu::Buffer,
    pub global_bind_group: wgpu::BindGroup,
}

impl ForwardPipeline {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("forward_shader"),
            source: wgpu::ShaderSource::Wgsl(FORWARD_SHADER.into()),
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let global_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("global_bind_group_layout"),
                entries: &[uniform_entry(0)],
            });

        let object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("object_bind_group_layout"),
                entries: &[uniform_entry(0)],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("forward_pipeline_layout"),
            bind_group_layouts: &[&global_bind_group_layout, &object_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("forward_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let global_uniforms = GlobalUniforms::new(
            Mat4::IDENTITY,
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::NEG_Y,
            Vec3::ONE,
        );

        let global_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("global_uniform_buffer"),
            contents: bytemuck::cast_slice(&[global_uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("global_bind_group"),
            layout: &global_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            global_bind_group_layout,
            object_bind_group_layout,
            global_uniform_buffer,
            global_bind_group,
        }
    }

    pub fn update_global_uniforms(&self, queue: &wgpu::Queue, uniforms: &GlobalUniforms) {
        queue.write_buffer(
            &self.global_uniform_buffer,
            0,
            bytemuck::cast_slice(&[*uniforms]),
        );
    }

    pub fn create_object_bind_group(
        &self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout: &self.object_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }
}
