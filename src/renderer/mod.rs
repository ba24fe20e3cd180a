//! Forward renderer.
//!
//! A deliberately small renderer: one opaque pass, one directional light
//! plus an ambient term, flat base colors. GPU meshes and per-object
//! uniform buffers are created lazily on first sight of a mesh key or node
//! handle and cached across frames.

pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod settings;

pub use context::WgpuContext;
pub use mesh::{GpuMesh, MeshVertex};
pub use pipeline::{ForwardPipeline, GlobalUniforms, ObjectUniforms};
pub use settings::RenderSettings;

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use wgpu::util::DeviceExt as _;
use winit::window::Window;

use crate::errors::{Result, ViewerError};
use crate::scene::{LightKind, MeshKey, NodeHandle, Scene};

pub struct Renderer {
    settings: RenderSettings,
    context: Option<WgpuContext>,
    pipeline: Option<ForwardPipeline>,

    mesh_cache: HashMap<MeshKey, GpuMesh>,
    object_bindings: HashMap<NodeHandle, (wgpu::Buffer, wgpu::BindGroup)>,
}

impl Renderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            context: None,
            pipeline: None,
            mesh_cache: HashMap::new(),
            object_bindings: HashMap::new(),
        }
    }

    pub async fn init(&mut self, window: Arc<Window>) -> Result<()> {
        let size = window.inner_size();
        let context =
            WgpuContext::new(window, &self.settings, size.width.max(1), size.height.max(1))
                .await?;
        let pipeline = ForwardPipeline::new(
            &context.device,
            context.color_format(),
            context.depth_format,
        );

        self.context = Some(context);
        self.pipeline = Some(pipeline);
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(context) = &mut self.context {
            context.resize(width, height);
        }
    }

    /// Renders one frame of the scene through its active camera.
    ///
    /// Skips the frame silently when the renderer is uninitialized, no
    /// camera is active, or the surface is temporarily unavailable.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        let Some(context) = self.context.as_mut() else {
            return Ok(());
        };
        let Some(pipeline) = self.pipeline.as_ref() else {
            return Ok(());
        };

        let Some(camera) = scene
            .active_camera
            .and_then(|h| scene.get_node(h))
            .and_then(|n| n.camera)
            .and_then(|key| scene.get_camera(key))
        else {
            return Ok(());
        };

        // Accumulate lighting from the scene's light nodes
        let mut ambient_color = Vec3::ZERO;
        let mut light_dir = Vec3::NEG_Y;
        let mut light_color = Vec3::ZERO;
        for (_, node) in scene.iter_nodes() {
            let Some(light) = node.light.and_then(|key| scene.get_light(key)) else {
                continue;
            };
            match light.kind {
                LightKind::Ambient => ambient_color += light.scaled_color(),
                LightKind::Directional => {
                    // Shines from the node's position toward the origin
                    let pos: Vec3 = node.world_matrix().translation.into();
                    light_dir = (-pos).normalize_or(Vec3::NEG_Y);
                    light_color = light.scaled_color();
                }
            }
        }

        pipeline.update_global_uniforms(
            &context.queue,
            &GlobalUniforms::new(
                camera.view_projection_matrix(),
                camera.world_position(),
                ambient_color,
                light_dir,
                light_color,
            ),
        );

        let frame = match context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = context.size();
                context.resize(w, h);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(ViewerError::SurfaceError(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("forward_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(context.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: context.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&pipeline.pipeline);
            pass.set_bind_group(0, &pipeline.global_bind_group, &[]);

            for (handle, node) in scene.iter_nodes() {
                if !node.visible {
                    continue;
                }
                let Some(mesh_key) = node.mesh else {
                    continue;
                };
                let Some(mesh) = scene.get_mesh(mesh_key) else {
                    continue;
                };

                let gpu_mesh = self.mesh_cache.entry(mesh_key).or_insert_with(|| {
                    GpuMesh::from_geometry(&context.device, &mesh.geometry, &mesh.name)
                });

                let uniforms =
                    ObjectUniforms::new(node.transform.world_matrix_as_mat4(), mesh.base_color);

                let (buffer, bind_group) =
                    self.object_bindings.entry(handle).or_insert_with(|| {
                        let buffer =
                            context
                                .device
                                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                                    label: Some("object_uniform_buffer"),
                                    contents: bytemuck::cast_slice(&[uniforms]),
                                    usage: wgpu::BufferUsages::UNIFORM
                                        | wgpu::BufferUsages::COPY_DST,
                                });
                        let bind_group =
                            pipeline.create_object_bind_group(&context.device, &buffer);
                        (buffer, bind_group)
                    });
                context
                    .queue
                    .write_buffer(buffer, 0, bytemuck::cast_slice(&[uniforms]));

                pass.set_bind_group(1, &*bind_group, &[]);
                pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}
