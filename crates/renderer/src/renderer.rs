//! Main renderer managing wgpu state and the per-frame passes.

use crate::{
    camera::{Camera, CameraUniform},
    mesh::Mesh,
    pipeline::{
        create_camera_bind_group_layout, create_cloak_pipeline, create_effect_bind_group_layout,
        create_hull_pipeline, create_overlay_bind_group_layout, create_overlay_pipeline,
        create_particle_pipeline, create_plasma_pipeline, create_scene_pipeline,
        create_shadow_pass_bind_group_layout, create_shadow_pipeline,
        create_shadow_sample_bind_group_layout, create_star_pipeline,
        create_terrain_bind_group_layout, create_terrain_pipeline,
    },
    texture::Texture,
    vertex::{InstanceData, OverlayVertex},
};
use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Errors surfaced during renderer creation.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,
}

/// Night-sky clear color behind the star field.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.002,
    g: 0.002,
    b: 0.012,
    a: 1.0,
};

/// Shared time/intensity uniform for the effect shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct EffectUniform {
    pub time: f32,
    pub intensity: f32,
    pub _pad: [f32; 2],
}

impl EffectUniform {
    fn new(time: f32, intensity: f32) -> Self {
        Self {
            time,
            intensity,
            _pad: [0.0; 2],
        }
    }
}

/// Terrain shader uniform (must match terrain.wgsl TerrainUniform).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TerrainUniform {
    pub sun_direction: [f32; 4],
    pub fog_color: [f32; 4],
    /// x = fog density, y = time, zw unused
    pub params: [f32; 4],
}

impl Default for TerrainUniform {
    fn default() -> Self {
        Self {
            sun_direction: [1.0, 1.0, 0.5, 0.0],
            fog_color: [0.01, 0.01, 0.03, 1.0],
            params: [0.0008, 0.0, 0.0, 0.0],
        }
    }
}

/// Shadow uniform (must match shadow.wgsl / scene.wgsl ShadowUniform).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ShadowUniform {
    pub light_view_proj: [[f32; 4]; 4],
    /// x = shadows enabled (0 or 1), yzw unused
    pub params: [f32; 4],
}

/// A uniform buffer plus its bind group (per effect).
struct EffectBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl EffectBinding {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[EffectUniform::new(0.0, 0.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, time: f32, intensity: f32) {
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[EffectUniform::new(time, intensity)]),
        );
    }
}

/// Main renderer state.
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,
    adapter_name: String,

    // Camera
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    // Effect uniforms
    hull_effect: EffectBinding,
    cloak_effect: EffectBinding,
    plasma_effect: EffectBinding,
    particle_effect: EffectBinding,

    // Terrain
    terrain_uniform: TerrainUniform,
    terrain_buffer: wgpu::Buffer,
    terrain_bind_group: wgpu::BindGroup,

    // Shadows
    shadow_uniform: ShadowUniform,
    shadow_buffer: wgpu::Buffer,
    shadow_map: Texture,
    shadow_sample_layout: wgpu::BindGroupLayout,
    shadow_pass_bind_group: wgpu::BindGroup,
    shadow_sample_bind_group: wgpu::BindGroup,

    // Pipelines
    scene_pipeline: wgpu::RenderPipeline,
    hull_pipeline: wgpu::RenderPipeline,
    terrain_pipeline: wgpu::RenderPipeline,
    /// Line-mode terrain for the lowest quality tier; absent when the
    /// adapter lacks POLYGON_MODE_LINE.
    terrain_wire_pipeline: Option<wgpu::RenderPipeline>,
    cloak_pipeline: wgpu::RenderPipeline,
    plasma_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,

    overlay_bind_group: wgpu::BindGroup,
    depth_texture: Texture,

    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    frame_instance_offset: u32,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::NoAdapter)?;

        let adapter_name = adapter.get_info().name;
        log::info!("Using GPU: {:?}", adapter_name);

        // Wireframe terrain needs line polygon mode; only request it when
        // the adapter has it so we never fail device creation over a
        // low-quality nicety.
        let wireframe_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if wireframe_supported {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let present_mode = surface_caps
            .present_modes
            .iter()
            .find(|m| matches!(m, wgpu::PresentMode::Mailbox))
            .copied()
            .unwrap_or(wgpu::PresentMode::AutoVsync);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        // Camera
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_layout = create_camera_bind_group_layout(&device);
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Effects
        let effect_layout = create_effect_bind_group_layout(&device);
        let hull_effect = EffectBinding::new(&device, &effect_layout, "Hull Effect");
        let cloak_effect = EffectBinding::new(&device, &effect_layout, "Cloak Effect");
        let plasma_effect = EffectBinding::new(&device, &effect_layout, "Plasma Effect");
        let particle_effect = EffectBinding::new(&device, &effect_layout, "Particle Effect");

        // Terrain
        let terrain_layout = create_terrain_bind_group_layout(&device);
        let terrain_uniform = TerrainUniform::default();
        let terrain_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Uniform Buffer"),
            contents: bytemuck::cast_slice(&[terrain_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let terrain_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Terrain Bind Group"),
            layout: &terrain_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: terrain_buffer.as_entire_binding(),
                },
            ],
        });

        // Shadow map (initial size; the quality layer can resize it)
        let shadow_pass_layout = create_shadow_pass_bind_group_layout(&device);
        let shadow_sample_layout = create_shadow_sample_bind_group_layout(&device);
        let shadow_uniform = ShadowUniform {
            light_view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            params: [0.0; 4],
        };
        let shadow_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shadow Uniform"),
            contents: bytemuck::cast_slice(&[shadow_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let shadow_map = Texture::create_shadow_map(&device, 1024);
        let shadow_pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Pass Bind Group"),
            layout: &shadow_pass_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: shadow_buffer.as_entire_binding(),
            }],
        });
        let shadow_sample_bind_group = Self::build_shadow_sample_bind_group(
            &device,
            &shadow_sample_layout,
            &shadow_buffer,
            &shadow_map,
        );

        // Overlay (bitmap font atlas)
        let overlay_layout = create_overlay_bind_group_layout(&device);
        let font_texture = Texture::font_atlas(&device, &queue);
        let overlay_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Overlay Bind Group"),
            layout: &overlay_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&font_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&font_texture.sampler),
                },
            ],
        });

        // Pipelines
        let scene_pipeline =
            create_scene_pipeline(&device, &config, &camera_layout, &shadow_sample_layout);
        let hull_pipeline = create_hull_pipeline(
            &device,
            &config,
            &camera_layout,
            &effect_layout,
            &shadow_sample_layout,
        );
        let terrain_pipeline = create_terrain_pipeline(
            &device,
            &config,
            &terrain_layout,
            &shadow_sample_layout,
            wgpu::PolygonMode::Fill,
        );
        let terrain_wire_pipeline = wireframe_supported.then(|| {
            create_terrain_pipeline(
                &device,
                &config,
                &terrain_layout,
                &shadow_sample_layout,
                wgpu::PolygonMode::Line,
            )
        });
        let cloak_pipeline = create_cloak_pipeline(&device, &config, &camera_layout, &effect_layout);
        let plasma_pipeline =
            create_plasma_pipeline(&device, &config, &camera_layout, &effect_layout);
        let particle_pipeline =
            create_particle_pipeline(&device, &config, &camera_layout, &effect_layout);
        let star_pipeline = create_star_pipeline(&device, &config, &camera_layout);
        let overlay_pipeline = create_overlay_pipeline(&device, &config, &overlay_layout);
        let shadow_pipeline = create_shadow_pipeline(&device, &shadow_pass_layout);

        let depth_texture = Texture::create_depth_texture(&device, &config, "Depth Texture");

        let max_instances = 4096;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (max_instances as usize * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            adapter_name,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            hull_effect,
            cloak_effect,
            plasma_effect,
            particle_effect,
            terrain_uniform,
            terrain_buffer,
            terrain_bind_group,
            shadow_uniform,
            shadow_buffer,
            shadow_map,
            shadow_sample_layout,
            shadow_pass_bind_group,
            shadow_sample_bind_group,
            scene_pipeline,
            hull_pipeline,
            terrain_pipeline,
            terrain_wire_pipeline,
            cloak_pipeline,
            plasma_pipeline,
            particle_pipeline,
            star_pipeline,
            overlay_pipeline,
            shadow_pipeline,
            overlay_bind_group,
            depth_texture,
            instance_buffer,
            max_instances,
            frame_instance_offset: 0,
        })
    }

    fn build_shadow_sample_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
        map: &Texture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Sample Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&map.sampler),
                },
            ],
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            Texture::create_depth_texture(&self.device, &self.config, "Depth Texture");
    }

    /// Recreate the shadow map at a new resolution (quality tier change).
    pub fn set_shadow_map_size(&mut self, map_size: u32) {
        self.shadow_map = Texture::create_shadow_map(&self.device, map_size);
        self.shadow_sample_bind_group = Self::build_shadow_sample_bind_group(
            &self.device,
            &self.shadow_sample_layout,
            &self.shadow_buffer,
            &self.shadow_map,
        );
    }

    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update(camera);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Push per-frame effect uniforms: hull cloak mix, cloak field
    /// intensity, plasma power, particle opacity.
    pub fn update_effects(
        &mut self,
        time: f32,
        cloak_intensity: f32,
        plasma_power: f32,
        particle_opacity: f32,
    ) {
        self.hull_effect.write(&self.queue, time, cloak_intensity);
        self.cloak_effect.write(&self.queue, time, cloak_intensity);
        self.plasma_effect.write(&self.queue, time, plasma_power);
        self.particle_effect.write(&self.queue, time, particle_opacity);
    }

    /// Set terrain sun direction, fog tint/density, and time.
    pub fn update_terrain(
        &mut self,
        sun_direction: Vec3,
        fog_color: [f32; 3],
        fog_density: f32,
        time: f32,
    ) {
        self.terrain_uniform.sun_direction =
            [sun_direction.x, sun_direction.y, sun_direction.z, 0.0];
        self.terrain_uniform.fog_color = [fog_color[0], fog_color[1], fog_color[2], 1.0];
        self.terrain_uniform.params = [fog_density, time, 0.0, 0.0];
        self.queue.write_buffer(
            &self.terrain_buffer,
            0,
            bytemuck::cast_slice(&[self.terrain_uniform]),
        );
    }

    /// Point the shadow light: orthographic box of `extent` half-size
    /// around `center`, looking along `-sun_direction`.
    pub fn update_shadow_light(
        &mut self,
        sun_direction: Vec3,
        center: Vec3,
        extent: f32,
        enabled: bool,
    ) {
        let eye = center + sun_direction.normalize() * extent * 2.0;
        let view = Mat4::look_at_rh(eye, center, Vec3::Y);
        let proj = Mat4::orthographic_rh(-extent, extent, -extent, extent, 0.1, extent * 5.0);
        self.shadow_uniform.light_view_proj = (proj * view).to_cols_array_2d();
        self.shadow_uniform.params[0] = if enabled { 1.0 } else { 0.0 };
        self.queue.write_buffer(
            &self.shadow_buffer,
            0,
            bytemuck::cast_slice(&[self.shadow_uniform]),
        );
    }

    /// Begin a new frame, returns the surface texture and command encoder.
    pub fn begin_frame(&mut self) -> Result<(wgpu::SurfaceTexture, wgpu::CommandEncoder)> {
        self.frame_instance_offset = 0;
        let output = self.surface.get_current_texture()?;
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        Ok((output, encoder))
    }

    /// Stage instances into the shared buffer; returns the draw range.
    fn queue_instances(&mut self, instances: &[InstanceData]) -> Option<(u32, u32)> {
        if instances.is_empty() {
            return None;
        }
        let offset = self.frame_instance_offset;
        let remaining = self.max_instances.saturating_sub(offset) as usize;
        let count = instances.len().min(remaining);
        if count == 0 {
            return None;
        }

        let byte_offset = (offset as usize * std::mem::size_of::<InstanceData>()) as u64;
        self.queue.write_buffer(
            &self.instance_buffer,
            byte_offset,
            bytemuck::cast_slice(&instances[..count]),
        );
        self.frame_instance_offset = offset + count as u32;
        Some((offset, count as u32))
    }

    /// Depth-only shadow pass over the given mesh. `clear` on the first
    /// call of the frame.
    pub fn render_shadow_instanced(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        mesh: &Mesh,
        instances: &[InstanceData],
        clear: bool,
    ) {
        let Some((offset, count)) = self.queue_instances(instances) else {
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map.view,
                depth_ops: Some(wgpu::Operations {
                    load: if clear {
                        wgpu::LoadOp::Clear(1.0)
                    } else {
                        wgpu::LoadOp::Load
                    },
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.shadow_pipeline);
        render_pass.set_bind_group(0, &self.shadow_pass_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.num_indices, 0, offset..(offset + count));
    }

    /// First color pass of the frame: clears color + depth and draws the
    /// star field.
    pub fn render_stars(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        star_count: u32,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Star Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.star_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.draw(0..star_count, 0..1);
    }

    /// Terrain pass; `wireframe` selects the line-mode rendition when the
    /// adapter supports it.
    pub fn render_terrain(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        wireframe: bool,
    ) {
        if mesh.num_indices == 0 {
            return;
        }
        let pipeline = if wireframe {
            self.terrain_wire_pipeline
                .as_ref()
                .unwrap_or(&self.terrain_pipeline)
        } else {
            &self.terrain_pipeline
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Terrain Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.terrain_bind_group, &[]);
        render_pass.set_bind_group(1, &self.shadow_sample_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.num_indices, 0, 0..1);
    }

    /// Lit instanced pass (dressing).
    pub fn render_scene_instanced(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        self.draw_instanced(encoder, view, DrawKind::Scene, mesh, instances);
    }

    /// Hull pass (metamaterial + cloak shimmer).
    pub fn render_hull(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        self.draw_instanced(encoder, view, DrawKind::Hull, mesh, instances);
    }

    /// Plasma ring pass (additive glow).
    pub fn render_plasma(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        self.draw_instanced(encoder, view, DrawKind::Plasma, mesh, instances);
    }

    /// Billboard particle pass (additive).
    pub fn render_particles(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        self.draw_instanced(encoder, view, DrawKind::Particles, mesh, instances);
    }

    /// Cloaking field shell pass (fresnel shimmer).
    pub fn render_cloak(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        self.draw_instanced(encoder, view, DrawKind::Cloak, mesh, instances);
    }

    fn draw_instanced(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        kind: DrawKind,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        let Some((offset, count)) = self.queue_instances(instances) else {
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(kind.label()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        match kind {
            DrawKind::Scene => {
                render_pass.set_pipeline(&self.scene_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.shadow_sample_bind_group, &[]);
            }
            DrawKind::Hull => {
                render_pass.set_pipeline(&self.hull_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.hull_effect.bind_group, &[]);
                render_pass.set_bind_group(2, &self.shadow_sample_bind_group, &[]);
            }
            DrawKind::Cloak => {
                render_pass.set_pipeline(&self.cloak_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.cloak_effect.bind_group, &[]);
            }
            DrawKind::Plasma => {
                render_pass.set_pipeline(&self.plasma_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.plasma_effect.bind_group, &[]);
            }
            DrawKind::Particles => {
                render_pass.set_pipeline(&self.particle_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_bind_group(1, &self.particle_effect.bind_group, &[]);
            }
        }

        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.num_indices, 0, offset..(offset + count));
    }

    /// Render the screen-space overlay. Call as the very last pass before
    /// end_frame.
    pub fn render_overlay(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        vertices: &[OverlayVertex],
        indices: &[u32],
    ) {
        if vertices.is_empty() || indices.is_empty() {
            return;
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.overlay_pipeline);
        render_pass.set_bind_group(0, &self.overlay_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
    }

    /// End frame and present.
    pub fn end_frame(&self, output: wgpu::SurfaceTexture, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    /// Get window dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Access the device for mesh creation.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// GPU adapter name (capability probe input).
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }
}

#[derive(Clone, Copy)]
enum DrawKind {
    Scene,
    Hull,
    Cloak,
    Plasma,
    Particles,
}

impl DrawKind {
    fn label(self) -> &'static str {
        match self {
            DrawKind::Scene => "Scene Pass",
            DrawKind::Hull => "Hull Pass",
            DrawKind::Cloak => "Cloak Pass",
            DrawKind::Plasma => "Plasma Pass",
            DrawKind::Particles => "Particle Pass",
        }
    }
}
