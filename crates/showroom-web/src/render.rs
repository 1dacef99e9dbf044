use fnv::FnvHashMap;
use glam::Mat4;
use showroom_core::scene::{FrameDescription, LightKind, LightingRig};
use showroom_core::{LineVertex, MeshData, MeshHandle, Surface};
use web_sys as web;
use wgpu::util::DeviceExt;

pub mod helpers;
pub mod targets;

use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightPacked {
    position: [f32; 4],
    color: [f32; 4],
    cone: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    lights: [LightPacked; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    fn from_transform(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
        }
    }
}

fn pack_lights(rig: &LightingRig) -> [LightPacked; 4] {
    rig.lights.map(|light| {
        let (kind, cone) = match light.kind {
            LightKind::Directional => (0.0, [0.0; 4]),
            LightKind::Point => (1.0, [0.0; 4]),
            LightKind::Spot { angle, penumbra } => {
                let inner = angle * (1.0 - penumbra.clamp(0.0, 1.0));
                (2.0, [angle.cos(), inner.cos(), 0.0, 0.0])
            }
        };
        let [r, g, b] = light.color;
        LightPacked {
            position: light.position.extend(kind).to_array(),
            color: [r, g, b, light.intensity],
            cone,
        }
    })
}

fn pack_globals(frame: &FrameDescription) -> GlobalsUniform {
    let rig = &frame.lights;
    let [r, g, b] = rig.ambient_color.map(|c| c * rig.ambient_intensity);
    GlobalsUniform {
        view_proj: frame.view_projection().to_cols_array_2d(),
        eye: frame.camera.eye.extend(1.0).to_array(),
        ambient: [r, g, b, 1.0],
        lights: pack_lights(rig),
    }
}

enum GpuGeometry {
    Triangles {
        vertices: wgpu::Buffer,
        indices: wgpu::Buffer,
        index_count: u32,
    },
    Lines {
        vertices: wgpu::Buffer,
        vertex_count: u32,
    },
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    identity_bind_group: wgpu::BindGroup,

    meshes: FnvHashMap<u32, GpuGeometry>,
    next_handle: u32,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let targets = RenderTargets::new(&device, width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[helpers::uniform_layout_entry(wgpu::ShaderStages::VERTEX)],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let mesh_pipeline = helpers::make_scene_pipeline(
            &device,
            "mesh_pipeline",
            &layout,
            &shader,
            ("vs_mesh", "fs_mesh"),
            helpers::mesh_vertex_layout(),
            wgpu::PrimitiveTopology::TriangleList,
            format,
            true,
        );
        let line_pipeline = helpers::make_scene_pipeline(
            &device,
            "line_pipeline",
            &layout,
            &shader,
            ("vs_line", "fs_line"),
            helpers::line_vertex_layout(),
            wgpu::PrimitiveTopology::LineList,
            format,
            false,
        );

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("model_object"),
            size: std::mem::size_of::<ObjectUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("model_bg"),
            layout: &object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });
        let identity_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("identity_object"),
            contents: bytemuck::bytes_of(&ObjectUniform::from_transform(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let identity_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("identity_bg"),
            layout: &object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: identity_buffer.as_entire_binding(),
            }],
        });

        log::info!("[gpu] surface {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            mesh_pipeline,
            line_pipeline,
            globals_buffer,
            globals_bind_group,
            model_buffer,
            model_bind_group,
            identity_bind_group,
            meshes: FnvHashMap::default(),
            next_handle: 0,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets
                .recreate(&self.device, width, height, self.config.format);
        }
    }

    /// Reapply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn insert(&mut self, geometry: GpuGeometry) -> MeshHandle {
        self.next_handle += 1;
        self.meshes.insert(self.next_handle, geometry);
        MeshHandle(self.next_handle)
    }
}

impl Surface for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn upload(&mut self, mesh: &MeshData) -> MeshHandle {
        let vertices = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertices"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let indices = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_indices"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.insert(GpuGeometry::Triangles {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
        })
    }

    fn upload_lines(&mut self, lines: &[LineVertex]) -> MeshHandle {
        let vertices = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("line_vertices"),
                contents: bytemuck::cast_slice(lines),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.insert(GpuGeometry::Lines {
            vertices,
            vertex_count: lines.len() as u32,
        })
    }

    fn release(&mut self, handle: MeshHandle) {
        match self.meshes.remove(&handle.0) {
            Some(GpuGeometry::Triangles {
                vertices, indices, ..
            }) => {
                vertices.destroy();
                indices.destroy();
            }
            Some(GpuGeometry::Lines { vertices, .. }) => vertices.destroy(),
            None => log::warn!("[gpu] release of unknown mesh {:?}", handle),
        }
    }

    fn draw(&mut self, frame: &FrameDescription) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&pack_globals(frame)),
        );
        if let Some(model) = &frame.model {
            self.queue.write_buffer(
                &self.model_buffer,
                0,
                bytemuck::bytes_of(&ObjectUniform::from_transform(model.transform)),
            );
        }

        let [r, g, b, a] = frame.clear_color;
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            // Opaque model first, then translucent ground and motes over it.
            if let Some(model) = &frame.model {
                if let Some(geometry) = self.meshes.get(&model.handle.0) {
                    rpass.set_bind_group(1, &self.model_bind_group, &[]);
                    draw_geometry(&mut rpass, geometry, &self.mesh_pipeline, &self.line_pipeline);
                }
            }
            rpass.set_bind_group(1, &self.identity_bind_group, &[]);
            let world = std::iter::once(frame.ground).chain(frame.particles);
            for handle in world {
                if let Some(geometry) = self.meshes.get(&handle.0) {
                    draw_geometry(&mut rpass, geometry, &self.mesh_pipeline, &self.line_pipeline);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn draw_geometry(
    rpass: &mut wgpu::RenderPass<'_>,
    geometry: &GpuGeometry,
    mesh_pipeline: &wgpu::RenderPipeline,
    line_pipeline: &wgpu::RenderPipeline,
) {
    match geometry {
        GpuGeometry::Triangles {
            vertices,
            indices,
            index_count,
        } => {
            if *index_count == 0 {
                return;
            }
            rpass.set_pipeline(mesh_pipeline);
            rpass.set_vertex_buffer(0, vertices.slice(..));
            rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..*index_count, 0, 0..1);
        }
        GpuGeometry::Lines {
            vertices,
            vertex_count,
        } => {
            if *vertex_count == 0 {
                return;
            }
            rpass.set_pipeline(line_pipeline);
            rpass.set_vertex_buffer(0, vertices.slice(..));
            rpass.draw(0..*vertex_count, 0..1);
        }
    }
}
