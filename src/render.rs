use crate::assets::DecodedImage;
use crate::constants::CLEAR_COLOR;
use heli_core::{Camera, NodeId, Scene, SceneRenderer, Shading, TextureSlot};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

struct GpuMesh {
    node: NodeId,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    draw_buffer: wgpu::Buffer,
    draw_bg: wgpu::BindGroup,
    color: [f32; 4],
    lit: bool,
    texture: Option<TextureSlot>,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    _depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    _msaa_tex: wgpu::Texture,
    msaa_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    // Bound until a slot's image arrives.
    _white_tex: wgpu::Texture,
    white_bg: wgpu::BindGroup,
    slots: [Option<(wgpu::Texture, wgpu::BindGroup)>; TextureSlot::ALL.len()],
    meshes: Vec<GpuMesh>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
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
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 fallback cannot meet the WebGPU defaults.
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
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
        let (_depth_tex, depth_view) = helpers::create_depth_target(&device, width, height);
        let (_msaa_tex, msaa_view) = helpers::create_msaa_target(&device, width, height, format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(heli_core::SCENE_WGSL.into()),
        });
        let globals_bgl = helpers::uniform_layout(&device, "globals_bgl");
        let draw_bgl = helpers::uniform_layout(&device, "draw_bgl");
        let texture_bgl = helpers::texture_layout(&device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&globals_bgl, &draw_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_scene_pipeline(&device, &pipeline_layout, &shader, format);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let (_white_tex, white) =
            helpers::upload_rgba_texture(&device, &queue, "white", 1, 1, &[255; 4]);
        let white_bg = helpers::texture_bind_group(&device, &texture_bgl, "white_bg", &white, &sampler);

        let meshes = scene
            .meshes()
            .map(|(node, desc)| {
                let data = desc.shape.mesh();
                let name = scene.node(node).map(|n| n.name).unwrap_or("mesh");
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(name),
                    contents: bytemuck::cast_slice(&data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(name),
                    contents: bytemuck::cast_slice(&data.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(name),
                    size: std::mem::size_of::<DrawUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let draw_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(name),
                    layout: &draw_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: draw_buffer.as_entire_binding(),
                    }],
                });
                let [r, g, b] = desc.material.color;
                GpuMesh {
                    node,
                    vertex_buffer,
                    index_buffer,
                    index_count: data.indices.len() as u32,
                    draw_buffer,
                    draw_bg,
                    color: [r, g, b, 1.0],
                    lit: desc.material.shading == Shading::Lit,
                    texture: desc.material.texture,
                }
            })
            .collect::<Vec<_>>();
        log::info!("[gpu] {:?} {}x{}, {} meshes", format, width, height, meshes.len());

        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            _depth_tex,
            depth_view,
            _msaa_tex,
            msaa_view,
            globals_buffer,
            globals_bg,
            texture_bgl,
            sampler,
            _white_tex,
            white_bg,
            slots: Default::default(),
            meshes,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Largest texture edge the device accepts.
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    pub fn set_texture(&mut self, slot: TextureSlot, image: &DecodedImage) {
        let label = format!("{:?}_tex", slot);
        let (texture, view) = helpers::upload_rgba_texture(
            &self.device,
            &self.queue,
            &label,
            image.width,
            image.height,
            &image.rgba,
        );
        let bind_group =
            helpers::texture_bind_group(&self.device, &self.texture_bgl, &label, &view, &self.sampler);
        self.slots[slot.index()] = Some((texture, bind_group));
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
            self.reconfigure();
        }
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        (self._depth_tex, self.depth_view) =
            helpers::create_depth_target(&self.device, self.width, self.height);
        (self._msaa_tex, self.msaa_view) =
            helpers::create_msaa_target(&self.device, self.width, self.height, self.config.format);
    }

    fn write_uniforms(&self, scene: &Scene, camera: &Camera) {
        let to_light = scene.sun.direction_to_light();
        let [sr, sg, sb] = scene.sun.color;
        let [ar, ag, ab] = scene.ambient.color;
        let globals = Globals {
            view_proj: camera.view_projection().to_cols_array_2d(),
            light_dir: [to_light.x, to_light.y, to_light.z, 0.0],
            light_color: [sr, sg, sb, scene.sun.intensity],
            ambient: [ar, ag, ab, scene.ambient.intensity],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        for mesh in &self.meshes {
            let model = match scene.world_matrix(mesh.node) {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("[gpu] skipping mesh: {}", e);
                    continue;
                }
            };
            let draw = DrawUniforms {
                model: model.to_cols_array_2d(),
                color: mesh.color,
                params: [if mesh.lit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
            };
            self.queue
                .write_buffer(&mesh.draw_buffer, 0, bytemuck::bytes_of(&draw));
        }
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        self.write_uniforms(scene, camera);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            for mesh in &self.meshes {
                let tex_bg = mesh
                    .texture
                    .and_then(|slot| self.slots[slot.index()].as_ref())
                    .map(|(_, bg)| bg)
                    .unwrap_or(&self.white_bg);
                rpass.set_bind_group(1, &mesh.draw_bg, &[]);
                rpass.set_bind_group(2, tex_bg, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl SceneRenderer for GpuState {
    type Error = wgpu::SurfaceError;

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error> {
        GpuState::render(self, scene, camera)
    }
}
