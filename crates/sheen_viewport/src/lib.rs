use anyhow::{Context, Result};
use bytemuck::Zeroable;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wgpu::{util::DeviceExt, Device, Instance, Queue, Surface, SurfaceConfiguration};

use sheen_core::{encode_spheres, FrameParams, GpuSphere, SceneDescription, SceneUniform, Texture};
use sheen_math::{CameraState, Vec3};

mod hud;

pub use hud::{render_hud, HudStats};

/// Workgroup edge length of the tracing kernel.
pub const WORKGROUP_SIZE: u32 = 16;

/// Format of the traced image before it is blitted to the swap-chain.
const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Workgroups needed to cover a `width x height` image.
pub fn dispatch_size(width: u32, height: u32) -> (u32, u32) {
    (width.div_ceil(WORKGROUP_SIZE), height.div_ceil(WORKGROUP_SIZE))
}

/// Sphere list as uploaded. The storage buffer may not be empty, so an
/// empty scene uploads one zeroed record and relies on `sphere_count = 0`.
fn sphere_upload(scene: &SceneDescription) -> Vec<GpuSphere> {
    let spheres = encode_spheres(&scene.spheres);
    if spheres.is_empty() {
        vec![GpuSphere::zeroed()]
    } else {
        spheres
    }
}

/// Compute entry point for the scene's sky strategy.
fn trace_entry_point(sky: Option<&Texture>) -> &'static str {
    if sky.is_some() {
        "trace_textured"
    } else {
        "trace_checker"
    }
}

/// Buffers and views bound to the tracing kernel.
struct TraceBindings<'a> {
    scene: &'a wgpu::Buffer,
    spheres: &'a wgpu::Buffer,
    params: &'a wgpu::Buffer,
    sky: &'a wgpu::TextureView,
    output: &'a wgpu::TextureView,
}

fn create_trace_bind_group(device: &Device, layout: &wgpu::BindGroupLayout, bindings: TraceBindings<'_>) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Trace Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: bindings.scene.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: bindings.spheres.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: bindings.params.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::TextureView(bindings.sky),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: wgpu::BindingResource::TextureView(bindings.output),
            },
        ],
    })
}

fn create_blit_bind_group(device: &Device, layout: &wgpu::BindGroupLayout, output: &wgpu::TextureView) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Blit Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::TextureView(output),
        }],
    })
}

/// Core renderer managing wgpu state
pub struct Renderer {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub size: (u32, u32),

    // Tracing kernel
    trace_pipeline: wgpu::ComputePipeline,
    trace_layout: wgpu::BindGroupLayout,
    trace_bind_group: wgpu::BindGroup,
    scene_buffer: wgpu::Buffer,
    sphere_buffer: wgpu::Buffer,
    params_buffer: wgpu::Buffer,
    params: FrameParams,
    sky_view: wgpu::TextureView,
    output_view: wgpu::TextureView,

    // Blit to the swap-chain
    blit_pipeline: wgpu::RenderPipeline,
    blit_layout: wgpu::BindGroupLayout,
    blit_bind_group: wgpu::BindGroup,

    // egui state
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // UI state
    pub show_ui: bool,
    pub fps: f32,
    frame_count: u32,
    fps_update_timer: f32,

    sky_label: &'static str,
    device_lost: Arc<AtomicBool>,
}

impl Renderer {
    /// Create the output storage texture for the given size
    fn create_output_texture(device: &Device, size: (u32, u32)) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Traced Output"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OUTPUT_FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Upload the sky panorama, or a 1x1 placeholder for the checker sky.
    fn create_sky_texture(device: &Device, queue: &Queue, sky: Option<&Texture>) -> Result<wgpu::TextureView> {
        let placeholder = Texture::solid_color(Vec3::ZERO);
        let texture = sky.unwrap_or(&placeholder);

        let max_side = device.limits().max_texture_dimension_2d;
        if texture.width > max_side || texture.height > max_side {
            anyhow::bail!(
                "Sky texture {} is {}x{}, larger than the device limit of {}",
                texture.path,
                texture.width,
                texture.height,
                max_side
            );
        }

        let gpu_texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Sky Texture"),
                size: wgpu::Extent3d {
                    width: texture.width,
                    height: texture.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba32Float,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            texture.as_bytes(),
        );

        log::debug!(
            "Uploaded sky texture {} ({}x{}, {} bytes)",
            texture.path,
            texture.width,
            texture.height,
            texture.size_bytes()
        );

        Ok(gpu_texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    /// Create a new renderer for the given window and scene
    pub async fn new(window: Arc<winit::window::Window>, scene: &SceneDescription) -> Result<Self> {
        let size = window.inner_size();
        let size = (size.width.max(1), size.height.max(1));

        // Create wgpu instance
        let instance = Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using adapter: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Sheen Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let device_lost = Arc::new(AtomicBool::new(false));
        {
            let flag = device_lost.clone();
            device.set_device_lost_callback(move |reason, message| {
                log::error!("GPU device lost ({:?}): {}", reason, message);
                flag.store(true, Ordering::SeqCst);
            });
        }

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.0,
            height: size.1,
            present_mode: wgpu::PresentMode::Fifo, // VSync
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        // Scene resources
        let sky_texture = scene.load_sky_texture().context("Failed to load sky texture")?;
        let sky_view = Self::create_sky_texture(&device, &queue, sky_texture.as_ref())?;

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::bytes_of(&SceneUniform::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let spheres = sphere_upload(scene);
        let sphere_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Buffer"),
            contents: bytemuck::cast_slice(&spheres),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let params = FrameParams::new(size.0, size.1, scene.spheres.len(), scene.sky.check_size());
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Params Buffer"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let output_view = Self::create_output_texture(&device, size);

        // Tracing pipeline
        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let trace_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Trace Bind Group Layout"),
            entries: &[
                uniform_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                uniform_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::StorageTexture {
                        access: wgpu::StorageTextureAccess::WriteOnly,
                        format: OUTPUT_FORMAT,
                        view_dimension: wgpu::TextureViewDimension::D2,
                    },
                    count: None,
                },
            ],
        });

        let trace_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Tracer Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tracer.wgsl").into()),
        });

        let trace_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Trace Pipeline Layout"),
            bind_group_layouts: &[&trace_layout],
            push_constant_ranges: &[],
        });

        let entry_point = trace_entry_point(sky_texture.as_ref());
        let trace_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Trace Pipeline"),
            layout: Some(&trace_pipeline_layout),
            module: &trace_shader,
            entry_point,
            compilation_options: Default::default(),
            cache: None,
        });

        log::info!("Trace pipeline created ({})", entry_point);

        // Blit pipeline
        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blit Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
        });

        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
        });

        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&blit_layout],
            push_constant_ranges: &[],
        });

        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: "vs_main",
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None, // max_texture_side (use default)
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            None, // No depth testing for egui
            1,
            false, // allow_srgb_render_target
        );

        log::info!("egui initialized");

        let trace_bind_group = create_trace_bind_group(
            &device,
            &trace_layout,
            TraceBindings {
                scene: &scene_buffer,
                spheres: &sphere_buffer,
                params: &params_buffer,
                sky: &sky_view,
                output: &output_view,
            },
        );
        let blit_bind_group = create_blit_bind_group(&device, &blit_layout, &output_view);

        log::info!(
            "Renderer ready: {}x{}, {} spheres, {} sky",
            size.0,
            size.1,
            scene.spheres.len(),
            scene.sky_label()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            trace_pipeline,
            trace_layout,
            trace_bind_group,
            scene_buffer,
            sphere_buffer,
            params_buffer,
            params,
            sky_view,
            output_view,
            blit_pipeline,
            blit_layout,
            blit_bind_group,
            egui_ctx,
            egui_state,
            egui_renderer,
            show_ui: true,
            fps: 0.0,
            frame_count: 0,
            fps_update_timer: 0.0,
            sky_label: scene.sky_label(),
            device_lost,
        })
    }

    /// Resize the surface and the traced image. Zero sizes are ignored.
    pub fn resize(&mut self, new_size: (u32, u32)) {
        if new_size.0 > 0 && new_size.1 > 0 {
            self.size = new_size;
            self.config.width = new_size.0;
            self.config.height = new_size.1;
            self.surface.configure(&self.device, &self.config);

            // Recreate output texture and everything bound to it
            self.output_view = Self::create_output_texture(&self.device, new_size);
            self.trace_bind_group = create_trace_bind_group(
                &self.device,
                &self.trace_layout,
                TraceBindings {
                    scene: &self.scene_buffer,
                    spheres: &self.sphere_buffer,
                    params: &self.params_buffer,
                    sky: &self.sky_view,
                    output: &self.output_view,
                },
            );
            self.blit_bind_group = create_blit_bind_group(&self.device, &self.blit_layout, &self.output_view);

            self.params.width = new_size.0;
            self.params.height = new_size.1;
            self.queue
                .write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&self.params));
        }
    }

    /// Reconfigure the surface at its current size (after `SurfaceError::Lost`).
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload this frame's scene record (call after integrating the camera)
    pub fn update_scene(&mut self, uniform: &SceneUniform) {
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Whether the device-lost callback has fired.
    pub fn is_device_lost(&self) -> bool {
        self.device_lost.load(Ordering::SeqCst)
    }

    /// Handle egui window event - returns true if event was consumed by egui
    pub fn handle_egui_event(&mut self, window: &winit::window::Window, event: &winit::event::WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        response.consumed
    }

    /// Update FPS counter (call each frame with delta_time)
    pub fn update_fps(&mut self, delta_time: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta_time;

        // Update FPS every 0.5 seconds
        if self.fps_update_timer >= 0.5 {
            self.fps = self.frame_count as f32 / self.fps_update_timer;
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }

    /// Trace, blit and present one frame
    pub fn render(&mut self, window: &winit::window::Window, camera: &CameraState) -> Result<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Prepare egui UI
        let raw_input = self.egui_state.take_egui_input(window);
        let show_ui = self.show_ui;
        let stats = HudStats {
            fps: self.fps,
            camera: *camera,
            sphere_count: self.params.sphere_count as usize,
            sky_label: self.sky_label,
            resolution: self.size,
        };

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_ui {
                render_hud(ctx, &stats);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.size.0, self.size.1],
            pixels_per_point: window.scale_factor() as f32,
        };

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        // Upload egui textures
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        // Trace every pixel
        {
            let mut trace_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Trace Pass"),
                timestamp_writes: None,
            });

            let (groups_x, groups_y) = dispatch_size(self.size.0, self.size.1);
            trace_pass.set_pipeline(&self.trace_pipeline);
            trace_pass.set_bind_group(0, &self.trace_bind_group, &[]);
            trace_pass.dispatch_workgroups(groups_x, groups_y, 1);
        }

        // Copy the traced image to the swap-chain
        {
            let mut blit_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            blit_pass.set_pipeline(&self.blit_pipeline);
            blit_pass.set_bind_group(0, &self.blit_bind_group, &[]);
            blit_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        // Render egui on top
        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime(); // Need 'static lifetime for egui renderer

            self.egui_renderer
                .render(&mut egui_pass, &paint_jobs, &screen_descriptor);
        }

        // Free egui textures
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheen_core::{SkyMode, Sphere};

    #[test]
    fn test_dispatch_size() {
        assert_eq!(dispatch_size(1280, 720), (80, 45));
        assert_eq!(dispatch_size(1, 1), (1, 1));
        assert_eq!(dispatch_size(33, 17), (3, 2));
    }

    #[test]
    fn test_empty_scene_uploads_placeholder() {
        let scene = SceneDescription {
            spheres: Vec::new(),
            ..Default::default()
        };

        let upload = sphere_upload(&scene);
        assert_eq!(upload.len(), 1);
        assert_eq!(upload[0].radius, 0.0);
    }

    #[test]
    fn test_sphere_upload_keeps_order() {
        let scene = SceneDescription {
            spheres: vec![
                Sphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0),
                Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5),
            ],
            ..Default::default()
        };

        let upload = sphere_upload(&scene);
        assert_eq!(upload.len(), 2);
        assert_eq!(upload[1].center, [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_entry_point_follows_sky_mode() {
        let scene = SceneDescription::default();
        assert!(matches!(scene.sky.mode, SkyMode::Checker { .. }));
        assert_eq!(trace_entry_point(None), "trace_checker");

        let texture = Texture::solid_color(Vec3::ONE);
        assert_eq!(trace_entry_point(Some(&texture)), "trace_textured");
    }

    fn validate_wgsl(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source).unwrap_or_else(|e| panic!("{}", e.emit_to_string(source)));
        naga::valid::Validator::new(naga::valid::ValidationFlags::all(), naga::valid::Capabilities::empty())
            .validate(&module)
            .unwrap();
        module
    }

    #[test]
    fn test_tracer_shader_validates() {
        let module = validate_wgsl(include_str!("shaders/tracer.wgsl"));

        for name in ["trace_checker", "trace_textured"] {
            let entry = module
                .entry_points
                .iter()
                .find(|entry| entry.name == name)
                .unwrap();
            assert_eq!(entry.stage, naga::ShaderStage::Compute);
            assert_eq!(entry.workgroup_size, [WORKGROUP_SIZE, WORKGROUP_SIZE, 1]);
        }
    }

    #[test]
    fn test_blit_shader_validates() {
        let module = validate_wgsl(include_str!("shaders/blit.wgsl"));

        let stages: Vec<_> = module.entry_points.iter().map(|entry| entry.stage).collect();
        assert!(stages.contains(&naga::ShaderStage::Vertex));
        assert!(stages.contains(&naga::ShaderStage::Fragment));
    }
}
