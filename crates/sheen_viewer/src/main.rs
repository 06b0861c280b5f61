use anyhow::{Context, Result};
use sheen_core::{encode_scene, SceneDescription};
use sheen_math::{compute_view_basis, CameraController, CameraState};
use sheen_viewport::Renderer;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod input;

use input::{scroll_delta, InputQueue};

/// Application state
struct App {
    scene: SceneDescription,
    controller: CameraController,
    camera: CameraState,

    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,

    input: InputQueue,
    last_frame_time: Instant,

    /// First fatal error, returned from `main` once the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(scene: SceneDescription) -> Self {
        let controller = CameraController::new(scene.controls.to_settings());
        let camera = Self::start_pose(&scene, &controller);

        Self {
            scene,
            controller,
            camera,
            window: None,
            renderer: None,
            input: InputQueue::new(),
            last_frame_time: Instant::now(),
            error: None,
        }
    }

    fn start_pose(scene: &SceneDescription, controller: &CameraController) -> CameraState {
        let mut camera = scene.camera.to_state();
        controller.clamp(&mut camera);
        camera
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Sheen")
            .with_inner_size(winit::dpi::PhysicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        // Initialize renderer (async in pollster block)
        let renderer = pollster::block_on(Renderer::new(window.clone(), &self.scene))
            .context("Failed to initialize renderer")?;

        self.window = Some(window);
        self.renderer = Some(renderer);

        log::info!("Window and renderer initialized");
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    /// One frame: integrate input, upload the scene record, trace, present.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let now = Instant::now();
        let delta_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        renderer.update_fps(delta_time);

        self.input.apply(&self.controller, &mut self.camera, renderer.size);

        let basis = compute_view_basis(&self.camera);
        let uniform = encode_scene(&self.scene.sky.colors(), &self.camera, &basis);
        renderer.update_scene(&uniform);

        if let Err(e) = renderer.render(window, &self.camera) {
            if let Some(surface_err) = e.downcast_ref::<wgpu::SurfaceError>() {
                match surface_err {
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                        log::warn!("Surface {:?}, reconfiguring", surface_err);
                        renderer.reconfigure();
                    }
                    wgpu::SurfaceError::OutOfMemory => {
                        self.fail(event_loop, anyhow::anyhow!("Out of GPU memory"));
                        return;
                    }
                    _ => {
                        log::warn!("Surface error: {:?}", surface_err);
                    }
                }
            } else {
                log::error!("Render error: {:?}", e);
            }
        }

        if renderer.is_device_lost() {
            self.fail(event_loop, anyhow::anyhow!("GPU device lost"));
            return;
        }

        window.request_redraw();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, keycode: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.input.key_down(keycode);

                match keycode {
                    KeyCode::Escape => {
                        log::info!("Escape pressed, exiting");
                        event_loop.exit();
                    }
                    KeyCode::KeyR => {
                        self.camera = Self::start_pose(&self.scene, &self.controller);
                        log::info!("Camera reset");
                    }
                    KeyCode::KeyH => {
                        if let Some(renderer) = &mut self.renderer {
                            renderer.show_ui = !renderer.show_ui;
                        }
                    }
                    _ => {}
                }
            }
            ElementState::Released => {
                self.input.key_up(keycode);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_graphics(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_egui_event(window, &event) {
                // Event was consumed by egui, don't process it further
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize((physical_size.width, physical_size.height));
                    log::info!("Resized to {}x{}", physical_size.width, physical_size.height);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.input.set_dragging(state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.pointer_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.scrolled(scroll_delta(delta));
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    self.input
                        .touch_moved(touch.id, touch.location.x, touch.location.y);
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.input.touch_ended(touch.id);
                }
            },
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, keycode, state);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Request continuous redraw when keys are pressed for smooth movement
        if self.input.is_moving() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

fn load_scene() -> Result<SceneDescription> {
    match std::env::args().nth(1) {
        Some(path) => SceneDescription::load(&path).with_context(|| format!("Failed to load scene {}", path)),
        None => {
            log::info!("No scene given, using the built-in scene");
            let scene = SceneDescription::default();
            scene.validate()?;
            Ok(scene)
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Sheen");

    let scene = load_scene()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(scene);

    log::info!("Running event loop");
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
