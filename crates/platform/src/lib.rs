//! Platform layer: windowing & event loop.
//!
//! Owns the window, the camera and the demo world. Each redraw samples input,
//! steps the camera and gathers per-object shader data for the draw calls.

mod input;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use corelib::ecs::{MeshKind, Renderable, World};
use corelib::{Camera, CameraConfig, InputState, Key, Transform, Vec3, Vec4, VertexShaderData, vec3};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

pub use input::{WinitInput, map_key};

/// Startup options for [`run`].
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    pub width: u32,
    pub height: u32,
    pub camera: CameraConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            camera: CameraConfig::default(),
        }
    }
}

/// Width over height, guarding against a minimised (zero-height) window.
pub fn aspect_ratio(size: PhysicalSize<u32>) -> f32 {
    size.width.max(1) as f32 / size.height.max(1) as f32
}

/// The three hardcoded meshes, side by side.
pub fn demo_world() -> World {
    let mut world = World::new();
    let layout = [
        (MeshKind::Triangle, vec3(-1.5, 0.0, 0.0), Vec4::new(1.0, 0.5, 0.5, 1.0)),
        (MeshKind::Quad, vec3(0.0, 0.0, 0.0), Vec4::new(0.5, 1.0, 0.5, 1.0)),
        (MeshKind::Weird, vec3(1.5, 0.0, 0.0), Vec4::new(0.5, 0.5, 1.0, 1.0)),
    ];
    for (mesh, position, tint) in layout {
        world.spawn(
            Transform::from_position(position),
            Some(Renderable::new(mesh).with_tint(tint)),
        );
    }
    world
}

/// Gather shader data for every renderable, in spawn order.
pub fn collect_draws(world: &mut World, camera: &Camera, out: &mut Vec<VertexShaderData>) {
    out.clear();
    for (transform, renderable) in world.iter_renderables_mut() {
        out.push(VertexShaderData::new(renderable.tint, transform, camera));
    }
}

const SPIN: Vec3 = Vec3::new(0.0, 0.5, 0.0);
const TITLE_INTERVAL_SECS: f32 = 0.5;

struct App {
    config: RunConfig,
    window: Option<Arc<Window>>,
    camera: Option<Camera>,
    world: World,
    input: WinitInput,
    draws: Vec<VertexShaderData>,
    last_frame: Instant,
    title_timer: f32,
    frames_since_title: u32,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: RunConfig) -> Self {
        Self {
            config,
            window: None,
            camera: None,
            world: demo_world(),
            input: WinitInput::new(),
            draws: Vec::new(),
            last_frame: Instant::now(),
            title_timer: 0.0,
            frames_since_title: 0,
            error: None,
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(camera)) = (&self.window, &mut self.camera) else {
            return;
        };

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.input.key_down(Key::Quit) {
            log::info!("Quit key pressed. Exiting event loop.");
            event_loop.exit();
            return;
        }

        camera.update(&self.input, dt);
        self.input.begin_frame();

        self.world.system_rotate_all(dt, SPIN);
        collect_draws(&mut self.world, camera, &mut self.draws);
        log::trace!(
            "Frame dt={:.4}s, {} draw(s), {} bytes of constants",
            dt,
            self.draws.len(),
            self.draws.len() as u64 * VertexShaderData::buffer_size()
        );

        self.frames_since_title += 1;
        self.title_timer += dt;
        if self.title_timer >= TITLE_INTERVAL_SECS {
            let fps = self.frames_since_title as f32 / self.title_timer;
            let p = camera.position();
            window.set_title(&format!(
                "Kiln3D | {fps:.0} fps | camera ({:.2}, {:.2}, {:.2})",
                p.x, p.y, p.z
            ));
            self.title_timer = 0.0;
            self.frames_since_title = 0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Kiln3D")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(anyhow::anyhow!("Failed to create window: {e}"));
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        self.camera = Some(Camera::new(self.config.camera, aspect_ratio(size)));
        self.last_frame = Instant::now();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(camera) = &mut self.camera {
                    camera.update_projection_matrix(aspect_ratio(new_size));
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the window and run the camera loop until it is closed or Escape is pressed.
pub fn run(config: RunConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("Event loop error: {e:?}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow::anyhow!("Event loop error: {e:?}"))?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
