//! Window shell and application event loop.
//!
//! [`run`] opens the window, builds the GPU context and the shader program and
//! then drives the loop until the window is closed. Each redraw follows this
//! pattern:
//! 1. Advance the [`FrameClock`] by the elapsed wall time
//! 2. Run the fixed-step `tick` as many times as the clock asks for
//! 3. Run the per-frame `update` (mouse look, zoom, camera uniform upload)
//! 4. Clear colour and depth, draw the configured geometry and present
//! 5. Exit if a close was requested or the frame limit is reached
//!
//! Initialization failures (no event loop, no window, no adapter, broken
//! shaders) end the loop immediately and are returned from [`run`].

use std::{iter, sync::Arc};

use anyhow::Context as _;
use cgmath::Point3;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    camera,
    clock::FrameClock,
    config::{Config, Geometry},
    context::Context,
    data_structures::{
        block::{Block, BlockId},
        mesh::{self, Mesh, Vertex},
        texture::{self, Texture},
    },
    resources,
    shader::Shader,
};

/// Whether Escape was pressed.
pub fn is_exit_key(code: KeyCode, state: ElementState) -> bool {
    code == KeyCode::Escape && state.is_pressed()
}

/// Decides when the loop ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopControl {
    close_requested: bool,
    frame_limit: Option<u64>,
}

impl LoopControl {
    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            close_requested: false,
            frame_limit,
        }
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Checked once per frame, after `frames` frames have been rendered.
    pub fn should_exit(&self, frames: u64) -> bool {
        self.close_requested || self.frame_limit.is_some_and(|limit| frames >= limit)
    }
}

/// Counters reported by [`run`] once the loop has ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub ticks: u64,
    pub fps: u64,
    pub tps: u64,
    /// Duration of the last frame.
    pub frame_delta: Duration,
}

impl From<&FrameClock> for LoopStats {
    fn from(clock: &FrameClock) -> Self {
        Self {
            frames: clock.frames(),
            ticks: clock.ticks(),
            fps: clock.fps(),
            tps: clock.tps(),
            frame_delta: clock.frame_delta(),
        }
    }
}

/// What gets drawn each frame.
#[derive(Debug)]
pub struct Scene {
    pub shader: Shader,
    pub atlas_bind_group: wgpu::BindGroup,
    pub mesh: Option<Mesh>,
}

impl Scene {
    async fn new(ctx: &Context, config: &Config) -> anyhow::Result<Self> {
        let atlas = match &config.texture {
            Some(path) => resources::load_texture(path, &ctx.device, &ctx.queue)?,
            None => Texture::block_atlas(&ctx.device, &ctx.queue)?,
        };
        let atlas_layout = texture::atlas_bind_group_layout(&ctx.device);
        let atlas_bind_group = texture::atlas_bind_group(&ctx.device, &atlas, &atlas_layout);

        let shader = Shader::from_files(
            ctx,
            &config.vertex_shader,
            &config.fragment_shader,
            &[&atlas_layout, &ctx.camera.bind_group_layout],
            &[Vertex::desc()],
        )
        .await?;

        let tile = Block::new(BlockId::Grass).texture_location();
        let mesh = match config.geometry {
            Geometry::None => None,
            Geometry::Triangle => Some(Mesh::new(&ctx.device, "triangle", &mesh::triangle(tile))),
            Geometry::Cube => Some(Mesh::new(&ctx.device, "cube", &mesh::cube(tile))),
        };

        Ok(Self {
            shader,
            atlas_bind_group,
            mesh,
        })
    }

    fn draw(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        let Some(mesh) = &self.mesh else {
            return;
        };
        self.shader.bind(render_pass);
        render_pass.set_bind_group(0, &self.atlas_bind_group, &[]);
        render_pass.set_bind_group(1, &ctx.camera.bind_group, &[]);
        mesh.draw(render_pass);
    }
}

/// GPU context, timing and scene of the open window.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    clock: FrameClock,
    scene: Scene,
    /// Camera position before the latest tick.
    last_position: Point3<f32>,
}

impl AppState {
    async fn new(ctx: Context, config: &Config) -> anyhow::Result<Self> {
        let scene = Scene::new(&ctx, config).await?;
        Ok(Self {
            clock: FrameClock::new(config.tick_duration, Instant::now()),
            last_position: ctx.camera.camera.position,
            ctx,
            scene,
        })
    }

    /// Fixed-step simulation.
    fn tick(&mut self, dt: Duration) {
        let camera = &mut self.ctx.camera;
        self.last_position = camera.camera.position;
        camera.controller.update_camera(&mut camera.camera, dt);
    }

    /// Once per frame, before rendering. Mouse look follows the frame rate,
    /// movement is drawn between the last two ticks.
    fn update(&mut self) {
        let ctx = &mut self.ctx;
        ctx.camera
            .controller
            .update_view(&mut ctx.camera.camera, &mut ctx.projection);
        let alpha = self.clock.alpha();
        let shown = camera::interpolate(self.last_position, &ctx.camera.camera, alpha);
        ctx.write_camera(&shown);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.scene.draw(&self.ctx, &mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        self.ctx.window.pre_present_notify();
        output.present();
        Ok(())
    }

    /// One loop iteration: ticks, update, render.
    fn frame(&mut self) {
        let step = self.clock.advance(Instant::now());
        let tick_duration = self.clock.tick_duration();
        for _ in 0..step.ticks {
            self.tick(tick_duration);
        }
        self.update();

        match self.render() {
            Ok(()) => (),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.ctx.window.inner_size();
                self.ctx.resize(size.width, size.height);
            }
            Err(e) => {
                log::error!("Unable to render {}", e);
            }
        }
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
    control: LoopControl,
    stats: LoopStats,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
        Ok(Self {
            async_runtime,
            control: LoopControl::new(config.exit_after_frames),
            config,
            state: None,
            stats: LoopStats::default(),
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let [width, height] = self.config.size;
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("create window")?,
        );

        if self.config.capture_cursor {
            if let Err(e) = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
            {
                log::warn!("Could not capture the cursor: {}", e);
            }
            window.set_cursor_visible(false);
        }

        let config = &self.config;
        self.async_runtime.block_on(async move {
            let ctx = Context::new(window, config).await?;
            AppState::new(ctx, config).await
        })
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            self.stats = LoopStats::from(&state.clock);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.error.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(state) => {
                log::info!(
                    "window {}x{} ready",
                    state.ctx.config.width,
                    state.ctx.config.height
                );
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.config.capture_cursor {
                state.ctx.camera.controller.process_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                self.control.request_close();
                self.exit(event_loop);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if is_exit_key(code, key_state) {
                    self.control.request_close();
                    self.exit(event_loop);
                } else {
                    state.ctx.camera.controller.process_keyboard(code, key_state);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                state.ctx.camera.controller.process_scroll(&delta);
            }
            WindowEvent::Resized(size) => {
                if !state.ctx.resize(size.width, size.height) {
                    log::debug!("ignoring resize to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.control.close_requested() {
                    return;
                }
                state.frame();
                if self.control.should_exit(state.clock.frames()) {
                    self.exit(event_loop);
                }
            }
            _ => {}
        }
    }
}

/// Open the window and run the loop until it is closed.
pub fn run(config: Config) -> anyhow::Result<LoopStats> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    #[cfg(all(feature = "integration-tests", target_os = "linux"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::wayland::EventLoopBuilderExtWayland;

        EventLoop::builder()
            .with_any_thread(true)
            .build()
            .context("create event loop")?
    };

    #[cfg(all(feature = "integration-tests", target_os = "windows"))]
    let event_loop: EventLoop<()> = {
        use winit::platform::windows::EventLoopBuilderExtWindows;

        EventLoop::builder()
            .with_any_thread(true)
            .build()
            .context("create event loop")?
    };

    #[cfg(not(all(
        feature = "integration-tests",
        any(target_os = "linux", target_os = "windows")
    )))]
    let event_loop: EventLoop<()> = EventLoop::new().context("create event loop")?;

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.error.take() {
        return Err(e);
    }
    log::info!(
        "closed after {} frames and {} ticks",
        app.stats.frames,
        app.stats.ticks
    );
    Ok(app.stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_press_closes() {
        assert!(is_exit_key(KeyCode::Escape, ElementState::Pressed));
        assert!(!is_exit_key(KeyCode::Escape, ElementState::Released));
        assert!(!is_exit_key(KeyCode::KeyW, ElementState::Pressed));
    }

    #[test]
    fn runs_until_close_is_requested() {
        let mut control = LoopControl::default();
        for frames in 1..100 {
            assert!(!control.should_exit(frames));
        }
        control.request_close();
        // the very next check ends the loop
        assert!(control.should_exit(100));
    }

    #[test]
    fn frame_limit_ends_the_loop() {
        let control = LoopControl::new(Some(3));
        assert!(!control.should_exit(2));
        assert!(control.should_exit(3));
        assert!(!control.close_requested());
    }

    #[test]
    fn loop_over_a_clock_stops_one_iteration_after_close() {
        let start = Instant::now();
        let mut clock = FrameClock::new(Duration::from_millis(50), start);
        let mut control = LoopControl::default();
        let mut last = clock.frames();
        let mut iterations_after_close = 0;
        for i in 1.. {
            clock.advance(start + Duration::from_millis(i * 16));
            assert!(clock.frames() > last);
            last = clock.frames();
            if control.close_requested() {
                iterations_after_close += 1;
            }
            if i == 10 {
                control.request_close();
            }
            if control.should_exit(clock.frames()) {
                break;
            }
        }
        assert_eq!(clock.frames(), 10);
        assert_eq!(iterations_after_close, 0);
        let stats = LoopStats::from(&clock);
        assert_eq!(stats.frames, 10);
        assert_eq!(stats.frame_delta, Duration::from_millis(16));
    }
}
