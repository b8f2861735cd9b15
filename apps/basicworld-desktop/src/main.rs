use anyhow::{Context, Result};
use basicworld_app::{FrameRequests, SceneApp};
use basicworld_input::{PointerButton, PointerTracker};
use basicworld_render::{HeadlessRenderer, RendererConfig};
use basicworld_render_wgpu::WgpuRenderer;
use clap::Parser;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

/// Pixel scroll deltas per wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

const HEADLESS_SIZE: (u32, u32) = (1920, 1080);

#[derive(Parser)]
#[command(name = "basicworld-desktop", about = "Basic world demo: sky, ground and a grid of balls")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for the ball position jitter; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Render this many frames without a window and exit
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,
}

fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

struct DesktopApp {
    seed: Option<u64>,
    window: Option<Arc<Window>>,
    app: Option<SceneApp<WgpuRenderer>>,
    pointer: PointerTracker,
    started: Instant,
    startup_error: Option<anyhow::Error>,
}

impl DesktopApp {
    fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            window: None,
            app: None,
            pointer: PointerTracker::new(),
            started: Instant::now(),
            startup_error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Basic World")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let size = window.inner_size();
        let renderer = WgpuRenderer::new(
            window.clone(),
            size.width,
            size.height,
            RendererConfig::default(),
        )
        .context("initialize renderer")?;

        let app = SceneApp::new(renderer, &mut scene_rng(self.seed));
        window.request_redraw();

        self.started = Instant::now();
        self.window = Some(window);
        self.app = Some(app);
        Ok(())
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(app)) = (&self.window, &mut self.app) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(frames = app.frames_rendered(), "closing");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app.on_resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let timestamp_ms = self.started.elapsed().as_secs_f64() * 1000.0;
                app.on_frame(timestamp_ms, &|| window.request_redraw());
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button) = pointer_button(button) {
                    match state {
                        ElementState::Pressed => self.pointer.press(button),
                        ElementState::Released => self.pointer.release(button),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if let Some(action) = self.pointer.moved(position) {
                    app.handle_camera_action(action);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.leave();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                if let Some(action) = self.pointer.scrolled(lines) {
                    app.handle_camera_action(action);
                }
            }
            _ => {}
        }
    }
}

/// Drive the scene with a windowless renderer at 60 Hz timestamps.
fn run_headless(frames: u32, seed: Option<u64>) {
    let (width, height) = HEADLESS_SIZE;
    let mut app = SceneApp::new(HeadlessRenderer::new(width, height), &mut scene_rng(seed));
    app.on_resize(width, height);

    let requests = FrameRequests::new();
    let mut timestamp_ms = 0.0;
    for _ in 0..frames {
        app.on_frame(timestamp_ms, &requests);
        requests.take();
        timestamp_ms += 1000.0 / 60.0;
    }

    tracing::info!(
        frames = app.frames_rendered(),
        failures = app.render_failures(),
        "headless run complete"
    );
    println!("{}", app.renderer().last_frame());
}

/// Filter directives: `RUST_LOG` when set, otherwise the `--verbose` level.
fn log_directives(verbose: bool, rust_log: Option<String>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => default_level(verbose).to_string(),
    }
}

fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn log_filter(verbose: bool) -> EnvFilter {
    let directives = log_directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("ignoring invalid {}: {e}", EnvFilter::DEFAULT_ENV);
        EnvFilter::new(default_level(verbose))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .init();

    tracing::info!("basicworld-desktop starting");

    if let Some(frames) = cli.headless {
        run_headless(frames, cli.seed);
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = DesktopApp::new(cli.seed);
    event_loop.run_app(&mut app)?;

    match app.startup_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
