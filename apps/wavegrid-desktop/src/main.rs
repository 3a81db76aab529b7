mod frame;
mod ui;

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wavegrid_common::{ParamId, ParamPreset, ParamStore, WaveParams};
use wavegrid_input::{Action, OrbitControls};
use wavegrid_mesh::{GridConfig, PointGrid};
use wavegrid_render::SystemClock;
use wavegrid_render_wgpu::{OrbitCamera, PointCloudRenderer};
use wavegrid_tools::FrameStats;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::frame::FrameStep;

#[derive(Parser)]
#[command(name = "wavegrid-desktop", about = "Animated wave grid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Parameter preset (.yaml, .yml or .json)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Edge length of the grid in world units
    #[arg(long, default_value = "10.0")]
    grid_size: f32,

    /// Subdivisions per grid side
    #[arg(long, default_value = "200")]
    segments: u32,

    /// Present frames as fast as possible
    #[arg(long)]
    no_vsync: bool,
}

/// Pixels of precise scrolling that count as one wheel line.
const PIXELS_PER_LINE: f32 = 50.0;

/// Map a key press to an action.
fn key_action(key: KeyCode) -> Action {
    match key {
        KeyCode::F1 => Action::TogglePanel,
        KeyCode::KeyR => Action::ResetCamera,
        KeyCode::Backspace => Action::ResetParams,
        KeyCode::BracketLeft => Action::Adjust {
            param: ParamId::PointSize,
            steps: -1,
        },
        KeyCode::BracketRight => Action::Adjust {
            param: ParamId::PointSize,
            steps: 1,
        },
        KeyCode::Escape => Action::Quit,
        _ => Action::Noop,
    }
}

/// Application state.
struct AppState {
    store: ParamStore,
    controls: OrbitControls,
    camera: OrbitCamera,
    stats: FrameStats,
    clock: SystemClock,
    step: FrameStep,
    grid: PointGrid,
    show_panel: bool,
    dragging: bool,
}

impl AppState {
    fn new(params: WaveParams, grid: PointGrid) -> Self {
        Self {
            store: ParamStore::new(params),
            controls: OrbitControls::new(),
            camera: OrbitCamera::default(),
            stats: FrameStats::default(),
            clock: SystemClock::new(),
            step: FrameStep::new(),
            grid,
            show_panel: true,
            dragging: false,
        }
    }

    /// Apply an action. Returns false when the app should quit.
    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::TogglePanel => self.show_panel = !self.show_panel,
            Action::ResetParams => self.store.reset(),
            Action::Adjust { param, steps } => {
                let value = self.store.nudge(param, steps);
                tracing::debug!(param = %param, value, "parameter nudged");
            }
            action if action.is_camera() => {
                self.controls.handle(&action);
            }
            _ => {}
        }
        true
    }

    fn draw_ui(&mut self, ctx: &EguiContext, points: u32) {
        if self.show_panel {
            ui::tuning_panel(ctx, &self.store, &mut self.show_panel);
        }
        ui::stats_overlay(ctx, &self.stats.summary(), points);
    }
}

/// Window and GPU resources, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: PointCloudRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        egui_ctx: &EguiContext,
        grid: &PointGrid,
        vsync: bool,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("wavegrid")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter found"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("wavegrid_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer =
            PointCloudRenderer::new(&device, surface_format, config.width, config.height, grid);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

struct GpuApp {
    state: AppState,
    vsync: bool,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, vsync: bool) -> Self {
        Self {
            state,
            vsync,
            gpu: None,
            egui_ctx: EguiContext::default(),
            error: None,
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let state = &mut self.state;
        let frame = state.step.advance(
            &state.clock,
            &mut state.controls,
            &mut state.camera,
            &mut state.stats,
            &state.store,
        );

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer
            .render(&gpu.device, &gpu.queue, &view, &state.camera, &frame);

        let points = gpu.renderer.point_count();
        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx, points);
        });

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx, &self.state.grid, self.vsync) {
            Ok(gpu) => {
                self.state
                    .camera
                    .set_aspect(gpu.config.width, gpu.config.height);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("GPU setup failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        // A drag released over the panel must still end.
        if let WindowEvent::MouseInput {
            button: MouseButton::Left,
            state: ElementState::Released,
            ..
        } = event
        {
            self.state.dragging = false;
        }

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state
                    .camera
                    .set_aspect(gpu.config.width, gpu.config.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => {
                let action = key_action(key);
                if repeat && !matches!(action, Action::Adjust { .. }) {
                    return;
                }
                if !self.state.apply(action) {
                    tracing::info!("quit requested");
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.state.dragging = btn_state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.state.apply(Action::Zoom(lines));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.dragging {
                self.state.apply(Action::Orbit {
                    dx: delta.0 as f32,
                    dy: delta.1 as f32,
                });
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("wavegrid-desktop starting");

    let params = match &cli.params {
        Some(path) => ParamPreset::load(path)
            .with_context(|| format!("failed to load preset {}", path.display()))?,
        None => WaveParams::default(),
    };
    let grid = PointGrid::new(GridConfig {
        size: cli.grid_size,
        segments: cli.segments,
    })?;
    tracing::info!(points = grid.len(), size = cli.grid_size, "grid built");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(params, grid), !cli.no_vsync);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let grid = PointGrid::new(GridConfig {
            size: 2.0,
            segments: 2,
        })
        .unwrap();
        AppState::new(WaveParams::default(), grid)
    }

    #[test]
    fn key_bindings() {
        assert_eq!(key_action(KeyCode::F1), Action::TogglePanel);
        assert_eq!(key_action(KeyCode::KeyR), Action::ResetCamera);
        assert_eq!(key_action(KeyCode::Escape), Action::Quit);
        assert_eq!(key_action(KeyCode::KeyQ), Action::Noop);
    }

    #[test]
    fn actions_update_state() {
        let mut app = state();
        assert!(app.apply(Action::TogglePanel));
        assert!(!app.show_panel);

        let before = app.store.get(ParamId::PointSize);
        app.apply(key_action(KeyCode::BracketRight));
        assert_eq!(app.store.get(ParamId::PointSize), before + 0.5);
        app.apply(Action::ResetParams);
        assert_eq!(app.store.get(ParamId::PointSize), before);

        app.apply(Action::Orbit { dx: 10.0, dy: 0.0 });
        assert!(app.controls.is_moving());
        assert!(!app.apply(Action::Quit));
    }
}
