// src/app.rs

use std::sync::Arc;

use thiserror::Error;
use winit::{dpi::PhysicalSize, window::Window};

use tri_parallax::interaction::PointerState;
use tri_parallax::{
    compose_frame, render_layers, Color, ConvexIntersection, DrawingSurface, FrameScheduler, PatternConfig,
    SurfaceAdapter,
};

use crate::rendering_lib::{GpuCanvas, Renderer, CANVAS_SHADER_SOURCE};

/// Failures that stop the app before the first frame.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("could not attach the canvas to the page")]
    CanvasMount,
}

fn clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

/// Owns the window surface and the interaction state, and turns pointer and
/// resize events into coalesced pattern renders.
pub struct PatternApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    renderer: Renderer,
    canvas: GpuCanvas,
    sizing: SurfaceAdapter,
    scale: f64,
    pattern: PatternConfig,
    clipper: ConvexIntersection,
    pointer: PointerState,
    scheduler: FrameScheduler,
}

impl PatternApp {
    pub async fn new(window: Arc<Window>, pattern: PatternConfig) -> Result<Self, StartupError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(StartupError::NoAdapter)?;

        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults()
        } else {
            wgpu::Limits::default()
        };
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Palette colors are sRGB values already, so prefer a target that
        // stores them as-is.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(StartupError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "surface configured: {}x{} {:?} on {}",
            config.width,
            config.height,
            surface_format,
            adapter.get_info().name
        );

        let renderer = Renderer::new(&device, config.format, CANVAS_SHADER_SOURCE);

        if let Err(err) = pattern.validate() {
            log::warn!("pattern configuration is invalid, frames will be skipped: {err}");
        }

        // A fixed-size canvas starts at the initial viewport's square.
        let side = size.width.min(size.height);
        let mut canvas = GpuCanvas::new(side, side);
        let sizing = SurfaceAdapter::new(pattern.resize_to_viewport);
        let scale = sizing.configure(&mut canvas, size.width, size.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            renderer,
            canvas,
            sizing,
            scale,
            pattern,
            clipper: ConvexIntersection,
            pointer: PointerState::new(),
            scheduler: FrameScheduler::new(),
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.scale = self.sizing.configure(&mut self.canvas, new_size.width, new_size.height);
        log::info!(
            "viewport {}x{}, pattern square {}x{}",
            new_size.width,
            new_size.height,
            self.canvas.width(),
            self.canvas.height()
        );
    }

    /// Records a pointer position in physical pixels. Returns `true` when
    /// the caller should request a redraw.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        let translate = self
            .pointer
            .pointer_moved(x, y, self.size.width as f64, self.size.height as f64);
        self.scheduler.request(translate)
    }

    /// Queues a render with the current translation, e.g. after a resize.
    pub fn request_render(&mut self) -> bool {
        self.scheduler.request(self.pointer.translate())
    }

    /// Renders the pending translation, if any. A frame that fails to
    /// compose is skipped and the last presented image stays up.
    pub fn redraw(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(translate) = self.scheduler.take() else {
            return Ok(());
        };

        let frame = match compose_frame(translate, &self.pattern, &self.clipper) {
            Ok(frame) => frame,
            Err(err) => {
                log::error!("skipping frame: {err}");
                return Ok(());
            }
        };
        render_layers(&mut self.canvas, self.scale, &frame.layers(&self.pattern.palette));
        log::trace!("drawing {} polygons", frame.polygon_count());

        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Pattern Command Encoder"),
        });

        self.renderer.render_canvas(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            &self.canvas,
            self.config.width,
            self.config.height,
            clear_color(self.pattern.palette.backdrop),
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }
}
