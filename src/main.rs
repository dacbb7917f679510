// src/main.rs

mod app;
mod rendering_lib;

use std::sync::Arc;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};

use app::{PatternApp, StartupError};
use tri_parallax::PatternConfig;

#[cfg(target_arch = "wasm32")]
const CANVAS_HOST_ID: &str = "tri-parallax";

#[cfg(target_arch = "wasm32")]
fn mount_canvas(window: &winit::window::Window) -> Result<(), StartupError> {
    use winit::platform::web::WindowExtWebSys;
    web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| {
            let dst = doc.get_element_by_id(CANVAS_HOST_ID)?;
            let canvas = web_sys::Element::from(window.canvas()?);
            dst.append_child(&canvas).ok()?;
            Some(())
        })
        .ok_or(StartupError::CanvasMount)
}

pub async fn run() -> Result<(), StartupError> {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(err) = console_log::init_with_level(log::Level::Warn) {
                let message = format!("could not initialize logger: {err}");
                web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&message));
            }
        } else {
            env_logger::init();
        }
    }

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Triangle Parallax")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
            .build(&event_loop)?,
    );

    #[cfg(target_arch = "wasm32")]
    mount_canvas(&window)?;

    let mut app = PatternApp::new(window.clone(), PatternConfig::default()).await?;
    if app.request_render() {
        window.request_redraw();
    }

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Wait);

        let Event::WindowEvent { ref event, window_id } = event else {
            return;
        };
        if window_id != window.id() {
            return;
        }
        match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::Resized(physical_size) => {
                app.resize(*physical_size);
                if app.request_render() {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if app.pointer_moved(position.x, position.y) {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => match app.redraw() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    app.resize(app.size());
                    if app.request_render() {
                        window.request_redraw();
                    }
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, exiting");
                    target.exit();
                }
                Err(e) => {
                    // The frame was already taken; queue it again so the
                    // last pointer position still reaches the screen.
                    log::warn!("surface error: {e:?}");
                    if app.request_render() {
                        window.request_redraw();
                    }
                }
            },
            _ => {}
        }
    })?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        log::error!("startup failed: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = run().await {
            log::error!("startup failed: {err}");
        }
    });
}
