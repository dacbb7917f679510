// src/rendering_lib/mod.rs

pub mod canvas;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use canvas::GpuCanvas;
pub use renderer::Renderer;
pub use shader::CANVAS_SHADER_SOURCE;
