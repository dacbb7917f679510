// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::canvas::GpuCanvas;
use super::vertex::Vertex;

const INITIAL_VERTEX_CAPACITY: usize = 1024;
const INITIAL_INDEX_CAPACITY: usize = 2048;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TargetSizeUniform {
    width: f32,
    height: f32,
    _padding1: f32,
    _padding2: f32,
}

/// Draws the triangle list collected by a [`GpuCanvas`]. Vertex positions are
/// canvas pixels; the canvas square sits at the top-left of the target and
/// anything past the target edge is clipped.
pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,

    target_uniform_buffer: wgpu::Buffer,
    target_bind_group: wgpu::BindGroup,
}

fn geometry_buffer(device: &wgpu::Device, label: &str, size: u64, usage: wgpu::BufferUsages) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl Renderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, shader_source: &str) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let target_uniform_data = TargetSizeUniform {
            width: 1.0,
            height: 1.0,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        let target_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Target Size Uniform Buffer"),
            contents: bytemuck::bytes_of(&target_uniform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let target_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("target_size_bind_group_layout"),
        });

        let target_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &target_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: target_uniform_buffer.as_entire_binding(),
            }],
            label: Some("target_size_bind_group"),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[&target_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
        });

        let vertex_buffer = geometry_buffer(
            device,
            "Canvas Vertex Buffer",
            (INITIAL_VERTEX_CAPACITY * std::mem::size_of::<Vertex>()) as u64,
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = geometry_buffer(
            device,
            "Canvas Index Buffer",
            (INITIAL_INDEX_CAPACITY * std::mem::size_of::<u32>()) as u64,
            wgpu::BufferUsages::INDEX,
        );

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            target_uniform_buffer,
            target_bind_group,
        }
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, vertex_bytes: u64, index_bytes: u64) {
        if vertex_bytes > self.vertex_buffer.size() {
            let size = vertex_bytes.next_power_of_two();
            log::debug!("growing vertex buffer to {size} bytes");
            self.vertex_buffer = geometry_buffer(device, "Canvas Vertex Buffer", size, wgpu::BufferUsages::VERTEX);
        }
        if index_bytes > self.index_buffer.size() {
            let size = index_bytes.next_power_of_two();
            log::debug!("growing index buffer to {size} bytes");
            self.index_buffer = geometry_buffer(device, "Canvas Index Buffer", size, wgpu::BufferUsages::INDEX);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render_canvas(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        canvas: &GpuCanvas,
        target_width: u32,
        target_height: u32,
        clear_color: wgpu::Color,
    ) {
        let target_uniform_data = TargetSizeUniform {
            width: target_width.max(1) as f32,
            height: target_height.max(1) as f32,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        queue.write_buffer(&self.target_uniform_buffer, 0, bytemuck::bytes_of(&target_uniform_data));

        let vertices = canvas.vertices();
        let indices = canvas.indices();
        let vertex_bytes = std::mem::size_of_val(vertices) as u64;
        let index_bytes = std::mem::size_of_val(indices) as u64;
        let has_geometry = !vertices.is_empty() && !indices.is_empty();

        if has_geometry {
            self.ensure_capacity(device, vertex_bytes, index_bytes);
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(indices));
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if has_geometry {
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.target_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_bytes));
            render_pass.set_index_buffer(self.index_buffer.slice(..index_bytes), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
        }
    }
}
