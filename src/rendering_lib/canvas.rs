// src/rendering_lib/canvas.rs

use glam::{DAffine2, DVec2};
use tri_parallax::{Color, DrawingSurface};

use super::vertex::Vertex;

/// A `DrawingSurface` that tessellates filled paths into a triangle list
/// for the GPU renderer.
///
/// Paths are filled as triangle fans, which is exact for convex rings; every
/// polygon the pattern produces is convex. One subpath per fill.
pub struct GpuCanvas {
    width: u32,
    height: u32,
    transform: DAffine2,
    path: Vec<DVec2>,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl GpuCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: DAffine2::IDENTITY,
            path: Vec::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn discard_geometry(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl DrawingSurface for GpuCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn set_size(&mut self, width: u32, height: u32) {
        // Resizing a canvas wipes its contents.
        self.width = width;
        self.height = height;
        self.path.clear();
        self.discard_geometry();
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = transform;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let min = self.transform.transform_point2(DVec2::new(x, y));
        let max = self.transform.transform_point2(DVec2::new(x + width, y + height));
        let covers_canvas = min.x <= 0.0
            && min.y <= 0.0
            && max.x >= self.width as f64
            && max.y >= self.height as f64;
        if covers_canvas {
            self.discard_geometry();
        } else {
            log::warn!("partial clear_rect is not supported, ignoring ({x}, {y}, {width}, {height})");
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.clear();
        self.path.push(self.transform.transform_point2(DVec2::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(self.transform.transform_point2(DVec2::new(x, y)));
    }

    fn close_path(&mut self) {}

    fn fill(&mut self, color: Color) {
        if self.path.len() < 3 {
            return;
        }
        let start = self.vertices.len() as u32;
        self.vertices.extend(self.path.iter().map(|p| Vertex::new(p.x, p.y, color)));
        for i in 1..(self.path.len() as u32 - 1) {
            self.indices.extend_from_slice(&[start, start + i, start + i + 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_parallax::{compose_frame, configure_surface, render_layers, ConvexIntersection, PatternConfig, Point2};

    fn fill_square(canvas: &mut GpuCanvas, color: Color) {
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(1.0, 0.0);
        canvas.line_to(1.0, 1.0);
        canvas.line_to(0.0, 1.0);
        canvas.close_path();
        canvas.fill(color);
    }

    #[test]
    fn fills_become_triangle_fans_in_pixel_space() {
        let mut canvas = GpuCanvas::new(0, 0);
        let scale = configure_surface(&mut canvas, 200, 100);
        assert_eq!(scale, 100.0);
        assert_eq!((canvas.width(), canvas.height()), (100, 100));

        fill_square(&mut canvas, Color::WHITE);
        assert_eq!(canvas.vertices().len(), 4);
        assert_eq!(canvas.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(canvas.vertices()[2].position, [100.0, 100.0]);
        assert_eq!(canvas.vertices()[2].color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn full_clear_drops_queued_fills() {
        let mut canvas = GpuCanvas::new(0, 0);
        configure_surface(&mut canvas, 50, 50);
        fill_square(&mut canvas, Color::WHITE);

        canvas.clear_rect(0.0, 0.25, 1.0, 0.5);
        assert_eq!(canvas.vertices().len(), 4);

        canvas.clear_rect(0.0, 0.0, 1.0, 1.0);
        assert!(canvas.vertices().is_empty());
        assert!(canvas.indices().is_empty());
    }

    #[test]
    fn open_paths_are_not_filled() {
        let mut canvas = GpuCanvas::new(10, 10);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(1.0, 1.0);
        canvas.fill(Color::WHITE);
        assert!(canvas.vertices().is_empty());
    }

    #[test]
    fn default_frame_tessellates_every_polygon() {
        let config = PatternConfig::default();
        let frame = compose_frame(Point2::ORIGIN, &config, &ConvexIntersection).unwrap();

        let mut canvas = GpuCanvas::new(0, 0);
        let scale = configure_surface(&mut canvas, 800, 600);
        render_layers(&mut canvas, scale, &frame.layers(&config.palette));

        // 27 triangles: 9 per grid, and 9 full-triangle overlaps at the origin.
        assert_eq!(canvas.vertices().len(), 27 * 3);
        assert_eq!(canvas.indices().len(), 27 * 3);
        for v in canvas.vertices() {
            assert!((0.0..=600.0).contains(&v.position[0]));
            assert!((0.0..=600.0).contains(&v.position[1]));
        }
    }
}
