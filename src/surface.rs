// src/surface.rs

//! Maps the normalized unit square onto a square pixel surface and issues
//! fill-path calls for each layer.

use glam::{DAffine2, DVec2};

use crate::composition::Layer;
use crate::config::Color;

/// The 2D drawing primitives the pattern needs from a canvas-like target.
pub trait DrawingSurface {
    /// Current drawable width in pixels.
    fn width(&self) -> u32;
    fn set_size(&mut self, width: u32, height: u32);
    /// Replaces the current transform. Path coordinates pass through it.
    fn set_transform(&mut self, transform: DAffine2);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill(&mut self, color: Color);
}

/// Uniform scale taking the unit square onto a `side × side` pixel square.
pub fn unit_square_transform(side: f64) -> DAffine2 {
    DAffine2::from_scale(DVec2::splat(side))
}

/// Sizes the surface to the smaller viewport dimension and installs the
/// matching transform. Returns the scale factor.
pub fn configure_surface<S: DrawingSurface + ?Sized>(surface: &mut S, viewport_width: u32, viewport_height: u32) -> f64 {
    apply_side(surface, viewport_width.min(viewport_height))
}

fn apply_side<S: DrawingSurface + ?Sized>(surface: &mut S, side: u32) -> f64 {
    surface.set_size(side, side);
    let scale = side as f64;
    surface.set_transform(unit_square_transform(scale));
    scale
}

/// Sizing policy for the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceAdapter {
    pub resize_to_viewport: bool,
}

impl SurfaceAdapter {
    pub fn new(resize_to_viewport: bool) -> Self {
        Self { resize_to_viewport }
    }

    /// Like [`configure_surface`], but a fixed-size adapter keeps the
    /// surface's current width as the square side.
    pub fn configure<S: DrawingSurface + ?Sized>(&self, surface: &mut S, viewport_width: u32, viewport_height: u32) -> f64 {
        if self.resize_to_viewport {
            configure_surface(surface, viewport_width, viewport_height)
        } else {
            let side = surface.width();
            apply_side(surface, side)
        }
    }
}

/// Clears the pattern square and fills every polygon, layer by layer.
/// Rings with fewer than 3 vertices are skipped.
pub fn render_layers<S: DrawingSurface + ?Sized>(surface: &mut S, scale: f64, layers: &[Layer<'_>]) {
    surface.set_transform(unit_square_transform(scale));
    surface.clear_rect(0.0, 0.0, 1.0, 1.0);

    for layer in layers {
        for polygon in layer.polygons {
            let [first, rest @ ..] = polygon.vertices() else {
                continue;
            };
            if rest.len() < 2 {
                continue;
            }
            surface.begin_path();
            surface.move_to(first.x, first.y);
            for p in rest {
                surface.line_to(p.x, p.y);
            }
            surface.close_path();
            surface.fill(layer.color);
        }
    }
}
