// src/geometry.rs

//! Point and polygon primitives shared by the whole pipeline.
//!
//! All coordinates live in the normalized unit square: `(0, 0)` is the
//! top-left corner of the drawable area and `(1, 1)` the bottom-right one.
//! Y grows downward, matching the pixel space the surface adapter maps to.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scale(&self, factor: f64) -> Point2 {
        Point2::new(self.x * factor, self.y * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A closed ring of points. The last vertex connects back to the first
/// implicitly, so the first point is never repeated at the end.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self { vertices }
    }

    pub fn empty() -> Self {
        Self { vertices: Vec::new() }
    }

    pub fn from_points(points: &[Point2]) -> Self {
        Self { vertices: points.to_vec() }
    }

    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace sum. Positive when the ring runs counter-clockwise in a
    /// y-up frame, which is the generator's left/apex/right order.
    pub fn signed_area(&self) -> f64 {
        let count = self.vertices.len();
        if count < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..count {
            let j = (i + 1) % count;
            area += self.vertices[i].x * self.vertices[j].y;
            area -= self.vertices[j].x * self.vertices[i].y;
        }
        area / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn into_vertices(self) -> Vec<Point2> {
        self.vertices
    }
}
