// src/intersection.rs

use crate::error::GeometryError;
use crate::geometry::{Point2, Polygon};

/// Fragments with less area than this are clipping noise, not overlap.
pub const AREA_EPSILON: f64 = 1e-12;

const SIDE_EPSILON: f64 = 1e-12;
const PARALLEL_EPSILON: f64 = 1e-15;

/// One region of a clipping result: an outer ring plus any holes.
#[derive(Clone, Debug, PartialEq)]
pub struct ClippedShape {
    pub exterior: Polygon,
    pub holes: Vec<Polygon>,
}

/// Planar polygon intersection. Implementations return one shape per
/// connected overlap region; empty overlaps return nothing.
pub trait PolygonClipper {
    fn intersect(&self, subjects: &[Polygon], clips: &[Polygon]) -> Result<Vec<ClippedShape>, GeometryError>;
}

/// Intersects `subject` with each candidate on its own and collects the
/// outer rings of every non-empty overlap, in candidate order.
///
/// Hole rings are dropped. Triangle against triangle is always convex, so
/// no holes can occur for grid input. Malformed input and zero-area
/// fragments contribute nothing.
pub fn intersect_against_set<C: PolygonClipper + ?Sized>(
    clipper: &C,
    subject: &Polygon,
    candidates: &[Polygon],
) -> Vec<Polygon> {
    let subject_set = std::slice::from_ref(subject);
    let mut fragments = Vec::new();
    for candidate in candidates {
        match clipper.intersect(subject_set, std::slice::from_ref(candidate)) {
            Ok(shapes) => fragments.extend(
                shapes
                    .into_iter()
                    .map(|shape| shape.exterior)
                    .filter(|ring| ring.len() >= 3 && ring.area() > AREA_EPSILON),
            ),
            Err(err) => log::debug!("skipping candidate: {err}"),
        }
    }
    fragments
}

/// Sutherland-Hodgman clipping against convex clip rings.
///
/// Subjects may have any winding; each clip ring must be convex and is
/// normalized to counter-clockwise before use. Sets are treated as
/// collections of disjoint rings, so every subject is clipped against every
/// clip ring independently. Results never carry holes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvexIntersection;

impl ConvexIntersection {
    #[inline(always)]
    fn is_inside(point: &Point2, edge_start: &Point2, edge_end: &Point2) -> bool {
        ((edge_end.x - edge_start.x) * (point.y - edge_start.y)
            - (edge_end.y - edge_start.y) * (point.x - edge_start.x))
            >= -SIDE_EPSILON
    }

    fn line_intersection(p1: &Point2, p2: &Point2, clip_edge_p1: &Point2, clip_edge_p2: &Point2) -> Option<Point2> {
        let dx_line = p2.x - p1.x;
        let dy_line = p2.y - p1.y;
        let dx_clip = clip_edge_p2.x - clip_edge_p1.x;
        let dy_clip = clip_edge_p2.y - clip_edge_p1.y;

        let denominator = dy_clip * dx_line - dx_clip * dy_line;

        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (dx_clip * (p1.y - clip_edge_p1.y) - dy_clip * (p1.x - clip_edge_p1.x)) / denominator;

        Some(Point2::new(p1.x + t * dx_line, p1.y + t * dy_line))
    }

    fn clip_polygon_by_edge(subject_vertices: &[Point2], clip_edge_start: &Point2, clip_edge_end: &Point2) -> Vec<Point2> {
        let mut output = Vec::with_capacity(subject_vertices.len() + 1);
        let Some(&last) = subject_vertices.last() else {
            return output;
        };

        let mut prev_vertex = last;
        for &current_vertex in subject_vertices {
            let prev_is_inside = Self::is_inside(&prev_vertex, clip_edge_start, clip_edge_end);
            let current_is_inside = Self::is_inside(&current_vertex, clip_edge_start, clip_edge_end);

            if prev_is_inside && current_is_inside {
                output.push(current_vertex);
            } else if prev_is_inside && !current_is_inside {
                if let Some(crossing) = Self::line_intersection(&prev_vertex, &current_vertex, clip_edge_start, clip_edge_end) {
                    output.push(crossing);
                }
            } else if !prev_is_inside && current_is_inside {
                if let Some(crossing) = Self::line_intersection(&prev_vertex, &current_vertex, clip_edge_start, clip_edge_end) {
                    output.push(crossing);
                }
                output.push(current_vertex);
            }
            prev_vertex = current_vertex;
        }
        output
    }

    fn require_ring(polygon: &Polygon) -> Result<(), GeometryError> {
        if polygon.len() < 3 {
            return Err(GeometryError::Degenerate { vertices: polygon.len() });
        }
        Ok(())
    }

    /// Returns the clip ring in counter-clockwise order, or `NotConvex` if
    /// any turn goes the other way.
    fn oriented_clip_ring(clip: &Polygon) -> Result<Vec<Point2>, GeometryError> {
        let mut ring = clip.vertices().to_vec();
        if clip.signed_area() < 0.0 {
            ring.reverse();
        }
        let count = ring.len();
        for i in 0..count {
            let a = ring[i];
            let b = ring[(i + 1) % count];
            let c = ring[(i + 2) % count];
            if !Self::is_inside(&c, &a, &b) {
                return Err(GeometryError::NotConvex);
            }
        }
        Ok(ring)
    }

    /// Clips one subject ring against one convex clip ring.
    pub fn find_intersection(subject: &Polygon, clip: &Polygon) -> Result<Polygon, GeometryError> {
        Self::require_ring(subject)?;
        Self::require_ring(clip)?;
        let clip_ring = Self::oriented_clip_ring(clip)?;

        let mut current = subject.vertices().to_vec();
        for i in 0..clip_ring.len() {
            if current.is_empty() {
                break;
            }
            let clip_edge_start = clip_ring[i];
            let clip_edge_end = clip_ring[(i + 1) % clip_ring.len()];

            if current.iter().all(|p| Self::is_inside(p, &clip_edge_start, &clip_edge_end)) {
                continue;
            }

            current = Self::clip_polygon_by_edge(&current, &clip_edge_start, &clip_edge_end);
        }
        Ok(Polygon::new(current))
    }
}

impl PolygonClipper for ConvexIntersection {
    fn intersect(&self, subjects: &[Polygon], clips: &[Polygon]) -> Result<Vec<ClippedShape>, GeometryError> {
        let mut shapes = Vec::new();
        for subject in subjects {
            for clip in clips {
                let overlap = Self::find_intersection(subject, clip)?;
                if overlap.len() >= 3 && overlap.area() > AREA_EPSILON {
                    shapes.push(ClippedShape { exterior: overlap, holes: Vec::new() });
                }
            }
        }
        Ok(shapes)
    }
}
