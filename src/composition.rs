// src/composition.rs

use crate::config::{Color, Palette, PatternConfig};
use crate::error::DomainError;
use crate::generator::GridGenerator;
use crate::geometry::{Point2, Polygon};
use crate::intersection::{intersect_against_set, PolygonClipper};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Background,
    Foreground,
    Intersection,
}

impl LayerKind {
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Background => "background",
            LayerKind::Foreground => "foreground",
            LayerKind::Intersection => "intersection",
        }
    }
}

/// A borrowed view of one frame layer with its fill color.
#[derive(Clone, Copy, Debug)]
pub struct Layer<'a> {
    pub kind: LayerKind,
    pub color: Color,
    pub polygons: &'a [Polygon],
}

/// The three polygon layers of one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub background: Vec<Polygon>,
    pub foreground: Vec<Polygon>,
    pub intersections: Vec<Polygon>,
}

impl Frame {
    /// Layers in draw order: background, foreground, then intersections on top.
    pub fn layers(&self, palette: &Palette) -> [Layer<'_>; 3] {
        [
            Layer { kind: LayerKind::Background, color: palette.background, polygons: &self.background },
            Layer { kind: LayerKind::Foreground, color: palette.foreground, polygons: &self.foreground },
            Layer { kind: LayerKind::Intersection, color: palette.intersection, polygons: &self.intersections },
        ]
    }

    pub fn polygon_count(&self) -> usize {
        self.background.len() + self.foreground.len() + self.intersections.len()
    }
}

/// Builds the background grid at `translate`, the foreground grid at half
/// that offset, and every background × foreground overlap.
///
/// Each background triangle is clipped against the whole foreground grid,
/// so one frame costs `count⁴` clip calls.
pub fn compose_frame<C: PolygonClipper + ?Sized>(
    translate: Point2,
    config: &PatternConfig,
    clipper: &C,
) -> Result<Frame, DomainError> {
    let background = GridGenerator::generate_grid(translate, config.count, config.padding, config.gutter)?;
    let foreground = GridGenerator::generate_grid(translate.scale(0.5), config.count, config.padding, config.gutter)?;

    let intersections: Vec<Polygon> = background
        .iter()
        .flat_map(|triangle| intersect_against_set(clipper, triangle, &foreground))
        .collect();

    log::trace!(
        "composed frame at ({:.3}, {:.3}): {} clip calls, {} fragments",
        translate.x,
        translate.y,
        background.len() * foreground.len(),
        intersections.len()
    );

    Ok(Frame { background, foreground, intersections })
}
