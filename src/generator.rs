// src/generator.rs

use crate::config::validate_layout;
use crate::error::DomainError;
use crate::geometry::{Point2, Polygon};

pub struct GridGenerator;

impl GridGenerator {
    /// Lays out `count × count` upward-pointing equilateral triangles inside
    /// the unit square, shifted by `translate` scaled to the gutter width.
    ///
    /// Triangles come back row-major: index `i * count + j`, where `i` walks
    /// along x and `j` along y. Each ring is left, apex, right.
    ///
    /// Horizontal placement starts at the gutter; vertical placement is
    /// centered on the actual stacked height, so the two axes are centered
    /// independently.
    pub fn generate_grid(
        translate: Point2,
        count: usize,
        padding: f64,
        gutter: f64,
    ) -> Result<Vec<Polygon>, DomainError> {
        validate_layout(padding, gutter)?;
        if !translate.x.is_finite() {
            return Err(DomainError::NonFinite { name: "translate.x", value: translate.x });
        }
        if !translate.y.is_finite() {
            return Err(DomainError::NonFinite { name: "translate.y", value: translate.y });
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let n = count as f64;
        let side_length = Self::side_length(count, padding, gutter);
        let padded_gap = padding * side_length;
        let translate_scale = 2.0 * gutter;
        let y_length = side_length * 3f64.sqrt() / 2.0;
        let y_gutter = (1.0 - (y_length + padded_gap) * n) / 2.0;

        let mut triangles = Vec::with_capacity(count * count);
        for i in 0..count {
            for j in 0..count {
                let offset_x = gutter + translate.x * translate_scale + i as f64 * (padded_gap + side_length);
                let offset_y = y_gutter + translate.y * translate_scale + j as f64 * (padded_gap + y_length);
                triangles.push(Polygon::new(vec![
                    Point2::new(offset_x, offset_y + y_length),
                    Point2::new(offset_x + side_length / 2.0, offset_y),
                    Point2::new(offset_x + side_length, offset_y + y_length),
                ]));
            }
        }
        Ok(triangles)
    }

    /// Side length the generator will use for a given layout.
    pub fn side_length(count: usize, padding: f64, gutter: f64) -> f64 {
        (1.0 - 2.0 * gutter) / (count as f64 * (padding + 1.0))
    }
}
