// tests/frame_properties.rs

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tri_parallax::interaction::translation_from_pointer;
use tri_parallax::{
    compose_frame, intersect_against_set, render_layers, Color, ConvexIntersection, DomainError, DrawingSurface,
    GridGenerator, PatternConfig, Point2,
};

const SAMPLES: usize = 200;
const BOUNDS_EPSILON: f64 = 1e-12;

fn random_translation(rng: &mut impl Rng) -> Point2 {
    Point2::new(rng.gen_range(-0.5..=0.5), rng.gen_range(-0.5..=0.5))
}

#[test]
fn grids_have_count_squared_positive_triangles() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let count = rng.gen_range(1..=8);
        let padding = rng.gen_range(0.0..2.0);
        let gutter = rng.gen_range(0.0..0.49);
        let grid = GridGenerator::generate_grid(random_translation(&mut rng), count, padding, gutter).unwrap();

        assert_eq!(grid.len(), count * count);
        for triangle in &grid {
            assert_eq!(triangle.len(), 3);
            assert!(triangle.area() > 0.0);
        }
    }
}

#[test]
fn pointer_driven_translations_stay_on_canvas() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..SAMPLES {
        let count = rng.gen_range(1..=6);
        let padding = rng.gen_range(0.0..1.0);
        let gutter = rng.gen_range(0.01..0.49);
        let width = rng.gen_range(100.0..2000.0);
        let height = rng.gen_range(100.0..2000.0);
        let translate = translation_from_pointer(rng.gen_range(0.0..=width), rng.gen_range(0.0..=height), width, height)
            .unwrap();

        for shift in [translate, translate.scale(0.5)] {
            let grid = GridGenerator::generate_grid(shift, count, padding, gutter).unwrap();
            for p in grid.iter().flat_map(|t| t.vertices()) {
                assert!(
                    (-BOUNDS_EPSILON..=1.0 + BOUNDS_EPSILON).contains(&p.x)
                        && (-BOUNDS_EPSILON..=1.0 + BOUNDS_EPSILON).contains(&p.y),
                    "vertex {p:?} escaped for count={count} padding={padding} gutter={gutter}"
                );
            }
        }
    }
}

#[test]
fn negative_padding_is_rejected_before_any_geometry() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..SAMPLES {
        let padding = -rng.gen_range(f64::EPSILON..0.99);
        assert_eq!(
            GridGenerator::generate_grid(random_translation(&mut rng), 3, padding, 0.2),
            Err(DomainError::InvalidPadding(padding))
        );
    }
    let config = PatternConfig { padding: -0.5, ..PatternConfig::default() };
    assert_eq!(config.validate(), Err(DomainError::InvalidPadding(-0.5)));
    assert!(compose_frame(Point2::ORIGIN, &config, &ConvexIntersection).is_err());
}

#[test]
fn generation_is_bit_identical() {
    let translate = Point2::new(-0.123456789, 0.3141592653);
    let a = GridGenerator::generate_grid(translate, 5, 0.35, 0.15).unwrap();
    let b = GridGenerator::generate_grid(translate, 5, 0.35, 0.15).unwrap();
    for (p, q) in a.iter().flat_map(|t| t.vertices()).zip(b.iter().flat_map(|t| t.vertices())) {
        assert_eq!(p.x.to_bits(), q.x.to_bits());
        assert_eq!(p.y.to_bits(), q.y.to_bits());
    }
}

#[test]
fn overlap_detection_is_order_independent() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut overlapping = 0;
    for _ in 0..SAMPLES {
        let back = GridGenerator::generate_grid(random_translation(&mut rng), 3, 0.2, 0.2).unwrap();
        let front = GridGenerator::generate_grid(random_translation(&mut rng), 3, 0.2, 0.2).unwrap();
        let a = &back[rng.gen_range(0..back.len())];
        let b = &front[rng.gen_range(0..front.len())];

        let forward = intersect_against_set(&ConvexIntersection, a, std::slice::from_ref(b));
        let backward = intersect_against_set(&ConvexIntersection, b, std::slice::from_ref(a));
        assert_eq!(forward.is_empty(), backward.is_empty());
        if !forward.is_empty() {
            overlapping += 1;
            assert_relative_eq!(forward[0].area(), backward[0].area(), epsilon = 1e-9);
        }
    }
    assert!(overlapping > 0);
}

#[test]
fn intersections_never_exceed_their_background_triangle() {
    let config = PatternConfig::default();
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..50 {
        let frame = compose_frame(random_translation(&mut rng), &config, &ConvexIntersection).unwrap();
        let triangle_area = frame.background[0].area();
        assert_eq!(frame.background.len(), 9);
        assert_eq!(frame.foreground.len(), 9);
        for fragment in &frame.intersections {
            assert!(fragment.len() >= 3);
            assert!(fragment.area() > 0.0);
            assert!(fragment.area() <= triangle_area + 1e-12);
        }
    }
}

#[derive(Default)]
struct CountingSurface {
    side: u32,
    clears: usize,
    fills: usize,
    path_calls: usize,
}

impl DrawingSurface for CountingSurface {
    fn width(&self) -> u32 {
        self.side
    }
    fn set_size(&mut self, width: u32, _height: u32) {
        self.side = width;
    }
    fn set_transform(&mut self, _transform: glam::DAffine2) {}
    fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.clears += 1;
    }
    fn begin_path(&mut self) {
        self.path_calls += 1;
    }
    fn move_to(&mut self, _x: f64, _y: f64) {
        self.path_calls += 1;
    }
    fn line_to(&mut self, _x: f64, _y: f64) {
        self.path_calls += 1;
    }
    fn close_path(&mut self) {
        self.path_calls += 1;
    }
    fn fill(&mut self, _color: Color) {
        self.fills += 1;
    }
}

#[test]
fn empty_grid_draws_nothing() {
    let config = PatternConfig { count: 0, ..PatternConfig::default() };
    let frame = compose_frame(Point2::new(0.25, -0.4), &config, &ConvexIntersection).unwrap();
    assert!(frame.background.is_empty());
    assert!(frame.intersections.is_empty());

    let mut surface = CountingSurface::default();
    let scale = tri_parallax::configure_surface(&mut surface, 800, 600);
    render_layers(&mut surface, scale, &frame.layers(&config.palette));
    assert_eq!(surface.fills, 0);
    assert_eq!(surface.path_calls, 0);
    assert_eq!(surface.clears, 1);
}

#[test]
fn full_frame_fills_every_polygon_once() {
    let config = PatternConfig::default();
    let frame = compose_frame(Point2::new(-0.3, 0.1), &config, &ConvexIntersection).unwrap();

    let mut surface = CountingSurface::default();
    let scale = tri_parallax::configure_surface(&mut surface, 600, 800);
    assert_eq!(surface.side, 600);
    render_layers(&mut surface, scale, &frame.layers(&config.palette));
    assert_eq!(surface.fills, frame.polygon_count());
}
