// src/lib.rs

pub mod composition;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod interaction;
pub mod intersection;
pub mod scheduler;
pub mod surface;

pub use composition::{compose_frame, Frame, Layer, LayerKind};
pub use config::{Color, Palette, PatternConfig};
pub use error::{DomainError, GeometryError};
pub use generator::GridGenerator;
pub use geometry::{Point2, Polygon};
pub use intersection::{intersect_against_set, ClippedShape, ConvexIntersection, PolygonClipper};
pub use scheduler::FrameScheduler;
pub use surface::{configure_surface, render_layers, DrawingSurface, SurfaceAdapter};
