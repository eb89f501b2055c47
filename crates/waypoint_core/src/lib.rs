pub mod bounds;
pub mod coordinate;
pub mod geometry;
pub mod kmh;
pub mod place;
pub mod stitcher;

pub use bounds::{BOUNDS_PADDING_DEGREES, BoundingRegion, BoundsError, bounds_for};
pub use coordinate::Coordinate;
pub use geometry::RouteGeometry;
pub use kmh::Kmh;
pub use place::Place;
pub use stitcher::{
    DENSIFY_THRESHOLD_DEGREES, MAX_SUBDIVISIONS, STITCH_EPSILON_DEGREES, densify, merge,
};
