//! Joins per-leg geometries into one continuous path.
//!
//! All comparisons happen in planar degree space. That is an approximation
//! which holds for the short gaps found between routing legs, it is not a
//! geodesic guarantee.

use crate::{coordinate::Coordinate, geometry::RouteGeometry};

/// Two coordinates closer than this on both axes are the same point.
pub const STITCH_EPSILON_DEGREES: f64 = 1e-7;

/// Consecutive points further apart than this get interpolated points
/// in between (about 100m).
pub const DENSIFY_THRESHOLD_DEGREES: f64 = 0.001;

const MIN_SUBDIVISIONS: usize = 2;

/// Upper bound on interpolated points for a single segment.
pub const MAX_SUBDIVISIONS: usize = 10_000;

/// Concatenates the legs in the given order.
///
/// Empty legs are skipped. When a leg does not start where the previous one
/// ended, a midpoint is inserted to bridge the gap. Consecutive duplicates
/// are dropped, and long straight jumps are densified afterwards.
pub fn merge(legs: &[RouteGeometry]) -> RouteGeometry {
    let capacity = legs.iter().map(RouteGeometry::len).sum::<usize>() + legs.len();
    let mut joined: Vec<Coordinate> = Vec::with_capacity(capacity);

    for leg in legs.iter().filter(|leg| !leg.is_empty()) {
        if let (Some(last), Some(first)) = (joined.last(), leg.first()) {
            if !last.approx_eq(first, STITCH_EPSILON_DEGREES) {
                let bridge = last.midpoint(first);
                joined.push(bridge);
            }
        }

        for coordinate in leg.coordinates() {
            push_distinct(&mut joined, *coordinate);
        }
    }

    RouteGeometry::new(densify(&joined))
}

fn push_distinct(coordinates: &mut Vec<Coordinate>, coordinate: Coordinate) {
    match coordinates.last() {
        Some(last) if last.approx_eq(&coordinate, STITCH_EPSILON_DEGREES) => {}
        _ => coordinates.push(coordinate),
    }
}

/// Inserts linearly interpolated points between consecutive coordinates that
/// are more than [`DENSIFY_THRESHOLD_DEGREES`] apart. The number of
/// subdivisions grows with the gap, with a minimum of two and a maximum of
/// [`MAX_SUBDIVISIONS`].
pub fn densify(coordinates: &[Coordinate]) -> Vec<Coordinate> {
    let Some((first, rest)) = coordinates.split_first() else {
        return Vec::new();
    };

    let mut result = Vec::with_capacity(coordinates.len());
    result.push(*first);

    let mut previous = *first;
    for &current in rest {
        let distance = previous.planar_distance(&current);

        if distance > DENSIFY_THRESHOLD_DEGREES {
            let steps = ((distance / DENSIFY_THRESHOLD_DEGREES) as usize)
                .clamp(MIN_SUBDIVISIONS, MAX_SUBDIVISIONS);
            result.extend(
                (1..steps).map(|step| previous.lerp(&current, step as f64 / steps as f64)),
            );
        }

        result.push(current);
        previous = current;
    }

    result
}
