use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinate::Coordinate;

/// Margin added on every side of a route's bounds, roughly one kilometer.
pub const BOUNDS_PADDING_DEGREES: f64 = 0.01;

#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("Cannot compute bounds of an empty coordinate sequence")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct BoundingRegion {
    pub southwest: Coordinate,
    pub northeast: Coordinate,
}

impl BoundingRegion {
    fn around(coordinate: Coordinate) -> Self {
        Self {
            southwest: coordinate,
            northeast: coordinate,
        }
    }

    fn extend(&mut self, coordinate: &Coordinate) {
        self.southwest.lat = self.southwest.lat.min(coordinate.lat);
        self.southwest.lng = self.southwest.lng.min(coordinate.lng);
        self.northeast.lat = self.northeast.lat.max(coordinate.lat);
        self.northeast.lng = self.northeast.lng.max(coordinate.lng);
    }

    fn padded(self, padding: f64) -> Self {
        Self {
            southwest: Coordinate::new(self.southwest.lat - padding, self.southwest.lng - padding),
            northeast: Coordinate::new(self.northeast.lat + padding, self.northeast.lng + padding),
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.southwest.lat <= coordinate.lat
            && coordinate.lat <= self.northeast.lat
            && self.southwest.lng <= coordinate.lng
            && coordinate.lng <= self.northeast.lng
    }
}

/// Padded bounds enclosing every coordinate.
pub fn bounds_for(coordinates: &[Coordinate]) -> Result<BoundingRegion, BoundsError> {
    let (first, rest) = coordinates.split_first().ok_or(BoundsError::EmptyInput)?;

    let mut region = BoundingRegion::around(*first);
    for coordinate in rest {
        region.extend(coordinate);
    }

    Ok(region.padded(BOUNDS_PADDING_DEGREES))
}
