use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// An ordered, drawable path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct RouteGeometry(Vec<Coordinate>);

impl RouteGeometry {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn into_coordinates(self) -> Vec<Coordinate> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.0.last()
    }
}

impl From<Vec<Coordinate>> for RouteGeometry {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self(coordinates)
    }
}

impl From<&RouteGeometry> for geo_types::LineString<f64> {
    fn from(geometry: &RouteGeometry) -> Self {
        geometry
            .0
            .iter()
            .map(|&coordinate| geo_types::Coord::from(coordinate))
            .collect()
    }
}
