use geo::{Distance, Haversine};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// True when both axes differ by at most `epsilon` degrees.
    pub fn approx_eq(&self, other: &Coordinate, epsilon: f64) -> bool {
        (self.lat - other.lat).abs() <= epsilon && (self.lng - other.lng).abs() <= epsilon
    }

    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }

    /// Linear interpolation in degree space, `fraction` in [0, 1].
    pub fn lerp(&self, other: &Coordinate, fraction: f64) -> Coordinate {
        Coordinate {
            lat: self.lat + fraction * (other.lat - self.lat),
            lng: self.lng + fraction * (other.lng - self.lng),
        }
    }

    /// Planar distance in degrees. This is not a geodesic distance, it treats
    /// degrees of latitude and longitude as the same unit.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let delta_lat = self.lat - other.lat;
        let delta_lng = self.lng - other.lng;
        (delta_lat * delta_lat + delta_lng * delta_lng).sqrt()
    }

    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        let from: geo_types::Point = (*self).into();
        let to: geo_types::Point = (*other).into();
        Haversine.distance(from, to) / 1000.0
    }
}

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Point::new(coordinate.lng, coordinate.lat)
    }
}

impl From<&Coordinate> for geo_types::Point<f64> {
    fn from(coordinate: &Coordinate) -> Self {
        (*coordinate).into()
    }
}

impl From<geo_types::Point<f64>> for Coordinate {
    fn from(point: geo_types::Point<f64>) -> Self {
        Coordinate {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

impl From<Coordinate> for geo_types::Coord<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Coord {
            x: coordinate.lng,
            y: coordinate.lat,
        }
    }
}
