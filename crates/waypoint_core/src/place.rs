use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{coordinate::Coordinate, kmh::AVERAGE_CITY_SPEED};

/// A named point of interest, as returned by the place search endpoint.
///
/// Places are never mutated once shared: recomputing a distance produces a
/// new value through [`Place::with_distance`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ar: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governorate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    pub latitude: f64,
    pub longitude: f64,

    /// Popularity weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,

    /// Distance from the user in kilometers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_en: None,
            name_ar: None,
            category: None,
            governorate: None,
            locality: None,
            latitude: coordinate.lat,
            longitude: coordinate.lng,
            weight: None,
            distance: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn address(&self) -> Option<String> {
        match (&self.locality, &self.governorate) {
            (Some(locality), Some(governorate)) => Some(format!("{locality}, {governorate}")),
            (Some(locality), None) => Some(locality.clone()),
            (None, Some(governorate)) => Some(governorate.clone()),
            (None, None) => None,
        }
    }

    pub fn with_distance(&self, distance_km: f64) -> Place {
        Place {
            distance: Some(distance_km),
            ..self.clone()
        }
    }

    /// Travel time at an average city speed, if the distance is known.
    pub fn estimated_travel_time(&self) -> Option<SignedDuration> {
        self.distance
            .map(|distance| AVERAGE_CITY_SPEED.travel_time(distance))
    }
}
