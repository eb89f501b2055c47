use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

/// Average speed assumed when turning a road distance into a travel time.
pub const AVERAGE_CITY_SPEED: Kmh = Kmh(40.0);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Kmh(f64);

impl Kmh {
    pub fn new(value: f64) -> Self {
        Kmh(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn travel_time(&self, distance_km: f64) -> SignedDuration {
        SignedDuration::from_secs_f64(distance_km * 3600.0 / self.0)
    }
}
