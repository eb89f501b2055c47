use std::fmt::Display;

use schemars::JsonSchema;
use serde::Serialize;
use waypoint_core::{Coordinate, Place};

pub const ORIGIN_NAME: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WaypointRole {
    Start,
    /// 1-based position among the intermediate stops
    Stop(usize),
    Destination,
}

impl Display for WaypointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaypointRole::Start => write!(f, "Start"),
            WaypointRole::Stop(position) => write!(f, "Stop {position}"),
            WaypointRole::Destination => write!(f, "Destination"),
        }
    }
}

/// A named marker for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    pub name: String,
    pub role: WaypointRole,
}

impl Waypoint {
    pub fn label(&self) -> String {
        self.role.to_string()
    }
}

pub fn itinerary_waypoints(
    origin: Coordinate,
    stops: &[Place],
    destination: &Place,
) -> Vec<Waypoint> {
    let mut waypoints = Vec::with_capacity(stops.len() + 2);

    waypoints.push(Waypoint {
        coordinate: origin,
        name: ORIGIN_NAME.to_string(),
        role: WaypointRole::Start,
    });

    waypoints.extend(stops.iter().enumerate().map(|(index, stop)| Waypoint {
        coordinate: stop.coordinate(),
        name: stop.name.clone(),
        role: WaypointRole::Stop(index + 1),
    }));

    waypoints.push(Waypoint {
        coordinate: destination.coordinate(),
        name: destination.name.clone(),
        role: WaypointRole::Destination,
    });

    waypoints
}
