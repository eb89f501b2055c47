pub mod distance_cache;
pub mod error;
pub mod itinerary;
pub mod leg_provider;
pub mod orchestrator;
pub mod proximity;
pub mod route_session;
pub mod waypoint;

pub use distance_cache::DistanceCache;
pub use error::{ComposeError, LegFailure, LegFailureKind};
pub use itinerary::{ItineraryStore, ORIGIN_MOVE_TOLERANCE_DEGREES, RouteRequest};
pub use leg_provider::LegProvider;
pub use orchestrator::{ComposedRoute, Leg, OrchestratorParams, SegmentOrchestrator};
pub use proximity::{DistanceUpdated, ProximityRanker};
pub use route_session::{RecomposeOutcome, RouteSession, RouteSnapshot};
pub use waypoint::{Waypoint, WaypointRole};
