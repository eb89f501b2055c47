use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use waypoint_core::{BoundingRegion, Coordinate, Place, RouteGeometry, bounds_for};

use crate::{
    error::ComposeError,
    itinerary::ItineraryStore,
    leg_provider::LegProvider,
    orchestrator::SegmentOrchestrator,
    waypoint::Waypoint,
};

/// The current route, as handed to the renderer.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RouteSnapshot {
    /// Itinerary revision this route was composed from
    pub generation: u64,
    pub geometry: RouteGeometry,
    pub bounds: BoundingRegion,
    pub waypoints: Vec<Waypoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomposeOutcome {
    Published { generation: u64 },

    /// The itinerary changed while composing; the result was dropped.
    Stale { generation: u64 },

    /// No origin or no destination yet.
    Skipped,
}

/// Keeps the displayed route in sync with the itinerary.
///
/// Each composition is tagged with the itinerary revision it started from.
/// A result is only published if the itinerary is still at that revision, so
/// a slow composition can never overwrite a newer one.
pub struct RouteSession<P> {
    orchestrator: SegmentOrchestrator<P>,
    itinerary: Mutex<ItineraryStore>,
    route: watch::Sender<Option<RouteSnapshot>>,
}

impl<P: LegProvider> RouteSession<P> {
    pub fn new(orchestrator: SegmentOrchestrator<P>) -> Self {
        let (route, _) = watch::channel(None);
        Self {
            orchestrator,
            itinerary: Mutex::new(ItineraryStore::new()),
            route,
        }
    }

    /// Receives every published route. `None` means no route is displayed.
    pub fn subscribe(&self) -> watch::Receiver<Option<RouteSnapshot>> {
        self.route.subscribe()
    }

    pub fn current_route(&self) -> Option<RouteSnapshot> {
        self.route.borrow().clone()
    }

    pub fn stops(&self) -> Vec<Place> {
        self.itinerary.lock().list().to_vec()
    }

    pub fn generation(&self) -> u64 {
        self.itinerary.lock().revision()
    }

    /// Returns whether the origin changed enough to trigger a new route.
    pub fn set_origin(&self, origin: Option<Coordinate>) -> bool {
        self.itinerary.lock().set_origin(origin)
    }

    pub fn set_destination(&self, destination: Option<Place>) {
        self.itinerary.lock().set_destination(destination);
    }

    pub fn add_stop(&self, place: Place) {
        self.itinerary.lock().append(place);
    }

    pub fn remove_stop(&self, index: usize) -> Option<Place> {
        self.itinerary.lock().remove_at(index)
    }

    pub fn move_stop(&self, from: usize, to: usize) {
        self.itinerary.lock().move_to(from, to);
    }

    pub fn clear_stops(&self) {
        self.itinerary.lock().clear();
    }

    /// Composes the route for the current itinerary and publishes it unless
    /// the itinerary moved on in the meantime.
    pub async fn recompose(&self) -> Result<RecomposeOutcome, ComposeError> {
        let request = self.itinerary.lock().route_request();
        let Some(request) = request else {
            return Ok(RecomposeOutcome::Skipped);
        };
        let generation = request.revision;

        let result = self
            .orchestrator
            .compose_route(request.origin, &request.stops, &request.destination)
            .await;

        // Held while publishing so no mutation can slip between the check
        // and the send.
        let itinerary = self.itinerary.lock();
        if itinerary.revision() != generation {
            debug!(
                "RouteSession: dropping route for generation {} (now {})",
                generation,
                itinerary.revision()
            );
            return Ok(RecomposeOutcome::Stale { generation });
        }

        match result {
            Ok(composed) => {
                let bounds = bounds_for(composed.geometry.coordinates())?;

                info!(
                    "RouteSession: generation {} has {} points, {} leg(s) failed",
                    generation,
                    composed.geometry.len(),
                    composed.failed_legs.len()
                );

                self.route.send_replace(Some(RouteSnapshot {
                    generation,
                    geometry: composed.geometry,
                    bounds,
                    waypoints: composed.waypoints,
                }));

                Ok(RecomposeOutcome::Published { generation })
            }
            Err(error) => {
                self.route.send_replace(None);
                Err(error)
            }
        }
    }

    /// Recomposes after every itinerary change until the session is dropped.
    pub async fn run(self: Arc<Self>) {
        let mut changes = self.itinerary.lock().subscribe();
        // Compose whatever the itinerary already holds before waiting.
        changes.mark_changed();
        let session: Weak<Self> = Arc::downgrade(&self);
        drop(self);

        while changes.changed().await.is_ok() {
            let Some(session) = session.upgrade() else {
                break;
            };

            match session.recompose().await {
                Ok(outcome) => debug!("RouteSession: {:?}", outcome),
                Err(error) => warn!("RouteSession: {}", error),
            }
        }
    }
}
