use tokio::sync::watch;
use tracing::debug;
use waypoint_core::{Coordinate, Place};

/// Origin updates closer than this to the current origin, on both axes, are
/// ignored (about 50m).
pub const ORIGIN_MOVE_TOLERANCE_DEGREES: f64 = 0.0005;

/// Everything needed to compose one route, tagged with the revision of the
/// itinerary it was taken from.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub revision: u64,
    pub origin: Coordinate,
    pub stops: Vec<Place>,
    pub destination: Place,
}

/// Ordered stops between the user's origin and a destination.
///
/// Every effective change bumps a revision number that subscribers observe
/// through a `watch` channel. Out of range indices are ignored and do not
/// count as a change.
pub struct ItineraryStore {
    origin: Option<Coordinate>,
    stops: Vec<Place>,
    destination: Option<Place>,
    revision: watch::Sender<u64>,
}

impl Default for ItineraryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItineraryStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            origin: None,
            stops: Vec::new(),
            destination: None,
            revision,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    pub fn list(&self) -> &[Place] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    pub fn destination(&self) -> Option<&Place> {
        self.destination.as_ref()
    }

    pub fn append(&mut self, place: Place) {
        self.stops.push(place);
        self.notify();
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Place> {
        if index >= self.stops.len() {
            debug!("Itinerary: ignoring remove at {} ({} stops)", index, self.stops.len());
            return None;
        }

        let place = self.stops.remove(index);
        self.notify();
        Some(place)
    }

    pub fn move_to(&mut self, from: usize, to: usize) {
        let len = self.stops.len();
        if from >= len || to >= len {
            debug!("Itinerary: ignoring move {} -> {} ({} stops)", from, to, len);
            return;
        }

        let place = self.stops.remove(from);
        self.stops.insert(to, place);
        self.notify();
    }

    pub fn clear(&mut self) {
        self.stops.clear();
        self.notify();
    }

    /// Returns whether the origin changed. Small moves keep the current
    /// origin, so position jitter does not invalidate a composition in flight
    /// at the cost of a route starting up to the tolerance away.
    pub fn set_origin(&mut self, origin: Option<Coordinate>) -> bool {
        let unchanged = match (self.origin, origin) {
            (Some(current), Some(next)) => {
                current.approx_eq(&next, ORIGIN_MOVE_TOLERANCE_DEGREES)
            }
            (None, None) => true,
            _ => false,
        };

        if unchanged {
            return false;
        }

        self.origin = origin;
        self.notify();
        true
    }

    pub fn set_destination(&mut self, destination: Option<Place>) {
        self.destination = destination;
        self.notify();
    }

    /// `None` until both an origin and a destination are known.
    pub fn route_request(&self) -> Option<RouteRequest> {
        let origin = self.origin?;
        let destination = self.destination.clone()?;

        Some(RouteRequest {
            revision: self.revision(),
            origin,
            stops: self.stops.clone(),
            destination,
        })
    }
}
