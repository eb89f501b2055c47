use std::{cmp::Ordering, sync::Arc};

use fxhash::FxHashSet;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use waypoint_core::{Coordinate, Place};

use crate::{distance_cache::DistanceCache, leg_provider::LegProvider};

const UPDATES_CAPACITY: usize = 64;

/// Emitted once a road distance replaces a straight line estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceUpdated {
    pub place_id: String,
    pub distance_km: f64,
}

/// Distances from the user to search results, used to rank them.
///
/// Answers come from the [`DistanceCache`] when possible. On a miss the
/// straight line distance is returned right away while the road distance is
/// resolved in the background and announced on [`ProximityRanker::subscribe`].
pub struct ProximityRanker<P> {
    provider: Arc<P>,
    cache: Arc<DistanceCache>,
    in_flight: Arc<Mutex<FxHashSet<String>>>,
    updates: broadcast::Sender<DistanceUpdated>,
}

impl<P> ProximityRanker<P>
where
    P: LegProvider + 'static,
{
    pub fn new(provider: Arc<P>, cache: Arc<DistanceCache>) -> Self {
        let (updates, _) = broadcast::channel(UPDATES_CAPACITY);
        Self {
            provider,
            cache,
            in_flight: Arc::new(Mutex::new(FxHashSet::default())),
            updates,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DistanceUpdated> {
        self.updates.subscribe()
    }

    pub fn cache(&self) -> &DistanceCache {
        &self.cache
    }

    pub fn distance_to(&self, origin: Option<Coordinate>, place: &Place) -> Option<f64> {
        if let Some(distance) = self.cache.get(&place.id) {
            return Some(distance);
        }

        let origin = origin?;
        self.resolve_in_background(origin, place);

        Some(origin.haversine_km(&place.coordinate()))
    }

    /// New places carrying their distance, closest first. Places without a
    /// distance keep their relative order at the end.
    pub fn rank(&self, origin: Option<Coordinate>, places: &[Place]) -> Vec<Place> {
        let mut ranked: Vec<Place> = places
            .iter()
            .map(|place| match self.distance_to(origin, place) {
                Some(distance) => place.with_distance(distance),
                None => place.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| match (a.distance, b.distance) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        ranked
    }

    fn resolve_in_background(&self, origin: Coordinate, place: &Place) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("Proximity: no runtime, skipping road distance for {}", place.id);
            return;
        };

        if !self.in_flight.lock().insert(place.id.clone()) {
            return;
        }

        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);
        let updates = self.updates.clone();
        let place_id = place.id.clone();
        let destination = place.coordinate();

        runtime.spawn(async move {
            match provider.fetch_distance(origin, destination).await {
                Ok(distance_km) => {
                    cache.put(place_id.clone(), distance_km);
                    debug!("Proximity: {} is {:.1} km away", place_id, distance_km);
                    // Nobody listening is fine.
                    let _ = updates.send(DistanceUpdated {
                        place_id: place_id.clone(),
                        distance_km,
                    });
                }
                Err(error) => {
                    warn!("Proximity: road distance for {} failed: {}", place_id, error);
                }
            }

            in_flight.lock().remove(&place_id);
        });
    }
}
