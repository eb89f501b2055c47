use std::time::Duration;

use futures::{StreamExt, stream::FuturesUnordered};
use tracing::{debug, warn};
use waypoint_client::{ClientConfig, ClientError};
use waypoint_core::{Coordinate, Place, RouteGeometry, merge};

use crate::{
    error::{ComposeError, LegFailure},
    leg_provider::LegProvider,
    waypoint::{Waypoint, itinerary_waypoints},
};

pub use waypoint_client::config::DEFAULT_LEG_TIMEOUT;

/// One point to point segment. `index` is the leg's position in the
/// itinerary and decides where its geometry lands in the merged route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub index: usize,
    pub from: Coordinate,
    pub to: Coordinate,
}

/// origin -> stop[0] -> ... -> stop[n-1] -> destination
pub fn build_legs(origin: Coordinate, stops: &[Place], destination: &Place) -> Vec<Leg> {
    let points: Vec<Coordinate> = std::iter::once(origin)
        .chain(stops.iter().map(Place::coordinate))
        .chain(std::iter::once(destination.coordinate()))
        .collect();

    points
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Leg {
            index,
            from: pair[0],
            to: pair[1],
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ComposedRoute {
    pub geometry: RouteGeometry,
    pub waypoints: Vec<Waypoint>,

    /// Legs that contributed nothing, sorted by leg index
    pub failed_legs: Vec<LegFailure>,
}

#[derive(Debug, Clone)]
pub struct OrchestratorParams {
    /// Upper bound for a single leg; expiry counts as a failed leg
    pub leg_timeout: Duration,
}

impl Default for OrchestratorParams {
    fn default() -> Self {
        Self {
            leg_timeout: DEFAULT_LEG_TIMEOUT,
        }
    }
}

impl From<&ClientConfig> for OrchestratorParams {
    fn from(config: &ClientConfig) -> Self {
        Self {
            leg_timeout: config.leg_timeout,
        }
    }
}

pub struct SegmentOrchestrator<P> {
    provider: P,
    params: OrchestratorParams,
}

impl<P: LegProvider> SegmentOrchestrator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_params(provider, OrchestratorParams::default())
    }

    pub fn with_params(provider: P, params: OrchestratorParams) -> Self {
        Self { provider, params }
    }

    /// Uses the leg timeout configured for the client.
    pub fn from_config(provider: P, config: &ClientConfig) -> Self {
        Self::with_params(provider, config.into())
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn params(&self) -> &OrchestratorParams {
        &self.params
    }

    /// Builds a single route through every stop.
    ///
    /// All legs are requested concurrently. A failed leg contributes an empty
    /// geometry instead of aborting the itinerary; only when no leg produced
    /// any point does this return [`ComposeError::RouteUnavailable`]. A leg
    /// that answers without any point is reported as failed too.
    pub async fn compose_route(
        &self,
        origin: Coordinate,
        stops: &[Place],
        destination: &Place,
    ) -> Result<ComposedRoute, ComposeError> {
        let waypoints = itinerary_waypoints(origin, stops, destination);
        let legs = build_legs(origin, stops, destination);

        let (geometry, failed_legs) = match legs.as_slice() {
            [direct] => self.fetch_direct(direct).await,
            _ => self.fetch_all(&legs).await,
        };

        if geometry.is_empty() {
            warn!(
                "Orchestrator: no route for {} leg(s), {} failed",
                legs.len(),
                failed_legs.len()
            );
            return Err(ComposeError::RouteUnavailable {
                failures: failed_legs,
            });
        }

        Ok(ComposedRoute {
            geometry,
            waypoints,
            failed_legs,
        })
    }

    /// No stops: the leg's geometry is the route.
    async fn fetch_direct(&self, leg: &Leg) -> (RouteGeometry, Vec<LegFailure>) {
        match self.fetch_with_timeout(leg).await {
            Ok(geometry) => (geometry, Vec::new()),
            Err(failure) => (RouteGeometry::empty(), vec![failure]),
        }
    }

    async fn fetch_all(&self, legs: &[Leg]) -> (RouteGeometry, Vec<LegFailure>) {
        let mut slots: Vec<Option<RouteGeometry>> = vec![None; legs.len()];
        let mut failures = Vec::new();

        let mut pending: FuturesUnordered<_> = legs
            .iter()
            .map(|leg| async move { (leg.index, self.fetch_with_timeout(leg).await) })
            .collect();

        // Barrier: every leg reports exactly once, in whatever order the
        // responses arrive.
        let mut completed = 0;
        while let Some((index, result)) = pending.next().await {
            completed += 1;
            debug!(
                "Orchestrator: leg {} finished ({}/{})",
                index,
                completed,
                legs.len()
            );

            slots[index] = Some(match result {
                Ok(geometry) => geometry,
                Err(failure) => {
                    failures.push(failure);
                    RouteGeometry::empty()
                }
            });
        }

        failures.sort_by_key(|failure| failure.index);

        let geometries: Vec<RouteGeometry> = slots.into_iter().flatten().collect();
        (merge(&geometries), failures)
    }

    async fn fetch_with_timeout(&self, leg: &Leg) -> Result<RouteGeometry, LegFailure> {
        let timeout = self.params.leg_timeout;
        let result = tokio::time::timeout(timeout, self.provider.fetch_leg(leg.from, leg.to))
            .await
            .unwrap_or_else(|_| Err(ClientError::Timeout(timeout)));

        match result {
            Ok(geometry) if geometry.is_empty() => {
                warn!("Orchestrator: leg {} has no points", leg.index);
                Err(LegFailure::empty(leg.index, leg.from, leg.to))
            }
            Ok(geometry) => Ok(geometry),
            Err(error) => {
                warn!("Orchestrator: leg {} failed: {}", leg.index, error);
                Err(LegFailure::from_client_error(
                    leg.index, leg.from, leg.to, &error,
                ))
            }
        }
    }
}
