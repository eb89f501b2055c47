use std::{future::Future, sync::Arc};

use waypoint_client::{ClientError, RouteClient};
use waypoint_core::{Coordinate, RouteGeometry};

/// Source of point to point routes.
pub trait LegProvider: Send + Sync {
    fn fetch_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<RouteGeometry, ClientError>> + Send;

    /// Road distance in kilometers.
    fn fetch_distance(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<f64, ClientError>> + Send;
}

impl LegProvider for RouteClient {
    fn fetch_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<RouteGeometry, ClientError>> + Send {
        RouteClient::fetch_leg(self, from, to)
    }

    fn fetch_distance(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<f64, ClientError>> + Send {
        RouteClient::fetch_distance(self, from, to)
    }
}

impl<P: LegProvider> LegProvider for Arc<P> {
    fn fetch_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<RouteGeometry, ClientError>> + Send {
        P::fetch_leg(self, from, to)
    }

    fn fetch_distance(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> impl Future<Output = Result<f64, ClientError>> + Send {
        P::fetch_distance(self, from, to)
    }
}
