use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;
use waypoint_core::{Coordinate, RouteGeometry};

use crate::{config::ClientConfig, error::ClientError};

pub const MAP_TOKEN_HEADER: &str = "map-token";
pub const ROUTE_TYPE_FASTEST: &str = "Fastest";

#[derive(Deserialize)]
struct RouteResponse<T> {
    data: T,
}

#[derive(Deserialize)]
struct LegData {
    #[serde(rename = "subSteps")]
    sub_steps: Vec<SubStep>,
}

/// Step endpoints are kept as raw values so one malformed point does not
/// discard the whole leg.
#[derive(Deserialize)]
struct SubStep {
    #[serde(default)]
    start: Option<serde_json::Value>,
    #[serde(default)]
    end: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct DistanceData {
    /// Meters
    distance: f64,
}

#[derive(Debug, Clone)]
pub struct RouteClientParams {
    pub map_token: String,
    pub route_base_url: String,
    pub leg_timeout: Duration,
}

impl From<&ClientConfig> for RouteClientParams {
    fn from(config: &ClientConfig) -> Self {
        Self {
            map_token: config.map_token.clone(),
            route_base_url: config.route_base_url.clone(),
            leg_timeout: config.leg_timeout,
        }
    }
}

/// Point to point client for the routing endpoint.
pub struct RouteClient {
    params: RouteClientParams,
    client: reqwest::Client,
}

impl RouteClient {
    pub fn new(params: RouteClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.into())
    }

    /// Fetches the drivable geometry between two coordinates.
    ///
    /// Every sub-step contributes its start and end point, in response order.
    /// Duplicates between consecutive steps are kept.
    pub async fn fetch_leg(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<RouteGeometry, ClientError> {
        let body = self.send_route_request(from, to).await?;
        let geometry = parse_leg_geometry(&body)?;

        debug!(
            "RouteClient: leg {:?} -> {:?} has {} points",
            from,
            to,
            geometry.len()
        );

        Ok(geometry)
    }

    /// Road distance between two coordinates, in kilometers.
    pub async fn fetch_distance(&self, from: Coordinate, to: Coordinate) -> Result<f64, ClientError> {
        let body = self.send_route_request(from, to).await?;
        parse_distance_km(&body)
    }

    pub fn route_url(&self, from: Coordinate, to: Coordinate) -> Result<Url, ClientError> {
        build_route_url(&self.params.route_base_url, from, to)
    }

    async fn send_route_request(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<String, ClientError> {
        let url = self.route_url(from, to)?;
        let timeout = self.params.leg_timeout;

        let request = async {
            let response = self
                .client
                .get(url)
                .header(MAP_TOKEN_HEADER, &self.params.map_token)
                .send()
                .await?;

            self.handle_response(response).await
        };

        tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| ClientError::Timeout(timeout))?
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, ClientError> {
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api { status, message })
        }
    }
}

pub(crate) fn build_route_url(
    base_url: &str,
    from: Coordinate,
    to: Coordinate,
) -> Result<Url, ClientError> {
    for coordinate in [from, to] {
        if !coordinate.is_valid() {
            return Err(ClientError::InvalidRequest(format!(
                "coordinate out of range: {}, {}",
                coordinate.lat, coordinate.lng
            )));
        }
    }

    Url::parse_with_params(
        base_url,
        &[
            ("lat1", from.lat.to_string()),
            ("lng1", from.lng.to_string()),
            ("lat2", to.lat.to_string()),
            ("lng2", to.lng.to_string()),
            ("routeType", ROUTE_TYPE_FASTEST.to_string()),
        ],
    )
    .map_err(|err| ClientError::InvalidRequest(format!("{base_url}: {err}")))
}

pub(crate) fn parse_leg_geometry(body: &str) -> Result<RouteGeometry, ClientError> {
    let response: RouteResponse<LegData> = serde_json::from_str(body)?;

    let mut coordinates = Vec::with_capacity(response.data.sub_steps.len() * 2);

    for (index, step) in response.data.sub_steps.into_iter().enumerate() {
        for (label, point) in [("start", step.start), ("end", step.end)] {
            match point.and_then(|value| serde_json::from_value::<Coordinate>(value).ok()) {
                Some(coordinate) if coordinate.is_valid() => coordinates.push(coordinate),
                Some(coordinate) => debug!(
                    "RouteClient: skipping out of range {} of sub-step {}: {:?}",
                    label, index, coordinate
                ),
                None => debug!("RouteClient: skipping malformed {} of sub-step {}", label, index),
            }
        }
    }

    Ok(RouteGeometry::new(coordinates))
}

pub(crate) fn parse_distance_km(body: &str) -> Result<f64, ClientError> {
    let response: RouteResponse<DistanceData> = serde_json::from_str(body)?;
    Ok(response.data.distance / 1000.0)
}
