use reqwest::Url;
use serde::Deserialize;
use tracing::debug;
use waypoint_core::Place;

use crate::{config::ClientConfig, error::ClientError, route_client::MAP_TOKEN_HEADER};

/// `status` and `message` are also sent, only `data` is used.
#[derive(Deserialize)]
struct SearchResponse {
    data: Vec<Place>,
}

/// Free text search against the place search endpoint.
pub struct PlaceSearchClient {
    map_token: String,
    search_base_url: String,
    client: reqwest::Client,
}

impl PlaceSearchClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            map_token: config.map_token.clone(),
            search_base_url: config.search_base_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Place>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = build_search_url(&self.search_base_url, query)?;
        debug!("PlaceSearch: searching for {:?}", query);

        let response = self
            .client
            .get(url)
            .header(MAP_TOKEN_HEADER, &self.map_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        let body = response.text().await?;
        let places = parse_search_response(&body)?;

        debug!("PlaceSearch: {} results for {:?}", places.len(), query);
        Ok(places)
    }
}

fn build_search_url(base_url: &str, query: &str) -> Result<Url, ClientError> {
    Url::parse_with_params(base_url, &[("key", query)])
        .map_err(|err| ClientError::InvalidRequest(format!("{base_url}: {err}")))
}

fn parse_search_response(body: &str) -> Result<Vec<Place>, ClientError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.data)
}
