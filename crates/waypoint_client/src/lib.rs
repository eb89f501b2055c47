pub mod config;
pub mod error;
pub mod route_client;
pub mod search_client;

pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use route_client::{RouteClient, RouteClientParams};
pub use search_client::PlaceSearchClient;
