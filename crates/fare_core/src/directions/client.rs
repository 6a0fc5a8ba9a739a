use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::error::DirectionsError;
use super::parser::parse_directions_response;
use super::response::DirectionsResponse;
use super::{DirectionsProvider, RouteLeg};
use crate::geo::Coordinate;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default Google-style directions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Environment variable supplying the directions API key.
pub const API_KEY_ENV: &str = "DIRECTIONS_API_KEY";

/// Thin HTTP client for a Google-style directions endpoint.
#[derive(Debug, Clone)]
pub struct HttpDirectionsProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpDirectionsProvider {
    /// Create a client for the given endpoint and API key.
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build directions client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create a client reading the API key from [`API_KEY_ENV`].
    pub fn from_env_key(endpoint: &str) -> Result<Self, DirectionsError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| DirectionsError::Config(format!("{} is not set", API_KEY_ENV)))?;
        Ok(Self::new(endpoint, &api_key))
    }

    /// Create a client against [`DEFAULT_ENDPOINT`] with the key from the
    /// environment.
    pub fn from_env() -> Result<Self, DirectionsError> {
        Self::from_env_key(DEFAULT_ENDPOINT)
    }

    fn request_url(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Url, DirectionsError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|err| DirectionsError::Config(format!("invalid endpoint: {}", err)))?;
        url.query_pairs_mut()
            .append_pair(
                "origin",
                &format!("{},{}", origin.latitude, origin.longitude),
            )
            .append_pair(
                "destination",
                &format!("{},{}", destination.latitude, destination.longitude),
            )
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl DirectionsProvider for HttpDirectionsProvider {
    async fn route_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteLeg, DirectionsError> {
        let url = self.request_url(origin, destination)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(DirectionsError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectionsError::Status(status.as_u16()));
        }

        let parsed: DirectionsResponse = response.json().await.map_err(DirectionsError::Json)?;
        parse_directions_response(parsed)
    }
}
