use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::Coordinates;

/// Errors that can occur when geocoding a place name
#[derive(Debug, Error)]
pub enum GeocoderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Forward-geocoding client (OpenCage API shape).
///
/// Resolves a free-text place name to coordinates. Called only from the
/// profile and room write paths; the ranker itself never touches the
/// network and reads whatever coordinates were stored at write time.
pub struct GeocoderClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GeocoderClient {
    /// Create a new geocoder client
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Resolve a place name to a latitude/longitude pair.
    ///
    /// The first result wins; an empty result set maps to `NotFound`.
    pub async fn resolve(&self, place: &str) -> Result<Coordinates, GeocoderError> {
        let url = format!(
            "{}/geocode/v1/json?q={}&key={}&limit=1",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(place),
            self.api_key
        );

        tracing::debug!("Geocoding place: {}", place);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocoderError::ApiError(format!(
                "Failed to geocode place: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let results = json
            .get("results")
            .and_then(|r| r.as_array())
            .ok_or_else(|| GeocoderError::InvalidResponse("Missing results array".into()))?;

        let first = results
            .first()
            .ok_or_else(|| GeocoderError::NotFound(format!("No results for place {}", place)))?;

        let geometry = first
            .get("geometry")
            .ok_or_else(|| GeocoderError::InvalidResponse("Missing geometry".into()))?;

        let latitude = geometry
            .get("lat")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| GeocoderError::InvalidResponse("Missing geometry.lat".into()))?;
        let longitude = geometry
            .get("lng")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| GeocoderError::InvalidResponse("Missing geometry.lng".into()))?;

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_parses_first_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results":[{"geometry":{"lat":41.9981,"lng":21.4254}},{"geometry":{"lat":0.0,"lng":0.0}}]}"#,
            )
            .create_async()
            .await;

        let client = GeocoderClient::new(server.url(), "test_key".to_string());
        let coords = client.resolve("Skopje").await.unwrap();

        assert!((coords.latitude - 41.9981).abs() < 1e-9);
        assert!((coords.longitude - 21.4254).abs() < 1e-9);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_empty_results_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results":[]}"#)
            .create_async()
            .await;

        let client = GeocoderClient::new(server.url(), "test_key".to_string());
        let err = client.resolve("Nowhereville").await.unwrap_err();

        assert!(matches!(err, GeocoderError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_http_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let client = GeocoderClient::new(server.url(), "bad_key".to_string());
        let err = client.resolve("Skopje").await.unwrap_err();

        assert!(matches!(err, GeocoderError::ApiError(_)));
    }
}
