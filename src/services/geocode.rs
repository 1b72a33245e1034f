use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::Coordinates;

/// Errors that can occur when talking to the geocoding service
///
/// The catalog treats every variant as a soft failure during job
/// creation: the job is stored without coordinates.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoding service returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Forward/reverse geocoding capability
///
/// `Ok(None)` means the address or point resolved to nothing, which is
/// not an error condition for callers.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    async fn forward(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError>;
    async fn reverse(&self, point: &Coordinates) -> Result<Option<String>, GeocodeError>;
}

impl<G: Geocoder> Geocoder for std::sync::Arc<G> {
    async fn forward(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        (**self).forward(address).await
    }

    async fn reverse(&self, point: &Coordinates) -> Result<Option<String>, GeocodeError> {
        (**self).reverse(point).await
    }
}

/// OpenStreetMap Nominatim client
///
/// Handles the two lookups the marketplace needs:
/// - forward geocoding a job's address into coordinates at creation time
/// - reverse geocoding a picked map point into display text
///
/// Lookups are timeout-bounded so a degraded service can never stall job
/// creation, and forward results are memoized in a small in-process cache
/// keyed by the normalized address text.
pub struct NominatimClient {
    base_url: String,
    client: Client,
    forward_cache: moka::future::Cache<String, Option<Coordinates>>,
}

impl NominatimClient {
    /// Create a new client against the given Nominatim endpoint
    pub fn new(
        base_url: String,
        user_agent: String,
        timeout_secs: u64,
        cache_size: u64,
        cache_ttl_secs: u64,
    ) -> Result<Self, GeocodeError> {
        // Nominatim's usage policy requires an identifying User-Agent
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;

        let forward_cache = moka::future::CacheBuilder::new(cache_size)
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .build();

        Ok(Self {
            base_url,
            client,
            forward_cache,
        })
    }

    fn normalize(address: &str) -> String {
        address.trim().to_lowercase()
    }

    async fn forward_uncached(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let url = format!(
            "{}/search?format=json&q={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(address)
        );

        tracing::debug!("Forward geocoding: {}", address);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Forward geocode failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let candidates = json
            .as_array()
            .ok_or_else(|| GeocodeError::InvalidResponse("Expected result array".into()))?;

        // Ambiguous addresses return several candidates; take the first
        // (best) one and do not attempt disambiguation
        let Some(first) = candidates.first() else {
            return Ok(None);
        };

        let point = parse_candidate(first)?;
        Ok(Some(point))
    }
}

/// Nominatim returns lat/lon as JSON strings
fn parse_candidate(candidate: &Value) -> Result<Coordinates, GeocodeError> {
    let lat = candidate
        .get("lat")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::InvalidResponse("Missing or malformed lat".into()))?;
    let lng = candidate
        .get("lon")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::InvalidResponse("Missing or malformed lon".into()))?;

    let point = Coordinates::new(lat, lng);
    if !point.is_valid() {
        return Err(GeocodeError::InvalidResponse(format!(
            "Coordinates out of range: {}, {}",
            lat, lng
        )));
    }

    Ok(point)
}

impl Geocoder for NominatimClient {
    async fn forward(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let key = Self::normalize(address);

        if let Some(cached) = self.forward_cache.get(&key).await {
            tracing::trace!("Geocode cache hit: {}", key);
            return Ok(cached);
        }

        let resolved = self.forward_uncached(address).await?;

        // Misses are cached too so repeated bad addresses stay cheap
        self.forward_cache.insert(key, resolved).await;

        Ok(resolved)
    }

    async fn reverse(&self, point: &Coordinates) -> Result<Option<String>, GeocodeError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url.trim_end_matches('/'),
            point.lat,
            point.lng
        );

        tracing::debug!("Reverse geocoding: {}, {}", point.lat, point.lng);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Reverse geocode failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        Ok(json
            .get("display_name")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: String) -> NominatimClient {
        NominatimClient::new(base_url, "gigmatch-test/0.1".to_string(), 5, 100, 60)
            .expect("Failed to create client")
    }

    #[test]
    fn test_parse_candidate_string_coordinates() {
        let candidate = serde_json::json!({
            "lat": "51.5074",
            "lon": "-0.1278",
            "display_name": "London, Greater London, England"
        });

        let point = parse_candidate(&candidate).unwrap();
        assert_eq!(point.lat, 51.5074);
        assert_eq!(point.lng, -0.1278);
    }

    #[test]
    fn test_parse_candidate_rejects_out_of_range() {
        let candidate = serde_json::json!({"lat": "120.0", "lon": "0.0"});
        assert!(parse_candidate(&candidate).is_err());
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            NominatimClient::normalize("  10 Downing Street, London "),
            "10 downing street, london"
        );
    }

    #[tokio::test]
    async fn test_forward_takes_first_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"lat": "51.5074", "lon": "-0.1278"}, {"lat": "40.0", "lon": "-74.0"}]"#,
            )
            .create_async()
            .await;

        let client = test_client(server.url());
        let point = client.forward("London").await.unwrap().unwrap();

        assert_eq!(point.lat, 51.5074);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_forward_empty_result_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(server.url());
        let result = client.forward("Unresolvable Address").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_forward_caches_lookups() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"lat": "51.5074", "lon": "-0.1278"}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(server.url());
        client.forward("London").await.unwrap();
        // Different surface form, same normalized key
        client.forward("  LONDON ").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reverse_extracts_display_name() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"display_name": "Westminster, London, England"}"#)
            .create_async()
            .await;

        let client = test_client(server.url());
        let address = client
            .reverse(&Coordinates::new(51.5, -0.12))
            .await
            .unwrap();
        assert_eq!(address.as_deref(), Some("Westminster, London, England"));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = test_client(server.url());
        let result = client.forward("London").await;
        assert!(matches!(result, Err(GeocodeError::ApiError(_))));
    }
}
