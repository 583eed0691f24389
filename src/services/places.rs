use crate::models::RawCandidate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default Google Places web service root
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Errors that can occur when talking to the Places API
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiError { status: String, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// One Nearby Search call
///
/// A continuation request must carry only the page token, so the two shapes
/// are separate variants rather than optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum NearbySearchRequest {
    Initial {
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        place_type: String,
        open_now: bool,
    },
    Continuation {
        page_token: String,
    },
}

/// One page of Nearby Search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyPage {
    pub candidates: Vec<RawCandidate>,
    /// `None` once the listing is exhausted
    pub next_page_token: Option<String>,
}

/// The slice of the Places API the service depends on
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<NearbyPage, PlacesError>;

    /// Canonical Google Maps URL for a place
    async fn place_url(&self, place_id: &str) -> Result<String, PlacesError>;
}

#[derive(Debug, Deserialize)]
struct NearbySearchBody {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsBody {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    url: Option<String>,
}

/// Statuses that mean the call itself succeeded
fn is_ok_status(status: &str) -> bool {
    matches!(status, "OK" | "ZERO_RESULTS")
}

/// Google Places web service client
pub struct PlacesClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl PlacesClient {
    /// Create a new Places client
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Errors are stripped of the request URL, which carries the API key
    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, PlacesError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| e.without_url())?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError {
                status: response.status().to_string(),
                message: format!("HTTP error from {}", path),
            });
        }

        let json: Value = response.json().await.map_err(|e| e.without_url())?;

        serde_json::from_value(json)
            .map_err(|e| PlacesError::InvalidResponse(format!("Failed to parse {}: {}", path, e)))
    }
}

#[async_trait]
impl PlacesApi for PlacesClient {
    async fn nearby_search(&self, request: &NearbySearchRequest) -> Result<NearbyPage, PlacesError> {
        let params: Vec<(&str, String)> = match request {
            NearbySearchRequest::Initial {
                latitude,
                longitude,
                radius_meters,
                place_type,
                open_now,
            } => vec![
                ("location", format!("{},{}", latitude, longitude)),
                ("radius", radius_meters.to_string()),
                ("type", place_type.clone()),
                ("opennow", open_now.to_string()),
            ],
            NearbySearchRequest::Continuation { page_token } => {
                vec![("pagetoken", page_token.clone())]
            }
        };

        let body: NearbySearchBody = self.get_json("nearbysearch/json", &params).await?;

        if !is_ok_status(&body.status) {
            return Err(PlacesError::ApiError {
                message: body.error_message.unwrap_or_default(),
                status: body.status,
            });
        }

        let returned = body.results.len();
        let candidates: Vec<RawCandidate> = body
            .results
            .into_iter()
            .filter_map(|result| serde_json::from_value(result).ok())
            .collect();

        if candidates.len() < returned {
            tracing::debug!(
                "Dropped {} unparseable places from nearby search page",
                returned - candidates.len()
            );
        }

        Ok(NearbyPage {
            candidates,
            next_page_token: body.next_page_token.filter(|token| !token.is_empty()),
        })
    }

    async fn place_url(&self, place_id: &str) -> Result<String, PlacesError> {
        tracing::debug!("Fetching url for place: {}", place_id);

        let params = [("place_id", place_id.to_string()), ("fields", "url".to_string())];
        let body: DetailsBody = self.get_json("details/json", &params).await?;

        if !is_ok_status(&body.status) {
            return Err(PlacesError::ApiError {
                message: body.error_message.unwrap_or_default(),
                status: body.status,
            });
        }

        body.result
            .and_then(|result| result.url)
            .ok_or_else(|| PlacesError::InvalidResponse(format!("No url for place {}", place_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_places_client_creation() {
        let client = PlacesClient::new(
            "https://places.test/api/".to_string(),
            "test_key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(client.base_url, "https://places.test/api");
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_ok_statuses() {
        assert!(is_ok_status("OK"));
        assert!(is_ok_status("ZERO_RESULTS"));
        assert!(!is_ok_status("INVALID_REQUEST"));
        assert!(!is_ok_status("OVER_QUERY_LIMIT"));
    }
}
