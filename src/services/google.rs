use crate::models::{Coordinates, Place};
use reqwest::{redirect, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";
const TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";
const DETAILS_PATH: &str = "/maps/api/place/details/json";
const PHOTO_PATH: &str = "/maps/api/place/photo";

/// Status recorded when the upstream could not be reached or parsed
pub const FETCH_ERROR_STATUS: &str = "FETCH_ERROR";

/// Errors that can occur when talking to Google Places
#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Missing GOOGLE_MAPS_API_KEY")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Body of a Nearby Search or Text Search response
///
/// Google reports failures such as `REQUEST_DENIED` or `ZERO_RESULTS` in
/// `status` with an HTTP 200, so those are data here, not errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<Place>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl SearchResponse {
    pub fn fetch_error(message: impl Into<String>) -> Self {
        Self {
            status: FETCH_ERROR_STATUS.to_string(),
            results: Vec::new(),
            error_message: Some(message.into()),
            next_page_token: None,
        }
    }
}

/// First photo found through Place Details
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsPhoto {
    pub status: String,
    pub photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result: Option<Place>,
}

/// What the Place Photo endpoint handed back
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoResponse {
    /// Google answered with a redirect to the image host
    Redirect(String),
    Image { content_type: String, bytes: Vec<u8> },
}

/// Google Places API client
///
/// Covers the four endpoints the service proxies:
/// - Nearby Search
/// - Text Search
/// - Place Details (photo field only)
/// - Place Photo
pub struct GooglePlacesClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl GooglePlacesClient {
    /// Create a new Google Places client
    ///
    /// Redirects are not followed so the photo proxy can hand Google's image
    /// location straight to the browser.
    pub fn new(base_url: String, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn ensure_configured(&self) -> Result<(), GoogleError> {
        self.key().map(|_| ())
    }

    fn key(&self) -> Result<&str, GoogleError> {
        self.api_key.as_deref().ok_or(GoogleError::MissingApiKey)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Nearby Search for restaurants around `coords`
    pub async fn nearby_search(
        &self,
        coords: &Coordinates,
        radius: u32,
        keyword: Option<&str>,
    ) -> Result<SearchResponse, GoogleError> {
        let mut params = vec![
            ("key", self.key()?.to_string()),
            ("location", coords.as_query_value()),
            ("radius", radius.to_string()),
            ("type", "restaurant".to_string()),
        ];
        if let Some(keyword) = keyword {
            params.push(("keyword", keyword.to_string()));
        }

        tracing::debug!("Nearby search at {} r={} keyword={:?}", coords.as_query_value(), radius, keyword);

        self.search(NEARBY_SEARCH_PATH, &params).await
    }

    /// Text Search for restaurants matching a free-form query
    pub async fn text_search(&self, query: &str) -> Result<SearchResponse, GoogleError> {
        let params = vec![
            ("key", self.key()?.to_string()),
            ("query", query.to_string()),
            ("type", "restaurant".to_string()),
        ];

        tracing::debug!("Text search: {}", query);

        self.search(TEXT_SEARCH_PATH, &params).await
    }

    async fn search(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<SearchResponse, GoogleError> {
        let response = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GoogleError::ApiError(format!(
                "Places search failed: {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| GoogleError::InvalidResponse(format!("Failed to parse search response: {}", e)))?;

        if body.status != "OK" && body.status != "ZERO_RESULTS" {
            tracing::warn!(
                "Places search returned status {} ({})",
                body.status,
                body.error_message.as_deref().unwrap_or("no message")
            );
        }

        Ok(body)
    }

    /// Nearby Search that never fails: transport errors become `FETCH_ERROR`
    pub async fn nearby_search_safe(
        &self,
        coords: &Coordinates,
        radius: u32,
        keyword: Option<&str>,
    ) -> SearchResponse {
        self.nearby_search(coords, radius, keyword)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Nearby search failed: {}", e);
                SearchResponse::fetch_error(e.to_string())
            })
    }

    /// Text Search that never fails: transport errors become `FETCH_ERROR`
    pub async fn text_search_safe(&self, query: &str) -> SearchResponse {
        self.text_search(query).await.unwrap_or_else(|e| {
            tracing::warn!("Text search failed: {}", e);
            SearchResponse::fetch_error(e.to_string())
        })
    }

    /// Look up the first photo of a place through Place Details
    ///
    /// Never fails; an unreachable upstream reports `FETCH_ERROR` and no photo.
    pub async fn details_photo(&self, place_id: &str) -> DetailsPhoto {
        match self.fetch_details_photo(place_id).await {
            Ok(photo) => photo,
            Err(e) => {
                tracing::warn!("Details lookup for {} failed: {}", place_id, e);
                DetailsPhoto {
                    status: FETCH_ERROR_STATUS.to_string(),
                    photo_reference: None,
                }
            }
        }
    }

    async fn fetch_details_photo(&self, place_id: &str) -> Result<DetailsPhoto, GoogleError> {
        let params = [
            ("key", self.key()?),
            ("place_id", place_id),
            ("fields", "photo"),
        ];

        let response = self
            .client
            .get(self.url(DETAILS_PATH))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GoogleError::ApiError(format!(
                "Place details failed: {}",
                response.status()
            )));
        }

        let body: DetailsResponse = response
            .json()
            .await
            .map_err(|e| GoogleError::InvalidResponse(format!("Failed to parse details: {}", e)))?;

        let photo_reference = body
            .result
            .as_ref()
            .and_then(|place| place.photo_reference())
            .map(str::to_string);

        Ok(DetailsPhoto {
            status: body.status.unwrap_or_else(|| "UNKNOWN".to_string()),
            photo_reference,
        })
    }

    /// Fetch a place photo
    pub async fn photo(&self, reference: &str, maxwidth: u32) -> Result<PhotoResponse, GoogleError> {
        let params = [
            ("key", self.key()?.to_string()),
            ("photoreference", reference.to_string()),
            ("maxwidth", maxwidth.to_string()),
        ];

        let response = self
            .client
            .get(self.url(PHOTO_PATH))
            .query(&params)
            .send()
            .await?;

        let status = response.status();

        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| GoogleError::InvalidResponse("Photo redirect without Location".into()))?;
            return Ok(PhotoResponse::Redirect(location.to_string()));
        }

        if status != StatusCode::OK {
            return Err(GoogleError::ApiError(format!("Photo fetch failed: {}", status)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let bytes = response.bytes().await?.to_vec();

        Ok(PhotoResponse::Image { content_type, bytes })
    }
}
