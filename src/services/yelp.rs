use crate::models::{Coordinates, YelpCategory};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const SEARCH_PATH: &str = "/v3/businesses/search";
const CATEGORIES_PATH: &str = "/v3/categories";

/// Errors that can occur when talking to Yelp Fusion
#[derive(Debug, Error)]
pub enum YelpError {
    #[error("Missing Yelp API Key")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Yelp API returned {status}")]
    ApiError { status: u16, details: Value },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Parameters for a Yelp business search
#[derive(Debug, Clone, PartialEq)]
pub struct YelpSearchParams {
    pub term: String,
    pub coordinates: Option<Coordinates>,
    pub location: String,
    pub limit: u32,
    /// Comma-joined category aliases
    pub categories: Option<String>,
    pub radius: Option<u32>,
    pub sort_by_distance: bool,
}

impl YelpSearchParams {
    pub fn with_radius(&self, radius: u32) -> Self {
        Self {
            radius: Some(radius),
            ..self.clone()
        }
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("term", self.term.clone()),
            ("limit", self.limit.to_string()),
        ];

        if self.sort_by_distance {
            query.push(("sort_by", "distance".to_string()));
        }

        match &self.coordinates {
            Some(coords) => {
                query.push(("latitude", coords.latitude.to_string()));
                query.push(("longitude", coords.longitude.to_string()));
            }
            None => query.push(("location", self.location.clone())),
        }

        if let Some(categories) = self.categories.as_ref().filter(|c| !c.is_empty()) {
            query.push(("categories", categories.clone()));
        }
        if let Some(radius) = self.radius {
            query.push(("radius", radius.to_string()));
        }

        query
    }
}

/// Yelp Fusion API client
pub struct YelpClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl YelpClient {
    /// Create a new Yelp client
    pub fn new(base_url: String, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
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

    fn key(&self) -> Result<&str, YelpError> {
        self.api_key.as_deref().ok_or(YelpError::MissingApiKey)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, YelpError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.key()?)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Yelp request to {} failed: {} - {}", path, status, body);

            let details = serde_json::from_str::<Value>(&body)
                .ok()
                .filter(Value::is_object)
                .unwrap_or_else(|| json!({ "message": body }));

            return Err(YelpError::ApiError {
                status: status.as_u16(),
                details,
            });
        }

        response
            .json()
            .await
            .map_err(|e| YelpError::InvalidResponse(format!("Failed to parse Yelp response: {}", e)))
    }

    /// Business search, returning the raw `businesses` array
    pub async fn search(&self, params: &YelpSearchParams) -> Result<Vec<Value>, YelpError> {
        let json = self.get_json(SEARCH_PATH, &params.to_query()).await?;

        let businesses = match json.get("businesses") {
            Some(Value::Array(items)) => items.clone(),
            Some(_) => {
                return Err(YelpError::InvalidResponse("businesses is not an array".into()));
            }
            None => Vec::new(),
        };

        tracing::debug!(
            "Yelp search r={:?} returned {} businesses",
            params.radius,
            businesses.len()
        );

        Ok(businesses)
    }

    /// Every category Yelp knows about
    pub async fn categories(&self) -> Result<Vec<YelpCategory>, YelpError> {
        let json = self.get_json(CATEGORIES_PATH, &[]).await?;

        let categories = json
            .get("categories")
            .cloned()
            .ok_or_else(|| YelpError::InvalidResponse("Missing categories array".into()))?;

        serde_json::from_value(categories)
            .map_err(|e| YelpError::InvalidResponse(format!("Failed to parse categories: {}", e)))
    }
}
