// Route exports
pub mod preferences;
pub mod search;
pub mod yelp;

use crate::config::Settings;
use crate::models::ErrorResponse;
use crate::services::{GoogleError, GooglePlacesClient, PreferenceStore, ResponseCache, RestaurantFinder, YelpClient, YelpError};
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<RestaurantFinder>,
    pub cache: Arc<ResponseCache>,
    pub preferences: Arc<PreferenceStore>,
    pub default_location: String,
}

impl AppState {
    /// Build clients, cache and stores from configuration
    pub fn from_settings(settings: &Settings) -> Self {
        let google = Arc::new(GooglePlacesClient::new(
            settings.google.base_url.clone(),
            settings.google.api_key.clone(),
            settings.google.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ));

        let yelp = Arc::new(YelpClient::new(
            settings.yelp.base_url.clone(),
            settings.yelp.api_key.clone(),
            settings.yelp.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ));

        let cache = ResponseCache::new(
            settings.cache.capacity.unwrap_or(1000),
            settings.cache.ttl_secs.unwrap_or(60),
        );

        Self {
            finder: Arc::new(RestaurantFinder::new(google, yelp, settings.search.clone())),
            cache: Arc::new(cache),
            preferences: Arc::new(PreferenceStore::new()),
            default_location: settings.search.default_location.clone(),
        }
    }

    /// Requested location, or the configured default
    pub fn location_or_default(&self, location: Option<&str>) -> String {
        location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.default_location)
            .to_string()
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(search::configure)
            .configure(yelp::configure)
            .configure(preferences::configure),
    );
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

/// 500 for a failed Google-backed handler
pub(crate) fn google_failure(context: &str, err: &GoogleError) -> HttpResponse {
    match err {
        GoogleError::MissingApiKey => {
            tracing::error!("{}: Google API key is not configured", context);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Missing GOOGLE_MAPS_API_KEY",
                "Google Places API key is not configured",
                500,
            ))
        }
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(context, other.to_string(), 500))
        }
    }
}

/// Error for a failed Yelp business search; upstream statuses are forwarded
pub(crate) fn yelp_failure(context: &str, err: &YelpError) -> HttpResponse {
    yelp_error_response(context, err, true)
}

/// 500 for a failed Yelp categories handler, whatever Yelp answered
pub(crate) fn yelp_server_error(context: &str, err: &YelpError) -> HttpResponse {
    yelp_error_response(context, err, false)
}

fn yelp_error_response(context: &str, err: &YelpError, forward_status: bool) -> HttpResponse {
    match err {
        YelpError::MissingApiKey => {
            tracing::error!("{}: Yelp API key is not configured", context);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Missing Yelp API Key",
                "Yelp API key is not configured",
                500,
            ))
        }
        YelpError::ApiError { status, details } => {
            tracing::error!("{}: Yelp returned {} {}", context, status, details);
            let status = if forward_status {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            HttpResponse::build(status).json(serde_json::json!({
                "error": context,
                "details": details,
            }))
        }
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": context,
                "details": { "message": other.to_string() },
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_or_default() {
        let settings: Settings = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let state = AppState::from_settings(&settings);

        assert_eq!(state.location_or_default(None), "New York");
        assert_eq!(state.location_or_default(Some("  ")), "New York");
        assert_eq!(state.location_or_default(Some("Austin")), "Austin");
    }

    #[test]
    fn test_yelp_failure_forwards_status() {
        let err = YelpError::ApiError {
            status: 429,
            details: serde_json::json!({ "error": { "code": "TOO_MANY_REQUESTS_PER_SECOND" } }),
        };

        let response = yelp_failure("Yelp API call failed", &err);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_yelp_server_error_hides_status() {
        let err = YelpError::ApiError {
            status: 401,
            details: serde_json::json!({ "error": { "code": "TOKEN_INVALID" } }),
        };

        let response = yelp_server_error("Failed to fetch Yelp categories", &err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
