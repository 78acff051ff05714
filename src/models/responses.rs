use serde::{Deserialize, Serialize};
use crate::models::domain::{Attempt, UserPreferences};
use crate::services::CacheStats;

/// Response for the cuisine discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisinesResponse {
    pub cuisines: Vec<String>,
    pub attempts: Vec<Attempt>,
    #[serde(rename = "sampleTypes")]
    pub sample_types: Vec<TypeCount>,
    #[serde(rename = "usedRadius")]
    pub used_radius: u32,
}

/// How often a raw Google type was seen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub type_name: String,
    pub count: usize,
}

/// Slimmed Google place sent to the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlimPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub vicinity: Option<String>,
    pub price_level: Option<u8>,
    pub types: Vec<String>,
    pub photo_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

/// Response for the restaurant search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<SlimPlace>,
    #[serde(rename = "usedRadius")]
    pub used_radius: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<Vec<Attempt>>,
}

/// Yelp-style card built from a Google place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCard {
    pub name: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub location: CardLocation,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardLocation {
    pub address1: String,
}

/// Response for the places search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub businesses: Vec<BusinessCard>,
    pub warning: String,
    #[serde(rename = "usedRadius")]
    pub used_radius: u32,
}

/// Response for preference updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub success: bool,
    pub preferences: UserPreferences,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub google: bool,
    pub yelp: bool,
    pub cache: CacheStats,
    /// Users with stored wizard preferences
    #[serde(rename = "trackedUsers")]
    pub tracked_users: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
