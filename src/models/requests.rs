use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for `GET /cuisines`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuisinesQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location: Option<String>,
    pub radius: Option<u32>,
}

/// Query for `GET /restaurants`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantsQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location: Option<String>,
    /// Comma-separated cuisine keywords
    #[serde(default)]
    pub accepted: String,
    /// Comma-separated cuisine keywords to drop
    #[serde(default)]
    pub rejected: String,
    pub limit: Option<usize>,
    pub radius: Option<u32>,
    #[serde(rename = "maxRadius")]
    pub max_radius: Option<u32>,
    #[serde(default)]
    pub debug: Option<String>,
    pub mode: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl RestaurantsQuery {
    pub fn debug_enabled(&self) -> bool {
        matches!(self.debug.as_deref(), Some("1") | Some("true"))
    }
}

/// Query for `GET /places`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacesQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location: Option<String>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub accepted: String,
}

/// Query for `GET /photo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoQuery {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub maxwidth: Option<u32>,
}

/// Query for `GET /yelp/businesses`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YelpSearchQuery {
    pub term: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub location: Option<String>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub accepted: String,
}

/// Query for `GET /yelp/categories/nearby`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyCategoriesQuery {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Request to reject cuisines
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectCuisinesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    #[serde(alias = "rejected_cuisines", rename = "rejectedCuisines")]
    pub rejected_cuisines: Vec<String>,
}

/// Request to accept cuisines
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AcceptCuisinesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    #[serde(alias = "accepted_cuisines", rename = "acceptedCuisines")]
    pub accepted_cuisines: Vec<String>,
}

/// Request to record the meal type chosen in the first wizard step
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MealTypeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(alias = "meal_type", rename = "mealType")]
    pub meal_type: String,
}
