//! Cuisine Scout - restaurant discovery over Google Places and Yelp
//!
//! This library backs a small wizard (pick a meal type, accept or reject
//! cuisines, browse suggestions). It infers cuisine labels from upstream
//! place data and widens searches through fixed radius ladders until enough
//! results turn up.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{extract_cuisines, haversine_distance, RadiusLadder};
pub use models::{Attempt, Coordinates, CuisinesResponse, Place, PlacesResponse, RestaurantsResponse, SearchArea, UserPreferences};
pub use services::{GooglePlacesClient, PreferenceStore, RestaurantFinder, RestaurantSearch, YelpClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let ladder = RadiusLadder::restaurants(None, None);
        assert_eq!(ladder.first(), 8_000);
        assert!(extract_cuisines(&[]).is_empty());
    }
}
