// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Attempt, Coordinates, Geometry, LatLng, MealType, Place, PlacePhoto, SearchArea, UserPreferences, YelpCategory};
pub use requests::{AcceptCuisinesRequest, CuisinesQuery, MealTypeRequest, NearbyCategoriesQuery, PhotoQuery, PlacesQuery, RejectCuisinesRequest, RestaurantsQuery, YelpSearchQuery};
pub use responses::{BusinessCard, CardLocation, CuisinesResponse, ErrorResponse, HealthResponse, PlacesResponse, PreferencesResponse, RestaurantsResponse, SlimPlace, TypeCount};
