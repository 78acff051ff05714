// Service exports
pub mod cache;
pub mod finder;
pub mod google;
pub mod preferences;
pub mod yelp;

pub use cache::{CacheError, CacheKey, CacheStats, ResponseCache};
pub use finder::{RestaurantFinder, RestaurantSearch, YelpSearch};
pub use google::{DetailsPhoto, GoogleError, GooglePlacesClient, PhotoResponse, SearchResponse};
pub use preferences::PreferenceStore;
pub use yelp::{YelpClient, YelpError, YelpSearchParams};
