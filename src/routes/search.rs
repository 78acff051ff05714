use actix_web::{http::header, web, HttpResponse, Responder};
use crate::core::cuisine::parse_cuisine_list;
use crate::models::{
    Coordinates, CuisinesQuery, CuisinesResponse, HealthResponse, MealType, PhotoQuery,
    PlacesQuery, PlacesResponse, RestaurantsQuery, RestaurantsResponse, SearchArea,
};
use crate::routes::{bad_request, google_failure, AppState};
use crate::services::{CacheKey, PhotoResponse, RestaurantSearch};

const DEFAULT_PHOTO_WIDTH: u32 = 600;

/// Configure search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/cuisines", web::get().to(discover_cuisines))
        .route("/restaurants", web::get().to(search_restaurants))
        .route("/places", web::get().to(search_places))
        .route("/photo", web::get().to(place_photo));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let google = state.finder.google().is_configured();
    let yelp = state.finder.yelp().is_configured();

    let status = if google { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        google,
        yelp,
        cache: state.cache.stats(),
        tracked_users: state.preferences.len().await,
    })
}

/// Cuisine discovery endpoint
///
/// GET /api/v1/cuisines?latitude=..&longitude=..&location=..&radius=..
async fn discover_cuisines(
    state: web::Data<AppState>,
    query: web::Query<CuisinesQuery>,
) -> impl Responder {
    let cache_key = CacheKey::cuisines(&*query);
    if let Ok(cached) = state.cache.get::<CuisinesResponse>(&cache_key).await {
        return cached_json(&state, &cached);
    }

    let area = SearchArea::new(
        Coordinates::parse(query.latitude.as_deref(), query.longitude.as_deref()),
        state.location_or_default(query.location.as_deref()),
    );

    tracing::info!("Discovering cuisines near {:?} ({})", area.coordinates, area.location);

    match state.finder.discover_cuisines(&area, query.radius).await {
        Ok(payload) => {
            if let Err(e) = state.cache.set(&cache_key, &payload).await {
                tracing::warn!("Failed to cache cuisines: {}", e);
            }
            cached_json(&state, &payload)
        }
        Err(e) => google_failure("Failed to discover cuisines", &e),
    }
}

/// Restaurant search endpoint
///
/// GET /api/v1/restaurants
///
/// Query parameters: `latitude`, `longitude`, `location`, `accepted`,
/// `rejected`, `limit`, `radius`, `maxRadius`, `debug`, `mode`, `userId`.
/// When `userId` is given the user's stored wizard choices are merged in.
async fn search_restaurants(
    state: web::Data<AppState>,
    query: web::Query<RestaurantsQuery>,
) -> impl Responder {
    let mode = match query.mode.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(raw) => match raw.parse::<MealType>() {
            Ok(mode) => Some(mode),
            Err(e) => return bad_request("Invalid mode", e),
        },
        None => None,
    };

    let personalised = query.user_id.as_deref().is_some_and(|u| !u.is_empty());
    let cache_key = CacheKey::restaurants(&*query);
    let use_cache = !personalised && !query.debug_enabled();

    if use_cache {
        if let Ok(cached) = state.cache.get::<RestaurantsResponse>(&cache_key).await {
            return cached_json(&state, &cached);
        }
    }

    let area = SearchArea::new(
        Coordinates::parse(query.latitude.as_deref(), query.longitude.as_deref()),
        state.location_or_default(query.location.as_deref()),
    );

    let mut search = RestaurantSearch::new(area);
    search.accepted = parse_cuisine_list(&query.accepted);
    search.rejected = parse_cuisine_list(&query.rejected);
    search.limit = query.limit;
    search.radius = query.radius;
    search.max_radius = query.max_radius;
    search.meal_type = mode;
    search.debug = query.debug_enabled();

    if let Some(user_id) = query.user_id.as_deref().filter(|u| !u.is_empty()) {
        let prefs = state.preferences.get(user_id).await;
        merge_keywords(&mut search.accepted, &prefs.accepted_cuisines);
        merge_keywords(&mut search.rejected, &prefs.rejected_cuisines);
        search.meal_type = search.meal_type.or(prefs.meal_type);
    }

    tracing::info!(
        "Searching restaurants: accepted={:?} rejected={:?} location={}",
        search.accepted,
        search.rejected,
        search.area.location
    );

    match state.finder.search_restaurants(&search).await {
        Ok(payload) => {
            if use_cache {
                if let Err(e) = state.cache.set(&cache_key, &payload).await {
                    tracing::warn!("Failed to cache restaurants: {}", e);
                }
            }
            cached_json(&state, &payload)
        }
        Err(e) => google_failure("Failed to search restaurants", &e),
    }
}

/// Places search endpoint
///
/// GET /api/v1/places?latitude=..&longitude=..&location=..&limit=..&accepted=..
async fn search_places(
    state: web::Data<AppState>,
    query: web::Query<PlacesQuery>,
) -> impl Responder {
    let cache_key = CacheKey::places(&*query);
    if let Ok(cached) = state.cache.get::<PlacesResponse>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    let area = SearchArea::new(
        Coordinates::parse(query.latitude.as_deref(), query.longitude.as_deref()),
        state.location_or_default(query.location.as_deref()),
    );
    let accepted = parse_cuisine_list(&query.accepted);

    match state.finder.search_places(&area, &accepted, query.limit).await {
        Ok(payload) => {
            if let Err(e) = state.cache.set(&cache_key, &payload).await {
                tracing::warn!("Failed to cache places: {}", e);
            }
            HttpResponse::Ok().json(payload)
        }
        Err(e) => google_failure("Failed to fetch places", &e),
    }
}

/// Photo proxy endpoint
///
/// GET /api/v1/photo?ref=..&maxwidth=..
///
/// Google answers with a redirect to the image host, which is passed on to
/// the browser; image bodies are streamed through as-is.
async fn place_photo(
    state: web::Data<AppState>,
    query: web::Query<PhotoQuery>,
) -> impl Responder {
    let Some(reference) = query.reference.as_deref().filter(|r| !r.is_empty()) else {
        return bad_request("Missing photo reference", "ref query parameter is required");
    };
    let maxwidth = query.maxwidth.filter(|w| *w > 0).unwrap_or(DEFAULT_PHOTO_WIDTH);

    match state.finder.google().photo(reference, maxwidth).await {
        Ok(PhotoResponse::Redirect(location)) => HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish(),
        Ok(PhotoResponse::Image { content_type, bytes }) => HttpResponse::Ok()
            .content_type(content_type)
            .body(bytes),
        Err(e) => google_failure("Failed to fetch photo", &e),
    }
}

fn cached_json<T: serde::Serialize>(state: &AppState, payload: &T) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, state.cache.cache_control()))
        .json(payload)
}

/// Add stored cuisines to the request's keywords, lowercased and without repeats
fn merge_keywords(target: &mut Vec<String>, stored: &[String]) {
    for cuisine in stored {
        let keyword = cuisine.trim().to_lowercase();
        if !keyword.is_empty() && !target.contains(&keyword) {
            target.push(keyword);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorResponse;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
            google: true,
            yelp: false,
            cache: crate::services::CacheStats { entries: 0, ttl_secs: 60 },
            tracked_users: 0,
        };

        assert_eq!(response.status, "healthy");
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["trackedUsers"], 0);
        assert_eq!(body["cache"]["ttl_secs"], 60);
    }

    #[test]
    fn test_merge_keywords() {
        let mut target = vec!["thai".to_string()];
        merge_keywords(&mut target, &["Thai".to_string(), " Korean ".to_string(), "".to_string()]);
        assert_eq!(target, vec!["thai", "korean"]);
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Missing photo reference", "ref is required", 400)).unwrap();
        assert_eq!(body["status_code"], 400);
        assert_eq!(body["error"], "Missing photo reference");
    }
}
