use actix_web::{web, HttpResponse, Responder};
use crate::core::cuisine::parse_cuisine_list;
use crate::models::{Coordinates, NearbyCategoriesQuery, SearchArea, YelpCategory, YelpSearchQuery};
use crate::routes::{bad_request, yelp_failure, yelp_server_error, AppState};
use crate::services::{CacheKey, YelpSearch};

/// Configure Yelp-backed routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/yelp/businesses", web::get().to(search_businesses))
        .route("/yelp/categories", web::get().to(restaurant_categories))
        .route("/yelp/categories/nearby", web::get().to(nearby_categories));
}

/// Yelp business search
///
/// GET /api/v1/yelp/businesses?term=..&latitude=..&longitude=..&location=..&limit=..&accepted=..
///
/// Responds with the raw Yelp businesses of the first radius that returned any.
async fn search_businesses(
    state: web::Data<AppState>,
    query: web::Query<YelpSearchQuery>,
) -> impl Responder {
    let search = YelpSearch {
        term: query.term.clone().filter(|t| !t.trim().is_empty()),
        area: SearchArea::new(
            Coordinates::parse(query.latitude.as_deref(), query.longitude.as_deref()),
            state.location_or_default(query.location.as_deref()),
        ),
        limit: query.limit,
        accepted: parse_cuisine_list(&query.accepted),
    };

    match state.finder.search_yelp(&search).await {
        Ok(businesses) => HttpResponse::Ok().json(businesses),
        Err(e) => yelp_failure("Yelp API call failed", &e),
    }
}

/// Yelp categories that are restaurant cuisines
///
/// GET /api/v1/yelp/categories
async fn restaurant_categories(state: web::Data<AppState>) -> impl Responder {
    let cache_key = CacheKey::yelp_categories();
    if let Ok(cached) = state.cache.get::<Vec<YelpCategory>>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match state.finder.yelp_categories().await {
        Ok(categories) => {
            if let Err(e) = state.cache.set(&cache_key, &categories).await {
                tracing::warn!("Failed to cache Yelp categories: {}", e);
            }
            HttpResponse::Ok().json(categories)
        }
        Err(e) => yelp_server_error("Failed to fetch Yelp categories", &e),
    }
}

/// Cuisine categories among Yelp restaurants near a point
///
/// GET /api/v1/yelp/categories/nearby?latitude=..&longitude=..
async fn nearby_categories(
    state: web::Data<AppState>,
    query: web::Query<NearbyCategoriesQuery>,
) -> impl Responder {
    let Some(coords) = Coordinates::parse(query.latitude.as_deref(), query.longitude.as_deref()) else {
        return bad_request("Missing latitude or longitude", "latitude and longitude query parameters are required");
    };

    match state.finder.yelp_categories_near(coords).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => yelp_server_error("Failed to fetch location-based categories", &e),
    }
}
