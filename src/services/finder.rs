//! Progressive search over the upstream APIs.
//!
//! Every search walks a radius ladder, widening until the results clear a
//! threshold (enough cuisine labels, enough restaurants, or anything at all)
//! and recording each upstream call in an attempts log.

use crate::config::SearchSettings;
use crate::core::{
    cuisine::{dedupe_categories, extract_cuisines, is_restaurant, matches_accepted, matches_rejected, restaurant_categories, top_types},
    ladder::RadiusLadder,
    slim::{business_cards, merge_places, prefer_takeout, slim_place},
};
use crate::models::{
    Attempt, Coordinates, CuisinesResponse, MealType, Place, PlacesResponse, RestaurantsResponse,
    SearchArea, YelpCategory,
};
use crate::services::google::{GoogleError, GooglePlacesClient, SearchResponse};
use crate::services::yelp::{YelpClient, YelpError, YelpSearchParams};
use futures::future::try_join_all;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// How many raw types the cuisine payload samples for debugging
const SAMPLE_TYPES: usize = 30;

/// Radius reported by cuisine discovery when the caller gave none
const DEFAULT_DISCOVERY_RADIUS: u32 = 8_000;

/// Inputs for a restaurant search
#[derive(Debug, Clone)]
pub struct RestaurantSearch {
    pub area: SearchArea,
    /// Lowercase cuisine keywords
    pub accepted: Vec<String>,
    /// Lowercase cuisine keywords
    pub rejected: Vec<String>,
    pub limit: Option<usize>,
    pub radius: Option<u32>,
    pub max_radius: Option<u32>,
    pub meal_type: Option<MealType>,
    pub debug: bool,
}

impl RestaurantSearch {
    pub fn new(area: SearchArea) -> Self {
        Self {
            area,
            accepted: Vec::new(),
            rejected: Vec::new(),
            limit: None,
            radius: None,
            max_radius: None,
            meal_type: None,
            debug: false,
        }
    }
}

/// Inputs for a Yelp business search
#[derive(Debug, Clone)]
pub struct YelpSearch {
    pub term: Option<String>,
    pub area: SearchArea,
    pub limit: Option<u32>,
    pub accepted: Vec<String>,
}

/// Search orchestrator shared by the HTTP handlers
pub struct RestaurantFinder {
    google: Arc<GooglePlacesClient>,
    yelp: Arc<YelpClient>,
    settings: SearchSettings,
}

impl RestaurantFinder {
    pub fn new(google: Arc<GooglePlacesClient>, yelp: Arc<YelpClient>, settings: SearchSettings) -> Self {
        Self { google, yelp, settings }
    }

    pub fn google(&self) -> &GooglePlacesClient {
        &self.google
    }

    pub fn yelp(&self) -> &YelpClient {
        &self.yelp
    }

    /// Discover which cuisines are served around a location
    ///
    /// With coordinates, nearby searches widen through the discovery ladder
    /// until enough distinct labels appear. Whatever is still missing is made
    /// up with a city-wide text search.
    pub async fn discover_cuisines(
        &self,
        area: &SearchArea,
        radius: Option<u32>,
    ) -> Result<CuisinesResponse, GoogleError> {
        self.google.ensure_configured()?;

        let mut attempts = Vec::new();
        let mut collected: Vec<Place> = Vec::new();
        let mut used_radius = radius.filter(|r| *r > 0).unwrap_or(DEFAULT_DISCOVERY_RADIUS);

        if let Some(coords) = &area.coordinates {
            for r in RadiusLadder::discovery().iter() {
                used_radius = r;

                let response = self.google.nearby_search_safe(coords, r, None).await;
                collected = merge_places([collected, record(&mut attempts, format!("nearby-{}", r), response)]);

                let cuisines = extract_cuisines(&collected);
                if cuisines.len() >= self.settings.cuisine_target {
                    tracing::info!("Found {} cuisines within {}m", cuisines.len(), r);
                    return Ok(cuisines_payload(&collected, cuisines, attempts, used_radius));
                }
            }
        }

        let query = format!("restaurants in {}", area.location);
        let response = self.google.text_search_safe(&query).await;
        collected = merge_places([collected, record(&mut attempts, "textsearch", response)]);

        let cuisines = extract_cuisines(&collected);
        tracing::info!(
            "Found {} cuisines for {} after text search fallback",
            cuisines.len(),
            area.location
        );

        Ok(cuisines_payload(&collected, cuisines, attempts, used_radius))
    }

    /// Find restaurants serving the accepted cuisines
    ///
    /// Each ladder step replaces the previous step's results; the loop stops
    /// once the filtered list reaches `limit`.
    pub async fn search_restaurants(
        &self,
        search: &RestaurantSearch,
    ) -> Result<RestaurantsResponse, GoogleError> {
        self.google.ensure_configured()?;

        let limit = search
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(self.settings.restaurant_limit);
        let ladder = RadiusLadder::restaurants(search.radius, search.max_radius);

        let mut attempts = Vec::new();
        let mut photo_cache: HashMap<String, Option<String>> = HashMap::new();
        let mut used_radius = ladder.first();
        let mut found: Vec<Place> = Vec::new();

        for r in ladder.iter() {
            used_radius = r;

            let results = match &search.area.coordinates {
                Some(coords) => self.probe_nearby(coords, r, &search.accepted, &mut attempts).await,
                None => self.probe_text(&search.area.location, &search.accepted, &mut attempts).await,
            };

            found = merge_places([results]);
            found.retain(|p| matches_accepted(p, &search.accepted));
            found.retain(|p| !matches_rejected(p, &search.rejected));

            if !found.is_empty() {
                self.ensure_photos(&mut found, &mut photo_cache, &mut attempts).await;
            }

            tracing::debug!("Restaurant search at {}m kept {} places", r, found.len());

            if found.len() >= limit {
                break;
            }
            // Text search ignores the radius; widening would repeat the same query
            if search.area.coordinates.is_none() {
                break;
            }
        }

        if search.meal_type == Some(MealType::Takeout) {
            prefer_takeout(&mut found);
        }

        let restaurants = found.iter().take(limit).map(slim_place).collect();

        Ok(RestaurantsResponse {
            restaurants,
            used_radius,
            attempts: search.debug.then_some(attempts),
        })
    }

    /// One nearby search per accepted keyword, or one generic search
    async fn probe_nearby(
        &self,
        coords: &Coordinates,
        radius: u32,
        keywords: &[String],
        attempts: &mut Vec<Attempt>,
    ) -> Vec<Place> {
        if keywords.is_empty() {
            let response = self.google.nearby_search_safe(coords, radius, None).await;
            return record(attempts, format!("nearby-{}", radius), response)
                .into_iter()
                .filter(is_restaurant)
                .collect();
        }

        let mut bag = Vec::new();
        for keyword in keywords {
            let response = self.google.nearby_search_safe(coords, radius, Some(keyword)).await;
            let step = format!("nearby-{}-kw:{}", radius, keyword);
            bag.extend(record(attempts, step, response).into_iter().filter(is_restaurant));
        }
        bag
    }

    /// One text search per accepted keyword, or one generic search
    async fn probe_text(
        &self,
        location: &str,
        keywords: &[String],
        attempts: &mut Vec<Attempt>,
    ) -> Vec<Place> {
        if keywords.is_empty() {
            let query = format!("restaurants in {}", location);
            let response = self.google.text_search_safe(&query).await;
            return record(attempts, "text-generic", response)
                .into_iter()
                .filter(is_restaurant)
                .collect();
        }

        let mut bag = Vec::new();
        for keyword in keywords {
            let query = format!("{} restaurants in {}", keyword, location);
            let response = self.google.text_search_safe(&query).await;
            let step = format!("text-{}", keyword);
            bag.extend(record(attempts, step, response).into_iter().filter(is_restaurant));
        }
        bag
    }

    /// Fill in missing photos through Place Details
    ///
    /// At most `photo_lookups` Details calls are made per pass; answers are
    /// remembered for the rest of the request so widening the radius does not
    /// look the same place up twice.
    async fn ensure_photos(
        &self,
        places: &mut [Place],
        photo_cache: &mut HashMap<String, Option<String>>,
        attempts: &mut Vec<Attempt>,
    ) {
        let mut lookups = 0;

        for place in places.iter_mut() {
            if place.has_own_photo() {
                continue;
            }
            let Some(place_id) = place.place_id.clone() else {
                continue;
            };

            if let Some(known) = photo_cache.get(&place_id) {
                place.fallback_photo_reference = known.clone();
                continue;
            }
            if lookups >= self.settings.photo_lookups {
                continue;
            }

            let details = self.google.details_photo(&place_id).await;
            lookups += 1;

            attempts.push(Attempt::details_photo(
                &place_id,
                details.status,
                details.photo_reference.is_some(),
            ));
            place.fallback_photo_reference = details.photo_reference.clone();
            photo_cache.insert(place_id, details.photo_reference);
        }
    }

    /// Nearby restaurants as cards, widening until anything turns up
    ///
    /// With accepted cuisines, one search per cuisine runs concurrently at
    /// each step and the results are merged. Upstream transport failures
    /// abort the search.
    pub async fn search_places(
        &self,
        area: &SearchArea,
        accepted: &[String],
        limit: Option<usize>,
    ) -> Result<PlacesResponse, GoogleError> {
        self.google.ensure_configured()?;

        let limit = limit.filter(|l| *l > 0).unwrap_or(self.settings.places_limit);
        let ladder = RadiusLadder::places();
        let keywords: Vec<String> = if accepted.is_empty() {
            vec!["restaurant".to_string()]
        } else {
            accepted.iter().map(|c| format!("{} restaurant", c)).collect()
        };

        let mut used_radius = ladder.first();
        let mut places: Vec<Place> = Vec::new();

        for r in ladder.iter() {
            used_radius = r;

            let lists = try_join_all(keywords.iter().map(|kw| self.fetch_places(area, r, kw))).await?;
            places = merge_places(lists);

            if !places.is_empty() || area.coordinates.is_none() {
                break;
            }
        }

        places.truncate(limit);
        let (businesses, warning) = business_cards(&places, area.coordinates.as_ref());

        tracing::info!("Places search returning {} businesses at {}m", businesses.len(), used_radius);

        Ok(PlacesResponse {
            businesses,
            warning,
            used_radius,
        })
    }

    async fn fetch_places(
        &self,
        area: &SearchArea,
        radius: u32,
        keyword: &str,
    ) -> Result<Vec<Place>, GoogleError> {
        let response = match &area.coordinates {
            Some(coords) => self.google.nearby_search(coords, radius, Some(keyword)).await?,
            None => {
                let query = format!("{} in {}", keyword, area.location);
                self.google.text_search(&query).await?
            }
        };
        Ok(response.results)
    }

    /// Yelp business search, widening until a step returns anything
    pub async fn search_yelp(&self, search: &YelpSearch) -> Result<Vec<Value>, YelpError> {
        let categories = (!search.accepted.is_empty()).then(|| search.accepted.join(","));

        let params = YelpSearchParams {
            term: search.term.clone().unwrap_or_else(|| "food".to_string()),
            coordinates: search.area.coordinates,
            location: search.area.location.clone(),
            limit: search.limit.unwrap_or(self.settings.places_limit as u32),
            categories,
            radius: None,
            sort_by_distance: true,
        };

        for r in RadiusLadder::yelp().iter() {
            let businesses = self.yelp.search(&params.with_radius(r)).await?;
            if !businesses.is_empty() {
                tracing::info!("Yelp returned {} businesses at {}m", businesses.len(), r);
                return Ok(businesses);
            }
        }

        tracing::info!("Yelp returned nothing even at the widest radius");
        Ok(Vec::new())
    }

    /// Yelp categories that are restaurant cuisines
    pub async fn yelp_categories(&self) -> Result<Vec<YelpCategory>, YelpError> {
        Ok(restaurant_categories(self.yelp.categories().await?))
    }

    /// Distinct cuisine categories among restaurants near a point
    pub async fn yelp_categories_near(&self, coords: Coordinates) -> Result<Vec<YelpCategory>, YelpError> {
        let params = YelpSearchParams {
            term: "restaurants".to_string(),
            coordinates: Some(coords),
            location: String::new(),
            limit: 50,
            categories: None,
            radius: None,
            sort_by_distance: false,
        };

        let businesses = self.yelp.search(&params).await?;
        Ok(dedupe_categories(&businesses))
    }
}

/// Log a search call and hand back its results
fn record(attempts: &mut Vec<Attempt>, step: impl Into<String>, response: SearchResponse) -> Vec<Place> {
    let SearchResponse {
        status,
        results,
        error_message,
        ..
    } = response;

    attempts.push(Attempt::search(step, status, results.len()).with_error_message(error_message));
    results
}

fn cuisines_payload(
    places: &[Place],
    cuisines: Vec<String>,
    attempts: Vec<Attempt>,
    used_radius: u32,
) -> CuisinesResponse {
    CuisinesResponse {
        cuisines,
        attempts,
        sample_types: top_types(places, SAMPLE_TYPES),
        used_radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finder_without_keys() -> RestaurantFinder {
        RestaurantFinder::new(
            Arc::new(GooglePlacesClient::new("http://127.0.0.1:9".to_string(), None, 1)),
            Arc::new(YelpClient::new("http://127.0.0.1:9".to_string(), None, 1)),
            SearchSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_missing_google_key_is_reported() {
        let finder = finder_without_keys();
        let area = SearchArea::new(None, "New York");

        assert!(matches!(
            finder.discover_cuisines(&area, None).await,
            Err(GoogleError::MissingApiKey)
        ));
        assert!(matches!(
            finder.search_restaurants(&RestaurantSearch::new(area.clone())).await,
            Err(GoogleError::MissingApiKey)
        ));
        assert!(matches!(
            finder.search_places(&area, &[], None).await,
            Err(GoogleError::MissingApiKey)
        ));
    }

    #[test]
    fn test_record_logs_attempt() {
        let mut attempts = Vec::new();
        let response = SearchResponse {
            status: "OK".to_string(),
            results: vec![Place::default(), Place::default()],
            error_message: None,
            next_page_token: None,
        };

        let places = record(&mut attempts, "nearby-8000", response);

        assert_eq!(places.len(), 2);
        assert_eq!(attempts, vec![Attempt::search("nearby-8000", "OK", 2)]);
    }
}
