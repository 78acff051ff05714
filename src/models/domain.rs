use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Parse raw query values, treating anything unparsable or non-finite as absent
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Option<Self> {
        let lat = latitude?.trim().parse::<f64>().ok()?;
        let lon = longitude?.trim().parse::<f64>().ok()?;

        if lat.is_finite() && lon.is_finite() {
            Some(Self { latitude: lat, longitude: lon })
        } else {
            None
        }
    }

    /// Google's `location` parameter format
    pub fn as_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Where a search is anchored: device coordinates when known, a city name otherwise
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArea {
    pub coordinates: Option<Coordinates>,
    pub location: String,
}

impl SearchArea {
    pub fn new(coordinates: Option<Coordinates>, location: impl Into<String>) -> Self {
        Self {
            coordinates,
            location: location.into(),
        }
    }
}

/// A Google Places search result
///
/// Only the fields the service reads are modelled; everything else the
/// upstream sends is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
    /// Photo reference found through Place Details when the search result had none
    #[serde(skip)]
    pub fallback_photo_reference: Option<String>,
}

impl Place {
    /// First photo reference, falling back to the one fetched via Details
    pub fn photo_reference(&self) -> Option<&str> {
        self.photos
            .first()
            .and_then(|p| p.photo_reference.as_deref())
            .or(self.fallback_photo_reference.as_deref())
    }

    /// Whether the search result itself carries a photo
    pub fn has_own_photo(&self) -> bool {
        self.photos
            .first()
            .and_then(|p| p.photo_reference.as_deref())
            .is_some()
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.geometry.as_ref().map(|g| Coordinates {
            latitude: g.location.lat,
            longitude: g.location.lng,
        })
    }

    /// `"{name} {vicinity}"` lowercased, the haystack for keyword matching
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.name.as_deref().unwrap_or(""),
            self.vicinity.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacePhoto {
    #[serde(default)]
    pub photo_reference: Option<String>,
}

/// One upstream call made while answering a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub step: String,
    pub status: String,
    pub results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(rename = "hasPhoto", skip_serializing_if = "Option::is_none")]
    pub has_photo: Option<bool>,
}

impl Attempt {
    pub fn search(step: impl Into<String>, status: impl Into<String>, results: usize) -> Self {
        Self {
            step: step.into(),
            status: status.into(),
            results,
            error_message: None,
            has_photo: None,
        }
    }

    pub fn with_error_message(mut self, message: Option<String>) -> Self {
        self.error_message = message;
        self
    }

    pub fn details_photo(place_id: &str, status: impl Into<String>, has_photo: bool) -> Self {
        Self {
            step: format!("details-photo:{}", place_id),
            status: status.into(),
            results: usize::from(has_photo),
            error_message: None,
            has_photo: Some(has_photo),
        }
    }
}

/// Yelp category as returned by the categories endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YelpCategory {
    pub alias: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_aliases: Vec<String>,
}

/// First wizard step: cook at home or eat out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealType {
    HomeCooked,
    Takeout,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::HomeCooked => write!(f, "home-cooked"),
            MealType::Takeout => write!(f, "takeout"),
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "home-cooked" | "homecooked" => Ok(MealType::HomeCooked),
            "takeout" | "eat-out" => Ok(MealType::Takeout),
            other => Err(format!("unknown meal type: {}", other)),
        }
    }
}

/// Cuisine choices a user made in the wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(rename = "rejectedCuisines")]
    pub rejected_cuisines: Vec<String>,
    #[serde(rename = "acceptedCuisines")]
    pub accepted_cuisines: Vec<String>,
    #[serde(rename = "mealType", skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_parse() {
        let coords = Coordinates::parse(Some("40.7128"), Some("-74.0060")).unwrap();
        assert_eq!(coords.latitude, 40.7128);
        assert_eq!(coords.as_query_value(), "40.7128,-74.006");

        assert!(Coordinates::parse(Some("abc"), Some("-74.0")).is_none());
        assert!(Coordinates::parse(Some("NaN"), Some("-74.0")).is_none());
        assert!(Coordinates::parse(None, Some("-74.0")).is_none());
    }

    #[test]
    fn test_place_photo_fallback() {
        let mut place = Place::default();
        assert!(place.photo_reference().is_none());

        place.fallback_photo_reference = Some("details-ref".to_string());
        assert_eq!(place.photo_reference(), Some("details-ref"));
        assert!(!place.has_own_photo());

        place.photos = vec![PlacePhoto { photo_reference: Some("own-ref".to_string()) }];
        assert_eq!(place.photo_reference(), Some("own-ref"));
    }

    #[test]
    fn test_place_deserializes_google_shape() {
        let json = serde_json::json!({
            "place_id": "abc",
            "name": "Sushi Den",
            "types": ["japanese_restaurant", "restaurant"],
            "geometry": { "location": { "lat": 40.7, "lng": -74.0 } },
            "photos": [{ "photo_reference": "ref1", "width": 400 }],
            "opening_hours": { "open_now": true }
        });

        let place: Place = serde_json::from_value(json).unwrap();
        assert_eq!(place.place_id.as_deref(), Some("abc"));
        assert_eq!(place.photo_reference(), Some("ref1"));
        assert_eq!(place.location().unwrap().longitude, -74.0);
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!("Takeout".parse::<MealType>().unwrap(), MealType::Takeout);
        assert_eq!("Home-Cooked".parse::<MealType>().unwrap(), MealType::HomeCooked);
        assert_eq!("home cooked".parse::<MealType>().unwrap(), MealType::HomeCooked);
        assert!("brunch".parse::<MealType>().is_err());
    }
}
