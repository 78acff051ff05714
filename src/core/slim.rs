use crate::core::distance::{far_result_warning, haversine_meters};
use crate::models::{BusinessCard, CardLocation, Coordinates, Place, SlimPlace};
use std::collections::HashSet;

/// Path of the photo proxy route, relative to the server root
pub const PHOTO_PROXY_PATH: &str = "/api/v1/photo";

pub const CARD_PHOTO_WIDTH: u32 = 600;

pub fn maps_url(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{}", place_id)
}

pub fn photo_proxy_url(reference: &str, maxwidth: u32) -> String {
    format!(
        "{}?ref={}&maxwidth={}",
        PHOTO_PROXY_PATH,
        urlencoding::encode(reference),
        maxwidth
    )
}

pub fn slim_place(place: &Place) -> SlimPlace {
    SlimPlace {
        place_id: place.place_id.clone(),
        name: place.name.clone(),
        rating: place.rating,
        user_ratings_total: place.user_ratings_total,
        vicinity: place.vicinity.clone(),
        price_level: place.price_level,
        types: place.types.clone(),
        photo_reference: place.photo_reference().map(str::to_string),
        maps_url: place.place_id.as_deref().map(maps_url),
    }
}

/// Cards for the places search plus the distance warning for the farthest one
pub fn business_cards(places: &[Place], origin: Option<&Coordinates>) -> (Vec<BusinessCard>, String) {
    let mut max_distance_meters: f64 = 0.0;

    let cards = places
        .iter()
        .map(|place| {
            let distance_meters = origin
                .zip(place.location())
                .map(|(from, to)| haversine_meters(from, &to));

            if let Some(d) = distance_meters {
                max_distance_meters = max_distance_meters.max(d);
            }

            let address1 = place
                .vicinity
                .as_deref()
                .filter(|v| !v.is_empty())
                .or(place.formatted_address.as_deref())
                .unwrap_or("")
                .to_string();

            BusinessCard {
                name: place.name.clone(),
                url: maps_url(place.place_id.as_deref().unwrap_or("")),
                image_url: place
                    .photo_reference()
                    .map(|r| photo_proxy_url(r, CARD_PHOTO_WIDTH)),
                location: CardLocation { address1 },
                rating: place.rating,
                user_ratings_total: place.user_ratings_total,
                distance_meters,
            }
        })
        .collect();

    (cards, far_result_warning(max_distance_meters))
}

/// Flatten result lists, keeping the first place seen for each id
pub fn merge_places<I>(lists: I) -> Vec<Place>
where
    I: IntoIterator<Item = Vec<Place>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for place in lists.into_iter().flatten() {
        match place.place_id.as_deref() {
            Some(id) => {
                if seen.insert(id.to_string()) {
                    out.push(place);
                }
            }
            None => out.push(place),
        }
    }

    out
}

#[inline]
fn offers_takeout(place: &Place) -> bool {
    place
        .types
        .iter()
        .any(|t| t == "meal_takeaway" || t == "meal_delivery")
}

/// Move places that do takeaway or delivery to the front, order otherwise kept
pub fn prefer_takeout(places: &mut [Place]) {
    places.sort_by_key(|p| !offers_takeout(p));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Geometry, LatLng, PlacePhoto};

    fn place(id: &str, types: &[&str]) -> Place {
        Place {
            place_id: Some(id.to_string()),
            name: Some(format!("Place {}", id)),
            types: types.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_slim_place() {
        let mut p = place("abc", &["thai_restaurant", "restaurant"]);
        p.fallback_photo_reference = Some("fallback".to_string());

        let slim = slim_place(&p);
        assert_eq!(slim.photo_reference.as_deref(), Some("fallback"));
        assert_eq!(
            slim.maps_url.as_deref(),
            Some("https://www.google.com/maps/place/?q=place_id:abc")
        );
    }

    #[test]
    fn test_business_cards_distance_and_photo() {
        let origin = Coordinates { latitude: 40.7128, longitude: -74.0060 };

        let mut near = place("near", &["restaurant"]);
        near.geometry = Some(Geometry { location: LatLng { lat: 40.72, lng: -74.01 } });
        near.photos = vec![PlacePhoto { photo_reference: Some("a/b+c".to_string()) }];
        near.formatted_address = Some("1 Main St".to_string());

        let (cards, warning) = business_cards(&[near], Some(&origin));
        assert_eq!(cards.len(), 1);
        assert!(warning.is_empty());
        assert_eq!(cards[0].location.address1, "1 Main St");
        assert_eq!(
            cards[0].image_url.as_deref(),
            Some("/api/v1/photo?ref=a%2Fb%2Bc&maxwidth=600")
        );
        assert!(cards[0].distance_meters.unwrap() < 2_000.0);
    }

    #[test]
    fn test_business_cards_far_warning() {
        let origin = Coordinates { latitude: 40.7128, longitude: -74.0060 };
        let mut far = place("far", &["restaurant"]);
        far.geometry = Some(Geometry { location: LatLng { lat: 42.3601, lng: -71.0589 } });

        let (_, warning) = business_cards(&[far.clone()], Some(&origin));
        assert!(!warning.is_empty());

        let (cards, warning) = business_cards(&[far], None);
        assert!(warning.is_empty());
        assert!(cards[0].distance_meters.is_none());
    }

    #[test]
    fn test_merge_places_dedupes() {
        let merged = merge_places(vec![
            vec![place("1", &[]), place("2", &[])],
            vec![place("2", &["x"]), place("3", &[])],
        ]);

        let ids: Vec<&str> = merged.iter().filter_map(|p| p.place_id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(merged[1].types.is_empty());
    }

    #[test]
    fn test_prefer_takeout_is_stable() {
        let mut places = vec![
            place("1", &["restaurant"]),
            place("2", &["meal_takeaway", "restaurant"]),
            place("3", &["restaurant"]),
            place("4", &["meal_delivery"]),
        ];

        prefer_takeout(&mut places);
        let ids: Vec<&str> = places.iter().filter_map(|p| p.place_id.as_deref()).collect();
        assert_eq!(ids, vec!["2", "4", "1", "3"]);
    }
}
