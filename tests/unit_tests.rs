// Unit tests for Cuisine Scout

use cuisine_scout::core::{
    cuisine::{extract_cuisines, hints_from_name, label_from_type, matches_accepted, matches_rejected, parse_cuisine_list, top_types},
    distance::{far_result_warning, haversine_distance},
    ladder::RadiusLadder,
    slim::{business_cards, merge_places, slim_place},
};
use cuisine_scout::models::{Coordinates, Geometry, LatLng, Place, PlacePhoto};

fn create_place(id: &str, name: &str, types: &[&str]) -> Place {
    Place {
        place_id: Some(id.to_string()),
        name: Some(name.to_string()),
        types: types.iter().map(|t| t.to_string()).collect(),
        vicinity: Some("Main Street".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_manhattan_to_brooklyn() {
    // Manhattan to Brooklyn is approximately 5-10 km
    let distance = haversine_distance(40.7580, -73.9855, 40.6782, -73.9442);
    assert!(distance > 5.0 && distance < 15.0);
}

#[test]
fn test_far_warning_threshold_is_fifty_miles() {
    assert!(far_result_warning(80_000.0).is_empty());
    assert!(!far_result_warning(81_000.0).is_empty());
}

#[test]
fn test_cuisine_labels_from_types() {
    let cases = [
        ("japanese_restaurant", Some("Japanese")),
        ("korean_barbecue_restaurant", Some("Korean Barbecue")),
        ("sushi", Some("Sushi")),
        ("meal_delivery", None),
        ("ice_cream_shop", None),
        ("point_of_interest", None),
    ];

    for (place_type, expected) in cases {
        assert_eq!(label_from_type(place_type).as_deref(), expected, "type {}", place_type);
    }
}

#[test]
fn test_cuisine_hints_use_word_boundaries() {
    assert_eq!(hints_from_name("Taco Loco"), vec!["Mexican"]);
    assert!(hints_from_name("Tacoma Diner").is_empty());
    assert_eq!(hints_from_name("Dim Sum Palace"), vec!["Chinese"]);
    assert_eq!(hints_from_name("Greek Gyro House"), vec!["Mediterranean"]);
}

#[test]
fn test_extract_cuisines_sorted_and_unique() {
    let places = vec![
        create_place("1", "Thai Basil", &["thai_restaurant", "restaurant"]),
        create_place("2", "Spice Route", &["indian_restaurant", "restaurant"]),
        create_place("3", "Bangkok Kitchen", &["thai_restaurant", "restaurant"]),
        create_place("4", "Ramen Ya", &["restaurant"]),
        create_place("5", "american grill", &["american_restaurant", "restaurant", "bar"]),
    ];

    assert_eq!(
        extract_cuisines(&places),
        vec!["American", "Indian", "Japanese", "Thai"]
    );
}

#[test]
fn test_top_types_counts() {
    let places = vec![
        create_place("1", "A", &["restaurant", "food", "thai_restaurant"]),
        create_place("2", "B", &["restaurant", "food"]),
        create_place("3", "C", &["restaurant"]),
    ];

    let ranked = top_types(&places, 30);
    let pairs: Vec<(&str, usize)> = ranked.iter().map(|t| (t.type_name.as_str(), t.count)).collect();
    assert_eq!(pairs, vec![("restaurant", 3), ("food", 2), ("thai_restaurant", 1)]);
}

#[test]
fn test_accept_and_reject_filters() {
    let accepted = parse_cuisine_list("Korean, Japanese");
    let rejected = parse_cuisine_list("sushi");

    let korean = create_place("1", "Seoul Kitchen", &["korean_restaurant", "restaurant"]);
    let sushi = create_place("2", "Sushi Go", &["japanese_restaurant", "restaurant"]);
    let pizza = create_place("3", "Slice", &["pizza_restaurant", "restaurant"]);

    assert!(matches_accepted(&korean, &accepted));
    assert!(matches_accepted(&sushi, &accepted));
    assert!(!matches_accepted(&pizza, &accepted));

    assert!(!matches_rejected(&korean, &rejected));
    assert!(matches_rejected(&sushi, &rejected));
}

#[test]
fn test_restaurant_ladder_shapes() {
    assert_eq!(RadiusLadder::restaurants(None, None).steps(), &[8_000, 16_000, 24_000, 32_000]);
    assert_eq!(RadiusLadder::restaurants(Some(2_000), Some(16_000)).steps(), &[2_000, 16_000]);
    assert_eq!(RadiusLadder::discovery().steps(), &[8_000, 16_000, 32_000, 50_000]);
    assert_eq!(RadiusLadder::yelp().steps(), &[8_000, 16_000, 24_000, 32_000]);
}

#[test]
fn test_merge_then_slim() {
    let mut with_photo = create_place("1", "Seoul Kitchen", &["korean_restaurant"]);
    with_photo.photos = vec![PlacePhoto { photo_reference: Some("ref-1".to_string()) }];

    let merged = merge_places(vec![vec![with_photo.clone()], vec![with_photo]]);
    assert_eq!(merged.len(), 1);

    let slim = slim_place(&merged[0]);
    assert_eq!(slim.photo_reference.as_deref(), Some("ref-1"));
    assert_eq!(slim.vicinity.as_deref(), Some("Main Street"));
}

#[test]
fn test_business_cards_report_distance() {
    let origin = Coordinates { latitude: 40.7128, longitude: -74.0060 };
    let mut place = create_place("1", "Nearby", &["restaurant"]);
    place.geometry = Some(Geometry { location: LatLng { lat: 40.73, lng: -74.0 } });

    let (cards, warning) = business_cards(&[place], Some(&origin));

    assert!(warning.is_empty());
    assert_eq!(cards[0].location.address1, "Main Street");
    assert_eq!(cards[0].url, "https://www.google.com/maps/place/?q=place_id:1");
    assert!(cards[0].image_url.is_none());
    let distance = cards[0].distance_meters.unwrap();
    assert!(distance > 1_000.0 && distance < 3_000.0, "got {}", distance);
}
