//! Cuisine label inference.
//!
//! Google tags places with machine types such as `korean_restaurant`; Yelp
//! tags businesses with categories. Neither is a clean cuisine list, so labels
//! are derived heuristically: type suffixes first, then keywords in the place
//! name when the types say too little.

use crate::models::{Place, TypeCount, YelpCategory};
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Types that describe a venue but not a cuisine
pub const GENERIC_TYPES: &[&str] = &[
    "restaurant",
    "food",
    "meal_takeaway",
    "meal_delivery",
    "bar",
    "cafe",
    "bakery",
    "point_of_interest",
    "establishment",
    "store",
    "supermarket",
    "grocery_or_supermarket",
    "liquor_store",
    "pharmacy",
    "gas_station",
    "lodging",
    "night_club",
    "shopping_mall",
    "convenience_store",
    "department_store",
];

/// Yelp aliases too broad to offer as a cuisine
const GENERIC_YELP_ALIASES: &[&str] = &["restaurants", "food"];

/// Places with fewer types than this also get name-based hints
const NAME_HINT_TYPE_THRESHOLD: usize = 2;

const NAME_PATTERNS: &[(&str, &str)] = &[
    (r"\b(?:japanese|sushi|ramen)\b", "Japanese"),
    (r"\bkorean\b", "Korean"),
    (r"\b(?:chinese|dim sum)\b", "Chinese"),
    (r"\bthai\b", "Thai"),
    (r"\b(?:vietnamese|pho|bahn? mi)\b", "Vietnamese"),
    (r"\b(?:indian|tandoor|masala)\b", "Indian"),
    (r"\b(?:mexican|taqueria|taco)\b", "Mexican"),
    (r"\b(?:italian|pizza|pasta)\b", "Italian"),
    (r"\b(?:mediterranean|greek|shawarma|gyro)\b", "Mediterranean"),
    (r"\bburger\b", "Burgers"),
    (r"\bamerican\b", "American"),
];

fn name_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        NAME_PATTERNS
            .iter()
            .map(|(pattern, label)| {
                (Regex::new(pattern).expect("cuisine name pattern is valid"), *label)
            })
            .collect()
    })
}

/// Upper-case the first letter of every word
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphanumeric() || c == '_' {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

/// Lowercase label for a `*_restaurant` type, e.g. `middle_eastern_restaurant` -> `middle eastern`
pub fn restaurant_type_label(place_type: &str) -> Option<String> {
    let lower = place_type.to_lowercase();
    lower
        .strip_suffix("_restaurant")
        .map(|stem| stem.replace('_', " ").trim().to_string())
        .filter(|label| !label.is_empty())
}

/// Human-readable cuisine label for a Google type, if the type names a cuisine
pub fn label_from_type(place_type: &str) -> Option<String> {
    let lower = place_type.trim().to_lowercase();

    if lower.is_empty() || GENERIC_TYPES.contains(&lower.as_str()) {
        return None;
    }
    if lower.starts_with("meal_") || lower.ends_with("_shop") || lower.ends_with("_store") {
        return None;
    }

    let stem = lower.strip_suffix("_restaurant").unwrap_or(&lower);
    let label = stem.replace('_', " ");
    let label = label.trim();

    if label.is_empty() {
        None
    } else {
        Some(title_case(label))
    }
}

/// Cuisine labels suggested by keywords in a place name
pub fn hints_from_name(name: &str) -> Vec<&'static str> {
    let lower = name.to_lowercase();
    let mut hits: Vec<&'static str> = Vec::new();

    for (pattern, label) in name_patterns() {
        if pattern.is_match(&lower) && !hits.contains(label) {
            hits.push(*label);
        }
    }

    hits
}

/// Distinct cuisine labels across all places, sorted case-insensitively
pub fn extract_cuisines(places: &[Place]) -> Vec<String> {
    let mut labels: HashSet<String> = HashSet::new();

    for place in places {
        for place_type in &place.types {
            if let Some(label) = label_from_type(place_type) {
                labels.insert(label);
            }
        }

        if place.types.len() < NAME_HINT_TYPE_THRESHOLD {
            if let Some(name) = place.name.as_deref() {
                labels.extend(hints_from_name(name).into_iter().map(str::to_string));
            }
        }
    }

    let mut cuisines: Vec<String> = labels.into_iter().collect();
    cuisines.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    cuisines
}

/// Most frequent raw types, ties kept in first-seen order
pub fn top_types(places: &[Place], limit: usize) -> Vec<TypeCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for place in places {
        for place_type in &place.types {
            let count = counts.entry(place_type.clone()).or_insert_with(|| {
                order.push(place_type.clone());
                0
            });
            *count += 1;
        }
    }

    let mut ranked: Vec<TypeCount> = order
        .into_iter()
        .map(|type_name| {
            let count = counts.get(&type_name).copied().unwrap_or(0);
            TypeCount { type_name, count }
        })
        .collect();

    // Stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

#[inline]
pub fn is_restaurant(place: &Place) -> bool {
    place
        .types
        .iter()
        .any(|t| t.eq_ignore_ascii_case("restaurant"))
}

/// Split a comma-separated cuisine list into trimmed lowercase keywords
pub fn parse_cuisine_list(csv: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for keyword in csv.split(',').map(|s| s.trim().to_lowercase()) {
        if !keyword.is_empty() && !out.contains(&keyword) {
            out.push(keyword);
        }
    }

    out
}

/// Whether a place serves one of the accepted cuisines
///
/// A place matches when one of its `*_restaurant` types names an accepted
/// cuisine, or when an accepted keyword appears in its name or vicinity.
/// An empty list accepts everything.
pub fn matches_accepted(place: &Place, accepted: &[String]) -> bool {
    if accepted.is_empty() {
        return true;
    }

    let type_hit = place
        .types
        .iter()
        .filter_map(|t| restaurant_type_label(t))
        .any(|label| accepted.contains(&label));

    if type_hit {
        return true;
    }

    let text = place.search_text();
    accepted.iter().any(|keyword| text.contains(keyword.as_str()))
}

/// Whether a place serves one of the rejected cuisines
pub fn matches_rejected(place: &Place, rejected: &[String]) -> bool {
    if rejected.is_empty() {
        return false;
    }

    let text = place.search_text();
    if rejected.iter().any(|keyword| text.contains(keyword.as_str())) {
        return true;
    }

    place
        .types
        .iter()
        .filter_map(|t| label_from_type(t))
        .any(|label| rejected.contains(&label.to_lowercase()))
}

/// Yelp categories that sit under the `restaurants` parent
pub fn restaurant_categories(categories: Vec<YelpCategory>) -> Vec<YelpCategory> {
    categories
        .into_iter()
        .filter(|c| c.parent_aliases.iter().any(|p| p == "restaurants"))
        .collect()
}

/// Distinct categories across Yelp businesses, generic aliases dropped
pub fn dedupe_categories(businesses: &[Value]) -> Vec<YelpCategory> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<YelpCategory> = Vec::new();

    let categories = businesses
        .iter()
        .filter_map(|b| b.get("categories").and_then(|c| c.as_array()))
        .flatten();

    for category in categories {
        let (Some(alias), Some(title)) = (
            category.get("alias").and_then(|a| a.as_str()),
            category.get("title").and_then(|t| t.as_str()),
        ) else {
            continue;
        };

        let key = alias.to_lowercase();
        if !seen.insert(key.clone()) {
            continue;
        }
        if GENERIC_YELP_ALIASES.contains(&key.as_str()) {
            continue;
        }

        out.push(YelpCategory {
            alias: alias.to_string(),
            title: title.to_string(),
            parent_aliases: Vec::new(),
        });
    }

    out
}
