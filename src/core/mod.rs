// Core algorithm exports
pub mod cuisine;
pub mod distance;
pub mod ladder;
pub mod slim;

pub use cuisine::{extract_cuisines, hints_from_name, label_from_type, matches_accepted, matches_rejected, parse_cuisine_list, top_types};
pub use distance::{far_result_warning, haversine_distance, haversine_meters};
pub use ladder::RadiusLadder;
pub use slim::{business_cards, merge_places, prefer_takeout, slim_place};
