//! Radius ladders: fixed, ascending lists of search radii (meters) tried in
//! order until a search yields enough.

/// Cuisine discovery widens until enough distinct labels show up
pub const DISCOVERY_STEPS: &[u32] = &[8_000, 16_000, 32_000, 50_000];

/// Restaurant search steps above the caller's base radius
pub const RESTAURANT_STEPS: &[u32] = &[16_000, 24_000, 32_000];
pub const DEFAULT_RESTAURANT_RADIUS: u32 = 8_000;
/// About 20 miles
pub const DEFAULT_RESTAURANT_MAX_RADIUS: u32 = 32_000;

/// Places search starts tight and goes wide, 1 km to 120 km
pub const PLACES_STEPS: &[u32] = &[1_000, 2_000, 5_000, 10_000, 20_000, 40_000, 80_000, 120_000];

pub const YELP_STEPS: &[u32] = &[8_000, 16_000, 24_000, 32_000];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadiusLadder {
    steps: Vec<u32>,
}

impl RadiusLadder {
    /// Ladder over a fixed list of steps; the list must be non-empty
    pub fn fixed(steps: &[u32]) -> Self {
        debug_assert!(!steps.is_empty());
        Self {
            steps: steps.to_vec(),
        }
    }

    pub fn discovery() -> Self {
        Self::fixed(DISCOVERY_STEPS)
    }

    pub fn places() -> Self {
        Self::fixed(PLACES_STEPS)
    }

    pub fn yelp() -> Self {
        Self::fixed(YELP_STEPS)
    }

    /// Restaurant ladder: `base`, then every fixed step above it, capped at `cap`
    ///
    /// Missing or zero inputs fall back to the defaults. When `base` already
    /// exceeds `cap` the ladder is just `[cap]`.
    pub fn restaurants(base: Option<u32>, cap: Option<u32>) -> Self {
        let base = base.filter(|r| *r > 0).unwrap_or(DEFAULT_RESTAURANT_RADIUS);
        let cap = cap.filter(|r| *r > 0).unwrap_or(DEFAULT_RESTAURANT_MAX_RADIUS);

        if base > cap {
            return Self { steps: vec![cap] };
        }

        let mut steps = vec![base];
        steps.extend(
            RESTAURANT_STEPS
                .iter()
                .copied()
                .filter(|r| *r > base && *r <= cap),
        );

        Self { steps }
    }

    /// Radius reported before any step has run
    pub fn first(&self) -> u32 {
        self.steps.first().copied().unwrap_or(DEFAULT_RESTAURANT_RADIUS)
    }

    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.steps.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_ladder_defaults() {
        let ladder = RadiusLadder::restaurants(None, None);
        assert_eq!(ladder.steps(), &[8_000, 16_000, 24_000, 32_000]);
        assert_eq!(ladder.first(), 8_000);
    }

    #[test]
    fn test_restaurant_ladder_cap() {
        let ladder = RadiusLadder::restaurants(Some(4_000), Some(20_000));
        assert_eq!(ladder.steps(), &[4_000, 16_000]);
    }

    #[test]
    fn test_restaurant_ladder_base_above_steps() {
        let ladder = RadiusLadder::restaurants(Some(20_000), None);
        assert_eq!(ladder.steps(), &[20_000, 24_000, 32_000]);

        let ladder = RadiusLadder::restaurants(Some(16_000), None);
        assert_eq!(ladder.steps(), &[16_000, 24_000, 32_000]);
    }

    #[test]
    fn test_restaurant_ladder_base_exceeds_cap() {
        let ladder = RadiusLadder::restaurants(Some(50_000), Some(10_000));
        assert_eq!(ladder.steps(), &[10_000]);
    }

    #[test]
    fn test_zero_inputs_use_defaults() {
        assert_eq!(
            RadiusLadder::restaurants(Some(0), Some(0)),
            RadiusLadder::restaurants(None, None)
        );
    }

    #[test]
    fn test_fixed_ladders_ascending() {
        for ladder in [RadiusLadder::discovery(), RadiusLadder::places(), RadiusLadder::yelp()] {
            assert!(ladder.steps().windows(2).all(|w| w[0] < w[1]));
        }
        assert_eq!(RadiusLadder::places().len(), 8);
        assert_eq!(RadiusLadder::places().first(), 1_000);
    }
}
