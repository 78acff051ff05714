use crate::models::{MealType, UserPreferences};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-lifetime store of wizard choices, keyed by user id
///
/// Nothing is persisted; a restart forgets everyone. Each update holds the
/// write lock for its whole read-modify-write, so concurrent updates for
/// the same user never lose each other's cuisines.
#[derive(Default)]
pub struct PreferenceStore {
    users: RwLock<HashMap<String, UserPreferences>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add cuisines to the user's rejected list
    pub async fn reject(&self, user_id: &str, cuisines: &[String]) -> UserPreferences {
        let mut users = self.users.write().await;
        let prefs = users.entry(user_id.to_string()).or_default();

        merge_unique(&mut prefs.rejected_cuisines, cuisines);
        remove_matching(&mut prefs.accepted_cuisines, cuisines);

        tracing::debug!("User {} rejected {:?}", user_id, cuisines);
        prefs.clone()
    }

    /// Add cuisines to the user's accepted list
    pub async fn accept(&self, user_id: &str, cuisines: &[String]) -> UserPreferences {
        let mut users = self.users.write().await;
        let prefs = users.entry(user_id.to_string()).or_default();

        merge_unique(&mut prefs.accepted_cuisines, cuisines);
        remove_matching(&mut prefs.rejected_cuisines, cuisines);

        tracing::debug!("User {} accepted {:?}", user_id, cuisines);
        prefs.clone()
    }

    pub async fn set_meal_type(&self, user_id: &str, meal_type: MealType) -> UserPreferences {
        let mut users = self.users.write().await;
        let prefs = users.entry(user_id.to_string()).or_default();
        prefs.meal_type = Some(meal_type);
        prefs.clone()
    }

    /// Stored preferences, or empty ones for an unknown user
    pub async fn get(&self, user_id: &str) -> UserPreferences {
        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Forget a user; returns whether anything was stored
    pub async fn clear(&self, user_id: &str) -> bool {
        self.users.write().await.remove(user_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

/// Append cuisines not already present, comparing case-insensitively
fn merge_unique(target: &mut Vec<String>, additions: &[String]) {
    for cuisine in additions {
        let cuisine = cuisine.trim();
        if cuisine.is_empty() {
            continue;
        }
        if !target.iter().any(|c| c.eq_ignore_ascii_case(cuisine)) {
            target.push(cuisine.to_string());
        }
    }
}

fn remove_matching(target: &mut Vec<String>, removals: &[String]) {
    target.retain(|c| !removals.iter().any(|r| r.trim().eq_ignore_ascii_case(c)));
}
