//! Persisted user preferences: favorites, ratings, dietary defaults, history.
//!
//! The engine only reads favorites and ratings, through [`PreferenceStore`].
//! [`MemoryStore`] is a complete in-process implementation that can be
//! snapshotted to and restored from JSON by whatever owns persistence.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Maximum number of search history entries retained.
pub const HISTORY_LIMIT: usize = 10;

/// Read access to the preference data the suggestion ranker consumes.
pub trait PreferenceStore {
    /// Ids of favorited recipes.
    fn favorites(&self) -> Result<HashSet<u32>, StoreError>;

    /// Star ratings (1 to 5) keyed by recipe id.
    fn ratings(&self) -> Result<HashMap<u32, u8>, StoreError>;
}

/// Default filters a user wants applied to every search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Dietary tags to pre-select.
    pub dietary: Vec<String>,
}

/// One past search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The ingredient list that was searched.
    pub ingredients: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// In-memory preference store.
///
/// # Examples
///
/// ```
/// use pantrymatch::{MemoryStore, PreferenceStore};
///
/// let mut store = MemoryStore::new();
/// assert!(store.toggle_favorite(7));
/// store.set_rating(3, 5).unwrap();
///
/// assert!(store.favorites().unwrap().contains(&7));
/// assert_eq!(store.rating(3), 5);
/// assert_eq!(store.rating(4), 0);
/// assert!(store.set_rating(3, 6).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    favorites: BTreeSet<u32>,
    ratings: BTreeMap<u32, u8>,
    preferences: Preferences,
    history: Vec<HistoryEntry>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Corrupt`] when the snapshot cannot be decoded
    /// - [`StoreError::InvalidRating`] when a stored rating is outside `1..=5`
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let store: Self = serde_json::from_str(json)?;
        if let Some(&bad) = store.ratings.values().find(|r| !(1..=5).contains(*r)) {
            return Err(StoreError::InvalidRating(bad));
        }
        Ok(store)
    }

    /// Serialize the store to a JSON snapshot.
    ///
    /// # Errors
    ///
    /// [`StoreError::Corrupt`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether `id` is a favorite.
    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.contains(&id)
    }

    /// Flip the favorite flag for `id`. Returns the new state.
    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id);
            true
        }
    }

    /// Rate `id` from 1 to 5 stars, replacing any earlier rating.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidRating`] for values outside `1..=5`.
    pub fn set_rating(&mut self, id: u32, rating: u8) -> Result<(), StoreError> {
        if !(1..=5).contains(&rating) {
            return Err(StoreError::InvalidRating(rating));
        }
        self.ratings.insert(id, rating);
        Ok(())
    }

    /// The rating for `id`, or 0 when unrated.
    pub fn rating(&self, id: u32) -> u8 {
        self.ratings.get(&id).copied().unwrap_or(0)
    }

    /// Saved default filters.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Replace the saved default filters.
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    /// Record a search, most recent first, keeping at most [`HISTORY_LIMIT`].
    ///
    /// Empty searches are not recorded.
    pub fn push_history<S: AsRef<str>>(&mut self, ingredients: &[S]) {
        if ingredients.is_empty() {
            return;
        }
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        self.history.insert(
            0,
            HistoryEntry {
                ingredients: ingredients.iter().map(|s| s.as_ref().to_owned()).collect(),
                timestamp,
            },
        );
        self.history.truncate(HISTORY_LIMIT);
    }

    /// Past searches, most recent first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

impl PreferenceStore for MemoryStore {
    fn favorites(&self) -> Result<HashSet<u32>, StoreError> {
        Ok(self.favorites.iter().copied().collect())
    }

    fn ratings(&self) -> Result<HashMap<u32, u8>, StoreError> {
        Ok(self.ratings.iter().map(|(&id, &r)| (id, r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_favorite_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.toggle_favorite(1));
        assert!(store.is_favorite(1));
        assert!(!store.toggle_favorite(1));
        assert!(!store.is_favorite(1));
    }

    #[test]
    fn rating_bounds() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.set_rating(1, 0), Err(StoreError::InvalidRating(0))));
        assert!(store.set_rating(1, 1).is_ok());
        assert!(store.set_rating(1, 5).is_ok());
        assert_eq!(store.rating(1), 5);
    }

    #[test]
    fn history_is_most_recent_first_and_capped() {
        let mut store = MemoryStore::new();
        for i in 0..12 {
            store.push_history(&[format!("item{i}")]);
        }
        assert_eq!(store.history().len(), HISTORY_LIMIT);
        assert_eq!(store.history()[0].ingredients, vec!["item11"]);
        assert_eq!(store.history()[9].ingredients, vec!["item2"]);
    }

    #[test]
    fn empty_search_not_recorded() {
        let mut store = MemoryStore::new();
        let empty: [&str; 0] = [];
        store.push_history(&empty);
        assert!(store.history().is_empty());
    }

    #[test]
    fn snapshot_round_trip() {
        let mut store = MemoryStore::new();
        store.toggle_favorite(4);
        store.set_rating(2, 3).unwrap();
        store.set_preferences(Preferences {
            dietary: vec!["vegan".to_owned()],
        });
        store.push_history(&["rice"]);

        let restored = MemoryStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn missing_snapshot_fields_default() {
        let store = MemoryStore::from_json(r#"{"favorites":[3]}"#).unwrap();
        assert!(store.is_favorite(3));
        assert!(store.history().is_empty());
        assert!(store.preferences().dietary.is_empty());
    }

    #[test]
    fn snapshot_ratings_are_range_checked() {
        let err = MemoryStore::from_json(r#"{"ratings":{"1":200}}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRating(200)));

        let err = MemoryStore::from_json(r#"{"ratings":{"1":4,"2":0}}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRating(0)));

        let store = MemoryStore::from_json(r#"{"ratings":{"1":4}}"#).unwrap();
        assert_eq!(store.rating(1), 4);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let err = MemoryStore::from_json("{not json").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn trait_views_match_state() {
        let mut store = MemoryStore::new();
        store.toggle_favorite(9);
        store.set_rating(9, 4).unwrap();
        assert_eq!(store.favorites().unwrap(), HashSet::from([9]));
        assert_eq!(store.ratings().unwrap(), HashMap::from([(9, 4)]));
    }
}
