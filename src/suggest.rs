//! Personalized "suggested for you" shortlist.
//!
//! Independent of ingredient matching: recipes are scored from the user's
//! favorites and ratings alone. Highly rated recipes (4 stars or more)
//! contribute their cuisine and dietary tags as affinities.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::recipe::Catalog;
use crate::store::PreferenceStore;

/// Maximum number of suggested recipes.
pub const SUGGESTION_LIMIT: usize = 6;

/// Ratings at or above this count as high.
const HIGH_RATING: u8 = 4;
const FAVORITE_POINTS: u32 = 10;
const CUISINE_POINTS: u32 = 5;
const DIETARY_POINTS: u32 = 2;
const RATING_MULTIPLIER: u32 = 2;

/// Rank recipes for the user and return up to [`SUGGESTION_LIMIT`] ids.
///
/// Each recipe earns:
///
/// - 10 points if it is a favorite
/// - 5 points if its cuisine matches a highly rated recipe's cuisine
/// - 2 points per dietary tag shared with highly rated recipes
/// - twice the user's own rating of it
///
/// Recipes with no points are dropped. Ties keep catalog order. Ratings for
/// ids not in the catalog are ignored.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use pantrymatch::{Catalog, suggest_recipes};
///
/// let catalog = Catalog::from_json(r#"[
///   {"id": 1, "name": "Pad Thai", "cuisine": "Thai", "ingredients": ["noodles"],
///    "nutrition": {"calories": 500, "protein": 20, "carbs": 60, "fat": 15, "fiber": 3},
///    "difficulty": "Medium", "cookTime": 30, "servings": 2},
///   {"id": 2, "name": "Green Curry", "cuisine": "Thai", "ingredients": ["curry paste"],
///    "nutrition": {"calories": 600, "protein": 25, "carbs": 20, "fat": 40, "fiber": 4},
///    "difficulty": "Medium", "cookTime": 35, "servings": 4},
///   {"id": 3, "name": "Toast", "cuisine": "American", "ingredients": ["bread"],
///    "nutrition": {"calories": 200, "protein": 5, "carbs": 25, "fat": 9, "fiber": 1},
///    "difficulty": "Easy", "cookTime": 5, "servings": 1}
/// ]"#).unwrap();
///
/// let ratings = HashMap::from([(1, 5)]);
/// let ids = suggest_recipes(&catalog, &HashSet::new(), &ratings);
/// // 1: cuisine 5 + own rating 10; 2: cuisine 5; 3: nothing.
/// assert_eq!(ids, vec![1, 2]);
/// ```
pub fn suggest_recipes(
    catalog: &Catalog,
    favorites: &HashSet<u32>,
    ratings: &HashMap<u32, u8>,
) -> Vec<u32> {
    let mut liked_cuisines: HashSet<&str> = HashSet::new();
    let mut liked_dietary: HashSet<&str> = HashSet::new();

    for (&id, &rating) in ratings {
        if rating < HIGH_RATING {
            continue;
        }
        if let Some(recipe) = catalog.get(id) {
            liked_cuisines.insert(recipe.cuisine.as_str());
            liked_dietary.extend(recipe.dietary.iter().map(String::as_str));
        }
    }

    let mut scored: Vec<(u32, u32)> = catalog
        .iter()
        .map(|recipe| {
            let mut points = 0;
            if favorites.contains(&recipe.id) {
                points += FAVORITE_POINTS;
            }
            if liked_cuisines.contains(recipe.cuisine.as_str()) {
                points += CUISINE_POINTS;
            }
            let shared = recipe
                .dietary
                .iter()
                .filter(|tag| liked_dietary.contains(tag.as_str()))
                .count();
            points += DIETARY_POINTS * shared as u32;
            let own = ratings.get(&recipe.id).copied().unwrap_or(0);
            points += RATING_MULTIPLIER * u32::from(own);
            (recipe.id, points)
        })
        .filter(|&(_, points)| points > 0)
        .collect();

    // Stable: equal points keep catalog order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(SUGGESTION_LIMIT);

    debug!(
        favorites = favorites.len(),
        ratings = ratings.len(),
        suggested = scored.len(),
        "ranked suggestions"
    );

    scored.into_iter().map(|(id, _)| id).collect()
}

/// [`suggest_recipes`] fed from a [`PreferenceStore`].
///
/// A store that fails to produce favorites or ratings is treated as having
/// none; the failure is logged and ranking continues.
pub fn suggest_from_store(catalog: &Catalog, store: &dyn PreferenceStore) -> Vec<u32> {
    let favorites = store.favorites().unwrap_or_else(|err| {
        warn!(error = %err, "favorites unavailable; ranking without them");
        HashSet::new()
    });
    let ratings = store.ratings().unwrap_or_else(|err| {
        warn!(error = %err, "ratings unavailable; ranking without them");
        HashMap::new()
    });
    suggest_recipes(catalog, &favorites, &ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::recipe::{Difficulty, Nutrition, Recipe};

    fn recipe(id: u32, cuisine: &str, dietary: &[&str]) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {id}"),
            cuisine: cuisine.to_owned(),
            description: String::new(),
            ingredients: vec!["water".to_owned()],
            steps: Vec::new(),
            nutrition: Nutrition::default(),
            difficulty: Difficulty::Easy,
            cook_time: 10,
            dietary: dietary.iter().map(|s| (*s).to_owned()).collect(),
            servings: 1,
            tags: Vec::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            recipe(1, "Italian", &["vegetarian"]),
            recipe(2, "Indian", &["vegetarian", "gluten-free"]),
            recipe(3, "Indian", &["vegan", "gluten-free"]),
            recipe(4, "Mexican", &[]),
            recipe(5, "Italian", &[]),
            recipe(6, "Japanese", &["vegan"]),
            recipe(7, "Mexican", &["vegan"]),
            recipe(8, "Indian", &["gluten-free"]),
            recipe(9, "Thai", &["vegetarian"]),
        ])
        .unwrap()
    }

    #[test]
    fn no_history_suggests_nothing() {
        let ids = suggest_recipes(&catalog(), &HashSet::new(), &HashMap::new());
        assert!(ids.is_empty());
    }

    #[test]
    fn favorite_alone_earns_a_place() {
        let ids = suggest_recipes(&catalog(), &HashSet::from([4]), &HashMap::new());
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn low_ratings_only_count_for_the_rated_recipe() {
        // Rating 3 < 4: no affinities, just 2 * 3 = 6 for recipe 1.
        let ids = suggest_recipes(&catalog(), &HashSet::new(), &HashMap::from([(1, 3)]));
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn favorite_with_rating_outranks_unsignalled_recipes() {
        let cat = catalog();
        let ratings = HashMap::from([(3, 5), (7, 2)]);
        let ids = suggest_recipes(&cat, &HashSet::from([7]), &ratings);
        // 3: cuisine 5 + vegan 2 + gluten-free 2 + rating 10 = 19
        // 7: favorite 10 + vegan 2 + rating 4 = 16
        // 2: cuisine 5 + gluten-free 2 = 7; 8: same = 7
        // 6: vegan 2
        assert_eq!(ids, vec![3, 7, 2, 8, 6]);
        assert!(!ids.contains(&4));
    }

    #[test]
    fn truncates_to_limit() {
        let cat = catalog();
        let favorites: HashSet<u32> = (1..=9).collect();
        let ids = suggest_recipes(&cat, &favorites, &HashMap::new());
        assert_eq!(ids.len(), SUGGESTION_LIMIT);
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn ratings_for_unknown_ids_are_ignored() {
        let ids = suggest_recipes(&catalog(), &HashSet::new(), &HashMap::from([(99, 5)]));
        assert!(ids.is_empty());
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn favorites(&self) -> Result<HashSet<u32>, StoreError> {
            Err(StoreError::Unavailable("disk offline".to_owned()))
        }

        fn ratings(&self) -> Result<HashMap<u32, u8>, StoreError> {
            Err(StoreError::Unavailable("disk offline".to_owned()))
        }
    }

    #[test]
    fn failing_store_degrades_to_empty() {
        assert!(suggest_from_store(&catalog(), &BrokenStore).is_empty());
    }
}
