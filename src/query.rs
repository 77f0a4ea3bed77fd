//! Catalog-wide querying: score, filter and order recipes.
//!
//! With no user ingredients the query is a browse: every recipe, in catalog
//! order, unscored and unfiltered. Otherwise every recipe is scored, recipes
//! with no coverage at all are dropped, the filters in [`FilterCriteria`]
//! are applied, and the result is ordered.

use std::cmp::Ordering;

use tracing::debug;

use crate::matcher::PreparedIngredients;
use crate::options::{FilterCriteria, SortKey};
use crate::recipe::{Catalog, Recipe};
use crate::score::{ScoreResult, score_prepared};
use crate::substitution::{SubstitutionIndex, SubstitutionResolver};

/// A recipe paired with its score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeMatch<'a> {
    /// The catalog entry.
    pub recipe: &'a Recipe,
    /// How well the user's ingredients cover it.
    pub score: ScoreResult,
}

/// Compare two results by `key`.
///
/// `Match` orders by score descending; every other key orders ascending.
/// Calories compare with [`f64::total_cmp`], so the ordering is total.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use pantrymatch::{Catalog, RecipeMatch, ScoreResult, SortKey, compare_matches};
///
/// let catalog = Catalog::from_json(r#"[
///   {"id": 1, "name": "A", "cuisine": "X", "ingredients": ["a"],
///    "nutrition": {"calories": 100, "protein": 0, "carbs": 0, "fat": 0, "fiber": 0},
///    "difficulty": "Hard", "cookTime": 10, "servings": 1},
///   {"id": 2, "name": "B", "cuisine": "X", "ingredients": ["b"],
///    "nutrition": {"calories": 900, "protein": 0, "carbs": 0, "fat": 0, "fiber": 0},
///    "difficulty": "Easy", "cookTime": 50, "servings": 1}
/// ]"#).unwrap();
/// let a = RecipeMatch { recipe: catalog.get(1).unwrap(), score: ScoreResult::default() };
/// let b = RecipeMatch { recipe: catalog.get(2).unwrap(), score: ScoreResult::default() };
///
/// assert_eq!(compare_matches(&a, &b, SortKey::Time), Ordering::Less);
/// assert_eq!(compare_matches(&a, &b, SortKey::Difficulty), Ordering::Greater);
/// assert_eq!(compare_matches(&a, &b, SortKey::Calories), Ordering::Less);
/// ```
pub fn compare_matches(a: &RecipeMatch<'_>, b: &RecipeMatch<'_>, key: SortKey) -> Ordering {
    match key {
        SortKey::Match => b.score.score.cmp(&a.score.score),
        SortKey::Time => a.recipe.cook_time.cmp(&b.recipe.cook_time),
        SortKey::Difficulty => a.recipe.difficulty.cmp(&b.recipe.difficulty),
        SortKey::Calories => a
            .recipe
            .nutrition
            .calories
            .total_cmp(&b.recipe.nutrition.calories),
    }
}

/// Re-order results by `key` with a stable sort.
///
/// Equal keys keep their current relative order, so sorting by score first
/// and then by another key leaves score as the tiebreaker.
pub fn sort_matches(results: &mut [RecipeMatch<'_>], key: SortKey) {
    results.sort_by(|a, b| compare_matches(a, b, key));
}

/// Every recipe, unscored, in catalog order.
///
/// Use [`sort_matches`] to order the browse list by time, difficulty or
/// calories.
pub fn browse(catalog: &Catalog) -> Vec<RecipeMatch<'_>> {
    catalog
        .iter()
        .map(|recipe| RecipeMatch {
            recipe,
            score: ScoreResult::unscored(recipe),
        })
        .collect()
}

/// Score, filter and order the catalog for the user's ingredients.
///
/// # Arguments
///
/// * `user_ingredients` - Free-text ingredient names; empty means browse
/// * `filters` - Dietary, difficulty and cook-time filters plus sort key
/// * `catalog` - The recipe corpus
/// * `substitutions` - Indexed substitution table; its options govern
///   normalization of the user's ingredients
///
/// # Returns
///
/// For empty input, [`browse`] in catalog order with filters and sort key
/// ignored; pass the result to [`sort_matches`] to re-order it. Otherwise, recipes with a non-zero score
/// that pass every filter, ordered by score descending and then stably by
/// `filters.sort` when it is not [`SortKey::Match`].
///
/// # Examples
///
/// ```
/// use pantrymatch::{Catalog, FilterCriteria, SubstitutionIndex, match_recipes};
///
/// let catalog = Catalog::from_json(r#"[
///   {"id": 1, "name": "Toast", "cuisine": "American", "ingredients": ["bread", "butter"],
///    "nutrition": {"calories": 200, "protein": 5, "carbs": 25, "fat": 9, "fiber": 1},
///    "difficulty": "Easy", "cookTime": 5, "servings": 1},
///   {"id": 2, "name": "Rice", "cuisine": "Global", "ingredients": ["rice", "water"],
///    "nutrition": {"calories": 300, "protein": 6, "carbs": 60, "fat": 1, "fiber": 1},
///    "difficulty": "Easy", "cookTime": 20, "servings": 2}
/// ]"#).unwrap();
/// let subs = SubstitutionIndex::default();
///
/// let results = match_recipes(&["bread"], &FilterCriteria::default(), &catalog, &subs);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].recipe.id, 1);
/// assert_eq!(results[0].score.score, 50);
///
/// let none: [&str; 0] = [];
/// assert_eq!(match_recipes(&none, &FilterCriteria::default(), &catalog, &subs).len(), 2);
/// ```
pub fn match_recipes<'a, S: AsRef<str>>(
    user_ingredients: &[S],
    filters: &FilterCriteria,
    catalog: &'a Catalog,
    substitutions: &SubstitutionIndex,
) -> Vec<RecipeMatch<'a>> {
    if user_ingredients.is_empty() {
        return browse(catalog);
    }

    let user = PreparedIngredients::new(user_ingredients, substitutions.options());
    let resolver = SubstitutionResolver::new(substitutions, &user);

    let scored: Vec<RecipeMatch<'a>> = catalog
        .iter()
        .map(|recipe| RecipeMatch {
            recipe,
            score: score_prepared(recipe, &user, &resolver),
        })
        .filter(|m| m.score.score > 0)
        .collect();
    let scored_count = scored.len();

    let mut results: Vec<RecipeMatch<'a>> = scored
        .into_iter()
        .filter(|m| filters.accepts_dietary(m.recipe))
        .filter(|m| filters.difficulty.accepts(m.recipe.difficulty))
        .filter(|m| filters.accepts_cook_time(m.recipe))
        .collect();

    sort_matches(&mut results, SortKey::Match);
    if filters.sort != SortKey::Match {
        sort_matches(&mut results, filters.sort);
    }

    debug!(
        ingredients = user.len(),
        catalog = catalog.len(),
        scored = scored_count,
        returned = results.len(),
        sort = ?filters.sort,
        "matched recipes"
    );

    results
}
