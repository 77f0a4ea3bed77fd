#![warn(missing_docs)]

//! Ingredient-driven recipe matching and ranking.
//!
//! `pantrymatch` scores every recipe in a fixed catalog against the
//! ingredients a user has on hand. Each recipe ingredient is classified as
//! directly matched, covered by a substitution, or missing, and those
//! counts compose into a 0-100 score. Results can be filtered by dietary
//! tags, difficulty and cook time, and ordered by score, time, difficulty
//! or calories. A separate ranker builds a personalized shortlist from
//! favorites and ratings.
//!
//! The catalog and substitution table are loaded once and passed by
//! reference into every call; nothing in the engine holds global state.

/// Canonical text form used by every ingredient comparison.
pub mod normalize;

/// Direct containment matching of recipe ingredients against the user's list.
pub mod matcher;

/// Substitution table, lookup index and coverage resolver.
pub mod substitution;

/// Recipe records and the read-only catalog.
pub mod recipe;

/// Per-recipe scoring and ingredient classification.
pub mod score;

/// Matching options, filter criteria and sort keys.
pub mod options;

/// Catalog-wide scoring, filtering and ordering.
pub mod query;

/// The user's session ingredient list.
pub mod pantry;

/// Image-based ingredient detection boundary.
pub mod detect;

/// Preference persistence boundary and an in-memory store.
pub mod store;

/// Personalized recipe suggestions from favorites and ratings.
pub mod suggest;

/// Serving-size scaling of nutrition.
pub mod servings;

/// Error types.
pub mod error;

// Re-export primary public API types and functions at the crate root.
pub use detect::{IngredientDetector, detect_ingredients, map_labels_to_ingredients};
pub use error::{CatalogError, DetectError, ServingsError, StoreError};
pub use matcher::{PreparedIngredients, ingredient_matches};
pub use normalize::{normalize, normalize_with};
pub use options::{DifficultyFilter, FilterCriteria, MatchOptions, SortKey};
pub use pantry::Pantry;
pub use query::{RecipeMatch, browse, compare_matches, match_recipes, sort_matches};
pub use recipe::{Catalog, Difficulty, Nutrition, Recipe};
pub use score::{Coverage, ScoreResult, score_recipe};
pub use servings::{RoundedNutrition, ScaledNutrition, scale_nutrition};
pub use store::{HistoryEntry, MemoryStore, PreferenceStore, Preferences};
pub use substitution::{
    SubstitutionEntry, SubstitutionIndex, SubstitutionResolver, SubstitutionSuggestion,
    SubstitutionTable, substitution_covers, suggest_substitutions,
};
pub use suggest::{suggest_from_store, suggest_recipes};
