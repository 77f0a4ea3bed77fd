//! Per-recipe scoring against a user's ingredients.
//!
//! Each recipe ingredient is classified into exactly one of three tiers,
//! tried in order: direct match, substitution coverage, missing. The score
//! weights direct matches fully and substitutions at 60%, then adds a flat
//! bonus once coverage reaches 80%.

use serde::{Deserialize, Serialize};

use crate::matcher::PreparedIngredients;
use crate::normalize::normalize_with;
use crate::recipe::Recipe;
use crate::substitution::{SubstitutionIndex, SubstitutionResolver};

/// Weight of a direct match, in score points per whole recipe.
const MATCH_WEIGHT: f64 = 100.0;
/// Weight of a substituted ingredient.
const SUBSTITUTION_WEIGHT: f64 = 60.0;
/// Flat bonus once `COVERAGE_THRESHOLD` of the ingredients are available.
const COVERAGE_BONUS: f64 = 10.0;
const COVERAGE_THRESHOLD: f64 = 0.8;
/// Upper clamp on the final score.
pub const MAX_SCORE: u8 = 100;

/// How a single recipe ingredient was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    /// A user ingredient matched it directly.
    Matched,
    /// A substitution covers it.
    Substituted,
    /// Nothing the user holds satisfies it.
    Missing,
}

/// Score and ingredient classification of one recipe for one query.
///
/// The three lists partition the recipe's ingredient list: every
/// ingredient appears in exactly one of them, in recipe order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Score in `0..=100`.
    pub score: u8,
    /// Number of directly matched ingredients.
    pub matched: usize,
    /// Number of substituted ingredients.
    pub substituted: usize,
    /// Number of missing ingredients.
    pub missing: usize,
    /// Directly matched ingredients.
    pub matched_list: Vec<String>,
    /// Ingredients covered by substitution.
    #[serde(rename = "subList")]
    pub substituted_list: Vec<String>,
    /// Ingredients the user lacks.
    pub missing_list: Vec<String>,
}

impl ScoreResult {
    /// The unscored result: every ingredient missing, score 0.
    pub fn unscored(recipe: &Recipe) -> Self {
        Self {
            score: 0,
            matched: 0,
            substituted: 0,
            missing: recipe.ingredients.len(),
            matched_list: Vec::new(),
            substituted_list: Vec::new(),
            missing_list: recipe.ingredients.clone(),
        }
    }

    /// Returns `true` when at least one ingredient matched or was substituted.
    pub fn has_any_coverage(&self) -> bool {
        self.matched + self.substituted > 0
    }

    fn push(&mut self, ingredient: &str, coverage: Coverage) {
        match coverage {
            Coverage::Matched => {
                self.matched += 1;
                self.matched_list.push(ingredient.to_owned());
            }
            Coverage::Substituted => {
                self.substituted += 1;
                self.substituted_list.push(ingredient.to_owned());
            }
            Coverage::Missing => {
                self.missing += 1;
                self.missing_list.push(ingredient.to_owned());
            }
        }
    }
}

/// Compose the 0-100 score from tier counts.
///
/// A total of zero yields 0 rather than dividing by zero.
///
/// # Examples
///
/// ```
/// use pantrymatch::score::compose_score;
///
/// assert_eq!(compose_score(3, 0, 6), 50);
/// // 4/5 matched reaches the 80% threshold: 80 + 10.
/// assert_eq!(compose_score(4, 0, 5), 90);
/// // Full coverage is clamped to 100.
/// assert_eq!(compose_score(5, 0, 5), 100);
/// assert_eq!(compose_score(0, 0, 0), 0);
/// ```
pub fn compose_score(matched: usize, substituted: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let total = total as f64;
    let base = (matched as f64 / total) * MATCH_WEIGHT;
    let sub_bonus = (substituted as f64 / total) * SUBSTITUTION_WEIGHT;
    let coverage = (matched + substituted) as f64 / total;
    let coverage_bonus = if coverage >= COVERAGE_THRESHOLD {
        COVERAGE_BONUS
    } else {
        0.0
    };

    // Inputs are non-negative, so `round` (half away from zero) is half-up.
    let raw = (base + sub_bonus + coverage_bonus).round();
    raw.min(f64::from(MAX_SCORE)) as u8
}

/// Hot-path scorer over prepared user data.
///
/// `user` and `resolver` must have been built from the same ingredient list
/// and with the substitution index's options.
pub(crate) fn score_prepared(
    recipe: &Recipe,
    user: &PreparedIngredients,
    resolver: &SubstitutionResolver<'_>,
) -> ScoreResult {
    let mut result = ScoreResult::default();
    let options = user.options();

    for ingredient in &recipe.ingredients {
        let norm = normalize_with(ingredient, options);
        let coverage = if user.matches_normalized(&norm) {
            Coverage::Matched
        } else if resolver.covers_normalized(&norm) {
            Coverage::Substituted
        } else {
            Coverage::Missing
        };
        result.push(ingredient, coverage);
    }

    result.score = compose_score(
        result.matched,
        result.substituted,
        recipe.ingredients.len(),
    );
    result
}

/// Score a recipe against the user's ingredients.
///
/// A recipe with no ingredients scores 0 with all lists empty.
///
/// # Examples
///
/// ```
/// use pantrymatch::{Catalog, SubstitutionIndex, score_recipe};
///
/// let catalog = Catalog::from_json(r#"[{
///     "id": 1, "name": "Spaghetti Aglio e Olio", "cuisine": "Italian",
///     "ingredients": ["spaghetti", "garlic", "olive oil", "red chili flakes", "parsley", "parmesan"],
///     "nutrition": {"calories": 520, "protein": 16, "carbs": 72, "fat": 18, "fiber": 3},
///     "difficulty": "Easy", "cookTime": 20, "servings": 2
/// }]"#).unwrap();
///
/// let result = score_recipe(
///     &catalog.recipes()[0],
///     &["spaghetti", "garlic", "olive oil"],
///     &SubstitutionIndex::default(),
/// );
/// assert_eq!(result.score, 50);
/// assert_eq!(result.matched, 3);
/// assert_eq!(result.missing_list, vec!["red chili flakes", "parsley", "parmesan"]);
/// ```
pub fn score_recipe<S: AsRef<str>>(
    recipe: &Recipe,
    user_ingredients: &[S],
    substitutions: &SubstitutionIndex,
) -> ScoreResult {
    let user = PreparedIngredients::new(user_ingredients, substitutions.options());
    let resolver = SubstitutionResolver::new(substitutions, &user);
    score_prepared(recipe, &user, &resolver)
}
