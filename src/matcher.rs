//! Direct containment matching between recipe and user ingredients.
//!
//! A recipe ingredient is satisfied directly when, after normalization, it
//! contains a user ingredient or is contained by one. The test is symmetric
//! and intentionally permissive: user `"oil"` satisfies `"olive oil"`, and
//! `"egg"` satisfies `"eggplant"`.

use memchr::memmem;

use crate::normalize::normalize_with;
use crate::options::MatchOptions;

/// Non-strict substring test on normalized strings.
///
/// An empty needle is contained in every haystack.
pub(crate) fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || memmem::find(haystack.as_bytes(), needle.as_bytes()).is_some()
}

/// Symmetric containment: either string contains the other.
pub(crate) fn overlaps(a: &str, b: &str) -> bool {
    if a.len() >= b.len() {
        contains(a, b)
    } else {
        contains(b, a)
    }
}

/// A user's ingredient list, normalized once for repeated matching.
///
/// Scoring a catalog checks every recipe ingredient against every user
/// ingredient. Normalizing the user side up front keeps that inner loop to
/// a single normalization of the recipe ingredient plus substring searches.
///
/// # Examples
///
/// ```
/// use pantrymatch::{MatchOptions, PreparedIngredients};
///
/// let user = PreparedIngredients::new(&["Garlic", "oil"], &MatchOptions::default());
/// assert!(user.matches("garlic"));
/// assert!(user.matches("olive oil"));
/// assert!(!user.matches("parsley"));
/// ```
#[derive(Debug, Clone)]
pub struct PreparedIngredients {
    normalized: Vec<String>,
    options: MatchOptions,
}

impl PreparedIngredients {
    /// Normalize every user ingredient under `options`.
    pub fn new<S: AsRef<str>>(user_ingredients: &[S], options: &MatchOptions) -> Self {
        let normalized = user_ingredients
            .iter()
            .map(|ui| normalize_with(ui.as_ref(), options))
            .collect();
        Self {
            normalized,
            options: options.clone(),
        }
    }

    /// Returns `true` when no user ingredients were supplied.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Number of user ingredients.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// The options the user ingredients were normalized with.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Whether any user ingredient directly satisfies `recipe_ingredient`.
    pub fn matches(&self, recipe_ingredient: &str) -> bool {
        self.matches_normalized(&normalize_with(recipe_ingredient, &self.options))
    }

    /// Same as [`matches`](Self::matches) for an already-normalized name.
    pub(crate) fn matches_normalized(&self, norm: &str) -> bool {
        self.normalized.iter().any(|ui| overlaps(norm, ui))
    }
}

/// Decide whether a recipe ingredient is directly matched by the user's list.
///
/// One-off convenience over [`PreparedIngredients`]; prefer the prepared
/// form when matching many ingredients against the same list.
///
/// # Examples
///
/// ```
/// use pantrymatch::ingredient_matches;
///
/// assert!(ingredient_matches("red chili flakes", &["chili"]));
/// assert!(ingredient_matches("parmesan", &["parmesan cheese"]));
/// assert!(!ingredient_matches("spaghetti", &["pasta"]));
/// ```
pub fn ingredient_matches<S: AsRef<str>>(recipe_ingredient: &str, user_ingredients: &[S]) -> bool {
    PreparedIngredients::new(user_ingredients, &MatchOptions::default()).matches(recipe_ingredient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_after_normalization() {
        assert!(ingredient_matches("Tomatoes", &["tomato"]));
    }

    #[test]
    fn user_contained_in_recipe() {
        assert!(ingredient_matches("olive oil", &["oil"]));
    }

    #[test]
    fn recipe_contained_in_user() {
        assert!(ingredient_matches("parmesan", &["parmesan cheese"]));
    }

    #[test]
    fn short_tokens_over_match() {
        assert!(ingredient_matches("eggplant", &["egg"]));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        assert!(!ingredient_matches("spaghetti", &["pasta", "garlic"]));
    }

    #[test]
    fn empty_user_list_matches_nothing() {
        let empty: [&str; 0] = [];
        assert!(!ingredient_matches("garlic", &empty));
    }

    #[test]
    fn blank_user_entry_matches_everything() {
        // A lone "s" normalizes to the empty string, which every name contains.
        assert!(ingredient_matches("saffron", &["s"]));
    }

    #[test]
    fn whitespace_variants_match() {
        assert!(ingredient_matches("soy   sauce", &[" Soy Sauce "]));
    }

    #[test]
    fn prepared_reports_len() {
        let prepared = PreparedIngredients::new(&["a", "b"], &MatchOptions::default());
        assert_eq!(prepared.len(), 2);
        assert!(!prepared.is_empty());
    }

    #[test]
    fn folding_lets_accents_match() {
        let opts = MatchOptions {
            fold_diacritics: true,
        };
        let prepared = PreparedIngredients::new(&["jalapeno"], &opts);
        assert!(prepared.matches("jalape\u{00f1}o"));

        let strict = PreparedIngredients::new(&["jalapeno"], &MatchOptions::default());
        assert!(!strict.matches("jalape\u{00f1}o"));
    }

    #[test]
    fn contains_handles_empty_needle() {
        assert!(contains("abc", ""));
        assert!(contains("", ""));
        assert!(!contains("", "a"));
    }

    #[test]
    fn overlaps_is_symmetric() {
        assert!(overlaps("olive oil", "oil"));
        assert!(overlaps("oil", "olive oil"));
        assert!(!overlaps("oil", "vinegar"));
    }
}
