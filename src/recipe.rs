//! Recipe records and the read-only catalog they live in.
//!
//! The catalog is loaded once (typically from JSON) and then passed by
//! reference into every scoring, query and suggestion call.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CatalogError;

/// Recipe difficulty, ordered `Easy < Medium < Hard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
}

impl Difficulty {
    /// Parse an exact, case-sensitive level name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The level's display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrition for the recipe's base serving count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    /// Energy in kcal.
    pub calories: f64,
    /// Protein in grams.
    pub protein: f64,
    /// Carbohydrates in grams.
    pub carbs: f64,
    /// Fat in grams.
    pub fat: f64,
    /// Fiber in grams.
    pub fiber: f64,
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier within the catalog.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Cuisine tag, e.g. `"Italian"`.
    pub cuisine: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Ingredient names in recipe order.
    pub ingredients: Vec<String>,
    /// Instruction steps in order.
    #[serde(default)]
    pub steps: Vec<String>,
    /// Nutrition for `servings` portions.
    pub nutrition: Nutrition,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Cook time in minutes.
    pub cook_time: u32,
    /// Dietary tags, e.g. `"vegan"`.
    #[serde(default)]
    pub dietary: Vec<String>,
    /// Base serving count the nutrition refers to.
    pub servings: u32,
    /// Free-text tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The read-only recipe corpus, in load order, with id lookup.
///
/// # Examples
///
/// ```
/// use pantrymatch::Catalog;
///
/// let catalog = Catalog::from_json(r#"[{
///     "id": 1, "name": "Toast", "cuisine": "American",
///     "ingredients": ["bread", "butter"],
///     "nutrition": {"calories": 200, "protein": 5, "carbs": 25, "fat": 9, "fiber": 1},
///     "difficulty": "Easy", "cookTime": 5, "servings": 1
/// }]"#).unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.get(1).map(|r| r.name.as_str()), Some("Toast"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Build a catalog, validating ids and serving counts.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateId`] when two recipes share an id
    /// - [`CatalogError::ZeroServings`] when a recipe has a base serving count of zero
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (index, recipe) in recipes.iter().enumerate() {
            if recipe.servings == 0 {
                return Err(CatalogError::ZeroServings { id: recipe.id });
            }
            if by_id.insert(recipe.id, index).is_some() {
                return Err(CatalogError::DuplicateId { id: recipe.id });
            }
            if recipe.ingredients.is_empty() {
                warn!(id = recipe.id, name = %recipe.name, "recipe has no ingredients and will always score 0");
            }
        }
        Ok(Self { recipes, by_id })
    }

    /// Parse a JSON array of recipes and build a catalog from it.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Parse`] for malformed JSON, plus everything
    /// [`Catalog::new`] rejects.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// Look up a recipe by id.
    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.by_id.get(&id).map(|&index| &self.recipes[index])
    }

    /// All recipes in load order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Iterate recipes in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns `true` for an empty catalog.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECIPES: &str = r#"[
        {
            "id": 1, "name": "Spaghetti Aglio e Olio", "cuisine": "Italian",
            "description": "Garlic and oil pasta.",
            "ingredients": ["spaghetti", "garlic", "olive oil"],
            "steps": ["Boil", "Toss"],
            "nutrition": {"calories": 520, "protein": 16, "carbs": 72, "fat": 18, "fiber": 3},
            "difficulty": "Easy", "cookTime": 20, "dietary": ["vegetarian"],
            "servings": 2, "tags": ["quick"]
        },
        {
            "id": 2, "name": "Beef Stew", "cuisine": "Irish",
            "ingredients": ["beef", "potato"],
            "nutrition": {"calories": 610.5, "protein": 40, "carbs": 30, "fat": 30, "fiber": 5},
            "difficulty": "Hard", "cookTime": 150, "servings": 6
        }
    ]"#;

    #[test]
    fn loads_recipes_in_order() {
        let catalog = Catalog::from_json(TWO_RECIPES).unwrap();
        let ids: Vec<u32> = catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn reads_camel_case_fields() {
        let catalog = Catalog::from_json(TWO_RECIPES).unwrap();
        let pasta = catalog.get(1).unwrap();
        assert_eq!(pasta.cook_time, 20);
        assert_eq!(pasta.difficulty, Difficulty::Easy);
        assert_eq!(pasta.dietary, vec!["vegetarian"]);
        assert_eq!(pasta.steps.len(), 2);
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let catalog = Catalog::from_json(TWO_RECIPES).unwrap();
        let stew = catalog.get(2).unwrap();
        assert!(stew.dietary.is_empty());
        assert!(stew.tags.is_empty());
        assert!(stew.description.is_empty());
        assert_eq!(stew.nutrition.calories, 610.5);
    }

    #[test]
    fn unknown_id_is_none() {
        let catalog = Catalog::from_json(TWO_RECIPES).unwrap();
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let catalog = Catalog::from_json(TWO_RECIPES).unwrap();
        let mut recipes = catalog.recipes().to_vec();
        recipes[1].id = 1;
        let err = Catalog::new(recipes).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id: 1 }));
    }

    #[test]
    fn rejects_zero_servings() {
        let catalog = Catalog::from_json(TWO_RECIPES).unwrap();
        let mut recipes = catalog.recipes().to_vec();
        recipes[0].servings = 0;
        let err = Catalog::new(recipes).unwrap_err();
        assert!(matches!(err, CatalogError::ZeroServings { id: 1 }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Catalog::from_json("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_difficulty() {
        let json = TWO_RECIPES.replace("\"Hard\"", "\"Brutal\"");
        assert!(Catalog::from_json(&json).is_err());
    }

    #[test]
    fn difficulty_ordering() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
    }

    #[test]
    fn difficulty_names_round_trip() {
        for level in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_name(level.as_str()), Some(level));
        }
        assert_eq!(Difficulty::from_name("medium"), None);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
