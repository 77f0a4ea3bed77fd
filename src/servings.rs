//! Linear serving-size scaling.

use serde::{Deserialize, Serialize};

use crate::error::ServingsError;
use crate::recipe::Recipe;

/// Nutrition totals rounded to whole units after scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedNutrition {
    /// Energy in kcal.
    pub calories: u32,
    /// Protein in grams.
    pub protein: u32,
    /// Carbohydrates in grams.
    pub carbs: u32,
    /// Fat in grams.
    pub fat: u32,
    /// Fiber in grams.
    pub fiber: u32,
}

/// A recipe's nutrition scaled to a different serving count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledNutrition {
    /// `target / base` servings; ingredient amounts scale by this too.
    pub ratio: f64,
    /// Scaled, rounded nutrition totals.
    pub nutrition: RoundedNutrition,
}

fn scale(value: f64, ratio: f64) -> u32 {
    // Negative inputs saturate to 0 in the cast.
    (value * ratio).round() as u32
}

/// Scale a recipe's nutrition from its base serving count to `servings`.
///
/// # Errors
///
/// - [`ServingsError::ZeroTarget`] when `servings` is 0
/// - [`ServingsError::ZeroBase`] when the recipe's base count is 0
///
/// # Examples
///
/// ```
/// use pantrymatch::{Catalog, scale_nutrition};
///
/// let catalog = Catalog::from_json(r#"[{
///     "id": 1, "name": "Aglio e Olio", "cuisine": "Italian", "ingredients": ["spaghetti"],
///     "nutrition": {"calories": 520, "protein": 16, "carbs": 72, "fat": 18, "fiber": 3},
///     "difficulty": "Easy", "cookTime": 20, "servings": 2
/// }]"#).unwrap();
///
/// let scaled = scale_nutrition(&catalog.recipes()[0], 3).unwrap();
/// assert_eq!(scaled.ratio, 1.5);
/// assert_eq!(scaled.nutrition.calories, 780);
/// assert_eq!(scaled.nutrition.fiber, 5); // 4.5 rounds up
/// ```
pub fn scale_nutrition(recipe: &Recipe, servings: u32) -> Result<ScaledNutrition, ServingsError> {
    if servings == 0 {
        return Err(ServingsError::ZeroTarget);
    }
    if recipe.servings == 0 {
        return Err(ServingsError::ZeroBase { id: recipe.id });
    }

    let ratio = f64::from(servings) / f64::from(recipe.servings);
    let n = &recipe.nutrition;
    Ok(ScaledNutrition {
        ratio,
        nutrition: RoundedNutrition {
            calories: scale(n.calories, ratio),
            protein: scale(n.protein, ratio),
            carbs: scale(n.carbs, ratio),
            fat: scale(n.fat, ratio),
            fiber: scale(n.fiber, ratio),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{Difficulty, Nutrition};

    fn recipe(servings: u32) -> Recipe {
        Recipe {
            id: 11,
            name: "Stew".to_owned(),
            cuisine: "Irish".to_owned(),
            description: String::new(),
            ingredients: vec!["beef".to_owned()],
            steps: Vec::new(),
            nutrition: Nutrition {
                calories: 600.0,
                protein: 45.0,
                carbs: 30.0,
                fat: 25.0,
                fiber: 5.0,
            },
            difficulty: Difficulty::Medium,
            cook_time: 120,
            dietary: Vec::new(),
            servings,
            tags: Vec::new(),
        }
    }

    #[test]
    fn same_servings_is_identity() {
        let scaled = scale_nutrition(&recipe(4), 4).unwrap();
        assert_eq!(scaled.ratio, 1.0);
        assert_eq!(scaled.nutrition.calories, 600);
        assert_eq!(scaled.nutrition.fiber, 5);
    }

    #[test]
    fn halving_rounds_each_field() {
        let scaled = scale_nutrition(&recipe(4), 2).unwrap();
        assert_eq!(
            scaled.nutrition,
            RoundedNutrition {
                calories: 300,
                protein: 23,
                carbs: 15,
                fat: 13,
                fiber: 3,
            }
        );
    }

    #[test]
    fn scaling_up() {
        let scaled = scale_nutrition(&recipe(2), 6).unwrap();
        assert_eq!(scaled.ratio, 3.0);
        assert_eq!(scaled.nutrition.protein, 135);
    }

    #[test]
    fn zero_target_is_rejected() {
        assert_eq!(scale_nutrition(&recipe(2), 0), Err(ServingsError::ZeroTarget));
    }

    #[test]
    fn zero_base_is_rejected() {
        assert_eq!(
            scale_nutrition(&recipe(0), 2),
            Err(ServingsError::ZeroBase { id: 11 })
        );
    }
}
