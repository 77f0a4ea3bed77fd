//! Image-based ingredient detection boundary.
//!
//! Detection itself is an external oracle. This module defines the seam a
//! detector plugs into and the mapping from generic food labels (as vision
//! services report them) to ingredient names used by the catalog.

use tracing::warn;

use crate::error::DetectError;

/// An external service that guesses ingredient names from an image.
pub trait IngredientDetector {
    /// Return ingredient name guesses for the encoded image.
    fn detect(&self, image: &[u8]) -> Result<Vec<String>, DetectError>;
}

/// Food label keywords and the catalog ingredient each one stands for.
///
/// Checked in order; the first keyword contained in a label wins, so more
/// specific keywords must precede shorter ones they contain.
pub const FOOD_LABELS: &[(&str, &str)] = &[
    // Vegetables
    ("tomato", "tomato"),
    ("carrot", "carrot"),
    ("broccoli", "broccoli"),
    ("spinach", "spinach"),
    ("onion", "onion"),
    ("garlic", "garlic"),
    ("potato", "potato"),
    ("cucumber", "cucumber"),
    ("pepper", "bell pepper"),
    ("capsicum", "bell pepper"),
    ("mushroom", "mushroom"),
    ("celery", "celery"),
    ("zucchini", "zucchini"),
    ("eggplant", "eggplant"),
    ("kale", "kale"),
    ("lettuce", "romaine lettuce"),
    ("cabbage", "cabbage"),
    ("corn", "corn"),
    ("pea", "peas"),
    ("bean", "black beans"),
    ("lemon", "lemon"),
    ("lime", "lime"),
    // Fruits
    ("banana", "banana"),
    ("apple", "apple"),
    ("avocado", "avocado"),
    ("strawberry", "strawberry"),
    ("blueberry", "blueberry"),
    // Proteins
    ("chicken", "chicken breast"),
    ("beef", "ground beef"),
    ("salmon", "salmon"),
    ("shrimp", "shrimp"),
    ("egg", "egg"),
    ("tofu", "tofu"),
    // Dairy
    ("cheese", "cheese"),
    ("milk", "milk"),
    ("butter", "butter"),
    ("cream", "heavy cream"),
    ("yogurt", "yogurt"),
    // Grains
    ("bread", "bread"),
    ("rice", "rice"),
    ("pasta", "spaghetti"),
    ("noodle", "rice noodles"),
    ("flour", "flour"),
    ("oat", "oats"),
    // Pantry
    ("olive oil", "olive oil"),
    ("soy sauce", "soy sauce"),
];

/// Map raw vision labels to catalog ingredient names.
///
/// Each label is lowercased and assigned the ingredient of the first
/// keyword in [`FOOD_LABELS`] it contains. Labels with no keyword are
/// dropped, and each ingredient appears once, in first-seen order.
///
/// # Examples
///
/// ```
/// use pantrymatch::map_labels_to_ingredients;
///
/// let labels = ["Cherry tomato", "Red bell pepper", "Tableware", "Plum tomato"];
/// assert_eq!(map_labels_to_ingredients(&labels), vec!["tomato", "bell pepper"]);
/// ```
pub fn map_labels_to_ingredients<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut ingredients: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().to_lowercase();
        let found = FOOD_LABELS
            .iter()
            .find(|(keyword, _)| label.contains(keyword));
        if let Some((_, ingredient)) = found {
            if !ingredients.iter().any(|have| have == ingredient) {
                ingredients.push((*ingredient).to_owned());
            }
        }
    }
    ingredients
}

/// Run a detector, degrading to no ingredients on failure.
///
/// Detection output is advisory; a failing backend must not block the
/// user from continuing with manually typed ingredients.
pub fn detect_ingredients(detector: &dyn IngredientDetector, image: &[u8]) -> Vec<String> {
    match detector.detect(image) {
        Ok(names) => names,
        Err(err) => {
            warn!(error = %err, bytes = image.len(), "ingredient detection failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector(Vec<&'static str>);

    impl IngredientDetector for FixedDetector {
        fn detect(&self, image: &[u8]) -> Result<Vec<String>, DetectError> {
            if image.is_empty() {
                return Err(DetectError::InvalidImage);
            }
            Ok(self.0.iter().map(|s| (*s).to_owned()).collect())
        }
    }

    #[test]
    fn maps_case_insensitively() {
        assert_eq!(map_labels_to_ingredients(&["BROCCOLI"]), vec!["broccoli"]);
    }

    #[test]
    fn first_keyword_in_table_order_wins() {
        // "pepper" precedes "bean" in the table.
        assert_eq!(map_labels_to_ingredients(&["bean pepper mix"]), vec!["bell pepper"]);
    }

    #[test]
    fn substring_keywords_apply() {
        assert_eq!(map_labels_to_ingredients(&["Chickpea"]), vec!["peas"]);
        assert_eq!(map_labels_to_ingredients(&["Whole wheat bread"]), vec!["bread"]);
    }

    #[test]
    fn unknown_labels_are_dropped() {
        let labels = ["Tableware", "Kitchen", "Recipe"];
        assert!(map_labels_to_ingredients(&labels).is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let labels = ["Chicken thigh", "Roast chicken", "Egg"];
        assert_eq!(map_labels_to_ingredients(&labels), vec!["chicken breast", "egg"]);
    }

    #[test]
    fn detect_passes_names_through() {
        let detector = FixedDetector(vec!["tomato", "basil"]);
        assert_eq!(detect_ingredients(&detector, b"\x89PNG"), vec!["tomato", "basil"]);
    }

    #[test]
    fn detect_failure_yields_empty() {
        let detector = FixedDetector(vec!["tomato"]);
        assert!(detect_ingredients(&detector, &[]).is_empty());
    }
}
