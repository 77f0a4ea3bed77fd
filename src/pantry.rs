//! The user's working ingredient list for a session.

use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated list of ingredients the user has on hand.
///
/// Entries are stored trimmed and lowercased. Duplicates are detected on
/// that raw lowercased form, not on the normalized comparison form, so
/// `"egg"` and `"eggs"` are both kept.
///
/// # Examples
///
/// ```
/// use pantrymatch::Pantry;
///
/// let mut pantry = Pantry::new();
/// assert_eq!(pantry.add_input(" Rice, EGGS ,, soy sauce"), 3);
/// assert_eq!(pantry.add_input("rice"), 0);
/// assert_eq!(pantry.as_slice(), ["rice", "eggs", "soy sauce"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pantry {
    items: Vec<String>,
}

impl Pantry {
    /// An empty pantry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one ingredient. Returns `true` if it was not already present.
    ///
    /// Blank input is ignored.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let item = ingredient.trim().to_lowercase();
        if item.is_empty() || self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Add every comma-separated ingredient in `input`.
    ///
    /// Returns how many new ingredients were added.
    pub fn add_input(&mut self, input: &str) -> usize {
        input.split(',').filter(|part| self.add(part)).count()
    }

    /// Add ingredient names produced by a detector.
    ///
    /// Detected names get no special treatment; they are added exactly like
    /// typed input. Returns how many were new.
    pub fn extend_detected<S: AsRef<str>>(&mut self, detected: &[S]) -> usize {
        detected
            .iter()
            .filter(|name| self.add((*name).as_ref()))
            .count()
    }

    /// Remove the ingredient at `index`, returning it if the index was valid.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove every ingredient.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether `ingredient` (trimmed, lowercased) is present.
    pub fn contains(&self, ingredient: &str) -> bool {
        let item = ingredient.trim().to_lowercase();
        self.items.contains(&item)
    }

    /// The ingredients in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Number of ingredients.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the pantry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Pantry {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut pantry = Pantry::new();
        for item in iter {
            pantry.add(item.as_ref());
        }
        pantry
    }
}
