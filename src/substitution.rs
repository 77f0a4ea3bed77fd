//! Substitution table, its lookup index, and the coverage resolver.
//!
//! The table maps an original ingredient to substitutes that can stand in
//! for it. Coverage is checked in both directions: a recipe ingredient is
//! covered when the user holds a substitute for it, or when the recipe
//! ingredient is itself a substitute for something the user holds.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;
use crate::matcher::{PreparedIngredients, contains};
use crate::normalize::normalize_with;
use crate::options::MatchOptions;
use crate::recipe::Recipe;

/// One row of the substitution table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionEntry {
    /// The ingredient being replaced.
    pub original: String,
    /// Acceptable replacements, in preference order.
    pub substitutes: Vec<String>,
}

/// Ordered substitution table as supplied with the catalog.
///
/// Serialized as a JSON object whose keys are originals and whose values
/// are substitute lists. Document order is preserved. A repeated original
/// keeps its first position and its last substitute list.
///
/// # Examples
///
/// ```
/// use pantrymatch::SubstitutionTable;
///
/// let table = SubstitutionTable::from_json(
///     r#"{"butter": ["margarine", "coconut oil"], "milk": ["oat milk"]}"#,
/// ).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.entries()[0].original, "butter");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: Vec<SubstitutionEntry>,
}

impl SubstitutionTable {
    /// Build a table from `(original, substitutes)` pairs in order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        entries.into_iter().collect()
    }

    /// Parse a JSON object of `original -> [substitutes]`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Parse`] when the input is not such an object.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// All entries in table order.
    pub fn entries(&self) -> &[SubstitutionEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` for an empty table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<S>)> for SubstitutionTable {
    fn from_iter<T: IntoIterator<Item = (S, Vec<S>)>>(iter: T) -> Self {
        let mut builder = TableBuilder::default();
        for (original, subs) in iter {
            builder.insert(
                original.into(),
                subs.into_iter().map(Into::into).collect(),
            );
        }
        builder.finish()
    }
}

/// Collects entries with mapping semantics: a repeated original replaces
/// the earlier substitutes but keeps the earlier position.
#[derive(Default)]
struct TableBuilder {
    entries: Vec<SubstitutionEntry>,
    positions: HashMap<String, usize>,
}

impl TableBuilder {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    fn insert(&mut self, original: String, substitutes: Vec<String>) {
        match self.positions.get(&original) {
            Some(&i) => self.entries[i].substitutes = substitutes,
            None => {
                self.positions.insert(original.clone(), self.entries.len());
                self.entries.push(SubstitutionEntry {
                    original,
                    substitutes,
                });
            }
        }
    }

    fn finish(self) -> SubstitutionTable {
        SubstitutionTable {
            entries: self.entries,
        }
    }
}

impl Serialize for SubstitutionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.original, &entry.substitutes)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SubstitutionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = SubstitutionTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from ingredient to a list of substitutes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut builder = TableBuilder::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((original, substitutes)) = map.next_entry::<String, Vec<String>>()? {
                    builder.insert(original, substitutes);
                }
                Ok(builder.finish())
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// A table entry with its names pre-normalized.
#[derive(Debug, Clone)]
struct IndexedEntry {
    original: String,
    substitutes: Vec<String>,
}

/// Normalized, indexed view of a [`SubstitutionTable`], built once at load.
///
/// Holds the normalized entries the resolver scans. Coverage is decided by
/// containment, so the resolver never consults the forward map (original
/// to entries) or the reverse map (substitute to entries); those back only
/// the exact lookups [`substitutes_for`](Self::substitutes_for) and
/// [`originals_for`](Self::originals_for). The [`MatchOptions`] used here travel with the index so
/// that user ingredients are normalized the same way at query time.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionIndex {
    table: SubstitutionTable,
    entries: Vec<IndexedEntry>,
    forward: HashMap<String, Vec<usize>>,
    reverse: HashMap<String, Vec<usize>>,
    options: MatchOptions,
}

impl SubstitutionIndex {
    /// Index `table` with default matching options.
    pub fn new(table: SubstitutionTable) -> Self {
        Self::with_options(table, MatchOptions::default())
    }

    /// Index `table` with explicit matching options.
    pub fn with_options(table: SubstitutionTable, options: MatchOptions) -> Self {
        let mut entries = Vec::with_capacity(table.len());
        let mut forward: HashMap<String, Vec<usize>> = HashMap::new();
        let mut reverse: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, entry) in table.entries().iter().enumerate() {
            let original = normalize_with(&entry.original, &options);
            let substitutes: Vec<String> = entry
                .substitutes
                .iter()
                .map(|s| normalize_with(s, &options))
                .collect();

            forward.entry(original.clone()).or_default().push(i);
            for sub in &substitutes {
                let slots = reverse.entry(sub.clone()).or_default();
                if slots.last() != Some(&i) {
                    slots.push(i);
                }
            }
            entries.push(IndexedEntry {
                original,
                substitutes,
            });
        }

        Self {
            table,
            entries,
            forward,
            reverse,
            options,
        }
    }

    /// The options names were normalized with.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// The underlying table.
    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Substitutes listed for exactly `ingredient` (after normalization).
    ///
    /// # Examples
    ///
    /// ```
    /// use pantrymatch::{SubstitutionIndex, SubstitutionTable};
    ///
    /// let index = SubstitutionIndex::new(SubstitutionTable::new([
    ///     ("egg", vec!["flax egg", "applesauce"]),
    /// ]));
    /// assert_eq!(index.substitutes_for("Eggs"), vec!["flax egg", "applesauce"]);
    /// assert!(index.substitutes_for("milk").is_empty());
    /// ```
    pub fn substitutes_for(&self, ingredient: &str) -> Vec<&str> {
        let key = normalize_with(ingredient, &self.options);
        self.forward
            .get(&key)
            .into_iter()
            .flatten()
            .flat_map(|&i| self.table.entries[i].substitutes.iter().map(String::as_str))
            .collect()
    }

    /// Originals for which exactly `substitute` (after normalization) is listed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantrymatch::{SubstitutionIndex, SubstitutionTable};
    ///
    /// let index = SubstitutionIndex::new(SubstitutionTable::new([
    ///     ("chicken", vec!["tofu", "tempeh"]),
    ///     ("shrimp", vec!["tofu"]),
    /// ]));
    /// assert_eq!(index.originals_for("tofu"), vec!["chicken", "shrimp"]);
    /// ```
    pub fn originals_for(&self, substitute: &str) -> Vec<&str> {
        let key = normalize_with(substitute, &self.options);
        self.reverse
            .get(&key)
            .into_iter()
            .flatten()
            .map(|&i| self.table.entries[i].original.as_str())
            .collect()
    }
}

/// Substitution coverage for one user ingredient list.
///
/// Whether the user holds a substitute (or an original) depends only on the
/// user's list, not on the recipe, so it is computed once per entry here.
/// Each recipe ingredient then only needs the containment checks against
/// entries that could possibly cover it.
#[derive(Debug)]
pub struct SubstitutionResolver<'a> {
    index: &'a SubstitutionIndex,
    /// Entry indices where the user holds at least one substitute.
    substitute_held: Vec<usize>,
    /// Entry indices where the user holds the original.
    original_held: Vec<usize>,
}

impl<'a> SubstitutionResolver<'a> {
    /// Precompute which entries the user can draw on.
    ///
    /// `user` should be prepared with [`SubstitutionIndex::options`].
    pub fn new(index: &'a SubstitutionIndex, user: &PreparedIngredients) -> Self {
        let mut substitute_held = Vec::new();
        let mut original_held = Vec::new();
        for (i, entry) in index.entries.iter().enumerate() {
            if entry
                .substitutes
                .iter()
                .any(|sub| user.matches_normalized(sub))
            {
                substitute_held.push(i);
            }
            if user.matches_normalized(&entry.original) {
                original_held.push(i);
            }
        }
        Self {
            index,
            substitute_held,
            original_held,
        }
    }

    /// Whether `recipe_ingredient` is covered by substitution.
    ///
    /// Only meaningful after a direct match has failed; substitution never
    /// overrides a direct hit.
    pub fn covers(&self, recipe_ingredient: &str) -> bool {
        self.covers_normalized(&normalize_with(recipe_ingredient, &self.index.options))
    }

    pub(crate) fn covers_normalized(&self, norm: &str) -> bool {
        let entries = &self.index.entries;

        // The user holds a substitute for an original named in this ingredient.
        let forward = self
            .substitute_held
            .iter()
            .any(|&i| contains(norm, &entries[i].original));

        // This ingredient is itself a substitute for an original the user holds.
        forward
            || self.original_held.iter().any(|&i| {
                entries[i]
                    .substitutes
                    .iter()
                    .any(|sub| contains(norm, sub))
            })
    }
}

/// One-off substitution coverage check.
///
/// # Examples
///
/// ```
/// use pantrymatch::{SubstitutionIndex, SubstitutionTable, substitution_covers};
///
/// let index = SubstitutionIndex::new(SubstitutionTable::new([
///     ("butter", vec!["margarine", "coconut oil"]),
/// ]));
///
/// // The user holds a substitute for the recipe's butter.
/// assert!(substitution_covers("unsalted butter", &["margarine"], &index));
/// // The recipe's coconut oil is itself a substitute for the user's butter.
/// assert!(substitution_covers("coconut oil", &["butter"], &index));
/// assert!(!substitution_covers("butter", &["milk"], &index));
/// ```
pub fn substitution_covers<S: AsRef<str>>(
    recipe_ingredient: &str,
    user_ingredients: &[S],
    index: &SubstitutionIndex,
) -> bool {
    let user = PreparedIngredients::new(user_ingredients, index.options());
    SubstitutionResolver::new(index, &user).covers(recipe_ingredient)
}

/// Substitutes that could replace a recipe ingredient the user lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionSuggestion {
    /// The recipe ingredient, as written in the recipe.
    pub ingredient: String,
    /// Substitutes from the first matching table entry.
    pub substitutes: Vec<String>,
}

/// List substitution options for every recipe ingredient not directly matched.
///
/// For each such ingredient, the first table entry (in table order) whose
/// original equals or is contained in the ingredient supplies the
/// substitutes. Ingredients with no such entry are skipped.
///
/// # Examples
///
/// ```
/// use pantrymatch::{
///     Catalog, PreparedIngredients, SubstitutionIndex, SubstitutionTable, suggest_substitutions,
/// };
///
/// let catalog = Catalog::from_json(r#"[{
///     "id": 1, "name": "Pancakes", "cuisine": "American",
///     "ingredients": ["flour", "milk", "egg"],
///     "nutrition": {"calories": 350, "protein": 9, "carbs": 50, "fat": 10, "fiber": 2},
///     "difficulty": "Easy", "cookTime": 20, "servings": 2
/// }]"#).unwrap();
/// let index = SubstitutionIndex::new(SubstitutionTable::new([
///     ("milk", vec!["oat milk", "soy milk"]),
/// ]));
/// let user = PreparedIngredients::new(&["flour", "egg"], index.options());
///
/// let suggestions = suggest_substitutions(&catalog.recipes()[0], &user, &index);
/// assert_eq!(suggestions.len(), 1);
/// assert_eq!(suggestions[0].ingredient, "milk");
/// assert_eq!(suggestions[0].substitutes, vec!["oat milk", "soy milk"]);
/// ```
pub fn suggest_substitutions(
    recipe: &Recipe,
    user: &PreparedIngredients,
    index: &SubstitutionIndex,
) -> Vec<SubstitutionSuggestion> {
    recipe
        .ingredients
        .iter()
        .filter_map(|ingredient| {
            let norm = normalize_with(ingredient, &index.options);
            if user.matches_normalized(&norm) {
                return None;
            }
            index
                .entries
                .iter()
                .position(|entry| contains(&norm, &entry.original))
                .map(|i| SubstitutionSuggestion {
                    ingredient: ingredient.clone(),
                    substitutes: index.table.entries[i].substitutes.clone(),
                })
        })
        .collect()
}
