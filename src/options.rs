//! Query configuration: matching options, filters and sort keys.
//!
//! [`FilterCriteria`] is the explicit, enumerated replacement for a loosely
//! typed filter object. [`MatchOptions`] controls how ingredient text is
//! canonicalized before comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::recipe::{Difficulty, Recipe};

/// Options that control ingredient text comparison.
///
/// # Defaults
///
/// - `fold_diacritics`: `false` (accented and unaccented names differ)
///
/// # Examples
///
/// ```
/// use pantrymatch::MatchOptions;
///
/// let opts = MatchOptions::default();
/// assert!(!opts.fold_diacritics);
///
/// let opts = MatchOptions { fold_diacritics: true };
/// assert!(opts.fold_diacritics);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchOptions {
    /// When `true`, accents are stripped before normalization so that
    /// `"jalapeño"` and `"jalapeno"` compare equal.
    pub fold_diacritics: bool,
}

/// Difficulty filter value.
///
/// Parsed leniently from user-facing strings: `"all"` or an empty string is
/// [`Any`](DifficultyFilter::Any), an exact level name selects that level,
/// and anything else is kept as [`Unrecognized`](DifficultyFilter::Unrecognized),
/// which matches no recipe rather than failing the query.
///
/// # Examples
///
/// ```
/// use pantrymatch::{Difficulty, DifficultyFilter};
///
/// assert_eq!(DifficultyFilter::from("all"), DifficultyFilter::Any);
/// assert_eq!(DifficultyFilter::from("Hard"), DifficultyFilter::Only(Difficulty::Hard));
/// assert!(!DifficultyFilter::from("Extreme").accepts(Difficulty::Easy));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DifficultyFilter {
    /// No difficulty restriction.
    #[default]
    Any,
    /// Only recipes of exactly this difficulty.
    Only(Difficulty),
    /// A value that names no known difficulty; accepts nothing.
    Unrecognized(String),
}

impl DifficultyFilter {
    /// Whether a recipe of `difficulty` passes this filter.
    pub fn accepts(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::Any => true,
            DifficultyFilter::Only(wanted) => *wanted == difficulty,
            DifficultyFilter::Unrecognized(_) => false,
        }
    }
}

impl From<&str> for DifficultyFilter {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == "all" {
            return DifficultyFilter::Any;
        }
        match Difficulty::from_name(value) {
            Some(level) => DifficultyFilter::Only(level),
            None => DifficultyFilter::Unrecognized(value.to_owned()),
        }
    }
}

impl From<String> for DifficultyFilter {
    fn from(value: String) -> Self {
        DifficultyFilter::from(value.as_str())
    }
}

impl From<DifficultyFilter> for String {
    fn from(value: DifficultyFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::Any => f.write_str("all"),
            DifficultyFilter::Only(level) => write!(f, "{level}"),
            DifficultyFilter::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Result ordering.
///
/// `Match` orders by score, best first. The other keys order ascending and
/// are applied on top of the score ordering with a stable sort, so equal
/// keys keep their score order.
///
/// Parsed leniently: an unknown name falls back to `Match`.
///
/// # Examples
///
/// ```
/// use pantrymatch::SortKey;
///
/// assert_eq!(SortKey::from("time"), SortKey::Time);
/// assert_eq!(SortKey::from("popularity"), SortKey::Match);
/// assert_eq!(SortKey::Calories.to_string(), "calories");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Score, descending.
    #[default]
    Match,
    /// Cook time in minutes, ascending.
    Time,
    /// Easy, then Medium, then Hard.
    Difficulty,
    /// Calories per base recipe, ascending.
    Calories,
}

impl SortKey {
    /// The lowercase name used in filter input.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Match => "match",
            SortKey::Time => "time",
            SortKey::Difficulty => "difficulty",
            SortKey::Calories => "calories",
        }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value {
            "time" => SortKey::Time,
            "difficulty" => SortKey::Difficulty,
            "calories" => SortKey::Calories,
            _ => SortKey::Match,
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::from(value.as_str())
    }
}

impl From<SortKey> for String {
    fn from(value: SortKey) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cook-time bound as it may arrive from a form field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCookTime {
    Int(i64),
    Float(f64),
    Text(String),
    Other(#[allow(dead_code)] serde::de::IgnoredAny),
}

impl RawCookTime {
    /// Leading integer of the value, if any.
    fn leading_int(&self) -> Option<i64> {
        match self {
            RawCookTime::Int(n) => Some(*n),
            RawCookTime::Float(x) if x.is_finite() => Some(x.trunc() as i64),
            RawCookTime::Text(text) => {
                let text = text.trim_start();
                let (negative, rest) = match text.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, text.strip_prefix('+').unwrap_or(text)),
                };
                let end = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                let n: i64 = rest[..end].parse().ok()?;
                Some(if negative { -n } else { n })
            }
            _ => None,
        }
    }
}

/// Accepts numbers, numeric strings (`"30"`, `"45 min"`) and null.
/// Anything non-positive or unparseable means no bound.
fn lenient_cook_time<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<RawCookTime>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|raw| raw.leading_int())
        .filter(|&n| n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX)))
}

/// Filters and ordering applied to scored results.
///
/// All filters are conjunctive. An empty `dietary` list, a difficulty of
/// [`DifficultyFilter::Any`] and a `max_cook_time` of `None` or `Some(0)`
/// each disable their filter.
///
/// # Examples
///
/// ```
/// use pantrymatch::{DifficultyFilter, FilterCriteria, SortKey};
///
/// let filters = FilterCriteria {
///     dietary: vec!["vegan".to_owned()],
///     difficulty: DifficultyFilter::from("Easy"),
///     max_cook_time: Some(30),
///     sort: SortKey::Time,
/// };
/// assert_eq!(filters.sort, SortKey::Time);
/// assert_eq!(FilterCriteria::default().max_cook_time, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Dietary tags that must all be present on a recipe.
    pub dietary: Vec<String>,
    /// Required difficulty.
    pub difficulty: DifficultyFilter,
    /// Inclusive upper bound on cook time in minutes.
    #[serde(deserialize_with = "lenient_cook_time")]
    pub max_cook_time: Option<u32>,
    /// Ordering of the final result list.
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Whether `recipe` passes the dietary, difficulty and cook-time filters.
    pub fn accepts(&self, recipe: &Recipe) -> bool {
        self.accepts_dietary(recipe)
            && self.difficulty.accepts(recipe.difficulty)
            && self.accepts_cook_time(recipe)
    }

    pub(crate) fn accepts_dietary(&self, recipe: &Recipe) -> bool {
        self.dietary
            .iter()
            .all(|tag| recipe.dietary.iter().any(|have| have == tag))
    }

    pub(crate) fn accepts_cook_time(&self, recipe: &Recipe) -> bool {
        match self.max_cook_time {
            Some(limit) if limit > 0 => recipe.cook_time <= limit,
            _ => true,
        }
    }
}
