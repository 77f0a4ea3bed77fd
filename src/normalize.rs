//! Canonical text form for ingredient comparison.
//!
//! Every comparison the engine performs (direct containment, substitution
//! lookup, suggestion keys) runs on strings produced by [`normalize`] or
//! [`normalize_with`], so the rules here define what "the same ingredient"
//! means throughout the crate.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::options::MatchOptions;

/// Canonicalize an ingredient string for comparison.
///
/// Applies, in order:
///
/// 1. lowercase
/// 2. trim leading and trailing whitespace
/// 3. strip a single trailing `s` (naive singularization)
/// 4. collapse internal whitespace runs to a single space
///
/// The singularization is deliberately naive: `"tomatoes"` becomes
/// `"tomatoe"` and `"hummus"` becomes `"hummu"`. Scoring constants were
/// tuned against this behavior.
///
/// # Examples
///
/// ```
/// use pantrymatch::normalize;
///
/// assert_eq!(normalize("  Black   Beans "), "black bean");
/// assert_eq!(normalize("Olive Oil"), "olive oil");
/// assert_eq!(normalize("hummus"), "hummu");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let trimmed = lower.trim();
    let singular = trimmed.strip_suffix('s').unwrap_or(trimmed);
    collapse_whitespace(singular)
}

/// Canonicalize with explicit [`MatchOptions`].
///
/// With default options this is identical to [`normalize`]. When
/// `fold_diacritics` is set, accents are stripped before the standard rules
/// apply, so `"Jalapeño"` and `"jalapeno"` normalize to the same string.
///
/// # Examples
///
/// ```
/// use pantrymatch::{normalize_with, MatchOptions};
///
/// let folding = MatchOptions { fold_diacritics: true };
/// assert_eq!(normalize_with("Jalape\u{00f1}os", &folding), "jalapeno");
/// assert_eq!(normalize_with("Jalape\u{00f1}os", &MatchOptions::default()), "jalape\u{00f1}o");
/// ```
pub fn normalize_with(s: &str, options: &MatchOptions) -> String {
    if options.fold_diacritics {
        normalize(&fold_diacritics(s))
    } else {
        normalize(s)
    }
}

/// Strip diacritics via NFD decomposition and removal of combining marks.
///
/// Returns [`Cow::Borrowed`] when nothing needed to change. ASCII input is
/// never decomposed.
///
/// # Examples
///
/// ```
/// use pantrymatch::normalize::fold_diacritics;
///
/// assert_eq!(fold_diacritics("cr\u{00e8}me fra\u{00ee}che"), "creme fraiche");
/// assert!(matches!(fold_diacritics("basil"), std::borrow::Cow::Borrowed(_)));
/// ```
pub fn fold_diacritics(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let stripped: String = s.nfd().filter(|c| !is_combining_mark(*c)).collect();

    if stripped == s {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(stripped)
    }
}

/// Replace every run of whitespace with a single ASCII space.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
