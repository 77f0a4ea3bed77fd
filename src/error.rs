//! Error types for the fallible edges of the crate.
//!
//! Matching, scoring, querying and suggestion ranking are total. Only
//! loading data, talking to collaborators and serving scaling can fail.

use thiserror::Error;

/// Errors raised while loading a catalog or substitution table.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The input was not valid JSON for the expected shape.
    #[error("failed to parse corpus: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two recipes share an identifier.
    #[error("duplicate recipe id {id}")]
    DuplicateId {
        /// The repeated id.
        id: u32,
    },

    /// A recipe declares a base serving count of zero.
    #[error("recipe {id} has a base serving count of zero")]
    ZeroServings {
        /// The offending recipe.
        id: u32,
    },
}

/// Errors raised by a preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Ratings must be between 1 and 5 inclusive.
    #[error("rating {0} is outside 1..=5")]
    InvalidRating(u8),

    /// Stored data could not be decoded.
    #[error("stored preferences are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backing store could not be reached.
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by an ingredient detector.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The image bytes were empty or unreadable.
    #[error("image data is empty or unreadable")]
    InvalidImage,

    /// The detection backend failed.
    #[error("detection backend failed: {0}")]
    Backend(String),
}

/// Errors raised while scaling a recipe to a new serving count.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServingsError {
    /// Target serving count was zero.
    #[error("cannot scale to zero servings")]
    ZeroTarget,

    /// The recipe's base serving count was zero.
    #[error("recipe {id} has a base serving count of zero")]
    ZeroBase {
        /// The offending recipe.
        id: u32,
    },
}
