//! Shared fixtures for integration tests.
//!
//! The catalog is a slice of a real recipe corpus plus one recipe with no
//! ingredients; the substitution table is the full production table.

#![allow(dead_code)]

use pantrymatch::{Catalog, Recipe, SubstitutionIndex, SubstitutionTable};

const CATALOG_JSON: &str = include_str!("../fixtures/catalog.json");
const SUBSTITUTIONS_JSON: &str = include_str!("../fixtures/substitutions.json");

/// Id of the fixture recipe that has no ingredients.
pub const EMPTY_RECIPE_ID: u32 = 12;

pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).expect("fixture catalog parses")
}

pub fn substitutions() -> SubstitutionIndex {
    let table = SubstitutionTable::from_json(SUBSTITUTIONS_JSON).expect("fixture table parses");
    SubstitutionIndex::new(table)
}

pub fn recipe(catalog: &Catalog, id: u32) -> &Recipe {
    catalog.get(id).expect("fixture recipe exists")
}

/// User ingredient lists exercised by the property-style tests.
pub fn pantries() -> Vec<Vec<&'static str>> {
    vec![
        vec!["spaghetti", "garlic", "olive oil"],
        vec!["pasta", "garlic", "oil", "chili", "parsley", "parmesan cheese"],
        vec!["tofu", "soy sauce", "garlic", "ginger"],
        vec!["margarine"],
        vec!["rice", "egg"],
        vec!["Eggs ", "  TOMATOES", "red   onion"],
        vec!["nutritional yeast", "coconut milk", "chicken"],
        vec!["xyzzy", "plugh"],
        vec!["s"],
    ]
}
