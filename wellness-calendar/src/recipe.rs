use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    /// Preparation time in minutes.
    pub minutes: u32,
}

/// Read-only lookup into a recipe collection owned elsewhere.
pub trait RecipeCatalog {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe>;
}

impl RecipeCatalog for [Recipe] {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.iter().find(|recipe| &recipe.id == id)
    }
}

impl RecipeCatalog for Vec<Recipe> {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.as_slice().recipe(id)
    }
}

impl RecipeCatalog for HashMap<RecipeId, Recipe> {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.get(id)
    }
}

static SAMPLE_RECIPES: Lazy<Vec<Recipe>> = Lazy::new(|| {
    [
        ("overnight-oats", "Overnight Oats", 10),
        ("quinoa-bowl", "Quinoa Power Bowl", 25),
        ("salmon-greens", "Baked Salmon & Greens", 35),
        ("lentil-soup", "Red Lentil Soup", 40),
    ]
    .into_iter()
    .map(|(id, title, minutes)| Recipe {
        id: RecipeId::new(id),
        title: title.to_string(),
        minutes,
    })
    .collect()
});

/// Small built-in catalog used to seed a fresh session.
#[must_use]
pub fn sample_recipes() -> &'static [Recipe] {
    &SAMPLE_RECIPES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_and_map_catalogs_agree() {
        let map: HashMap<_, _> = sample_recipes()
            .iter()
            .map(|recipe| (recipe.id.clone(), recipe.clone()))
            .collect();

        for recipe in sample_recipes() {
            assert_eq!(sample_recipes().recipe(&recipe.id), Some(recipe));
            assert_eq!(map.recipe(&recipe.id), Some(recipe));
        }

        let missing = RecipeId::from("does-not-exist");
        assert!(sample_recipes().recipe(&missing).is_none());
        assert!(map.recipe(&missing).is_none());
    }
}
