use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::model::IngredientList;

/// Key under which the managed recipes live inside the store file.
pub const MANAGED_RECIPES_KEY: &str = "managedRecipes";

/// On-disk layout: a single string-keyed slot holding the recipe list, matching
/// the `managedRecipes` browser-storage slot of earlier versions of this tool.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(rename = "managedRecipes", default)]
    managed_recipes: Vec<IngredientList>,
}

/// The user-curated collection of recipes with known ingredients.
///
/// Consulted by the search dispatcher before any external lookup and maintained
/// through the admin commands. A missing file reads as the empty collection;
/// malformed JSON is reported as a [`SearchError`] rather than left to panic.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    path: PathBuf,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecipeStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the managed recipes in their stored order.
    pub async fn load(&self) -> Result<Vec<IngredientList>, SearchError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let file: StoreFile = serde_json::from_slice(&bytes)?;
                Ok(file.managed_recipes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no managed-recipes file at {:?}, using empty list", self.path);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the whole collection.
    pub async fn save(&self, recipes: &[IngredientList]) -> Result<(), SearchError> {
        let file = StoreFile {
            managed_recipes: recipes.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&file)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    /// Case-insensitive exact match of a stored recipe name.
    pub async fn find(&self, recipe_name: &str) -> Result<Option<IngredientList>, SearchError> {
        let needle = recipe_name.to_lowercase();
        let recipes = self.load().await?;
        Ok(recipes
            .into_iter()
            .find(|r| r.recipe_name.to_lowercase() == needle))
    }

    /// Insert a recipe, replacing any existing entry with the same name
    /// (case-insensitive). New entries append, preserving order.
    pub async fn upsert(&self, recipe: IngredientList) -> Result<(), SearchError> {
        let mut recipes = self.load().await?;
        let needle = recipe.recipe_name.to_lowercase();
        match recipes
            .iter_mut()
            .find(|r| r.recipe_name.to_lowercase() == needle)
        {
            Some(slot) => *slot = recipe,
            None => recipes.push(recipe),
        }
        self.save(&recipes).await
    }

    /// Remove a recipe by name (case-insensitive). Returns whether an entry
    /// was actually removed.
    pub async fn remove(&self, recipe_name: &str) -> Result<bool, SearchError> {
        let mut recipes = self.load().await?;
        let needle = recipe_name.to_lowercase();
        let before = recipes.len();
        recipes.retain(|r| r.recipe_name.to_lowercase() != needle);
        if recipes.len() == before {
            return Ok(false);
        }
        self.save(&recipes).await?;
        Ok(true)
    }
}
