pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod sources;
pub mod store;

pub use app::{App, SearchMode, SearchState, SearchTicket, View, UNKNOWN_ERROR};
pub use config::AppConfig;
pub use error::SearchError;
pub use model::{Ingredient, IngredientList, Recipe, ResultsData};
pub use sources::{FallbackSource, RecipeSource, SourceFactory};
pub use store::RecipeStore;

use std::error::Error;

/// Build an [`App`] from the loaded configuration: the configured store path
/// plus the default source (or the fallback chain when enabled).
pub fn app_from_config(config: &AppConfig) -> Result<App, Box<dyn Error + Send + Sync>> {
    let store = RecipeStore::new(&config.store.path);
    let source: Box<dyn RecipeSource> = if config.fallback.enabled {
        Box::new(FallbackSource::new(config)?)
    } else {
        SourceFactory::get_default_source(config)?
    };
    Ok(App::new(store, source))
}

/// One-shot ingredient lookup using configuration from file/environment.
pub async fn find_ingredients_for_recipe(
    recipe_name: &str,
) -> Result<IngredientList, Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    let source = SourceFactory::get_default_source(&config)?;
    source.find_ingredients_for_recipe(recipe_name).await
}

/// One-shot recipe suggestions using configuration from file/environment.
pub async fn find_recipes_for_ingredients(
    ingredients: &str,
) -> Result<Vec<Recipe>, Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    let source = SourceFactory::get_default_source(&config)?;
    source.find_recipes_for_ingredients(ingredients).await
}
