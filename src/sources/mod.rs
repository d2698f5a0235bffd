mod anthropic;
mod factory;
mod fallback;
mod google;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicSource;
pub use factory::SourceFactory;
pub use fallback::FallbackSource;
pub use google::GoogleSource;
pub use open_ai::OpenAiSource;
pub use prompt::{parse_json_reply, INGREDIENT_LOOKUP_PROMPT, RECIPE_SUGGESTION_PROMPT};

use async_trait::async_trait;
use std::error::Error;

use crate::model::{IngredientList, Recipe};

/// Unified trait for the external generative-AI collaborators.
///
/// One implementation per backing service, each answering the two search
/// questions the app can ask.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "google", "openai")
    fn source_name(&self) -> &str;

    /// Look up the ingredients and steps for a named recipe.
    async fn find_ingredients_for_recipe(
        &self,
        recipe_name: &str,
    ) -> Result<IngredientList, Box<dyn Error + Send + Sync>>;

    /// Suggest recipes that can be cooked from a free-text ingredient list.
    async fn find_recipes_for_ingredients(
        &self,
        ingredients: &str,
    ) -> Result<Vec<Recipe>, Box<dyn Error + Send + Sync>>;
}
