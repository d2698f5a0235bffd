use crate::config::ProviderConfig;
use crate::error::SearchError;
use crate::model::{IngredientList, Recipe};
use crate::sources::{
    parse_json_reply, RecipeSource, INGREDIENT_LOOKUP_PROMPT, RECIPE_SUGGESTION_PROMPT,
};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Duration;

/// Google Gemini source, the service the original tool was built around.
pub struct GoogleSource {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleSource {
    /// Create a new Google Gemini source from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or("GOOGLE_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());

        Ok(GoogleSource {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GoogleSource {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": format!("{}\n\n{}", system_prompt, user_text)
                    }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens,
                    "responseMimeType": "application/json"
                }
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let reply = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| SearchError::Source("Failed to extract content from Google Gemini response".to_string()))?
            .to_string();

        Ok(reply)
    }
}

#[async_trait]
impl RecipeSource for GoogleSource {
    fn source_name(&self) -> &str {
        "google"
    }

    async fn find_ingredients_for_recipe(
        &self,
        recipe_name: &str,
    ) -> Result<IngredientList, Box<dyn Error + Send + Sync>> {
        let reply = self
            .generate(
                INGREDIENT_LOOKUP_PROMPT,
                &format!("Dish name: {}", recipe_name),
            )
            .await?;
        parse_json_reply(&reply)
    }

    async fn find_recipes_for_ingredients(
        &self,
        ingredients: &str,
    ) -> Result<Vec<Recipe>, Box<dyn Error + Send + Sync>> {
        let reply = self
            .generate(
                RECIPE_SUGGESTION_PROMPT,
                &format!("Available ingredients: {}", ingredients),
            )
            .await?;
        parse_json_reply(&reply)
    }
}
