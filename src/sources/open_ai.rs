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

pub struct OpenAiSource {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiSource {
    /// Create a new OpenAI source from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAiSource {
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
        OpenAiSource {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_text}
                ],
                "response_format": {"type": "json_object"},
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let reply = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| SearchError::Source("Failed to extract content from OpenAI response".to_string()))?
            .to_string();

        Ok(reply)
    }
}

#[async_trait]
impl RecipeSource for OpenAiSource {
    fn source_name(&self) -> &str {
        "openai"
    }

    async fn find_ingredients_for_recipe(
        &self,
        recipe_name: &str,
    ) -> Result<IngredientList, Box<dyn Error + Send + Sync>> {
        let reply = self
            .complete(
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
            .complete(
                RECIPE_SUGGESTION_PROMPT,
                &format!("Available ingredients: {}", ingredients),
            )
            .await?;
        parse_json_reply(&reply)
    }
}
