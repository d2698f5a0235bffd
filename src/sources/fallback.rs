use crate::config::AppConfig;
use crate::model::{IngredientList, Recipe, ResultsData};
use crate::sources::{RecipeSource, SourceFactory};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;

/// A search question, shape-agnostic so the retry loop can serve both calls.
enum Query<'a> {
    Ingredients(&'a str),
    Recipes(&'a str),
}

impl Query<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Query::Ingredients(_) => "ingredient lookup",
            Query::Recipes(_) => "recipe suggestions",
        }
    }
}

async fn ask(
    source: &dyn RecipeSource,
    query: &Query<'_>,
) -> Result<ResultsData, Box<dyn Error + Send + Sync>> {
    match query {
        Query::Ingredients(name) => source
            .find_ingredients_for_recipe(name)
            .await
            .map(ResultsData::Ingredients),
        Query::Recipes(list) => source
            .find_recipes_for_ingredients(list)
            .await
            .map(ResultsData::Recipes),
    }
}

/// Tries an ordered chain of sources, retrying each with exponential backoff
/// before moving on to the next.
pub struct FallbackSource {
    sources: Vec<Box<dyn RecipeSource>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackSource {
    /// Create a new fallback source from configuration
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if !config.fallback.enabled {
            // If fallback is disabled, just use the default source
            let default_source = SourceFactory::get_default_source(config)?;
            return Ok(FallbackSource {
                sources: vec![default_source],
                retry_attempts: 1,
                retry_delay_ms: 0,
            });
        }

        let timeout = Duration::from_secs(config.timeout);
        let mut sources = Vec::new();

        // Create sources in fallback order
        for source_name in &config.fallback.order {
            if let Some(provider_config) = config.providers.get(source_name) {
                if provider_config.enabled {
                    match SourceFactory::create(source_name, provider_config, timeout) {
                        Ok(source) => {
                            info!("Added '{}' to fallback chain", source_name);
                            sources.push(source);
                        }
                        Err(e) => {
                            warn!("Failed to initialize source '{}': {}", source_name, e);
                        }
                    }
                }
            } else {
                warn!(
                    "Source '{}' in fallback order not found in configuration",
                    source_name
                );
            }
        }

        if sources.is_empty() {
            return Err("No sources available in fallback configuration".into());
        }

        Ok(FallbackSource {
            sources,
            retry_attempts: config.fallback.retry_attempts,
            retry_delay_ms: config.fallback.retry_delay_ms,
        })
    }

    /// Try one source with exponential backoff retry logic
    async fn try_source_with_retry(
        &self,
        source: &dyn RecipeSource,
        query: &Query<'_>,
    ) -> Result<ResultsData, String> {
        let mut last_error = None;

        for attempt in 1..=self.retry_attempts {
            debug!(
                "Attempting {} with {} (attempt {}/{})",
                query.describe(),
                source.source_name(),
                attempt,
                self.retry_attempts
            );

            match ask(source, query).await {
                Ok(result) => {
                    info!(
                        "Answered {} using {}",
                        query.describe(),
                        source.source_name()
                    );
                    return Ok(result);
                }
                Err(e) => {
                    // Stringify immediately to keep the future Send
                    let error_msg = format!("{}", e);
                    warn!(
                        "Source {} failed (attempt {}/{}): {}",
                        source.source_name(),
                        attempt,
                        self.retry_attempts,
                        error_msg
                    );
                    last_error = Some(error_msg);
                }
            }

            if attempt < self.retry_attempts {
                // Exponential backoff: delay increases with each attempt
                let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
                debug!("Waiting {:?} before retry", delay);
                sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| "no attempts made".to_string()))
    }

    async fn run(&self, query: Query<'_>) -> Result<ResultsData, Box<dyn Error + Send + Sync>> {
        let mut all_errors: Vec<String> = Vec::new();

        for source in &self.sources {
            match self.try_source_with_retry(source.as_ref(), &query).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    all_errors.push(format!("{}: {}", source.source_name(), e));
                }
            }
        }

        Err(format!("All sources failed:\n{}", all_errors.join("\n")).into())
    }
}

#[async_trait]
impl RecipeSource for FallbackSource {
    fn source_name(&self) -> &str {
        "fallback"
    }

    async fn find_ingredients_for_recipe(
        &self,
        recipe_name: &str,
    ) -> Result<IngredientList, Box<dyn Error + Send + Sync>> {
        match self.run(Query::Ingredients(recipe_name)).await? {
            ResultsData::Ingredients(list) => Ok(list),
            ResultsData::Recipes(_) => Err("Source answered with the wrong result shape".into()),
        }
    }

    async fn find_recipes_for_ingredients(
        &self,
        ingredients: &str,
    ) -> Result<Vec<Recipe>, Box<dyn Error + Send + Sync>> {
        match self.run(Query::Recipes(ingredients)).await? {
            ResultsData::Recipes(recipes) => Ok(recipes),
            ResultsData::Ingredients(_) => Err("Source answered with the wrong result shape".into()),
        }
    }
}
