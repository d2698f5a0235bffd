use crate::config::{AppConfig, ProviderConfig};
use crate::sources::{AnthropicSource, GoogleSource, OpenAiSource, RecipeSource};
use std::error::Error;
use std::time::Duration;

pub struct SourceFactory;

impl SourceFactory {
    /// Create a source instance from configuration
    pub fn create(
        source_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn RecipeSource>, Box<dyn Error + Send + Sync>> {
        // Validate that the provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                source_name
            )
            .into());
        }

        match source_name {
            "google" => Ok(Box::new(GoogleSource::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAiSource::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicSource::new(config, timeout)?)),
            _ => Err(format!("Unknown provider: {}", source_name).into()),
        }
    }

    /// Get the default source from configuration
    pub fn get_default_source(
        config: &AppConfig,
    ) -> Result<Box<dyn RecipeSource>, Box<dyn Error + Send + Sync>> {
        let source_name = &config.default_provider;
        let provider_config = config.providers.get(source_name).ok_or_else(|| {
            format!(
                "Default provider '{}' not found in configuration",
                source_name
            )
        })?;

        Self::create(source_name, provider_config, Duration::from_secs(config.timeout))
    }

    /// List all available source names
    pub fn available_sources() -> Vec<&'static str> {
        vec!["google", "openai", "anthropic"]
    }
}
