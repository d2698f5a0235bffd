use serde::de::DeserializeOwned;
use std::error::Error;

use crate::error::SearchError;

/// System prompt for the recipe-name → ingredient-list lookup.
///
/// Loaded from `prompt_ingredients.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const INGREDIENT_LOOKUP_PROMPT: &str = include_str!("prompt_ingredients.txt");

/// System prompt for the ingredients → recipe-suggestions lookup.
pub const RECIPE_SUGGESTION_PROMPT: &str = include_str!("prompt_recipes.txt");

/// Parse a model reply into the expected JSON shape.
///
/// Models occasionally wrap their JSON in Markdown code fences despite being
/// told not to, so fences are stripped before deserializing.
pub fn parse_json_reply<T: DeserializeOwned>(reply: &str) -> Result<T, Box<dyn Error + Send + Sync>> {
    let payload = strip_code_fences(reply);
    serde_json::from_str(payload).map_err(|e| {
        Box::new(SearchError::MalformedResponse(format!(
            "JSON does not match the expected shape: {}",
            e
        ))) as Box<dyn Error + Send + Sync>
    })
}

/// Remove a surrounding ```json ... ``` (or plain ```) fence, if present.
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
