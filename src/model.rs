use serde::{Deserialize, Serialize};

/// A single ingredient with a free-form amount, e.g. `{"name": "flour", "amount": "2 cups"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
}

/// The ingredients (and steps) needed for one named recipe.
///
/// This is the record shape stored in the managed-recipes collection and the
/// answer shape for a recipe-name search. Field names serialize in camelCase
/// to stay compatible with the `managedRecipes` JSON produced by earlier
/// versions of this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientList {
    pub recipe_name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

/// One recipe suggestion returned by an ingredients search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Settled payload of a search, tagged by which kind of search produced it.
///
/// A recipe-name search yields `Ingredients`; an ingredients search yields
/// `Recipes`. Making the pairing part of the type means a result can never be
/// rendered against the wrong search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsData {
    Ingredients(IngredientList),
    Recipes(Vec<Recipe>),
}
