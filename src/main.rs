use std::env;
use std::error::Error;
use std::process::ExitCode;

use recipe_scout::{
    app_from_config, AppConfig, IngredientList, Recipe, RecipeStore, ResultsData, SearchMode,
    SearchState,
};

const USAGE: &str = "Usage:
  recipe-scout recipe <name>           find the ingredients for a named recipe
  recipe-scout ingredients <list>      find recipes matching an ingredient list
  recipe-scout admin list              list the managed recipes
  recipe-scout admin add <file.json>   add or replace a managed recipe
  recipe-scout admin remove <name>     remove a managed recipe";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).ok_or(USAGE)?;

    match command {
        "recipe" => {
            let query = args.get(2).ok_or("Please provide a recipe name")?;
            search(query, SearchMode::Recipe).await
        }
        "ingredients" => {
            let query = args.get(2).ok_or("Please provide an ingredient list")?;
            search(query, SearchMode::Ingredients).await
        }
        "admin" => admin(&args[2..]).await,
        _ => Err(USAGE.into()),
    }
}

async fn search(query: &str, mode: SearchMode) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    let mut app = app_from_config(&config)?;

    app.search(query, mode).await;

    match app.state() {
        SearchState::Showing(ResultsData::Ingredients(list)) => {
            print_ingredient_list(list);
            Ok(ExitCode::SUCCESS)
        }
        SearchState::Showing(ResultsData::Recipes(recipes)) => {
            print_recipes(recipes);
            Ok(ExitCode::SUCCESS)
        }
        SearchState::Failed(message) => {
            eprintln!("Search failed: {}", message);
            Ok(ExitCode::FAILURE)
        }
        // search() always settles before returning
        SearchState::Idle | SearchState::Loading => unreachable!("search returned while unsettled"),
    }
}

async fn admin(args: &[String]) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    let store = RecipeStore::new(&config.store.path);
    let subcommand = args.first().map(String::as_str).ok_or(USAGE)?;

    match subcommand {
        "list" => {
            let recipes = store.load().await?;
            if recipes.is_empty() {
                println!("No managed recipes.");
            }
            for recipe in &recipes {
                println!(
                    "{} ({} ingredients, {} steps)",
                    recipe.recipe_name,
                    recipe.ingredients.len(),
                    recipe.instructions.len()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        "add" => {
            let path = args.get(1).ok_or("Please provide a JSON file to add")?;
            let bytes = tokio::fs::read(path).await?;
            let recipe: IngredientList = serde_json::from_slice(&bytes)?;
            let name = recipe.recipe_name.clone();
            store.upsert(recipe).await?;
            println!("Saved \"{}\".", name);
            Ok(ExitCode::SUCCESS)
        }
        "remove" => {
            let name = args.get(1).ok_or("Please provide the recipe name to remove")?;
            if store.remove(name).await? {
                println!("Removed \"{}\".", name);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("No managed recipe named \"{}\".", name);
                Ok(ExitCode::FAILURE)
            }
        }
        _ => Err(USAGE.into()),
    }
}

fn print_ingredient_list(list: &IngredientList) {
    println!("{}", list.recipe_name);
    println!();
    println!("Ingredients:");
    for ingredient in &list.ingredients {
        println!("  - {} ({})", ingredient.name, ingredient.amount);
    }
    println!();
    println!("Instructions:");
    for (i, step) in list.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
}

fn print_recipes(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found for those ingredients.");
        return;
    }
    for recipe in recipes {
        println!("{}", recipe.recipe_name);
        println!("  {}", recipe.description);
        println!("  Ingredients: {}", recipe.ingredients.join(", "));
        for (i, step) in recipe.instructions.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        println!();
    }
}
