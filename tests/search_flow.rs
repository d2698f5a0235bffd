use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use recipe_scout::{
    App, Ingredient, IngredientList, Recipe, RecipeSource, RecipeStore, ResultsData, SearchMode,
    SearchState, View, UNKNOWN_ERROR,
};

static STORE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_store() -> RecipeStore {
    let n = STORE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "recipe_scout_flow_{}_{}.json",
        std::process::id(),
        n
    ));
    RecipeStore::new(path)
}

fn tomato_soup() -> IngredientList {
    IngredientList {
        recipe_name: "Tomato Soup".to_string(),
        ingredients: vec![Ingredient {
            name: "tomato".to_string(),
            amount: "6".to_string(),
        }],
        instructions: vec!["Simmer the tomatoes.".to_string()],
    }
}

fn suggested_recipes() -> Vec<Recipe> {
    vec![Recipe {
        recipe_name: "Frittata".to_string(),
        description: "An open-faced omelette.".to_string(),
        ingredients: vec!["6 eggs".to_string(), "1 onion".to_string()],
        instructions: vec!["Whisk.".to_string(), "Bake.".to_string()],
    }]
}

/// Counting stand-in for the external generative-AI service.
#[derive(Clone, Default)]
struct StubSource {
    recipe_calls: Arc<AtomicUsize>,
    ingredient_calls: Arc<AtomicUsize>,
    fail_with: Option<String>,
}

impl StubSource {
    fn failing(message: &str) -> Self {
        StubSource {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecipeSource for StubSource {
    fn source_name(&self) -> &str {
        "stub"
    }

    async fn find_ingredients_for_recipe(
        &self,
        _recipe_name: &str,
    ) -> Result<IngredientList, Box<dyn Error + Send + Sync>> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(tomato_soup()),
        }
    }

    async fn find_recipes_for_ingredients(
        &self,
        _ingredients: &str,
    ) -> Result<Vec<Recipe>, Box<dyn Error + Send + Sync>> {
        self.ingredient_calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(message.clone().into()),
            None => Ok(suggested_recipes()),
        }
    }
}

#[tokio::test]
async fn cache_hit_returns_stored_record_without_external_call() {
    let store = temp_store();
    store.save(&[tomato_soup()]).await.unwrap();
    let stub = StubSource::default();
    let calls = stub.recipe_calls.clone();

    let mut app = App::new(store, Box::new(stub));
    // Case differs from the stored name on purpose.
    app.search("tomato soup", SearchMode::Recipe).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.view(), View::Results);
    assert!(!app.is_loading());
    assert_eq!(
        *app.state(),
        SearchState::Showing(ResultsData::Ingredients(tomato_soup()))
    );
}

#[tokio::test]
async fn cache_miss_calls_external_source_exactly_once() {
    let store = temp_store();
    store.save(&[tomato_soup()]).await.unwrap();
    let stub = StubSource::default();
    let calls = stub.recipe_calls.clone();

    let mut app = App::new(store, Box::new(stub));
    app.search("minestrone", SearchMode::Recipe).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        app.state(),
        SearchState::Showing(ResultsData::Ingredients(_))
    ));
}

#[tokio::test]
async fn ingredients_mode_never_consults_the_cache() {
    let store = temp_store();
    // A stored recipe whose name equals the query must not short-circuit.
    store.save(&[tomato_soup()]).await.unwrap();
    let stub = StubSource::default();
    let recipe_calls = stub.recipe_calls.clone();
    let ingredient_calls = stub.ingredient_calls.clone();

    let mut app = App::new(store, Box::new(stub));
    app.search("Tomato Soup", SearchMode::Ingredients).await;

    assert_eq!(recipe_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ingredient_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *app.state(),
        SearchState::Showing(ResultsData::Recipes(suggested_recipes()))
    );
}

#[tokio::test]
async fn failure_message_is_displayed_verbatim() {
    let mut app = App::new(temp_store(), Box::new(StubSource::failing("boom")));
    app.search("anything", SearchMode::Ingredients).await;

    assert!(!app.is_loading());
    assert_eq!(*app.state(), SearchState::Failed("boom".to_string()));
}

#[tokio::test]
async fn failure_without_message_displays_unknown_error() {
    let mut app = App::new(temp_store(), Box::new(StubSource::failing("")));
    app.search("anything", SearchMode::Recipe).await;

    assert_eq!(*app.state(), SearchState::Failed(UNKNOWN_ERROR.to_string()));
}

#[tokio::test]
async fn search_never_leaves_state_loading() {
    // Success, cache hit, and failure all settle.
    let store = temp_store();
    store.save(&[tomato_soup()]).await.unwrap();

    let mut app = App::new(store, Box::new(StubSource::default()));
    app.search("tomato soup", SearchMode::Recipe).await;
    assert!(!app.is_loading());
    app.search("minestrone", SearchMode::Recipe).await;
    assert!(!app.is_loading());

    let mut failing = App::new(temp_store(), Box::new(StubSource::failing("boom")));
    failing.search("eggs", SearchMode::Ingredients).await;
    assert!(!failing.is_loading());
}

#[tokio::test]
async fn malformed_store_surfaces_as_failed_state() {
    let store = temp_store();
    tokio::fs::write(store.path(), b"{not json").await.unwrap();
    let stub = StubSource::default();
    let calls = stub.recipe_calls.clone();

    let mut app = App::new(store, Box::new(stub));
    app.search("tomato soup", SearchMode::Recipe).await;

    // The broken cache settles the search; the external source is not asked.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(matches!(app.state(), SearchState::Failed(_)));
}

#[tokio::test]
async fn go_to_search_clears_query_results_and_error() {
    let mut app = App::new(temp_store(), Box::new(StubSource::default()));
    app.search("eggs, onion", SearchMode::Ingredients).await;
    assert!(matches!(app.state(), SearchState::Showing(_)));

    app.go_to_search();
    assert_eq!(app.view(), View::Search);
    assert_eq!(app.query(), "");
    assert_eq!(*app.state(), SearchState::Idle);

    // Same reset applies after a failure.
    let mut failing = App::new(temp_store(), Box::new(StubSource::failing("boom")));
    failing.search("eggs", SearchMode::Ingredients).await;
    failing.go_to_search();
    assert_eq!(*failing.state(), SearchState::Idle);
}

#[tokio::test]
async fn go_to_view_keeps_search_state() {
    let mut app = App::new(temp_store(), Box::new(StubSource::default()));
    app.search("eggs, onion", SearchMode::Ingredients).await;

    app.go_to_view(View::Admin);
    assert_eq!(app.view(), View::Admin);
    assert_eq!(app.query(), "eggs, onion");
    assert!(matches!(app.state(), SearchState::Showing(_)));

    app.go_to_view(View::Results);
    assert!(matches!(app.state(), SearchState::Showing(_)));
}

#[tokio::test]
async fn superseded_search_result_is_discarded() {
    let mut app = App::new(temp_store(), Box::new(StubSource::default()));

    let stale = app.begin_search("first", SearchMode::Ingredients);
    let current = app.begin_search("second", SearchMode::Ingredients);

    // The slow first reply arrives after the second search started.
    let applied = app.finish_search(stale, Ok(ResultsData::Recipes(vec![])));
    assert!(!applied);
    assert!(app.is_loading());
    assert_eq!(app.query(), "second");

    let applied = app.finish_search(current, Ok(ResultsData::Recipes(suggested_recipes())));
    assert!(applied);
    assert_eq!(
        *app.state(),
        SearchState::Showing(ResultsData::Recipes(suggested_recipes()))
    );
}

#[tokio::test]
async fn begin_search_echoes_query_and_mode() {
    let mut app = App::new(temp_store(), Box::new(StubSource::default()));
    app.begin_search("Tomato Soup", SearchMode::Recipe);

    assert_eq!(app.view(), View::Results);
    assert_eq!(app.query(), "Tomato Soup");
    assert_eq!(app.mode(), SearchMode::Recipe);
    assert!(app.is_loading());
}
