use log::{debug, warn};
use std::error::Error;

use crate::model::ResultsData;
use crate::sources::RecipeSource;
use crate::store::RecipeStore;

/// Shown when a source failure carries no message of its own.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Which screen the UI is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Search,
    Results,
    Admin,
}

/// Which of the two search questions is being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Recipe name in, ingredient list out
    Recipe,
    /// Ingredient list in, recipe suggestions out
    Ingredients,
}

/// Where the active search stands.
///
/// Results and error are not separate mutable slots; a search is exactly one
/// of these at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No search has run since the last reset
    Idle,
    /// A search is in flight
    Loading,
    /// The search settled with data
    Showing(ResultsData),
    /// The search settled with a displayable error
    Failed(String),
}

/// Handle for one dispatched search. A settled outcome is only applied while
/// its ticket is still the newest one, so a reply that arrives after a newer
/// search started is discarded instead of clobbering current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

/// The application: view navigation plus the cache-first search dispatcher.
///
/// Recipe-name searches consult the managed-recipes store before asking the
/// external source; ingredient searches always go external.
pub struct App {
    store: RecipeStore,
    source: Box<dyn RecipeSource>,
    view: View,
    query: String,
    mode: SearchMode,
    state: SearchState,
    generation: u64,
}

impl App {
    pub fn new(store: RecipeStore, source: Box<dyn RecipeSource>) -> Self {
        App {
            store,
            source,
            view: View::Search,
            query: String::new(),
            mode: SearchMode::Recipe,
            state: SearchState::Idle,
            generation: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The query echoed by the results screen.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Record the query, switch to the results view, and enter `Loading`.
    ///
    /// Returns the ticket that [`App::finish_search`] needs to settle this
    /// search. Starting another search invalidates the ticket.
    pub fn begin_search(&mut self, query: &str, mode: SearchMode) -> SearchTicket {
        self.query = query.to_string();
        self.mode = mode;
        self.view = View::Results;
        self.state = SearchState::Loading;
        self.generation += 1;
        debug!("search #{} started: {:?} {:?}", self.generation, mode, query);
        SearchTicket {
            generation: self.generation,
        }
    }

    /// Settle a search with its outcome.
    ///
    /// Returns false (leaving state untouched) when the ticket has been
    /// superseded by a newer search.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<ResultsData, Box<dyn Error + Send + Sync>>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(
                "discarding result of superseded search #{} (current is #{})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.state = match outcome {
            Ok(data) => SearchState::Showing(data),
            Err(e) => SearchState::Failed(display_message(e.as_ref())),
        };
        true
    }

    /// Run one search to completion: cache probe for recipe mode, external
    /// call otherwise, all failures reduced to a displayable message.
    ///
    /// On return the state is `Showing` or `Failed`, never `Loading`.
    pub async fn search(&mut self, query: &str, mode: SearchMode) {
        let ticket = self.begin_search(query, mode);

        if mode == SearchMode::Recipe {
            // Local cache wins over the external source.
            match self.store.find(query).await {
                Ok(Some(found)) => {
                    debug!("managed recipe hit for {:?}", query);
                    self.finish_search(ticket, Ok(ResultsData::Ingredients(found)));
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    self.finish_search(ticket, Err(Box::new(e)));
                    return;
                }
            }
        }

        let outcome = match mode {
            SearchMode::Recipe => self
                .source
                .find_ingredients_for_recipe(query)
                .await
                .map(ResultsData::Ingredients),
            SearchMode::Ingredients => self
                .source
                .find_recipes_for_ingredients(query)
                .await
                .map(ResultsData::Recipes),
        };
        self.finish_search(ticket, outcome);
    }

    /// Go back to the search screen, dropping query, results, and error.
    pub fn go_to_search(&mut self) {
        self.view = View::Search;
        self.query.clear();
        self.state = SearchState::Idle;
    }

    /// Switch screens without touching search state. Callers that want the
    /// reset use [`App::go_to_search`] instead.
    pub fn go_to_view(&mut self, view: View) {
        self.view = view;
    }
}

fn display_message(error: &(dyn Error + Send + Sync)) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}
