//! The surface the presentation layer talks to.
//!
//! [`CocktailFinder`] ties a [`Catalog`] and a [`CocktailStore`] together:
//! search-as-you-type, detail lookups for a selected name, and the saved
//! "my cocktails" list. Both collaborators are passed in explicitly.

use crate::catalog::{Catalog, CatalogClient, CatalogError};
use crate::config::FinderConfig;
use crate::model::Cocktail;
use crate::search::{QueryUpdate, SearchCoordinator, SearchError};
use crate::store::{CocktailStore, InMemoryStore, JsonFileStore, SavedCocktails, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FinderError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cocktail not found: {0}")]
    NotFound(String),
}

impl From<SearchError> for FinderError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Catalog(e) => FinderError::Catalog(e),
            SearchError::NotFound(name) => FinderError::NotFound(name),
        }
    }
}

/// Finder wired from a [`FinderConfig`].
pub type ConfiguredFinder = CocktailFinder<CatalogClient, Box<dyn CocktailStore>>;

pub struct CocktailFinder<C, S> {
    catalog: Arc<C>,
    search: SearchCoordinator<C>,
    saved: SavedCocktails<S>,
}

impl ConfiguredFinder {
    /// Builds the HTTP catalog client and the configured store.
    ///
    /// Without `store.path` saved cocktails only live as long as the finder.
    pub fn from_config(config: &FinderConfig) -> Result<Self, FinderError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let store: Box<dyn CocktailStore> = match &config.store.path {
            Some(path) => Box::new(JsonFileStore::new(path.clone())),
            None => Box::new(InMemoryStore::new()),
        };
        info!(
            base_url = catalog.base_url(),
            store = ?config.store.path,
            "cocktail finder configured"
        );
        Ok(Self::new(catalog, store))
    }
}

impl<C: Catalog, S: CocktailStore> CocktailFinder<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            search: SearchCoordinator::new(catalog.clone()),
            catalog,
            saved: SavedCocktails::new(store),
        }
    }

    /// Feeds the search field; see [`SearchCoordinator::on_query_changed`].
    pub async fn on_query_changed(&self, query: &str) -> Result<QueryUpdate, FinderError> {
        Ok(self.search.on_query_changed(query).await?)
    }

    /// Names currently shown in the search results.
    pub async fn displayed_names(&self) -> Vec<String> {
        self.search.displayed().await
    }

    /// Fetches the details of a search result picked by name.
    ///
    /// # Errors
    ///
    /// [`FinderError::NotFound`] if `name` is not among the current results;
    /// [`FinderError::Catalog`] if the lookup fails.
    pub async fn select_by_name(&self, name: &str) -> Result<Cocktail, FinderError> {
        let id = self.search.resolve_id(name).await?;
        self.fetch_details(&id).await
    }

    /// Fetches fresh details of a saved cocktail picked by name.
    pub async fn select_saved_by_name(&self, name: &str) -> Result<Cocktail, FinderError> {
        let id = self
            .saved
            .find_id_by_name(name)?
            .ok_or_else(|| FinderError::NotFound(name.to_string()))?;
        self.fetch_details(&id).await
    }

    pub async fn fetch_details(&self, id: &str) -> Result<Cocktail, FinderError> {
        debug!(%id, "fetching cocktail details");
        Ok(self.catalog.fetch_details(id).await?)
    }

    pub fn save_record(&self, cocktail: Cocktail) -> Result<(), FinderError> {
        Ok(self.saved.add(cocktail)?)
    }

    pub fn delete_record(&self, id: &str) -> Result<(), FinderError> {
        Ok(self.saved.remove(id)?)
    }

    pub fn is_saved(&self, id: &str) -> Result<bool, FinderError> {
        Ok(self.saved.contains(id)?)
    }

    pub fn list_saved(&self) -> Result<Vec<Cocktail>, FinderError> {
        Ok(self.saved.list()?)
    }
}
