//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! The fixed slot array of [`Cocktail`] is flattened into plain lists, and
//! all errors are collapsed into [`CocktailError`].

use crate::catalog::CatalogError;
use crate::config::{ConfigError, FinderConfig};
use crate::finder::{ConfiguredFinder, FinderError};
use crate::model::{Cocktail, IngredientSlot, NOT_AVAILABLE, SLOT_COUNT};
use crate::search::QueryUpdate;
use crate::store::StoreError;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum CocktailError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Unexpected HTTP status: {code}")]
    HttpStatus { code: u16 },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl From<CatalogError> for CocktailError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Network(e) => CocktailError::Network {
                message: e.to_string(),
            },
            CatalogError::HttpStatus { code } => CocktailError::HttpStatus { code },
            CatalogError::Decode(message) => CocktailError::Decode { message },
            e @ CatalogError::InvalidBaseUrl { .. } => CocktailError::Config {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for CocktailError {
    fn from(e: StoreError) -> Self {
        match e {
            e @ StoreError::InvalidRecord { .. } => CocktailError::InvalidRecord {
                message: e.to_string(),
            },
            e => CocktailError::Storage {
                message: e.to_string(),
            },
        }
    }
}

impl From<FinderError> for CocktailError {
    fn from(e: FinderError) -> Self {
        match e {
            FinderError::Catalog(e) => e.into(),
            FinderError::Store(e) => e.into(),
            FinderError::NotFound(name) => CocktailError::NotFound { message: name },
        }
    }
}

impl From<ConfigError> for CocktailError {
    fn from(e: ConfigError) -> Self {
        CocktailError::Config {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of a cocktail.
///
/// `ingredients` and `measures` always hold 15 positionally aligned
/// entries, `"N/A"` marking empty slots. `ingredient_lines` is the ready to
/// display list.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiCocktail {
    pub id: String,
    pub name: String,
    pub category: String,
    pub is_alcoholic: bool,
    pub glass: String,
    pub instructions: String,
    /// Thumbnail URL if the cocktail has one
    pub picture_url: Option<String>,
    /// "category · alcoholic · glass"
    pub summary: String,
    pub ingredient_lines: Vec<String>,
    pub ingredients: Vec<String>,
    pub measures: Vec<String>,
}

impl From<&Cocktail> for FfiCocktail {
    fn from(c: &Cocktail) -> Self {
        FfiCocktail {
            id: c.id.clone(),
            name: c.name.clone(),
            category: c.category.clone(),
            is_alcoholic: c.is_alcoholic,
            glass: c.glass.clone(),
            instructions: c.instructions.clone(),
            picture_url: c.picture_url().map(str::to_string),
            summary: c.summary_line(),
            ingredient_lines: c.display_ingredient_lines(),
            ingredients: c.ingredients().map(str::to_string).collect(),
            measures: c.measures().map(str::to_string).collect(),
        }
    }
}

impl From<FfiCocktail> for Cocktail {
    fn from(c: FfiCocktail) -> Self {
        // Lists from the foreign side may be short; missing or blank slots
        // stay empty
        let mut slots: [IngredientSlot; SLOT_COUNT] = Default::default();
        let mut ingredients = c.ingredients.into_iter();
        let mut measures = c.measures.into_iter();
        for slot in slots.iter_mut() {
            let ingredient = ingredients.next().unwrap_or_default();
            let measure = measures.next().unwrap_or_default();
            *slot = IngredientSlot::from_text(ingredient, measure);
        }

        Cocktail {
            id: c.id,
            name: c.name,
            category: c.category,
            is_alcoholic: c.is_alcoholic,
            glass: c.glass,
            instructions: c.instructions,
            picture_url: c.picture_url.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            slots,
        }
    }
}

/// FFI-safe search update.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiQueryUpdate {
    /// Replace the result list with `names`
    Display { names: Vec<String> },
    /// Superseded by a later query; keep showing the current list
    Discarded,
    /// A search for this letter is running; its result covers this query
    Pending,
}

impl From<QueryUpdate> for FfiQueryUpdate {
    fn from(update: QueryUpdate) -> Self {
        match update {
            QueryUpdate::Display(names) => FfiQueryUpdate::Display { names },
            QueryUpdate::Discarded => FfiQueryUpdate::Discarded,
            QueryUpdate::Pending => FfiQueryUpdate::Pending,
        }
    }
}

/// FFI-safe configuration. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiFinderConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    /// JSON file for saved cocktails; unset keeps them in memory
    pub store_path: Option<String>,
}

impl From<FfiFinderConfig> for FinderConfig {
    fn from(c: FfiFinderConfig) -> Self {
        let mut config = FinderConfig::default();
        if let Some(base_url) = c.base_url {
            config.catalog.base_url = base_url;
        }
        config.catalog.timeout_ms = c.timeout_ms;
        config.store.path = c.store_path.map(Utf8PathBuf::from);
        config
    }
}

/// Search, detail and saved-list operations for one app session.
#[derive(uniffi::Object)]
pub struct FfiCocktailFinder {
    inner: ConfiguredFinder,
}

#[uniffi::export]
impl FfiCocktailFinder {
    /// Creates a finder from explicit settings.
    #[uniffi::constructor]
    pub fn new(config: FfiFinderConfig) -> Result<Arc<Self>, CocktailError> {
        Self::build(&FinderConfig::from(config))
    }

    /// Creates a finder from a YAML config file.
    ///
    /// `COCKTAIL_FINDER_BASE_URL` overrides the configured base URL.
    #[uniffi::constructor]
    pub fn from_config_file(path: String) -> Result<Arc<Self>, CocktailError> {
        let config = FinderConfig::from_path(Utf8Path::new(&path))?.with_env_overrides();
        Self::build(&config)
    }

    /// Adds a cocktail to the saved list, replacing one with the same id.
    pub fn save_record(&self, cocktail: FfiCocktail) -> Result<(), CocktailError> {
        Ok(self.inner.save_record(cocktail.into())?)
    }

    /// Removes a cocktail from the saved list.
    pub fn delete_record(&self, id: String) -> Result<(), CocktailError> {
        Ok(self.inner.delete_record(&id)?)
    }

    /// Returns true if the cocktail is already saved.
    pub fn is_saved(&self, id: String) -> Result<bool, CocktailError> {
        Ok(self.inner.is_saved(&id)?)
    }

    /// Returns all saved cocktails.
    pub fn list_saved(&self) -> Result<Vec<FfiCocktail>, CocktailError> {
        Ok(self
            .inner
            .list_saved()?
            .iter()
            .map(FfiCocktail::from)
            .collect())
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiCocktailFinder {
    /// Feeds the current search text and returns what to display.
    pub async fn on_query_changed(&self, query: String) -> Result<FfiQueryUpdate, CocktailError> {
        Ok(self.inner.on_query_changed(&query).await?.into())
    }

    /// Names shown by the last applied search update.
    pub async fn displayed_names(&self) -> Vec<String> {
        self.inner.displayed_names().await
    }

    /// Fetches the details of a search result by its displayed name.
    pub async fn select_by_name(&self, name: String) -> Result<FfiCocktail, CocktailError> {
        let cocktail = self.inner.select_by_name(&name).await?;
        Ok(FfiCocktail::from(&cocktail))
    }

    /// Fetches fresh details of a saved cocktail by name.
    pub async fn select_saved_by_name(&self, name: String) -> Result<FfiCocktail, CocktailError> {
        let cocktail = self.inner.select_saved_by_name(&name).await?;
        Ok(FfiCocktail::from(&cocktail))
    }

    /// Fetches the details of a cocktail by id.
    pub async fn fetch_details(&self, id: String) -> Result<FfiCocktail, CocktailError> {
        let cocktail = self.inner.fetch_details(&id).await?;
        Ok(FfiCocktail::from(&cocktail))
    }
}

impl FfiCocktailFinder {
    fn build(config: &FinderConfig) -> Result<Arc<Self>, CocktailError> {
        let inner = ConfiguredFinder::from_config(config)?;
        Ok(Arc::new(FfiCocktailFinder { inner }))
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Installs the tracing subscriber; see [`crate::logging::init_logging`].
#[uniffi::export]
pub fn enable_logging(directive: String) -> bool {
    crate::logging::init_logging(&directive)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
