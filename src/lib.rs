uniffi::setup_scaffolding!();

pub mod catalog;
pub mod config;
pub mod ffi;
pub mod finder;
pub mod logging;
pub mod model;
pub mod search;
pub mod store;

pub use catalog::{Catalog, CatalogClient, CatalogError, DrinkSummary};
pub use config::{CatalogConfig, ConfigError, FinderConfig, StoreConfig};
pub use finder::{CocktailFinder, ConfiguredFinder, FinderError};
pub use logging::init_logging;
pub use model::*;
pub use search::{QueryUpdate, SearchCoordinator, SearchError};
pub use store::{CocktailStore, InMemoryStore, JsonFileStore, SavedCocktails, StoreError};
