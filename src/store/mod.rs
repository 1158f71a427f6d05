//! Local persistence of saved cocktails ("my cocktails").
//!
//! [`CocktailStore`] is the injected persistence seam: any keyed durable
//! store exposing get-all/get/put/delete. [`SavedCocktails`] is the saved
//! set on top of it; it loads the backend lazily on first access and keeps
//! an in-memory view that is only changed after the backend accepted the
//! write.

use crate::model::Cocktail;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

mod in_memory;
mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

/// Errors that can occur when reading or writing saved cocktails.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid record: cocktail {name:?} has no id")]
    InvalidRecord { name: String },

    #[error("Failed to access cocktail store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode or decode saved cocktails: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Cocktail store lock poisoned")]
    LockPoisoned,
}

/// Durable storage for cocktails keyed by id.
pub trait CocktailStore: Send + Sync {
    /// Returns every stored cocktail.
    fn get_all(&self) -> Result<Vec<Cocktail>, StoreError>;

    /// Returns the cocktail with `id`, if stored.
    fn get(&self, id: &str) -> Result<Option<Cocktail>, StoreError>;

    /// Inserts or replaces the cocktail with the same id.
    fn put(&self, cocktail: &Cocktail) -> Result<(), StoreError>;

    /// Deletes the cocktail with `id`. Returns true if it existed.
    fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

impl<T: CocktailStore + ?Sized> CocktailStore for Box<T> {
    fn get_all(&self) -> Result<Vec<Cocktail>, StoreError> {
        (**self).get_all()
    }

    fn get(&self, id: &str) -> Result<Option<Cocktail>, StoreError> {
        (**self).get(id)
    }

    fn put(&self, cocktail: &Cocktail) -> Result<(), StoreError> {
        (**self).put(cocktail)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete(id)
    }
}

/// The user's saved cocktails.
///
/// Entries are unique by id and listed in the order they were first added.
pub struct SavedCocktails<S> {
    backend: S,
    entries: Mutex<Option<Vec<Cocktail>>>,
}

impl<S: CocktailStore> SavedCocktails<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            entries: Mutex::new(None),
        }
    }

    /// Saves `cocktail`, replacing an existing entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] if the cocktail has no id.
    pub fn add(&self, cocktail: Cocktail) -> Result<(), StoreError> {
        if !cocktail.is_persistable() {
            return Err(StoreError::InvalidRecord {
                name: cocktail.name,
            });
        }

        self.with_entries(|backend, entries| {
            backend.put(&cocktail)?;
            debug!(id = %cocktail.id, name = %cocktail.name, "saved cocktail");
            match entries.iter_mut().find(|entry| entry.id == cocktail.id) {
                Some(existing) => *existing = cocktail,
                None => entries.push(cocktail),
            }
            Ok(())
        })
    }

    /// Removes the entry with `id`. Removing an unknown id is not an error.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.with_entries(|backend, entries| {
            if backend.delete(id)? {
                debug!(%id, "removed saved cocktail");
            }
            entries.retain(|entry| entry.id != id);
            Ok(())
        })
    }

    /// Returns all saved cocktails.
    pub fn list(&self) -> Result<Vec<Cocktail>, StoreError> {
        self.with_entries(|_, entries| Ok(entries.clone()))
    }

    /// Returns true if a cocktail with `id` is saved.
    pub fn contains(&self, id: &str) -> Result<bool, StoreError> {
        self.with_entries(|_, entries| Ok(entries.iter().any(|entry| entry.id == id)))
    }

    /// Returns the id of the first saved cocktail named exactly `name`.
    pub fn find_id_by_name(&self, name: &str) -> Result<Option<String>, StoreError> {
        self.with_entries(|_, entries| {
            Ok(entries
                .iter()
                .find(|entry| entry.name == name)
                .map(|entry| entry.id.clone()))
        })
    }

    fn with_entries<R>(
        &self,
        f: impl FnOnce(&S, &mut Vec<Cocktail>) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut guard = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        if guard.is_none() {
            let mut loaded: Vec<Cocktail> = Vec::new();
            for cocktail in self.backend.get_all()? {
                if !loaded.iter().any(|entry| entry.id == cocktail.id) {
                    loaded.push(cocktail);
                }
            }
            debug!(count = loaded.len(), "loaded saved cocktails");
            *guard = Some(loaded);
        }
        let entries = guard.get_or_insert_with(Vec::new);
        f(&self.backend, entries)
    }
}
