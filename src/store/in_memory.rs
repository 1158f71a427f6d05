use super::{CocktailStore, StoreError};
use crate::model::Cocktail;
use std::sync::RwLock;

/// Non-durable store, for tests and sessions without a configured path.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    cocktails: RwLock<Vec<Cocktail>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CocktailStore for InMemoryStore {
    fn get_all(&self) -> Result<Vec<Cocktail>, StoreError> {
        let cocktails = self.cocktails.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(cocktails.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Cocktail>, StoreError> {
        let cocktails = self.cocktails.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(cocktails.iter().find(|c| c.id == id).cloned())
    }

    fn put(&self, cocktail: &Cocktail) -> Result<(), StoreError> {
        let mut cocktails = self
            .cocktails
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        match cocktails.iter_mut().find(|c| c.id == cocktail.id) {
            Some(existing) => *existing = cocktail.clone(),
            None => cocktails.push(cocktail.clone()),
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut cocktails = self
            .cocktails
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let before = cocktails.len();
        cocktails.retain(|c| c.id != id);
        Ok(cocktails.len() != before)
    }
}
