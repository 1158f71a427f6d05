//! In-process catalog with canned responses, for coordinator and finder tests.

use super::{Catalog, CatalogError, DrinkSummary};
use crate::model::Cocktail;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Holds a prefix search open until released.
#[derive(Clone, Default)]
pub(crate) struct Gate {
    /// Notified once the search reached the catalog
    pub entered: Arc<Notify>,
    /// Notify to let the search return
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub(crate) struct ScriptedCatalog {
    searches: Mutex<HashMap<char, Result<Vec<DrinkSummary>, u16>>>,
    details: Mutex<HashMap<String, Result<Cocktail, u16>>>,
    gates: Mutex<HashMap<char, Gate>>,
    search_calls: Mutex<Vec<char>>,
    detail_calls: AtomicUsize,
}

impl ScriptedCatalog {
    pub(crate) fn set_search(&self, prefix: char, results: Vec<DrinkSummary>) {
        self.searches.lock().unwrap().insert(prefix, Ok(results));
    }

    pub(crate) fn set_search_failure(&self, prefix: char, code: u16) {
        self.searches.lock().unwrap().insert(prefix, Err(code));
    }

    pub(crate) fn set_details(&self, cocktail: Cocktail) {
        self.details
            .lock()
            .unwrap()
            .insert(cocktail.id.clone(), Ok(cocktail));
    }

    pub(crate) fn set_details_failure(&self, id: &str, code: u16) {
        self.details.lock().unwrap().insert(id.to_string(), Err(code));
    }

    pub(crate) fn gate(&self, prefix: char) -> Gate {
        let gate = Gate::default();
        self.gates.lock().unwrap().insert(prefix, gate.clone());
        gate
    }

    pub(crate) fn search_calls(&self) -> Vec<char> {
        self.search_calls.lock().unwrap().clone()
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

impl Catalog for ScriptedCatalog {
    async fn search_by_prefix(&self, prefix: char) -> Result<Vec<DrinkSummary>, CatalogError> {
        self.search_calls.lock().unwrap().push(prefix);

        let gate = self.gates.lock().unwrap().get(&prefix).cloned();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let scripted = self.searches.lock().unwrap().get(&prefix).cloned();
        match scripted {
            Some(Ok(results)) => Ok(results),
            Some(Err(code)) => Err(CatalogError::HttpStatus { code }),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_details(&self, id: &str) -> Result<Cocktail, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.details.lock().unwrap().get(id).cloned();
        match scripted {
            Some(Ok(cocktail)) => Ok(cocktail),
            Some(Err(code)) => Err(CatalogError::HttpStatus { code }),
            None => Ok(Cocktail::new(id)),
        }
    }
}
