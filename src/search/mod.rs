//! Search session coordination.
//!
//! The remote catalog can only search by first letter, so the coordinator
//! fetches once per leading character and filters everything else locally.
//! Each call to [`SearchCoordinator::on_query_changed`] takes a ticket under
//! the session lock. At most one remote search is outstanding: queries with
//! the same leading character join it, and anything else supersedes it.

use crate::catalog::{Catalog, CatalogError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

mod model;

pub use model::QueryUpdate;

use model::SearchSession;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Catalog search failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("No cocktail named {0:?} in the current results")]
    NotFound(String),
}

/// Owns the search session of one screen.
pub struct SearchCoordinator<C> {
    catalog: Arc<C>,
    session: Mutex<SearchSession>,
}

impl<C: Catalog> SearchCoordinator<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            session: Mutex::new(SearchSession::default()),
        }
    }

    /// Feeds the current contents of the search field.
    ///
    /// - An empty query resets the session and displays nothing.
    /// - While a search for the query's uppercase leading character is in
    ///   flight, the query is recorded and [`QueryUpdate::Pending`] returned;
    ///   the in-flight call displays its results filtered by the latest query.
    /// - A leading character that differs from the last fetched one triggers
    ///   a catalog search for that character.
    /// - Otherwise the last catalog results are filtered locally.
    ///
    /// A search whose response arrives after a reset, or after a query with
    /// another leading character, returns [`QueryUpdate::Discarded`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Catalog`] if the catalog search fails. The
    /// session, including the displayed names, is left unchanged.
    pub async fn on_query_changed(&self, query: &str) -> Result<QueryUpdate, SearchError> {
        let (prefix, ticket) = {
            let mut session = self.session.lock().await;
            let ticket = session.next_ticket();

            let Some(first) = query.chars().next() else {
                session.reset();
                debug!(ticket, "query cleared");
                return Ok(QueryUpdate::Display(Vec::new()));
            };
            let prefix = first.to_uppercase().next().unwrap_or(first);
            session.current_query = query.to_string();

            let in_flight = session.in_flight;
            match in_flight {
                Some((pending, fetch)) if pending == prefix => {
                    debug!(%prefix, ticket, fetch, "joining in-flight search");
                    return Ok(QueryUpdate::Pending);
                }
                Some((pending, fetch)) => {
                    debug!(%pending, fetch, ticket, "superseding in-flight search");
                    session.in_flight = None;
                }
                None => {}
            }

            if session.last_prefix == Some(prefix) {
                return Ok(QueryUpdate::Display(session.display()));
            }
            session.in_flight = Some((prefix, ticket));
            (prefix, ticket)
        };

        debug!(%prefix, ticket, "fetching drinks for new prefix");
        let result = self.catalog.search_by_prefix(prefix).await;

        let mut session = self.session.lock().await;
        if session.in_flight != Some((prefix, ticket)) {
            debug!(%prefix, ticket, "discarding stale search response");
            return Ok(QueryUpdate::Discarded);
        }
        session.in_flight = None;

        match result {
            Ok(results) => {
                session.apply_remote(prefix, results);
                Ok(QueryUpdate::Display(session.display()))
            }
            Err(e) => {
                warn!(%prefix, error = %e, "prefix search failed");
                Err(e.into())
            }
        }
    }

    /// Returns the id of the first current result named exactly `name`.
    pub async fn resolve_id(&self, name: &str) -> Result<String, SearchError> {
        self.session
            .lock()
            .await
            .resolve_id(name)
            .map(str::to_string)
            .ok_or_else(|| SearchError::NotFound(name.to_string()))
    }

    /// Names handed out by the last applied update.
    pub async fn displayed(&self) -> Vec<String> {
        self.session.lock().await.displayed.clone()
    }

    pub async fn current_query(&self) -> String {
        self.session.lock().await.current_query.clone()
    }

    pub async fn last_prefix(&self) -> Option<char> {
        self.session.lock().await.last_prefix
    }
}
