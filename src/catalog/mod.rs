//! Remote catalog access.
//!
//! This module talks to TheCocktailDB's JSON API: prefix search
//! (`search.php?f=`) and detail lookup (`lookup.php?i=`). Responses are
//! normalized into [`DrinkSummary`] pairs and [`Cocktail`] records. No retry
//! is attempted; a failed request is reported to the caller as-is.

use crate::config::CatalogConfig;
use crate::model::{Cocktail, ModelError};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

mod model;
#[cfg(test)]
pub(crate) mod scripted;

pub use model::DrinkSummary;

use model::drinks_from_body;

/// Errors that can occur when querying the remote catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {code}")]
    HttpStatus { code: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid catalog base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<ModelError> for CatalogError {
    fn from(e: ModelError) -> Self {
        CatalogError::Decode(e.to_string())
    }
}

/// Source of cocktail data.
///
/// [`CatalogClient`] is the HTTP implementation; the search coordinator and
/// the finder only depend on this trait.
pub trait Catalog: Send + Sync {
    /// Returns every drink whose name starts with `prefix`.
    fn search_by_prefix(
        &self,
        prefix: char,
    ) -> impl Future<Output = Result<Vec<DrinkSummary>, CatalogError>> + Send;

    /// Returns the full record for `id`.
    ///
    /// An unknown id yields the id-only record rather than an error.
    fn fetch_details(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Cocktail, CatalogError>> + Send;
}

/// HTTP client for TheCocktailDB.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    inner: reqwest::Client,
}

impl CatalogClient {
    /// Builds a client from `config`.
    ///
    /// Timeouts are only applied when configured; otherwise reqwest's
    /// defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if the base URL does not
    /// parse, or [`CatalogError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| CatalogError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            base_url,
            inner: builder.build()?,
        })
    }

    /// The base URL requests are issued against, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Issues one GET and returns the `drinks` array of the response.
    async fn get_drinks(
        &self,
        path: &str,
        query: (&str, &str),
    ) -> Result<Vec<serde_json::Value>, CatalogError> {
        let url = self.endpoint(path);
        debug!(%url, key = query.0, value = query.1, "requesting catalog");

        let response = self.inner.get(&url).query(&[query]).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "catalog request failed");
            return Err(CatalogError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        drinks_from_body(&body)
    }
}

impl Catalog for CatalogClient {
    async fn search_by_prefix(&self, prefix: char) -> Result<Vec<DrinkSummary>, CatalogError> {
        let prefix = prefix.to_string();
        let drinks = self.get_drinks("search.php", ("f", prefix.as_str())).await?;

        let total = drinks.len();
        let summaries: Vec<DrinkSummary> =
            drinks.iter().filter_map(DrinkSummary::from_entry).collect();
        if summaries.len() < total {
            warn!(
                %prefix,
                skipped = total - summaries.len(),
                "skipped drinks without name or id"
            );
        }
        debug!(%prefix, found = summaries.len(), "prefix search finished");

        Ok(summaries)
    }

    async fn fetch_details(&self, id: &str) -> Result<Cocktail, CatalogError> {
        let drinks = self.get_drinks("lookup.php", ("i", id)).await?;

        let Some(first) = drinks.first() else {
            debug!(%id, "lookup returned no drink");
            return Ok(Cocktail::new(id));
        };

        let mut cocktail = Cocktail::normalize(first)?;
        if cocktail.id.is_empty() {
            cocktail.id = id.to_string();
        }
        Ok(cocktail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NOT_AVAILABLE;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;

    fn client_for(server: &Server) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: server.url_str(""),
            timeout_ms: Some(5_000),
            connect_timeout_ms: Some(5_000),
        })
        .unwrap()
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = CatalogClient::new(&CatalogConfig {
            base_url: "https://www.thecocktaildb.com/api/json/v1/1/".to_string(),
            ..CatalogConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint("search.php"),
            "https://www.thecocktaildb.com/api/json/v1/1/search.php"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = CatalogClient::new(&CatalogConfig {
            base_url: "not a url".to_string(),
            ..CatalogConfig::default()
        });
        assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn test_search_by_prefix() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/search.php"),
                request::query(url_decoded(contains(("f", "M")))),
            ])
            .respond_with(json_encoded(json!({
                "drinks": [
                    {"strDrink": "Margarita", "idDrink": "11007", "strGlass": "Cocktail glass"},
                    {"strDrink": "Mojito", "idDrink": "11000"},
                    {"strDrink": "Manhattan"},
                    {"idDrink": "11009"},
                ]
            }))),
        );

        let results = client_for(&server).search_by_prefix('M').await.unwrap();
        assert_eq!(
            results,
            vec![
                DrinkSummary::new("Margarita", "11007"),
                DrinkSummary::new("Mojito", "11000"),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_by_prefix_null_drinks() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/search.php"))
                .respond_with(json_encoded(json!({"drinks": null}))),
        );

        let results = client_for(&server).search_by_prefix('X').await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_prefix_http_status_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/search.php"))
                .respond_with(status_code(503).body("maintenance")),
        );

        let err = client_for(&server).search_by_prefix('A').await.unwrap_err();
        assert!(matches!(err, CatalogError::HttpStatus { code: 503 }));
    }

    #[tokio::test]
    async fn test_search_by_prefix_invalid_json() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/search.php"))
                .respond_with(status_code(200).body("<html>oops</html>")),
        );

        let err = client_for(&server).search_by_prefix('A').await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_by_prefix_body_not_object() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/search.php"))
                .respond_with(json_encoded(json!(["Margarita"]))),
        );

        let err = client_for(&server).search_by_prefix('A').await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_search_by_prefix_network_error() {
        let client = CatalogClient::new(&CatalogConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_ms: Some(2_000),
            connect_timeout_ms: Some(2_000),
        })
        .unwrap();

        let err = client.search_by_prefix('A').await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }

    #[tokio::test]
    async fn test_fetch_details() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/lookup.php"),
                request::query(url_decoded(contains(("i", "11007")))),
            ])
            .respond_with(json_encoded(json!({
                "drinks": [{
                    "idDrink": "11007",
                    "strDrink": "Margarita",
                    "strCategory": "Ordinary Drink",
                    "strAlcoholic": "Alcoholic",
                    "strGlass": "Cocktail glass",
                    "strInstructions": "Shake with ice.",
                    "strDrinkThumb": "https://example.com/margarita.jpg",
                    "strIngredient1": "Tequila",
                    "strMeasure1": "1 1/2 oz ",
                    "strIngredient2": null,
                }]
            }))),
        );

        let cocktail = client_for(&server).fetch_details("11007").await.unwrap();
        assert_eq!(cocktail.id, "11007");
        assert_eq!(cocktail.name, "Margarita");
        assert!(cocktail.is_alcoholic);
        assert_eq!(cocktail.picture_url(), Some("https://example.com/margarita.jpg"));
        assert_eq!(cocktail.display_ingredient_lines(), vec!["1 1/2 oz Tequila"]);
    }

    #[tokio::test]
    async fn test_fetch_details_fills_missing_id() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/lookup.php"))
                .respond_with(json_encoded(json!({"drinks": [{"strDrink": "Mystery"}]}))),
        );

        let cocktail = client_for(&server).fetch_details("99").await.unwrap();
        assert_eq!(cocktail.id, "99");
        assert_eq!(cocktail.name, "Mystery");
    }

    #[tokio::test]
    async fn test_fetch_details_not_found_is_id_only_record() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/lookup.php"))
                .respond_with(json_encoded(json!({"drinks": null}))),
        );

        let cocktail = client_for(&server).fetch_details("404404").await.unwrap();
        assert_eq!(cocktail, Cocktail::new("404404"));
        assert_eq!(cocktail.name, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_fetch_details_malformed_entry() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/lookup.php"))
                .respond_with(json_encoded(json!({"drinks": ["Margarita"]}))),
        );

        let err = client_for(&server).fetch_details("1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_details_http_status_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/lookup.php"))
                .respond_with(status_code(404)),
        );

        let err = client_for(&server).fetch_details("1").await.unwrap_err();
        assert!(matches!(err, CatalogError::HttpStatus { code: 404 }));
    }
}
