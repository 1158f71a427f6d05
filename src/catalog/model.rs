use super::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Name/id pair returned by a prefix search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkSummary {
    pub name: String,
    pub id: String,
}

impl DrinkSummary {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Extracts `strDrink`/`idDrink`; `None` if either is missing or not a string.
    pub(crate) fn from_entry(entry: &Value) -> Option<Self> {
        let name = entry.get("strDrink")?.as_str()?;
        let id = entry.get("idDrink")?.as_str()?;
        Some(Self::new(name, id))
    }
}

/// Decodes a response body and returns the elements of its `drinks` array.
///
/// The body must be a JSON object. A missing, null or non-array `drinks`
/// field yields an empty list.
pub(crate) fn drinks_from_body(body: &[u8]) -> Result<Vec<Value>, CatalogError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| CatalogError::Decode(e.to_string()))?;

    let Value::Object(mut envelope) = value else {
        return Err(CatalogError::Decode(
            "response body is not a JSON object".to_string(),
        ));
    };

    match envelope.remove("drinks") {
        Some(Value::Array(drinks)) => Ok(drinks),
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(other) => {
            warn!(drinks = %other, "ignoring non-array drinks field");
            Ok(Vec::new())
        }
    }
}
