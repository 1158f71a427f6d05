use super::cocktail::NOT_AVAILABLE;
use super::ModelError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Drink object as TheCocktailDB sends it.
///
/// Every known field is optional and tolerates the wrong JSON type; the
/// numbered ingredient/measure fields are kept in `numbered` and looked up
/// by position.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawDrink {
    #[serde(rename = "idDrink", deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(rename = "strDrink", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "strCategory", deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(rename = "strAlcoholic", deserialize_with = "lenient_string")]
    pub alcoholic: Option<String>,
    #[serde(rename = "strGlass", deserialize_with = "lenient_string")]
    pub glass: Option<String>,
    #[serde(rename = "strInstructions", deserialize_with = "lenient_string")]
    pub instructions: Option<String>,
    #[serde(rename = "strDrinkThumb", deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    numbered: HashMap<String, Value>,
}

impl RawDrink {
    pub(super) fn from_value(raw: &Value) -> Result<Self, ModelError> {
        if !raw.is_object() {
            return Err(ModelError::MalformedPayload(format!(
                "expected a drink object, got {}",
                json_kind(raw)
            )));
        }
        RawDrink::deserialize(raw).map_err(|e| ModelError::MalformedPayload(e.to_string()))
    }

    /// Text of `{prefix}{position}`, or `N/A` when missing, null, blank or not a string.
    pub(super) fn slot_text(&self, prefix: &str, position: usize) -> String {
        self.numbered
            .get(&format!("{prefix}{position}"))
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
