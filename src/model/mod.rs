//! Canonical cocktail record and normalization of upstream payloads.

mod cocktail;
mod raw;

pub use cocktail::{derived_alcoholic, Cocktail, IngredientSlot, NOT_AVAILABLE, SLOT_COUNT};

use thiserror::Error;

/// Errors that can occur while normalizing a drink payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Malformed drink payload: {0}")]
    MalformedPayload(String),
}
