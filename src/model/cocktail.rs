use super::raw::RawDrink;
use super::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder the upstream API (and this crate) uses for unknown values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of ingredient/measure pairs a drink carries upstream.
pub const SLOT_COUNT: usize = 15;

/// One positional ingredient entry of a recipe.
///
/// Slot *i* pairs `strIngredient{i+1}` with `strMeasure{i+1}`. Either side
/// may be [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSlot {
    pub ingredient: String,
    pub measure: String,
}

impl Default for IngredientSlot {
    fn default() -> Self {
        IngredientSlot {
            ingredient: NOT_AVAILABLE.to_string(),
            measure: NOT_AVAILABLE.to_string(),
        }
    }
}

impl IngredientSlot {
    pub fn new(ingredient: impl Into<String>, measure: impl Into<String>) -> Self {
        IngredientSlot {
            ingredient: ingredient.into(),
            measure: measure.into(),
        }
    }

    /// Like [`IngredientSlot::new`], but blank text on either side becomes
    /// [`NOT_AVAILABLE`].
    pub fn from_text(ingredient: impl Into<String>, measure: impl Into<String>) -> Self {
        IngredientSlot {
            ingredient: blank_to_not_available(ingredient.into()),
            measure: blank_to_not_available(measure.into()),
        }
    }

    /// A slot is present when its ingredient is set.
    pub fn is_present(&self) -> bool {
        self.ingredient != NOT_AVAILABLE
    }

    /// Returns the "measure ingredient" line for a present slot.
    pub fn display_line(&self) -> Option<String> {
        if !self.is_present() {
            return None;
        }
        let ingredient = self.ingredient.trim();
        let measure = self.measure.trim();
        if measure.is_empty() || measure == NOT_AVAILABLE {
            Some(ingredient.to_string())
        } else {
            Some(format!("{measure} {ingredient}"))
        }
    }
}

/// A cocktail recipe in its canonical shape.
///
/// Every textual field is either real text or [`NOT_AVAILABLE`], so callers
/// never have to deal with the upstream API's missing or null fields.
///
/// # Examples
///
/// ```
/// use cocktail_finder::Cocktail;
/// use serde_json::json;
///
/// let cocktail = Cocktail::normalize(&json!({
///     "idDrink": "11007",
///     "strDrink": "Margarita",
///     "strAlcoholic": "Alcoholic",
///     "strIngredient1": "Tequila",
///     "strMeasure1": "1 1/2 oz ",
/// }))?;
///
/// assert_eq!(cocktail.name, "Margarita");
/// assert!(cocktail.is_alcoholic);
/// assert_eq!(cocktail.display_ingredient_lines(), vec!["1 1/2 oz Tequila"]);
/// # Ok::<(), cocktail_finder::ModelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cocktail {
    /// Stable remote identifier (`idDrink`). Empty when upstream omitted it.
    pub id: String,
    pub name: String,
    pub category: String,
    pub is_alcoholic: bool,
    pub glass: String,
    pub instructions: String,
    /// Thumbnail URL; empty or [`NOT_AVAILABLE`] means there is no image.
    pub picture_url: String,
    pub slots: [IngredientSlot; SLOT_COUNT],
}

impl Cocktail {
    /// Creates the id-only record: every other field is at its default.
    pub fn new(id: impl Into<String>) -> Self {
        Cocktail {
            id: id.into(),
            name: NOT_AVAILABLE.to_string(),
            category: NOT_AVAILABLE.to_string(),
            is_alcoholic: false,
            glass: NOT_AVAILABLE.to_string(),
            instructions: NOT_AVAILABLE.to_string(),
            picture_url: NOT_AVAILABLE.to_string(),
            slots: Default::default(),
        }
    }

    /// Maps a loosely-typed upstream drink object into a `Cocktail`.
    ///
    /// Missing, null or non-string fields fall back to [`NOT_AVAILABLE`]
    /// (the id falls back to an empty string). Only a payload that is not a
    /// JSON object at all is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MalformedPayload`] if `raw` is not an object.
    pub fn normalize(raw: &Value) -> Result<Self, ModelError> {
        let drink = RawDrink::from_value(raw)?;

        let mut slots: [IngredientSlot; SLOT_COUNT] = Default::default();
        for (index, slot) in slots.iter_mut().enumerate() {
            let position = index + 1;
            *slot = IngredientSlot::from_text(
                drink.slot_text("strIngredient", position),
                drink.slot_text("strMeasure", position),
            );
        }

        Ok(Cocktail {
            id: drink.id.unwrap_or_default(),
            name: or_not_available(drink.name),
            category: or_not_available(drink.category),
            is_alcoholic: drink
                .alcoholic
                .as_deref()
                .map(derived_alcoholic)
                .unwrap_or(false),
            glass: or_not_available(drink.glass),
            instructions: or_not_available(drink.instructions),
            picture_url: or_not_available(drink.thumbnail),
            slots,
        })
    }

    /// Builds the slot array from two parallel 15-element sequences.
    pub fn pair_slots(
        ingredients: [String; SLOT_COUNT],
        measures: [String; SLOT_COUNT],
    ) -> [IngredientSlot; SLOT_COUNT] {
        let mut slots: [IngredientSlot; SLOT_COUNT] = Default::default();
        for (slot, (ingredient, measure)) in slots
            .iter_mut()
            .zip(ingredients.into_iter().zip(measures))
        {
            *slot = IngredientSlot { ingredient, measure };
        }
        slots
    }

    /// Ingredient column of the slots, in slot order.
    pub fn ingredients(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|slot| slot.ingredient.as_str())
    }

    /// Measure column of the slots, in slot order.
    pub fn measures(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|slot| slot.measure.as_str())
    }

    /// Returns one "measure ingredient" line per present slot.
    pub fn display_ingredient_lines(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(IngredientSlot::display_line)
            .collect()
    }

    /// Returns the thumbnail URL, or `None` when there is no image.
    pub fn picture_url(&self) -> Option<&str> {
        match self.picture_url.trim() {
            "" | NOT_AVAILABLE => None,
            url => Some(url),
        }
    }

    /// `"{category} · alcoholic · {glass}"`, as shown under the title.
    pub fn summary_line(&self) -> String {
        let kind = if self.is_alcoholic {
            "alcoholic"
        } else {
            "non alcoholic"
        };
        format!("{} · {} · {}", self.category, kind, self.glass)
    }

    /// Only records with a real id can be saved.
    pub fn is_persistable(&self) -> bool {
        let id = self.id.trim();
        !id.is_empty() && id != NOT_AVAILABLE
    }
}

/// Interprets the upstream `strAlcoholic` value.
///
/// Only the exact string `"Alcoholic"` counts; `"ALCOHOLIC"`,
/// `"Optional alcohol"` and anything else are `false`.
pub fn derived_alcoholic(raw: &str) -> bool {
    raw == "Alcoholic"
}

fn blank_to_not_available(text: String) -> String {
    if text.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text
    }
}

fn or_not_available(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
