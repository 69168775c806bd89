//! Archidekt deck card models
//!
//! Every field tolerates being absent or `null`: the deck export is loosely
//! shaped and a missing nested object must never reject the whole entry.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Shelf category used when an entry has no (or an empty) first category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Display token for cards without a color identity
pub const COLORLESS: &str = "Colorless";

/// Tokens that mean "no color" in the colors list
const COLORLESS_SENTINELS: &[&str] = &["", "c", "colorless", "none"];

/// Deserialize `null` the same way as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a quote given as a number or a numeric string
fn lenient_quote<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Keep only quotes that are real offers (positive and finite)
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Opaque entry identifier (Archidekt uses integers, other backends strings)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(u64),
    Text(String),
}

impl Default for EntryId {
    fn default() -> Self {
        EntryId::Text(String::new())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => write!(f, "{}", n),
            EntryId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One owned instance of a card in the inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: EntryId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub card: CardPrinting,
}

impl CardEntry {
    /// The shelf category the entry currently sits in
    pub fn current_category(&self) -> &str {
        self.categories
            .first()
            .map(|c| c.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }

    /// Oracle name of the card, empty when unknown
    pub fn name(&self) -> &str {
        &self.card.oracle_card.name
    }

    /// Scryfall id of the printing, if present and non-blank
    pub fn scryfall_id(&self) -> Option<&str> {
        self.card
            .uid
            .as_deref()
            .map(str::trim)
            .filter(|uid| !uid.is_empty())
    }
}

/// A specific printing of a card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPrinting {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collector_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rarity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edition: Edition,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: VendorPrices,
    #[serde(default, deserialize_with = "null_as_default")]
    pub oracle_card: OracleCard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Edition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub editionname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub editioncode: String,
}

/// Embedded vendor quotes (TCGPlayer and Card Kingdom)
///
/// A zero and an absent quote both mean the vendor has no offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorPrices {
    #[serde(default, deserialize_with = "lenient_quote")]
    pub tcg: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quote")]
    pub tcgfoil: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quote")]
    pub ck: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quote")]
    pub ckfoil: Option<f64>,
}

impl VendorPrices {
    pub fn tcg_quote(&self) -> Option<f64> {
        positive(self.tcg)
    }

    pub fn tcg_foil_quote(&self) -> Option<f64> {
        positive(self.tcgfoil)
    }

    pub fn ck_quote(&self) -> Option<f64> {
        positive(self.ck)
    }

    pub fn ck_foil_quote(&self) -> Option<f64> {
        positive(self.ckfoil)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OracleCard {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
}

impl OracleCard {
    /// Colors for display and filtering, never empty
    ///
    /// Single-letter WUBRG tokens expand to color names; an empty list or a
    /// "no color" token becomes `["Colorless"]`.
    pub fn normalized_colors(&self) -> Vec<String> {
        let colors: Vec<String> = self
            .colors
            .iter()
            .map(|c| c.trim())
            .filter(|c| !COLORLESS_SENTINELS.contains(&c.to_lowercase().as_str()))
            .map(expand_color)
            .collect();

        if colors.is_empty() {
            vec![COLORLESS.to_string()]
        } else {
            colors
        }
    }
}

fn expand_color(token: &str) -> String {
    match token.to_ascii_uppercase().as_str() {
        "W" => "White".to_string(),
        "U" => "Blue".to_string(),
        "B" => "Black".to_string(),
        "R" => "Red".to_string(),
        "G" => "Green".to_string(),
        _ => token.to_string(),
    }
}

#[cfg(test)]
#[path = "archidekt_tests.rs"]
mod tests;
