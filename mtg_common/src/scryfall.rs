//! Scryfall card payloads
//!
//! Only the fields the price lookup needs are modelled. Prices are decimal
//! strings on the wire and may be `null`.

use serde::{Deserialize, Serialize};

/// Scryfall card response
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScryfallCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prices: ScryfallPrices,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ScryfallPrices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
    #[serde(default)]
    pub usd_etched: Option<String>,
}

impl ScryfallPrices {
    pub fn usd_quote(&self) -> Option<f64> {
        parse_quote(self.usd.as_deref())
    }

    pub fn usd_foil_quote(&self) -> Option<f64> {
        parse_quote(self.usd_foil.as_deref())
    }

    pub fn usd_etched_quote(&self) -> Option<f64> {
        parse_quote(self.usd_etched.as_deref())
    }
}

/// Parse a decimal price string, treating zero and garbage as no quote
fn parse_quote(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Ignoring unparsable Scryfall price {:?}: {}", raw, e);
            None
        }
    }
}

/// Scryfall API error response
#[derive(Debug, Deserialize)]
pub struct ScryfallError {
    pub status: u16,
    pub code: String,
    pub details: String,
}
