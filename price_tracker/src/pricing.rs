//! Price resolution with a fixed vendor fallback chain
//!
//! Two resolvers share one result shape:
//! - embedded: TCGPlayer quotes from the deck export, falling back to Card Kingdom
//! - Scryfall: a remote lookup by Scryfall id, falling back to Card Kingdom
//!
//! Neither resolver can fail. Missing ids, lookup errors and vendors without
//! an offer all end up as a priceless result with a descriptive source.

use crate::api::ScryfallClient;
use mtg_common::{CardEntry, CardPrinting, MtgError, ScryfallPrices, VendorPrices};
use serde::{Serialize, Serializer};
use std::fmt;

/// Printing treatment derived from the free-text modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Normal,
    Foil,
    Etched,
}

impl Finish {
    /// Case-insensitive substring match; "etched" wins over "foil"
    pub fn from_modifier(modifier: &str) -> Self {
        let modifier = modifier.to_lowercase();
        if modifier.contains("etched") {
            Finish::Etched
        } else if modifier.contains("foil") {
            Finish::Foil
        } else {
            Finish::Normal
        }
    }

    /// Foil and etched printings are priced from the foil quotes
    pub fn is_foil_class(&self) -> bool {
        matches!(self, Finish::Foil | Finish::Etched)
    }
}

/// Where a resolved price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceSource {
    TcgPlayerFoil,
    TcgPlayerNormal,
    ScryfallEtched,
    ScryfallFoil,
    ScryfallNormal,
    CardKingdomFoilFallback,
    CardKingdomNormalFallback,
    NoPriceAvailable,
    NoEtchedPrice,
    NoFoilPrice,
    NoPriceAtAll,
    MissingScryfallUid,
    Error,
}

impl PriceSource {
    /// Human-readable provenance label
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::TcgPlayerFoil => "TCGPlayer (foil)",
            PriceSource::TcgPlayerNormal => "TCGPlayer (normal)",
            PriceSource::ScryfallEtched => "Scryfall (etched)",
            PriceSource::ScryfallFoil => "Scryfall (foil)",
            PriceSource::ScryfallNormal => "Scryfall (normal)",
            PriceSource::CardKingdomFoilFallback => "Card Kingdom (foil fallback)",
            PriceSource::CardKingdomNormalFallback => "Card Kingdom (normal fallback)",
            PriceSource::NoPriceAvailable => "No price available",
            PriceSource::NoEtchedPrice => "No Etched Price",
            PriceSource::NoFoilPrice => "No Foil Price",
            PriceSource::NoPriceAtAll => "No price at all",
            PriceSource::MissingScryfallUid => "Missing Scryfall UID",
            PriceSource::Error => "Error",
        }
    }

    /// True when the price came from the first-choice vendor
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            PriceSource::TcgPlayerFoil
                | PriceSource::TcgPlayerNormal
                | PriceSource::ScryfallEtched
                | PriceSource::ScryfallFoil
                | PriceSource::ScryfallNormal
        )
    }

    /// True when the price came from the second-choice vendor
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            PriceSource::CardKingdomFoilFallback | PriceSource::CardKingdomNormalFallback
        )
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PriceSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A resolved price and its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedPrice {
    pub price: Option<f64>,
    pub source: PriceSource,
}

impl ResolvedPrice {
    fn quoted(price: f64, source: PriceSource) -> Self {
        Self {
            price: Some(price),
            source,
        }
    }

    fn missing(source: PriceSource) -> Self {
        Self {
            price: None,
            source,
        }
    }

    /// Take the primary quote, else the fallback quote, else report `none`
    fn chain(
        primary: Option<f64>,
        primary_source: PriceSource,
        fallback: Option<f64>,
        fallback_source: PriceSource,
        none: PriceSource,
    ) -> Self {
        match (primary, fallback) {
            (Some(p), _) => Self::quoted(p, primary_source),
            (None, Some(f)) => Self::quoted(f, fallback_source),
            (None, None) => Self::missing(none),
        }
    }
}

/// Resolve a price from the quotes embedded in the deck export
pub fn resolve_embedded(printing: &CardPrinting, modifier: &str) -> ResolvedPrice {
    resolve_vendor_quotes(&printing.prices, Finish::from_modifier(modifier))
}

fn resolve_vendor_quotes(prices: &VendorPrices, finish: Finish) -> ResolvedPrice {
    if finish.is_foil_class() {
        ResolvedPrice::chain(
            prices.tcg_foil_quote(),
            PriceSource::TcgPlayerFoil,
            prices.ck_foil_quote(),
            PriceSource::CardKingdomFoilFallback,
            PriceSource::NoPriceAvailable,
        )
    } else {
        ResolvedPrice::chain(
            prices.tcg_quote(),
            PriceSource::TcgPlayerNormal,
            prices.ck_quote(),
            PriceSource::CardKingdomNormalFallback,
            PriceSource::NoPriceAvailable,
        )
    }
}

/// Apply the Scryfall fallback chain to already fetched quotes
pub fn resolve_scryfall_quotes(
    quotes: &ScryfallPrices,
    embedded: &VendorPrices,
    modifier: &str,
) -> ResolvedPrice {
    match Finish::from_modifier(modifier) {
        Finish::Etched => ResolvedPrice::chain(
            quotes.usd_etched_quote(),
            PriceSource::ScryfallEtched,
            embedded.ck_foil_quote(),
            PriceSource::CardKingdomFoilFallback,
            PriceSource::NoEtchedPrice,
        ),
        Finish::Foil => ResolvedPrice::chain(
            quotes.usd_foil_quote(),
            PriceSource::ScryfallFoil,
            embedded.ck_foil_quote(),
            PriceSource::CardKingdomFoilFallback,
            PriceSource::NoFoilPrice,
        ),
        Finish::Normal => ResolvedPrice::chain(
            quotes.usd_quote(),
            PriceSource::ScryfallNormal,
            embedded.ck_quote(),
            PriceSource::CardKingdomNormalFallback,
            PriceSource::NoPriceAtAll,
        ),
    }
}

/// Resolve a price through a Scryfall lookup
///
/// Entries without a Scryfall id are skipped without a request. Lookup
/// failures are logged and reported as `PriceSource::Error`.
pub async fn resolve_scryfall(entry: &CardEntry, client: &ScryfallClient) -> ResolvedPrice {
    match client.fetch_entry_prices(entry).await {
        Ok(quotes) => {
            let resolved = resolve_scryfall_quotes(&quotes, &entry.card.prices, &entry.modifier);
            if resolved.source.is_fallback() {
                log::debug!(
                    "Using Card Kingdom price as fallback for: {}",
                    entry.name()
                );
            }
            resolved
        }
        Err(MtgError::MissingIdentifier(name)) => {
            log::info!("Missing Scryfall UID for card: {}", name);
            ResolvedPrice::missing(PriceSource::MissingScryfallUid)
        }
        Err(e) => {
            log::warn!("Failed to fetch Scryfall price for {}: {}", entry.name(), e);
            ResolvedPrice::missing(PriceSource::Error)
        }
    }
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
