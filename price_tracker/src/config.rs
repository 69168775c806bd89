//! Runtime configuration shared by the server and the report command

use crate::api::archidekt::{ARCHIDEKT_BASE_URL, DEFAULT_DECK_ID};
use crate::api::scryfall::SCRYFALL_BASE_URL;
use crate::api::{ArchidektClient, InventoryClient, ScryfallClient};
use crate::batch::{FetchMode, PriceStrategy, DEFAULT_REQUEST_DELAY};
use crate::error::TrackerError;
use std::str::FromStr;
use std::time::Duration;

/// Port the backend listens on by default
pub const DEFAULT_PORT: u16 = 5000;

/// Price source selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricingSource {
    #[default]
    Embedded,
    Scryfall,
}

impl FromStr for PricingSource {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "embedded" | "archidekt" => Ok(PricingSource::Embedded),
            "scryfall" => Ok(PricingSource::Scryfall),
            other => Err(TrackerError::Config(format!(
                "unknown pricing source: {} (expected embedded or scryfall)",
                other
            ))),
        }
    }
}

/// Everything the library needs to fetch, price and serve an inventory
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Inventory backend serving `/api/cards` (report command)
    pub api_base: String,
    /// Archidekt deck proxied by the server
    pub deck_id: u64,
    pub archidekt_base: String,
    pub scryfall_base: String,
    pub pricing: PricingSource,
    /// Issue Scryfall lookups concurrently instead of one by one
    pub parallel: bool,
    /// Pause between sequential Scryfall lookups
    pub request_delay: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base: format!("http://localhost:{}", DEFAULT_PORT),
            deck_id: DEFAULT_DECK_ID,
            archidekt_base: ARCHIDEKT_BASE_URL.to_string(),
            scryfall_base: SCRYFALL_BASE_URL.to_string(),
            pricing: PricingSource::Embedded,
            parallel: false,
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

impl TrackerConfig {
    pub fn strategy(&self) -> PriceStrategy {
        match self.pricing {
            PricingSource::Embedded => PriceStrategy::Embedded,
            PricingSource::Scryfall if self.parallel => PriceStrategy::Scryfall(FetchMode::Parallel),
            PricingSource::Scryfall => PriceStrategy::Scryfall(FetchMode::Sequential {
                delay: self.request_delay,
            }),
        }
    }

    pub fn inventory_client(&self) -> InventoryClient {
        InventoryClient::new(&self.api_base)
    }

    pub fn archidekt_client(&self) -> ArchidektClient {
        ArchidektClient::with_base_url(&self.archidekt_base)
    }

    pub fn scryfall_client(&self) -> ScryfallClient {
        ScryfallClient::with_base_url(&self.scryfall_base)
    }
}
