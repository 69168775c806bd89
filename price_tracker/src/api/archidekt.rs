//! Archidekt deck client
//!
//! The backend role of the tracker: a deck's card list is served as-is on
//! `/api/cards`, and the same list is decoded into `CardEntry` for pricing.

use super::get_json;
use mtg_common::{CardEntry, Result};
use serde::Deserialize;

/// Public Archidekt API
pub const ARCHIDEKT_BASE_URL: &str = "https://archidekt.com";

/// Deck used when none is configured
pub const DEFAULT_DECK_ID: u64 = 11731123;

/// Raw deck response; cards are kept untyped so they can be proxied verbatim
#[derive(Debug, Deserialize)]
struct DeckResponse {
    #[serde(default)]
    cards: Vec<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ArchidektClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ArchidektClient {
    fn default() -> Self {
        Self::with_base_url(ARCHIDEKT_BASE_URL)
    }
}

impl ArchidektClient {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the deck's card list exactly as Archidekt returns it
    pub async fn fetch_deck_cards_raw(&self, deck_id: u64) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}/api/decks/{}/", self.base_url, deck_id);
        log::info!("Fetching deck {} from Archidekt", deck_id);

        let deck: DeckResponse = get_json(&self.client, &url).await?;
        log::info!("Deck {} has {} card entries", deck_id, deck.cards.len());
        Ok(deck.cards)
    }

    /// Fetch the deck's card list as inventory entries
    ///
    /// Entries that do not decode are skipped with a warning.
    pub async fn fetch_deck_cards(&self, deck_id: u64) -> Result<Vec<CardEntry>> {
        let cards = self
            .fetch_deck_cards_raw(deck_id)
            .await?
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<CardEntry>(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping undecodable entry {} of deck {}: {}", index, deck_id, e);
                    None
                }
            })
            .collect();
        Ok(cards)
    }
}
