//! Scryfall API client for price lookups by Scryfall id
//!
//! Uses async reqwest; one client is shared (and cheaply cloned) across a
//! whole resolution pass.

use super::USER_AGENT;
use mtg_common::{CardEntry, MtgError, Result, ScryfallCard, ScryfallError, ScryfallPrices};

/// Public Scryfall API
pub const SCRYFALL_BASE_URL: &str = "https://api.scryfall.com";

#[derive(Debug, Clone)]
pub struct ScryfallClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::with_base_url(SCRYFALL_BASE_URL)
    }
}

impl ScryfallClient {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a card by its Scryfall id
    pub async fn fetch_card(&self, scryfall_id: &str) -> Result<ScryfallCard> {
        let url = format!(
            "{}/cards/{}",
            self.base_url,
            urlencoding::encode(scryfall_id)
        );

        log::debug!("Fetching card from Scryfall: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str::<ScryfallCard>(&body)?)
        } else {
            match serde_json::from_str::<ScryfallError>(&body) {
                Ok(error) => Err(MtgError::ApiResponse {
                    code: error.code,
                    details: error.details,
                }),
                Err(_) => Err(MtgError::HttpStatus(status)),
            }
        }
    }

    /// Fetch only the price block of a card
    pub async fn fetch_prices(&self, scryfall_id: &str) -> Result<ScryfallPrices> {
        Ok(self.fetch_card(scryfall_id).await?.prices)
    }

    /// Fetch the prices of an inventory entry by its Scryfall id
    ///
    /// Entries without an id fail with `MissingIdentifier` before any request.
    pub async fn fetch_entry_prices(&self, entry: &CardEntry) -> Result<ScryfallPrices> {
        let uid = entry
            .scryfall_id()
            .ok_or_else(|| MtgError::MissingIdentifier(entry.name().to_string()))?;
        self.fetch_prices(uid).await
    }
}

#[cfg(test)]
#[path = "scryfall_tests.rs"]
mod tests;
