//! API clients for the inventory backend, Archidekt and Scryfall

pub mod archidekt;
pub mod inventory;
pub mod scryfall;

pub use archidekt::ArchidektClient;
pub use inventory::InventoryClient;
pub use scryfall::ScryfallClient;

use mtg_common::{MtgError, Result};
use serde::de::DeserializeOwned;

/// User agent sent with every outgoing request
pub const USER_AGENT: &str = "D2D-Automations-PriceTracker/1.0";

/// GET a URL and decode a JSON body, mapping non-2xx statuses to errors
async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    log::debug!("GET {}", url);

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(MtgError::HttpStatus(status));
    }

    // Read as text first so a bad body surfaces as a parse error
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
