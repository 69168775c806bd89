//! Client for the inventory backend (`GET <base>/api/cards`)

use super::get_json;
use mtg_common::{CardEntry, Result};

/// Fetches the card list served by an inventory backend
#[derive(Debug, Clone)]
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all inventory entries
    pub async fn fetch_cards(&self) -> Result<Vec<CardEntry>> {
        let url = format!("{}/api/cards", self.base_url);
        log::info!("Fetching inventory from {}", url);

        let cards: Vec<CardEntry> = get_json(&self.client, &url).await?;
        log::info!("Fetched {} inventory entries", cards.len());
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtg_common::MtgError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = InventoryClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn fetch_cards_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "quantity": 1, "modifier": "Normal", "categories": ["$1"],
                  "card": { "oracleCard": { "name": "Sol Ring", "colors": [] } } },
                { "id": 2, "quantity": 3, "card": { "oracleCard": { "name": "Forest" } } }
            ])))
            .mount(&mock_server)
            .await;

        let client = InventoryClient::new(&mock_server.uri());
        let cards = client.fetch_cards().await.unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name(), "Sol Ring");
        assert_eq!(cards[1].quantity, 3);
        assert_eq!(cards[1].current_category(), "Uncategorized");
    }

    #[tokio::test]
    async fn fetch_cards_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/cards"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "error": "Failed to fetch deck" })),
            )
            .mount(&mock_server)
            .await;

        let client = InventoryClient::new(&mock_server.uri());
        match client.fetch_cards().await {
            Err(MtgError::HttpStatus(status)) => assert_eq!(status.as_u16(), 500),
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_cards_rejects_non_array() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/cards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cards": [] })))
            .mount(&mock_server)
            .await;

        let client = InventoryClient::new(&mock_server.uri());
        assert!(matches!(
            client.fetch_cards().await,
            Err(MtgError::Parse(_))
        ));
    }
}
