//! Tests for the Scryfall API client.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ScryfallClient, SCRYFALL_BASE_URL};
use crate::api::USER_AGENT;
use mtg_common::{CardEntry, MtgError};

fn scryfall_card_json(id: &str, usd: Option<&str>, usd_foil: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "Lightning Bolt",
        "set": "2xm",
        "prices": { "usd": usd, "usd_foil": usd_foil, "usd_etched": null, "eur": "1.00" }
    })
}

#[test]
fn default_client_targets_public_api() {
    let client = ScryfallClient::default();
    assert_eq!(client.base_url, SCRYFALL_BASE_URL);
}

#[tokio::test]
async fn fetch_card_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/uuid-1"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(scryfall_card_json("uuid-1", Some("2.00"), None)),
        )
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri());
    let card = client.fetch_card("uuid-1").await.unwrap();

    assert_eq!(card.id, "uuid-1");
    assert_eq!(card.name, "Lightning Bolt");
    assert_eq!(card.prices.usd_quote(), Some(2.0));
}

#[tokio::test]
async fn fetch_prices_returns_price_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/uuid-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scryfall_card_json(
            "uuid-2",
            None,
            Some("12.34"),
        )))
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri());
    let prices = client.fetch_prices("uuid-2").await.unwrap();

    assert!(prices.usd.is_none());
    assert_eq!(prices.usd_foil_quote(), Some(12.34));
}

#[tokio::test]
async fn fetch_entry_prices_without_uid_is_missing_identifier() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut entry = CardEntry::default();
    entry.card.uid = Some("   ".to_string());
    entry.card.oracle_card.name = "Sol Ring".to_string();

    let client = ScryfallClient::with_base_url(&mock_server.uri());
    let result = client.fetch_entry_prices(&entry).await;

    match result {
        Err(MtgError::MissingIdentifier(name)) => assert_eq!(name, "Sol Ring"),
        other => panic!("Expected MissingIdentifier, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_entry_prices_uses_uid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/uuid-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scryfall_card_json(
            "uuid-3",
            Some("0.75"),
            None,
        )))
        .mount(&mock_server)
        .await;

    let mut entry = CardEntry::default();
    entry.card.uid = Some("uuid-3".to_string());

    let client = ScryfallClient::with_base_url(&mock_server.uri());
    let prices = client.fetch_entry_prices(&entry).await.unwrap();

    assert_eq!(prices.usd_quote(), Some(0.75));
}

#[tokio::test]
async fn fetch_card_404_returns_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "status": 404,
            "code": "not_found",
            "details": "No card found with the given ID or set code and collector number."
        })))
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri());
    match client.fetch_card("missing").await {
        Err(MtgError::ApiResponse { code, details }) => {
            assert_eq!(code, "not_found");
            assert!(details.contains("No card found"));
        }
        other => panic!("Expected MtgError::ApiResponse, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_card_error_without_body_returns_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/uuid-3"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri());
    match client.fetch_card("uuid-3").await {
        Err(MtgError::HttpStatus(status)) => assert_eq!(status.as_u16(), 429),
        other => panic!("Expected MtgError::HttpStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_card_tolerates_missing_prices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/uuid-4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "uuid-4" })),
        )
        .mount(&mock_server)
        .await;

    let client = ScryfallClient::with_base_url(&mock_server.uri());
    let prices = client.fetch_prices("uuid-4").await.unwrap();
    assert_eq!(prices.usd_quote(), None);
}

// Integration tests (require network access)
#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn fetch_card_integration() {
    let client = ScryfallClient::default();
    // Lightning Bolt (Double Masters)
    let card = client
        .fetch_card("e3285e6b-3e79-4d7c-bf96-d920f973b80d")
        .await
        .unwrap();
    assert!(card.name.to_lowercase().contains("lightning"));
}
