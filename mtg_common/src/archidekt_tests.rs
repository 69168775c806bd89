//! Tests for the Archidekt deck card models

use super::*;

fn deck_card_json() -> &'static str {
    r#"{
        "id": 512345678,
        "quantity": 2,
        "modifier": "Foil",
        "categories": ["$2", "Ramp"],
        "card": {
            "uid": "0b4f3a38-6c1a-4b5e-9c9f-5c2a4f7c3f11",
            "collectorNumber": "123",
            "rarity": "uncommon",
            "edition": { "editionname": "Commander Masters", "editioncode": "cmm" },
            "prices": { "tcg": 1.25, "tcgfoil": 3.1, "ck": 1.49, "ckfoil": 2.0 },
            "oracleCard": { "name": "Arcane Signet", "colors": [] }
        }
    }"#
}

#[test]
fn deserializes_full_entry() {
    let entry: CardEntry = serde_json::from_str(deck_card_json()).unwrap();

    assert_eq!(entry.id, EntryId::Number(512345678));
    assert_eq!(entry.quantity, 2);
    assert_eq!(entry.modifier, "Foil");
    assert_eq!(entry.current_category(), "$2");
    assert_eq!(entry.name(), "Arcane Signet");
    assert_eq!(entry.card.collector_number, "123");
    assert_eq!(entry.card.edition.editionname, "Commander Masters");
    assert_eq!(entry.card.prices.tcg_foil_quote(), Some(3.1));
    assert_eq!(
        entry.scryfall_id(),
        Some("0b4f3a38-6c1a-4b5e-9c9f-5c2a4f7c3f11")
    );
}

#[test]
fn deserializes_minimal_entry() {
    let entry: CardEntry = serde_json::from_str(r#"{ "id": "abc" }"#).unwrap();

    assert_eq!(entry.id, EntryId::Text("abc".to_string()));
    assert_eq!(entry.quantity, 0);
    assert_eq!(entry.modifier, "");
    assert_eq!(entry.current_category(), UNCATEGORIZED);
    assert_eq!(entry.name(), "");
    assert!(entry.scryfall_id().is_none());
}

#[test]
fn null_fields_fall_back_to_defaults() {
    let json = r#"{
        "id": 1,
        "quantity": null,
        "modifier": null,
        "categories": null,
        "card": { "uid": null, "edition": null, "prices": null, "oracleCard": null }
    }"#;

    let entry: CardEntry = serde_json::from_str(json).unwrap();
    assert_eq!(entry.modifier, "");
    assert!(entry.categories.is_empty());
    assert_eq!(entry.card.prices, VendorPrices::default());
    assert_eq!(entry.card.oracle_card.normalized_colors(), vec!["Colorless"]);
}

#[test]
fn empty_first_category_is_uncategorized() {
    let entry = CardEntry {
        categories: vec![String::new(), "$3".to_string()],
        ..Default::default()
    };
    assert_eq!(entry.current_category(), UNCATEGORIZED);
}

#[test]
fn blank_uid_is_not_an_identifier() {
    let mut entry = CardEntry::default();
    entry.card.uid = Some("   ".to_string());
    assert!(entry.scryfall_id().is_none());
}

#[test]
fn zero_quotes_are_not_offers() {
    let prices: VendorPrices =
        serde_json::from_str(r#"{ "tcg": 0, "tcgfoil": 0.0, "ck": 0.35 }"#).unwrap();

    assert_eq!(prices.tcg_quote(), None);
    assert_eq!(prices.tcg_foil_quote(), None);
    assert_eq!(prices.ck_quote(), Some(0.35));
    assert_eq!(prices.ck_foil_quote(), None);
}

#[test]
fn string_quotes_are_parsed() {
    let prices: VendorPrices =
        serde_json::from_str(r#"{ "tcg": "1.99", "ck": "n/a" }"#).unwrap();

    assert_eq!(prices.tcg_quote(), Some(1.99));
    assert_eq!(prices.ck_quote(), None);
}

#[test]
fn normalized_colors_expand_letters() {
    let oracle = OracleCard {
        name: "Azorius Charm".to_string(),
        colors: vec!["W".to_string(), "U".to_string()],
    };
    assert_eq!(oracle.normalized_colors(), vec!["White", "Blue"]);
}

#[test]
fn normalized_colors_keep_names() {
    let oracle = OracleCard {
        name: "Lightning Bolt".to_string(),
        colors: vec!["Red".to_string()],
    };
    assert_eq!(oracle.normalized_colors(), vec!["Red"]);
}

#[test]
fn normalized_colors_replace_sentinel() {
    let oracle = OracleCard {
        name: "Sol Ring".to_string(),
        colors: vec!["None".to_string()],
    };
    assert_eq!(oracle.normalized_colors(), vec![COLORLESS]);
    // Stored colors are untouched
    assert_eq!(oracle.colors, vec!["None"]);
}

#[test]
fn entry_id_display() {
    assert_eq!(EntryId::Number(42).to_string(), "42");
    assert_eq!(EntryId::Text("x-1".to_string()).to_string(), "x-1");
}
