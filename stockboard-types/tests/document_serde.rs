use rust_decimal::Decimal;
use stockboard_types::{Document, EffectiveTime, Item, Resolution, Selection};

const SCENARIO_A: &str = r#"{
    "2024-01-01": {
        "10:00 AM": {
            "iphone": [{"model": "X", "price": 1000, "stock": "In Stock"}]
        }
    }
}"#;

#[test]
fn parses_nested_document_with_sparse_items() {
    let doc: Document = serde_json::from_str(SCENARIO_A).expect("valid document");
    let items = &doc["2024-01-01"]["10:00 AM"]["iphone"];
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.model, "X");
    assert_eq!(item.price, Some(Decimal::from(1000)));
    assert_eq!(item.online_price, None);
    assert_eq!(item.ram_storage, "");
    assert_eq!(item.color, "");
    assert_eq!(item.stock, "In Stock");
    assert!(item.extra.is_empty());
}

#[test]
fn null_prices_are_absent() {
    let json = r#"{"model": "Y", "price": null, "online_price": null, "stock": "Out of Stock"}"#;
    let item: Item = serde_json::from_str(json).expect("valid item");
    assert_eq!(item.price, None);
    assert_eq!(item.online_price, None);
}

#[test]
fn null_display_fields_decode_as_empty() {
    let json = r#"{"2024-01-01":{"10:00 AM":{"iphone":[
        {"model":"X","color":null,"price":1000,"stock":null},
        {"model":null,"ram_storage":null,"price":null}
    ]}}}"#;
    let doc: Document = serde_json::from_str(json).expect("nulls are tolerated");
    let items = &doc["2024-01-01"]["10:00 AM"]["iphone"];
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].model, "X");
    assert_eq!(items[0].color, "");
    assert_eq!(items[0].stock, "");
    assert_eq!(items[0].price, Some(Decimal::from(1000)));
    assert_eq!(items[1].model, "");
    assert_eq!(items[1].ram_storage, "");
    assert!(items[1].extra.is_empty());
}

#[test]
fn fractional_prices_keep_precision() {
    let json = r#"{"model": "Z", "price": 24999.5, "online_price": 23999}"#;
    let item: Item = serde_json::from_str(json).expect("valid item");
    assert_eq!(item.price, Some(Decimal::new(249_995, 1)));
    assert_eq!(item.online_price, Some(Decimal::from(23_999)));
}

#[test]
fn unknown_item_fields_are_kept() {
    let json = r#"{"model": "X", "sku": "A-1", "rating": 4.5}"#;
    let item: Item = serde_json::from_str(json).expect("valid item");
    assert_eq!(item.extra.len(), 2);
    assert_eq!(item.extra["sku"], serde_json::json!("A-1"));
}

#[test]
fn resolution_roundtrip_preserves_not_found_state() {
    let res = Resolution::not_found("2024-01-02");
    let json = serde_json::to_string(&res).expect("serialize");
    let back: Resolution = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, res);
    assert!(!back.is_found());
    assert_eq!(back.effective_time, EffectiveTime::NoData);
    assert_eq!(back.effective_time.to_string(), "No Data");
}

#[test]
fn selection_correction_discards_time() {
    let mut sel = Selection::at("2024-01-02", "1:00 PM");
    sel.apply(&stockboard_types::Correction {
        date: "2024-01-01".to_string(),
    });
    assert_eq!(sel, Selection::latest("2024-01-01"));
    assert!(sel.wants_latest());
}
