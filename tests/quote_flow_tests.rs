//! End-to-end quote workflow: configure state, save, reload, export.

use pretty_assertions::assert_eq;

use trailquote::pricing::REFERENCE_PRICEBOOK;
use trailquote::{
    load_pricebook, Catalog, DocumentRenderer, ExportData, QuoteState,
};

#[test]
fn configure_save_reload_price_export() {
    let dir = tempfile::tempdir().unwrap();
    let pricebook_path = dir.path().join("pricebook.json");
    std::fs::write(&pricebook_path, REFERENCE_PRICEBOOK).unwrap();

    let catalog = Catalog::builtin().unwrap();
    let loaded = load_pricebook(&catalog, Some(&pricebook_path));
    assert!(!loaded.is_fallback());

    // Configure: a short selection plus one custom item.
    let mut quote = QuoteState::new(&catalog);
    quote.meta.number = "Q-INT00001".to_string();
    quote.meta.dealer = "Prairie Truck & Trailer".to_string();
    quote.meta.set_discount(4.0);
    quote.set_choice(&catalog, "trailer_length", "46'").unwrap();
    quote.set_choice(&catalog, "wall_height", "62\"").unwrap();
    quote
        .set_choice(&catalog, "chassis", "ALUMINUM (Polished)")
        .unwrap();
    quote.add_line_item("Spare Tire", Some(250.0)).unwrap();

    // Save and reload.
    let quote_path = dir.path().join("quote.json");
    quote.to_json_file(&quote_path).unwrap();
    let reloaded = QuoteState::from_json_file(&quote_path).unwrap();
    assert_eq!(reloaded.selection, quote.selection);
    assert_eq!(reloaded.line_items, quote.line_items);

    // Price: recomputation on the reloaded state matches the original.
    let original = quote.breakdown(&catalog, &loaded.book);
    let recomputed = reloaded.breakdown(&catalog, &loaded.book);
    assert_eq!(original.base, recomputed.base);
    assert_eq!(original.total, recomputed.total);

    // Export: flat rows carry the metadata and pricing.
    let export = ExportData::from_quote(&reloaded, &recomputed);
    let json = export.to_json();
    assert_eq!(json["Quote #"], "Q-INT00001");
    assert_eq!(json["Dealer"], "Prairie Truck & Trailer");
    assert_eq!(json["Trailer Length"], "46'");
    assert_eq!(json["Chassis Type"], "ALUMINUM (Polished)");

    // Document: rendered markdown includes the custom item and a total.
    let doc = DocumentRenderer::new()
        .unwrap()
        .render(&catalog, &reloaded, &recomputed)
        .unwrap();
    assert!(doc.contains("Q-INT00001"));
    assert!(doc.contains("Spare Tire: $250.00"));
    assert!(doc.contains("TOTAL PRICE"));
}

#[test]
fn missing_pricebook_still_produces_a_full_quote() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("pricebook.json");

    let catalog = Catalog::builtin().unwrap();
    let loaded = load_pricebook(&catalog, Some(&missing));
    assert!(loaded.is_fallback());

    let quote = QuoteState::new(&catalog);
    let breakdown = quote.breakdown(&catalog, &loaded.book);
    // Fallback numbers differ but the quote is complete and positive.
    assert!(breakdown.base > 0);
    assert!(breakdown.total > 0.0);

    let doc = DocumentRenderer::new()
        .unwrap()
        .render(&catalog, &quote, &breakdown)
        .unwrap();
    assert!(doc.contains("Final Pricing"));
}

#[test]
fn line_items_survive_the_file_round_trip_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::builtin().unwrap();
    let mut quote = QuoteState::new(&catalog);

    quote.add_line_item("Grain Sock Upgrade", Some(150.0)).unwrap();
    quote.add_line_item("Extra Decals", None).unwrap();
    quote.add_line_item("Extra Decals", None).unwrap();

    let path = dir.path().join("quote.json");
    quote.to_json_file(&path).unwrap();
    let reloaded = QuoteState::from_json_file(&path).unwrap();

    let names: Vec<&str> = reloaded.line_items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Grain Sock Upgrade", "Extra Decals", "Extra Decals"]);

    let mut reloaded = reloaded;
    assert!(reloaded.remove_line_item(5).is_none());
    assert_eq!(reloaded.line_items.len(), 3);
    reloaded.remove_line_item(1);
    assert_eq!(reloaded.line_items.len(), 2);
    assert_eq!(reloaded.line_items[1].name, "Extra Decals");
}
