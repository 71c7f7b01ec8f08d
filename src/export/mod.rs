//! Export surface: flat key→value rows and the rendered quote document.
//!
//! The core hands external collaborators a flat structure; the document
//! renderer is a thin handlebars template over the same data, covering
//! the full specification (cosmetic selections exist for exactly this).

use handlebars::Handlebars;
use serde_json::json;

use crate::catalog::{rim_model, Catalog};
use crate::error::Result;
use crate::quote::{Breakdown, QuoteState};

/// Quote document template, embedded at compile time.
const QUOTE_TEMPLATE: &str = include_str!("../../assets/quote.md.hbs");

/// One entry of the flat export structure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExportRow {
    pub key: String,
    pub value: String,
}

/// Flat key→value export: metadata, the exported specification subset,
/// and the pricing breakdown.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExportData {
    pub rows: Vec<ExportRow>,
}

impl ExportData {
    pub fn from_quote(quote: &QuoteState, breakdown: &Breakdown) -> Self {
        let mut rows = Vec::new();
        let mut push = |key: &str, value: String| {
            rows.push(ExportRow {
                key: key.to_string(),
                value,
            });
        };

        push("Quote #", quote.meta.number.clone());
        push("Date", quote.meta.date.to_string());
        push("Dealer", quote.meta.dealer.clone());
        push("Contact", quote.meta.contact.clone());
        push("Model", quote.meta.model.clone());

        let spec = |key: &str| quote.selection.label(key).unwrap_or("").to_string();
        push("Trailer Length", spec("trailer_length"));
        push("Wall Height", spec("wall_height"));
        push("Chassis Type", spec("chassis"));
        push("Tire Size", spec("tire_size"));

        push("Base Price", format_amount(breakdown.base as f64));
        push(
            &format!("Discount ({}%)", format_percent(breakdown.discount_percent)),
            format!("-{}", format_amount(breakdown.discount_amount)),
        );
        push("Discounted Price", format_amount(breakdown.discounted));
        push("Additional Items", format_amount(breakdown.additions_total));
        push("TOTAL", format_amount(breakdown.total));

        Self { rows }
    }

    /// The rows as one flat JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .rows
            .iter()
            .map(|r| (r.key.clone(), serde_json::Value::String(r.value.clone())))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Renders the quote document from the embedded template.
pub struct DocumentRenderer {
    registry: Handlebars<'static>,
}

impl DocumentRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        // The document is markdown, not HTML.
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string("quote", QUOTE_TEMPLATE)?;
        Ok(Self { registry })
    }

    /// Render the full quote document.
    pub fn render(
        &self,
        catalog: &Catalog,
        quote: &QuoteState,
        breakdown: &Breakdown,
    ) -> Result<String> {
        let sections: Vec<serde_json::Value> = catalog
            .sections
            .iter()
            .map(|section| {
                let mut rows: Vec<serde_json::Value> = section
                    .fields
                    .iter()
                    .filter_map(|field| {
                        let value = quote.selection.get(&field.key)?.display();
                        (!value.is_empty()).then(|| json!({ "name": field.name, "value": value }))
                    })
                    .collect();
                // The rim hardware rows are derived from the polish choice.
                if section.id == "tires" {
                    for (selection_key, name) in [
                        ("ride_rim_selection", "Rims (Ride)"),
                        ("steer_rim_selection", "Rims (Steer)"),
                    ] {
                        if let Some(model) =
                            quote.selection.label(selection_key).and_then(rim_model)
                        {
                            rows.push(json!({ "name": name, "value": model }));
                        }
                    }
                }
                json!({ "name": section.name, "rows": rows })
            })
            .collect();

        let items: Vec<serde_json::Value> = breakdown
            .items
            .iter()
            .map(|i| json!({ "name": i.name, "amount": format_amount(i.amount as f64) }))
            .collect();

        let line_items: Vec<serde_json::Value> = quote
            .line_items
            .iter()
            .map(|i| json!({ "name": i.name, "price": format_amount(i.price) }))
            .collect();

        let context = json!({
            "meta": {
                "number": quote.meta.number,
                "date": quote.meta.date.to_string(),
                "dealer": quote.meta.dealer,
                "contact": quote.meta.contact,
                "model": quote.meta.model,
            },
            "sections": sections,
            "items": items,
            "line_items": line_items,
            "pricing": {
                "base": format_amount(breakdown.base as f64),
                "discount_percent": format_percent(breakdown.discount_percent),
                "discount_amount": format_amount(breakdown.discount_amount),
                "discounted": format_amount(breakdown.discounted),
                "additions": format_amount(breakdown.additions_total),
                "total": format_amount(breakdown.total),
            },
        });

        Ok(self.registry.render("quote", &context)?)
    }
}

/// Currency rendering with thousands separators, e.g. `5,760.00`.
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}

/// Percent rendering without a trailing `.0` for whole values.
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
