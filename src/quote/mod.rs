//! Quote session state: metadata, selections, line items, breakdown.
//!
//! A `QuoteState` belongs to one interactive session. It is created with
//! catalog defaults, mutated through validated setters, and serialized to
//! JSON only on explicit save or export. Recomputation is pure: the
//! breakdown is derived from current state every time, so re-running it
//! on unchanged state yields identical totals.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, FieldKind};
use crate::error::{QuoteError, Result};
use crate::pricing::{apply_discount, compute_final_total, Amount, Pricebook, PricedItem};

/// Trailer models offered on a quote.
pub const MODELS: [&str; 3] = ["End Dump 4x", "End Dump 3x", "End Dump 5x"];

/// A typed field value in a selection.
///
/// Variant order matters for untagged deserialization: date-shaped
/// strings must be tried before plain strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Date(NaiveDate),
    Str(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Human-readable rendering for prompts and documents.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Flag(true) => "YES".to_string(),
            FieldValue::Flag(false) => "NO".to_string(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            FieldValue::Date(d) => d.to_string(),
            FieldValue::Str(s) => s.clone(),
        }
    }
}

/// Current choice per option key; one entry per catalog key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeMap<String, FieldValue>);

impl Selection {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// String value (select label or free text) for a key.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(FieldValue::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(FieldValue::as_number)
    }

    /// Numeric value truncated to a whole non-negative quantity.
    pub fn quantity(&self, key: &str) -> Option<u32> {
        self.number(key).map(|n| n.max(0.0) as u32)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(FieldValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: String, value: FieldValue) {
        self.0.insert(key, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A free-form named price addition outside the option catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
}

/// Quote header data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteMeta {
    pub number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub dealer: String,
    #[serde(default)]
    pub contact: String,
    pub model: String,
    pub discount_percent: f64,
}

impl QuoteMeta {
    /// Short generated quote number, e.g. `Q-3F2A9C41`.
    pub fn generated_number() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("Q-{}", id[..8].to_uppercase())
    }

    /// Set the discount, clamped to [0, 100].
    pub fn set_discount(&mut self, percent: f64) {
        self.discount_percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}

impl Default for QuoteMeta {
    fn default() -> Self {
        Self {
            number: Self::generated_number(),
            date: chrono::Local::now().date_naive(),
            dealer: String::new(),
            contact: String::new(),
            model: MODELS[0].to_string(),
            discount_percent: 4.0,
        }
    }
}

/// Full quote session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteState {
    pub meta: QuoteMeta,
    pub selection: Selection,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl QuoteState {
    /// Fresh state with every catalog field at its default.
    pub fn new(catalog: &Catalog) -> Self {
        let mut selection = Selection::default();
        for field in catalog.fields() {
            let value = match &field.kind {
                FieldKind::Select { options, default } => {
                    FieldValue::Str(options.get(*default).cloned().unwrap_or_default())
                }
                FieldKind::Text { default } => FieldValue::Str(default.clone()),
                FieldKind::Number { default, .. } => FieldValue::Number(*default),
                FieldKind::Date => FieldValue::Date(chrono::Local::now().date_naive()),
                FieldKind::Flag { default } => FieldValue::Flag(*default),
            };
            selection.insert(field.key.clone(), value);
        }
        Self {
            meta: QuoteMeta::default(),
            selection,
            line_items: Vec::new(),
        }
    }

    /// Choose a label for a select field. Unknown keys and labels are
    /// rejected at this boundary; they never reach the calculator.
    pub fn set_choice(&mut self, catalog: &Catalog, key: &str, label: &str) -> Result<()> {
        let field = catalog.require_field(key)?;
        if !field.allows(label) {
            return Err(QuoteError::InvalidLabel {
                field: key.to_string(),
                label: label.to_string(),
            });
        }
        self.selection
            .insert(key.to_string(), FieldValue::Str(label.to_string()));
        Ok(())
    }

    /// Set a free-text field.
    pub fn set_text(&mut self, catalog: &Catalog, key: &str, value: &str) -> Result<()> {
        let field = catalog.require_field(key)?;
        match field.kind {
            FieldKind::Text { .. } => {
                self.selection
                    .insert(key.to_string(), FieldValue::Str(value.to_string()));
                Ok(())
            }
            _ => Err(QuoteError::InvalidValue {
                field: key.to_string(),
                reason: "not a text field".to_string(),
            }),
        }
    }

    /// Set a numeric field, clamping into the declared bounds.
    pub fn set_number(&mut self, catalog: &Catalog, key: &str, value: f64) -> Result<()> {
        let field = catalog.require_field(key)?;
        match &field.kind {
            FieldKind::Number { min, max, .. } => {
                if !value.is_finite() {
                    return Err(QuoteError::InvalidValue {
                        field: key.to_string(),
                        reason: "not a finite number".to_string(),
                    });
                }
                let mut clamped = value.max(*min);
                if let Some(max) = max {
                    clamped = clamped.min(*max);
                }
                self.selection
                    .insert(key.to_string(), FieldValue::Number(clamped));
                Ok(())
            }
            _ => Err(QuoteError::InvalidValue {
                field: key.to_string(),
                reason: "not a numeric field".to_string(),
            }),
        }
    }

    /// Set a boolean field.
    pub fn set_flag(&mut self, catalog: &Catalog, key: &str, value: bool) -> Result<()> {
        let field = catalog.require_field(key)?;
        match field.kind {
            FieldKind::Flag { .. } => {
                self.selection
                    .insert(key.to_string(), FieldValue::Flag(value));
                Ok(())
            }
            _ => Err(QuoteError::InvalidValue {
                field: key.to_string(),
                reason: "not a flag field".to_string(),
            }),
        }
    }

    /// Set a date field.
    pub fn set_date(&mut self, catalog: &Catalog, key: &str, value: NaiveDate) -> Result<()> {
        let field = catalog.require_field(key)?;
        match field.kind {
            FieldKind::Date => {
                self.selection
                    .insert(key.to_string(), FieldValue::Date(value));
                Ok(())
            }
            _ => Err(QuoteError::InvalidValue {
                field: key.to_string(),
                reason: "not a date field".to_string(),
            }),
        }
    }

    /// Append a custom line item. The name must be non-empty; an omitted
    /// price defaults to 0. No dedup: identical items may repeat.
    pub fn add_line_item(&mut self, name: &str, price: Option<f64>) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuoteError::InvalidLineItem(
                "name must not be empty".to_string(),
            ));
        }
        let price = price.unwrap_or(0.0);
        if !price.is_finite() || price < 0.0 {
            return Err(QuoteError::InvalidLineItem(
                "price must be a non-negative number".to_string(),
            ));
        }
        self.line_items.push(LineItem {
            name: name.to_string(),
            price,
        });
        Ok(())
    }

    /// Remove a line item by position. Out of range is a no-op.
    pub fn remove_line_item(&mut self, index: usize) -> Option<LineItem> {
        if index < self.line_items.len() {
            Some(self.line_items.remove(index))
        } else {
            None
        }
    }

    /// Recompute the full pricing breakdown from current state.
    pub fn breakdown(&self, catalog: &Catalog, book: &Pricebook) -> Breakdown {
        let items = book.itemize(catalog, &self.selection);
        let base = book.base_total(catalog, &self.selection);
        let discount_percent = self.meta.discount_percent;
        let discount_amount = base as f64 * discount_percent / 100.0;
        let discounted = apply_discount(base as f64, discount_percent);
        let fixed_additions = book.fixed_additions(&self.selection);
        let line_items_total: f64 = self.line_items.iter().map(|i| i.price).sum();
        let total = compute_final_total(discounted, fixed_additions, &self.line_items);
        Breakdown {
            items,
            base,
            discount_percent,
            discount_amount,
            discounted,
            fixed_additions,
            line_items_total,
            additions_total: fixed_additions + line_items_total,
            total,
        }
    }

    /// Write the quote to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Read a quote back from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Derived pricing summary for display and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakdown {
    /// Nonzero option contributions in catalog order.
    pub items: Vec<PricedItem>,
    pub base: Amount,
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub discounted: f64,
    pub fixed_additions: f64,
    pub line_items_total: f64,
    /// Fixed additions plus custom line items.
    pub additions_total: f64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Catalog, QuoteState) {
        let catalog = Catalog::builtin().unwrap();
        let state = QuoteState::new(&catalog);
        (catalog, state)
    }

    #[test]
    fn new_state_covers_every_catalog_key() {
        let (catalog, state) = setup();
        for field in catalog.fields() {
            assert!(
                state.selection.get(&field.key).is_some(),
                "missing default for {}",
                field.key
            );
        }
        assert_eq!(state.selection.len(), catalog.fields().count());
    }

    #[test]
    fn default_selection_uses_catalog_defaults() {
        let (_, state) = setup();
        assert_eq!(state.selection.label("trailer_length"), Some("46'"));
        assert_eq!(state.selection.label("wall_height"), Some("62\""));
        assert_eq!(state.selection.number("additional_markers"), Some(30.0));
        assert_eq!(state.selection.flag("steel_galvanized"), Some(true));
    }

    #[test]
    fn set_choice_rejects_unknown_key_and_label() {
        let (catalog, mut state) = setup();
        assert!(state.set_choice(&catalog, "warp_drive", "YES").is_err());
        assert!(state.set_choice(&catalog, "trailer_length", "99'").is_err());
        assert!(state.set_choice(&catalog, "trailer_length", "48'").is_ok());
        assert_eq!(state.selection.label("trailer_length"), Some("48'"));
    }

    #[test]
    fn set_number_clamps_into_bounds() {
        let (catalog, mut state) = setup();
        state.set_number(&catalog, "qty_lift", 99.0).unwrap();
        assert_eq!(state.selection.number("qty_lift"), Some(3.0));
        state.set_number(&catalog, "qty_lift", -1.0).unwrap();
        assert_eq!(state.selection.number("qty_lift"), Some(0.0));
        assert!(state.set_number(&catalog, "qty_lift", f64::NAN).is_err());
    }

    #[test]
    fn discount_is_clamped() {
        let mut meta = QuoteMeta::default();
        meta.set_discount(150.0);
        assert_eq!(meta.discount_percent, 100.0);
        meta.set_discount(-3.0);
        assert_eq!(meta.discount_percent, 0.0);
        meta.set_discount(4.5);
        assert_eq!(meta.discount_percent, 4.5);
    }

    #[test]
    fn line_item_round_trip() {
        let (_, mut state) = setup();
        state.add_line_item("Spare Tire", Some(250.0)).unwrap();
        assert_eq!(
            state.line_items,
            vec![LineItem {
                name: "Spare Tire".to_string(),
                price: 250.0
            }]
        );

        let removed = state.remove_line_item(0).unwrap();
        assert_eq!(removed.name, "Spare Tire");
        assert!(state.line_items.is_empty());

        // Removing from an empty list is a no-op.
        assert!(state.remove_line_item(0).is_none());
        assert!(state.line_items.is_empty());
    }

    #[test]
    fn line_item_boundary_validation() {
        let (_, mut state) = setup();
        assert!(state.add_line_item("", Some(100.0)).is_err());
        assert!(state.add_line_item("   ", Some(100.0)).is_err());
        assert!(state.add_line_item("Toolbox", Some(-1.0)).is_err());
        assert!(state.line_items.is_empty());

        // Unspecified price defaults to 0; duplicates are allowed.
        state.add_line_item("Decals", None).unwrap();
        state.add_line_item("Decals", None).unwrap();
        assert_eq!(state.line_items.len(), 2);
        assert_eq!(state.line_items[0].price, 0.0);
    }

    #[test]
    fn breakdown_is_idempotent() {
        let (catalog, mut state) = setup();
        let book = Pricebook::reference().unwrap();
        state.add_line_item("Spare Tire", Some(250.0)).unwrap();

        let first = state.breakdown(&catalog, &book);
        let second = state.breakdown(&catalog, &book);
        assert_eq!(first.base, second.base);
        assert_eq!(first.discount_amount, second.discount_amount);
        assert_eq!(first.total, second.total);
    }

    #[test]
    fn quote_json_round_trip() {
        let (catalog, mut state) = setup();
        state.set_choice(&catalog, "chassis", "STEEL").unwrap();
        state.add_line_item("Spare Tire", Some(250.0)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        state.to_json_file(&path).unwrap();
        let restored = QuoteState::from_json_file(&path).unwrap();

        assert_eq!(restored.selection, state.selection);
        assert_eq!(restored.line_items, state.line_items);
        assert_eq!(restored.meta.number, state.meta.number);
        assert_eq!(restored.meta.date, state.meta.date);

        let book = Pricebook::reference().unwrap();
        assert_eq!(
            restored.breakdown(&catalog, &book).total,
            state.breakdown(&catalog, &book).total
        );
    }
}
