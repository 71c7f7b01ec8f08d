//! Price tables and total calculation.
//!
//! Every priced option maps to one declarative [`PriceRule`]; there is no
//! per-field branching. Resolution never fails: an option without a rule,
//! a label missing from its table, or an uncovered quantity all contribute
//! a zero delta.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::quote::{LineItem, Selection};

mod fallback;

/// Non-negative price delta in whole currency units.
pub type Amount = u64;

/// Built-in reference pricing data, embedded at compile time.
///
/// This is the dataset `tq init` scaffolds into the working directory.
pub const REFERENCE_PRICEBOOK: &str = include_str!("../../assets/pricebook.json");

/// The full price table: option key → pricing rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pricebook {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub version: String,
    /// Pricing rules keyed by option key.
    pub rules: HashMap<String, PriceRule>,
    /// Numeric fields whose values are added after the discount.
    #[serde(default)]
    pub additions: Vec<String>,
}

/// How one option key resolves to a price delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceRule {
    /// Flat per-label lookup.
    Label { table: HashMap<String, Amount> },

    /// Lookup keyed by a whole quantity (e.g. axle count).
    Quantity { table: HashMap<u32, Amount> },

    /// Per-unit charge above a threshold, with the rate chosen by the
    /// label of a companion field.
    #[serde(rename_all = "camelCase")]
    PerUnit {
        rate_key: String,
        threshold: u32,
        rates: HashMap<String, Amount>,
    },

    /// Lookup conditional on a combination of other selections. The case
    /// key joins the companion labels with `|`; combinations not covered
    /// by the table resolve to the flat fallback constant.
    Composite {
        keys: Vec<String>,
        cases: HashMap<String, HashMap<String, Amount>>,
        fallback: Amount,
    },

    /// Contributes the value of a numeric field only while a gating
    /// selection matches.
    #[serde(rename_all = "camelCase")]
    Gated {
        gate: String,
        when: String,
        amount_from: String,
    },
}

/// One nonzero contribution to the base price, for itemized display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricedItem {
    pub key: String,
    pub name: String,
    pub amount: Amount,
}

impl Pricebook {
    /// Parse the embedded reference pricing data.
    pub fn reference() -> crate::Result<Self> {
        Ok(serde_json::from_str(REFERENCE_PRICEBOOK)?)
    }

    /// The hardcoded fallback tables used when reference data cannot be
    /// loaded. Exposes the same option keys as the reference dataset.
    pub fn fallback() -> Self {
        fallback::build()
    }

    /// Resolve the price delta for one option key against the current
    /// selection. Never errors; anything unresolvable is 0.
    pub fn resolve(&self, selection: &Selection, key: &str) -> Amount {
        let Some(rule) = self.rules.get(key) else {
            return 0;
        };

        match rule {
            PriceRule::Label { table } => selection
                .label(key)
                .and_then(|l| table.get(l))
                .copied()
                .unwrap_or(0),

            PriceRule::Quantity { table } => selection
                .quantity(key)
                .and_then(|q| table.get(&q))
                .copied()
                .unwrap_or(0),

            PriceRule::PerUnit {
                rate_key,
                threshold,
                rates,
            } => {
                let qty = selection.quantity(key).unwrap_or(0);
                if qty <= *threshold {
                    return 0;
                }
                let rate = selection
                    .label(rate_key)
                    .and_then(|l| rates.get(l))
                    .copied()
                    .unwrap_or(0);
                Amount::from(qty) * rate
            }

            PriceRule::Composite {
                keys,
                cases,
                fallback,
            } => {
                // An unselected option is unpriced, like any other rule.
                let Some(label) = selection.label(key) else {
                    return 0;
                };
                let case = keys
                    .iter()
                    .map(|k| selection.label(k))
                    .collect::<Option<Vec<_>>>()
                    .map(|labels| labels.join("|"));
                match case.and_then(|c| cases.get(&c)) {
                    // Covered combination: price the label from its case
                    // table; a label missing there is simply unpriced.
                    Some(table) => table.get(label).copied().unwrap_or(0),
                    // Uncovered combination: the flat fallback constant.
                    None => *fallback,
                }
            }

            PriceRule::Gated {
                gate,
                when,
                amount_from,
            } => {
                if selection.label(gate) == Some(when.as_str()) {
                    selection
                        .number(amount_from)
                        .map(|v| v.max(0.0) as Amount)
                        .unwrap_or(0)
                } else {
                    0
                }
            }
        }
    }

    /// Plain label lookup, independent of any selection. Only flat label
    /// rules answer here; conditional rules report 0 (their price depends
    /// on companion selections).
    pub fn price_for(&self, key: &str, label: &str) -> Amount {
        match self.rules.get(key) {
            Some(PriceRule::Label { table }) => table.get(label).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Sum of resolved deltas over every priced catalog key.
    pub fn base_total(&self, catalog: &Catalog, selection: &Selection) -> Amount {
        catalog
            .fields()
            .filter(|f| self.rules.contains_key(&f.key))
            .map(|f| self.resolve(selection, &f.key))
            .sum()
    }

    /// Nonzero contributions in catalog order, for itemized display.
    pub fn itemize(&self, catalog: &Catalog, selection: &Selection) -> Vec<PricedItem> {
        catalog
            .fields()
            .filter(|f| self.rules.contains_key(&f.key))
            .filter_map(|f| {
                let amount = self.resolve(selection, &f.key);
                (amount > 0).then(|| PricedItem {
                    key: f.key.clone(),
                    name: f.name.clone(),
                    amount,
                })
            })
            .collect()
    }

    /// Sum of the addition fields' current values.
    pub fn fixed_additions(&self, selection: &Selection) -> f64 {
        self.additions
            .iter()
            .filter_map(|key| selection.number(key))
            .map(|v| v.max(0.0))
            .sum()
    }
}

/// `base * (1 - percent / 100)`. The percent is clamped to [0, 100] at
/// the input boundary, not here.
pub fn apply_discount(base: f64, percent: f64) -> f64 {
    base * (1.0 - percent / 100.0)
}

/// Discounted base plus fixed additions plus line items.
pub fn compute_final_total(discounted: f64, fixed_additions: f64, line_items: &[LineItem]) -> f64 {
    discounted + fixed_additions + line_items.iter().map(|i| i.price).sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::FieldValue;

    fn selection_with(pairs: &[(&str, FieldValue)]) -> Selection {
        let mut selection = Selection::default();
        for (key, value) in pairs {
            selection.insert(key.to_string(), value.clone());
        }
        selection
    }

    fn label(v: &str) -> FieldValue {
        FieldValue::Str(v.to_string())
    }

    #[test]
    fn reference_pricebook_parses() {
        let book = Pricebook::reference().expect("embedded pricebook must parse");
        assert!(book.rules.contains_key("trailer_length"));
        assert!(book.rules.contains_key("ride_rim_selection"));
        assert_eq!(book.additions.len(), 2);
    }

    #[test]
    fn label_rule_resolves_and_misses_to_zero() {
        let book = Pricebook::reference().unwrap();
        let selection = selection_with(&[("wall_height", label("62\""))]);
        assert_eq!(book.resolve(&selection, "wall_height"), 500);

        let selection = selection_with(&[("wall_height", label("not a height"))]);
        assert_eq!(book.resolve(&selection, "wall_height"), 0);

        assert_eq!(book.resolve(&Selection::default(), "no_such_key"), 0);
    }

    #[test]
    fn quantity_rule_covers_axle_counts() {
        let book = Pricebook::reference().unwrap();
        for (qty, expected) in [(0u32, 0u64), (1, 7000), (2, 14000)] {
            let selection = selection_with(&[("qty_steer", FieldValue::Number(qty as f64))]);
            assert_eq!(book.resolve(&selection, "qty_steer"), expected);
        }
        for (qty, expected) in [(0u32, 0u64), (1, 1000), (2, 2000), (3, 3000)] {
            let selection = selection_with(&[("qty_lift", FieldValue::Number(qty as f64))]);
            assert_eq!(book.resolve(&selection, "qty_lift"), expected);
        }
    }

    #[test]
    fn per_unit_rule_charges_only_above_threshold() {
        let book = Pricebook::reference().unwrap();
        let grommet = "GROTE L.E.D. STANDARD - GROMMET MOUNT";
        let flange = "GROTE L.E.D. STANDARD - FLANGE MOUNT";

        let selection = selection_with(&[
            ("light_type", label(grommet)),
            ("additional_markers", FieldValue::Number(30.0)),
        ]);
        assert_eq!(book.resolve(&selection, "additional_markers"), 3600);

        let selection = selection_with(&[
            ("light_type", label(flange)),
            ("additional_markers", FieldValue::Number(30.0)),
        ]);
        assert_eq!(book.resolve(&selection, "additional_markers"), 4200);

        let selection = selection_with(&[
            ("light_type", label(grommet)),
            ("additional_markers", FieldValue::Number(5.0)),
        ]);
        assert_eq!(book.resolve(&selection, "additional_markers"), 0);
    }

    #[test]
    fn composite_rule_uses_case_table_when_covered() {
        let book = Pricebook::reference().unwrap();
        let selection = selection_with(&[
            ("tire_size", label("22.5")),
            ("ride_tire_type", label("DUAL TIRES")),
            ("ride_rim_selection", label("DURABRITE x ALL RIMS")),
        ]);
        assert_eq!(book.resolve(&selection, "ride_rim_selection"), 4500);
    }

    #[test]
    fn composite_rule_falls_back_on_uncovered_combination() {
        let book = Pricebook::reference().unwrap();
        let selection = selection_with(&[
            ("tire_size", label("24.5")),
            ("ride_tire_type", label("DUAL TIRES")),
            ("ride_rim_selection", label("DURABRITE x ALL RIMS")),
        ]);
        assert_eq!(book.resolve(&selection, "ride_rim_selection"), 1500);

        let selection = selection_with(&[
            ("tire_size", label("22.5")),
            ("steer_tire_type", label("SINGLE TIRES")),
            ("steer_rim_selection", label("DURABRITE x ALL RIMS")),
        ]);
        assert_eq!(book.resolve(&selection, "steer_rim_selection"), 500);
    }

    #[test]
    fn composite_rule_is_unpriced_when_unselected() {
        let book = Pricebook::reference().unwrap();
        assert_eq!(book.resolve(&Selection::default(), "ride_rim_selection"), 0);
        assert_eq!(book.resolve(&Selection::default(), "steer_rim_selection"), 0);
    }

    #[test]
    fn gated_rule_reads_amount_only_while_gate_matches() {
        let book = Pricebook::reference().unwrap();
        let selection = selection_with(&[
            ("tire_carrier", label("YES")),
            ("tire_carrier_price", FieldValue::Number(800.0)),
        ]);
        assert_eq!(book.resolve(&selection, "tire_carrier"), 800);

        let selection = selection_with(&[
            ("tire_carrier", label("NONE")),
            ("tire_carrier_price", FieldValue::Number(800.0)),
        ]);
        assert_eq!(book.resolve(&selection, "tire_carrier"), 0);
    }

    #[test]
    fn discount_math_matches_contract() {
        assert_eq!(apply_discount(100.0, 0.0), 100.0);
        assert_eq!(apply_discount(100.0, 100.0), 0.0);
        assert_eq!(apply_discount(200.0, 4.0), 192.0);
    }

    #[test]
    fn final_total_adds_additions_and_line_items() {
        let items = vec![
            LineItem {
                name: "Spare Tire".to_string(),
                price: 250.0,
            },
            LineItem {
                name: "Toolbox".to_string(),
                price: 150.0,
            },
        ];
        assert_eq!(compute_final_total(5760.0, 2500.0, &items), 8660.0);
        assert_eq!(compute_final_total(5760.0, 0.0, &[]), 5760.0);
    }

    #[test]
    fn price_for_answers_flat_rules_only() {
        let book = Pricebook::reference().unwrap();
        assert_eq!(book.price_for("chassis", "ALUMINUM (Polished)"), 4500);
        assert_eq!(book.price_for("chassis", "STEEL"), 0);
        // Composite pricing depends on companion selections.
        assert_eq!(book.price_for("ride_rim_selection", "DURABRITE x ALL RIMS"), 0);
    }
}
