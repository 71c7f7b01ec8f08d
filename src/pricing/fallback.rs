//! Hardcoded fallback price tables.
//!
//! Used when the reference pricebook cannot be loaded. The key set is
//! identical to the reference dataset; only a few numbers differ (the
//! reference data prices 47'/48' trailers and carries the 22.5/DUAL rim
//! case tables, the fallback does not).

use std::collections::HashMap;

use super::{Amount, PriceRule, Pricebook};

fn label(pairs: &[(&str, Amount)]) -> PriceRule {
    PriceRule::Label {
        table: pairs.iter().map(|(l, p)| (l.to_string(), *p)).collect(),
    }
}

fn quantity(pairs: &[(u32, Amount)]) -> PriceRule {
    PriceRule::Quantity {
        table: pairs.iter().copied().collect(),
    }
}

pub(super) fn build() -> Pricebook {
    let mut rules = HashMap::new();

    rules.insert(
        "trailer_length".to_string(),
        label(&[
            ("40'", 0),
            ("41'", 0),
            ("42'", 0),
            ("43'", 0),
            ("44'", 0),
            ("45'", 0),
            ("46'", 1000),
            ("47'", 0),
            ("48'", 0),
        ]),
    );
    rules.insert(
        "wall_height".to_string(),
        label(&[
            ("60\"", 0),
            ("62\"", 500),
            ("64\"", 600),
            ("66\"", 700),
            ("68\"", 800),
            ("70\"", 900),
            ("72\"", 1000),
            ("74\"", 1100),
            ("76\"", 1200),
            ("78\"", 1300),
            ("80\"", 1400),
            ("82\"", 1500),
            ("84\"", 1600),
        ]),
    );
    rules.insert(
        "board_height".to_string(),
        label(&[
            ("NONE", 0),
            ("6\" Board", 0),
            ("8\" Board", 0),
            ("10\" Board", 0),
            ("12\" Board", 0),
        ]),
    );
    rules.insert(
        "floor".to_string(),
        label(&[("1/4\" THICKNESS", 0), ("3/8\" THICKNESS", 1000)]),
    );
    rules.insert("tow_motor".to_string(), label(&[("NO", 0), ("YES", 500)]));
    rules.insert(
        "rear_steps".to_string(),
        label(&[
            ("D/S IN AND OUT", 0),
            ("P/S IN AND OUT", 0),
            ("P/S IN", 0),
            ("NONE", 0),
        ]),
    );
    rules.insert(
        "shovel_holder".to_string(),
        label(&[
            ("YES -DRIVER SIDE @DOGHOUSE", 50),
            ("YES -DRIVER SIDE @UNDERNEATH BOX", 50),
            ("NONE", 0),
        ]),
    );
    rules.insert(
        "man_door".to_string(),
        label(&[
            ("NONE", 0),
            ("YES - DRIVER SIDE W/GRAB HANDLE", 1300),
            ("YES - PASSENGER SIDE W/GRAB HANDLE", 1300),
        ]),
    );
    rules.insert(
        "bulkhead_steps".to_string(),
        label(&[
            ("NONE", 0),
            ("DRIVER SIDE AND 1 BELOW MANDOOR", 0),
            ("PASSENGER SIDE AND 1 BELOW MANDOOR", 0),
        ]),
    );
    rules.insert(
        "tailgate_slope".to_string(),
        label(&[("STRAIGHT", 0), ("85 DEGREE SLOPE", 0)]),
    );
    rules.insert(
        "gate_operation".to_string(),
        label(&[
            ("ELECTRIC OVER AIR BOOSTER", 0),
            ("ELECTRIC OVER AIR CYLINDER", 0),
            ("MANUAL LOCKING", 0),
        ]),
    );
    rules.insert(
        "coal_chute".to_string(),
        label(&[("3 DOORS 24\"", 1500), ("1 DOOR 24\"", 1000), ("NONE", 0)]),
    );
    rules.insert(
        "sock_adaptor".to_string(),
        label(&[
            ("NONE", 0),
            ("YES- Driver Side", 0),
            ("YES- Passenger Side", 0),
        ]),
    );
    rules.insert(
        "chassis".to_string(),
        label(&[
            ("ALUMINUM (Polished)", 4500),
            ("ALUMINUM (Non Polished)", 1500),
            ("STEEL", 0),
        ]),
    );
    rules.insert(
        "gooseneck".to_string(),
        label(&[("NONE", 0), ("YES - 12\"", 0)]),
    );
    rules.insert(
        "ride_mudflap".to_string(),
        label(&[("FRONT OF ALL AXLES", 0), ("FRONT OF 1ST RIDE ONLY", 0)]),
    );
    rules.insert(
        "landing_gear".to_string(),
        label(&[("STEEL - SAF HOLLAND", 0), ("ALUMINUM - JOST AX150", 0)]),
    );
    rules.insert("brakes".to_string(), label(&[("DRUM", 0), ("DISC", 0)]));
    rules.insert(
        "light_type".to_string(),
        label(&[
            ("GROTE L.E.D. STANDARD - GROMMET MOUNT", 0),
            ("GROTE L.E.D. STANDARD - FLANGE MOUNT", 0),
        ]),
    );

    rules.insert(
        "qty_lift".to_string(),
        quantity(&[(0, 0), (1, 1000), (2, 2000), (3, 3000)]),
    );
    rules.insert(
        "qty_steer".to_string(),
        quantity(&[(0, 0), (1, 7000), (2, 14000)]),
    );

    rules.insert(
        "additional_markers".to_string(),
        PriceRule::PerUnit {
            rate_key: "light_type".to_string(),
            threshold: 5,
            rates: [
                ("GROTE L.E.D. STANDARD - GROMMET MOUNT".to_string(), 120),
                ("GROTE L.E.D. STANDARD - FLANGE MOUNT".to_string(), 140),
            ]
            .into_iter()
            .collect(),
        },
    );

    // Without reference data the rim combinations are unknown, so both
    // rim rules resolve to their flat fallback constants.
    rules.insert(
        "ride_rim_selection".to_string(),
        PriceRule::Composite {
            keys: vec!["tire_size".to_string(), "ride_tire_type".to_string()],
            cases: HashMap::new(),
            fallback: 1500,
        },
    );
    rules.insert(
        "steer_rim_selection".to_string(),
        PriceRule::Composite {
            keys: vec!["tire_size".to_string(), "steer_tire_type".to_string()],
            cases: HashMap::new(),
            fallback: 500,
        },
    );

    rules.insert(
        "tire_carrier".to_string(),
        PriceRule::Gated {
            gate: "tire_carrier".to_string(),
            when: "YES".to_string(),
            amount_from: "tire_carrier_price".to_string(),
        },
    );

    Pricebook {
        schema: None,
        version: "1".to_string(),
        rules,
        additions: vec!["alcoa_rims_addition".to_string(), "grain_sock".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_and_reference_expose_the_same_keys() {
        let fallback = Pricebook::fallback();
        let reference = Pricebook::reference().unwrap();

        let mut fallback_keys: Vec<_> = fallback.rules.keys().collect();
        let mut reference_keys: Vec<_> = reference.rules.keys().collect();
        fallback_keys.sort();
        reference_keys.sort();
        assert_eq!(fallback_keys, reference_keys);
        assert_eq!(fallback.additions, reference.additions);
    }

    #[test]
    fn fallback_prices_only_46_foot_length() {
        let book = Pricebook::fallback();
        assert_eq!(book.price_for("trailer_length", "46'"), 1000);
        assert_eq!(book.price_for("trailer_length", "47'"), 0);
        assert_eq!(book.price_for("trailer_length", "48'"), 0);
    }

    #[test]
    fn fallback_rims_resolve_flat() {
        use crate::quote::{FieldValue, Selection};

        let book = Pricebook::fallback();
        let mut selection = Selection::default();
        selection.insert("tire_size".to_string(), FieldValue::Str("22.5".to_string()));
        selection.insert(
            "ride_tire_type".to_string(),
            FieldValue::Str("DUAL TIRES".to_string()),
        );
        selection.insert(
            "ride_rim_selection".to_string(),
            FieldValue::Str("DURABRITE x ALL RIMS".to_string()),
        );
        // Even the covered-in-reference combination is flat here.
        assert_eq!(book.resolve(&selection, "ride_rim_selection"), 1500);
    }
}
