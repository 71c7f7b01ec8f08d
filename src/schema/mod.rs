//! Embedded JSON Schemas and validation helpers.

use crate::error::{QuoteError, Result};

/// Pricebook file schema, embedded at compile time.
pub const PRICEBOOK_SCHEMA: &str = include_str!("../../assets/pricebook.schema.json");

/// Validate pricebook file content against the embedded schema.
///
/// The schema also enforces the non-negative delta invariant, so a
/// hand-edited pricebook with negative prices is rejected before it can
/// reach the calculator.
pub fn validate_pricebook(content: &str) -> Result<()> {
    let schema: serde_json::Value = serde_json::from_str(PRICEBOOK_SCHEMA)?;
    let instance: serde_json::Value = serde_json::from_str(content)?;

    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| QuoteError::InvalidPricebook(e.to_string()))?;

    let errors: Vec<String> = validator
        .iter_errors(&instance)
        .map(|e| e.to_string())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(QuoteError::InvalidPricebook(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::REFERENCE_PRICEBOOK;

    #[test]
    fn reference_pricebook_passes_validation() {
        validate_pricebook(REFERENCE_PRICEBOOK).expect("shipped pricebook must validate");
    }

    #[test]
    fn negative_delta_is_rejected() {
        let content = r#"{
            "version": "1",
            "rules": {
                "chassis": { "kind": "label", "table": { "STEEL": -5 } }
            }
        }"#;
        assert!(validate_pricebook(content).is_err());
    }

    #[test]
    fn unknown_rule_kind_is_rejected() {
        let content = r#"{
            "version": "1",
            "rules": {
                "chassis": { "kind": "multiplier", "factor": 2 }
            }
        }"#;
        assert!(validate_pricebook(content).is_err());
    }

    #[test]
    fn missing_rules_is_rejected() {
        assert!(validate_pricebook(r#"{ "version": "1" }"#).is_err());
    }
}
