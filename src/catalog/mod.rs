//! Option catalog: the named, typed input surface of a quote.
//!
//! The catalog is reference data, immutable for the session. It lists
//! every configurable field grouped by section, with the allowed labels
//! and defaults. Pricing lives in the pricebook, not here: most fields
//! are cosmetic and exist purely for document content.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, Result};

/// Built-in catalog data, embedded at compile time.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// The full option catalog: ordered sections of ordered fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub version: String,
    pub sections: Vec<Section>,
}

/// A group of related fields (one tab of the quote sheet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub fields: Vec<Field>,
}

/// One configurable attribute of the trailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Stable key, also the pricebook rule key for priced fields.
    pub key: String,
    /// Display name used in prompts and documents.
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Field input kind with its constraints and default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single choice from an enumerated label list.
    Select {
        options: Vec<String>,
        #[serde(default)]
        default: usize,
    },
    /// Free-text value.
    Text {
        #[serde(default)]
        default: String,
    },
    /// Bounded numeric value.
    Number {
        min: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        step: f64,
        default: f64,
    },
    /// Calendar date.
    Date,
    /// Boolean toggle.
    Flag {
        #[serde(default)]
        default: bool,
    },
}

impl Catalog {
    /// Load the built-in catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Ok(serde_json::from_str(BUILTIN_CATALOG)?)
    }

    /// Look up a field by key across all sections.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.key == key)
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Iterate every field in catalog order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Field lookup that reports unknown keys as an error.
    pub fn require_field(&self, key: &str) -> Result<&Field> {
        self.field(key)
            .ok_or_else(|| QuoteError::UnknownField(key.to_string()))
    }
}

impl Field {
    /// The default label of a select field, if this is one.
    pub fn default_label(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Select { options, default } => {
                options.get(*default).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Whether `label` is an allowed value for this select field.
    pub fn allows(&self, label: &str) -> bool {
        match &self.kind {
            FieldKind::Select { options, .. } => options.iter().any(|o| o == label),
            _ => false,
        }
    }
}

/// Rim hardware implied by a rim polish selection.
///
/// The quote document lists the concrete rim model; it follows from the
/// polish choice and is never asked for directly.
pub fn rim_model(selection_label: &str) -> Option<&'static str> {
    match selection_label {
        "HIGH POLISH x ALL RIMS" => Some("ALUMINUM 22.5X8.25 - ALCOA High Polish"),
        "DURABRITE x ALL RIMS" => Some("ALUMINUM 22.5X8.25 - ALCOA Durabrite Polish"),
        "HIGH POLISH INSIDE AND DURABRITE OUTSIDE" => {
            Some("ALUMINUM 22.5X8.25 - ALCOA Durabrite Outside and High Polish Inside")
        }
        _ => None,
    }
}
