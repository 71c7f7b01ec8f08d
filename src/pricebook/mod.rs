//! Reference pricing data loading with fallback.
//!
//! Commands load the pricebook through [`load_pricebook`], which degrades
//! to the built-in fallback tables when the reference file is missing or
//! invalid. The load never fails: callers always get a usable pricebook,
//! plus the source so they can surface a non-blocking warning.

use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::pricing::Pricebook;
use crate::schema;

/// Default reference data file looked up in the working directory.
pub const DEFAULT_PRICEBOOK_FILE: &str = "pricebook.json";

/// Where the active pricebook came from.
#[derive(Debug, Clone)]
pub enum PricebookSource {
    /// Loaded from a reference data file.
    Reference(PathBuf),
    /// Built-in fallback tables; reference data was unavailable.
    Fallback { reason: String },
}

/// A pricebook together with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedPricebook {
    pub book: Pricebook,
    pub source: PricebookSource,
}

impl LoadedPricebook {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, PricebookSource::Fallback { .. })
    }
}

impl Pricebook {
    /// Read, schema-validate, and deserialize a pricebook file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        schema::validate_pricebook(&content)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Load the reference pricebook, degrading to the fallback tables when it
/// cannot be loaded.
///
/// Rule keys the catalog does not know are kept but warned about; they
/// never contribute to a total since resolution walks catalog keys.
pub fn load_pricebook(catalog: &Catalog, path: Option<&Path>) -> LoadedPricebook {
    let candidate = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PRICEBOOK_FILE));

    match Pricebook::from_json_file(&candidate) {
        Ok(book) => {
            for key in book.rules.keys() {
                if catalog.field(key).is_none() {
                    tracing::warn!("Pricebook rule for unknown option key: {}", key);
                }
            }
            for key in &book.additions {
                if catalog.field(key).is_none() {
                    tracing::warn!("Pricebook addition for unknown option key: {}", key);
                }
            }
            LoadedPricebook {
                book,
                source: PricebookSource::Reference(candidate),
            }
        }
        Err(err) => {
            tracing::warn!(
                "Reference pricebook {} unavailable ({}), using fallback tables",
                candidate.display(),
                err
            );
            LoadedPricebook {
                book: Pricebook::fallback(),
                source: PricebookSource::Fallback {
                    reason: err.to_string(),
                },
            }
        }
    }
}
