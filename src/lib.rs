#![forbid(unsafe_code)]

//! # trailquote
//!
//! Quotation engine for customized end-dump trailers.
//!
//! A quote is a set of selections over an option catalog (body, chassis,
//! axles, tires & rims, lights, paint), a discount, and free-form line
//! items. Each option resolves to a non-negative price delta through a
//! declarative pricebook; the total is a flat sum with a discount applied.
//!
//! Reference pricing data is loaded from a `pricebook.json` file when one
//! is available and degrades to built-in fallback tables otherwise, so a
//! quote can always be computed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trailquote::{Catalog, QuoteState, load_pricebook};
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = Catalog::builtin()?;
//!     let loaded = load_pricebook(&catalog, None);
//!
//!     let mut quote = QuoteState::new(&catalog);
//!     quote.set_choice(&catalog, "trailer_length", "46'")?;
//!     quote.add_line_item("Spare Tire", Some(250.0))?;
//!
//!     let breakdown = quote.breakdown(&catalog, &loaded.book);
//!     println!("total: {}", breakdown.total);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod error;
pub mod export;
pub mod pricebook;
pub mod pricing;
pub mod quote;
pub mod schema;

pub use catalog::{Catalog, Field, FieldKind, Section};
pub use error::{QuoteError, Result};
pub use export::{format_amount, DocumentRenderer, ExportData, ExportRow};
pub use pricebook::{load_pricebook, LoadedPricebook, PricebookSource, DEFAULT_PRICEBOOK_FILE};
pub use pricing::{
    apply_discount, compute_final_total, Amount, PriceRule, Pricebook, PricedItem,
};
pub use quote::{Breakdown, FieldValue, LineItem, QuoteMeta, QuoteState, Selection};
