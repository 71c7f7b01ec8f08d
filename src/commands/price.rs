//! Implements `tq price`: recompute totals for a saved quote.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::catalog::Catalog;
use crate::commands::output;
use crate::pricebook::load_pricebook;
use crate::quote::QuoteState;

/// Options for the price command
#[derive(Debug, Clone)]
pub struct PriceOptions {
    /// Quote file to price
    pub quote: PathBuf,
    /// Pricebook file override
    pub pricebook: Option<PathBuf>,
    /// Output machine-readable JSON
    pub json: bool,
}

/// Execute the price command
pub fn execute_price(options: PriceOptions) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let loaded = load_pricebook(&catalog, options.pricebook.as_deref());

    let quote = QuoteState::from_json_file(&options.quote)
        .with_context(|| format!("Failed to read quote from {}", options.quote.display()))?;
    let breakdown = quote.breakdown(&catalog, &loaded.book);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    output::print_pricebook_source(&loaded);
    println!(
        "{} Quote {} ({})\n",
        style("→").cyan(),
        style(&quote.meta.number).bold(),
        quote.meta.model
    );
    output::print_breakdown(&breakdown);

    Ok(())
}
