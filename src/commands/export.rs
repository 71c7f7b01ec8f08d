//! Implements `tq export`: render the quote document or flat export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::catalog::Catalog;
use crate::export::{DocumentRenderer, ExportData};
use crate::pricebook::load_pricebook;
use crate::quote::QuoteState;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Rendered quote document
    Markdown,
    /// Flat key→value structure
    Json,
}

/// Options for the export command
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Quote file to export
    pub quote: PathBuf,
    /// Output format
    pub format: ExportFormat,
    /// Output file (stdout when omitted)
    pub output: Option<PathBuf>,
    /// Pricebook file override
    pub pricebook: Option<PathBuf>,
}

/// Execute the export command
pub fn execute_export(options: ExportOptions) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let loaded = load_pricebook(&catalog, options.pricebook.as_deref());

    let quote = QuoteState::from_json_file(&options.quote)
        .with_context(|| format!("Failed to read quote from {}", options.quote.display()))?;
    let breakdown = quote.breakdown(&catalog, &loaded.book);

    let content = match options.format {
        ExportFormat::Markdown => {
            DocumentRenderer::new()?.render(&catalog, &quote, &breakdown)?
        }
        ExportFormat::Json => {
            let export = ExportData::from_quote(&quote, &breakdown);
            serde_json::to_string_pretty(&export.to_json())?
        }
    };

    match options.output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Export written to {}", style("✓").green(), path.display());
        }
        None => println!("{content}"),
    }

    Ok(())
}
