//! Implements `tq catalog`: list sections, fields, and price deltas.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::catalog::{Catalog, FieldKind};
use crate::commands::output;
use crate::export::format_amount;
use crate::pricebook::load_pricebook;
use crate::pricing::Pricebook;

/// Options for the catalog command
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Only show one section
    pub section: Option<String>,
    /// Output machine-readable JSON
    pub json: bool,
    /// Pricebook file override
    pub pricebook: Option<PathBuf>,
}

/// Execute the catalog command
pub fn execute_catalog(options: CatalogOptions) -> Result<()> {
    let catalog = Catalog::builtin()?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if let Some(ref id) = options.section {
        if catalog.section(id).is_none() {
            let known: Vec<&str> = catalog.sections.iter().map(|s| s.id.as_str()).collect();
            eprintln!(
                "{} Unknown section: {} (known: {})",
                style("✗").red(),
                id,
                known.join(", ")
            );
            std::process::exit(1);
        }
    }

    let loaded = load_pricebook(&catalog, options.pricebook.as_deref());
    output::print_pricebook_source(&loaded);

    for section in &catalog.sections {
        if options
            .section
            .as_ref()
            .is_some_and(|id| id != &section.id)
        {
            continue;
        }

        println!(
            "\n{} {} {}",
            style("→").cyan(),
            style(&section.name).bold(),
            style(format!("({})", section.id)).dim()
        );

        for field in &section.fields {
            print_field(field, &loaded.book);
        }
    }

    Ok(())
}

fn print_field(field: &crate::catalog::Field, book: &Pricebook) {
    match &field.kind {
        FieldKind::Select { options, default } => {
            println!("  {} {}", field.name, style(format!("({})", field.key)).dim());
            for (i, label) in options.iter().enumerate() {
                let delta = book.price_for(&field.key, label);
                let mut line = format!("    {label}");
                if delta > 0 {
                    line.push_str(&format!(" (+${})", format_amount(delta as f64)));
                }
                if i == *default {
                    println!("{} {}", line, style("(default)").dim());
                } else {
                    println!("{line}");
                }
            }
        }
        FieldKind::Text { default } => {
            println!(
                "  {} {}: text, default {:?}",
                field.name,
                style(format!("({})", field.key)).dim(),
                default
            );
        }
        FieldKind::Number {
            min,
            max,
            step,
            default,
        } => {
            let range = match max {
                Some(max) => format!("{min}..{max}"),
                None => format!("{min}.."),
            };
            println!(
                "  {} {}: number {}, step {}, default {}",
                field.name,
                style(format!("({})", field.key)).dim(),
                range,
                step,
                default
            );
        }
        FieldKind::Date => {
            println!(
                "  {} {}: date",
                field.name,
                style(format!("({})", field.key)).dim()
            );
        }
        FieldKind::Flag { default } => {
            println!(
                "  {} {}: flag, default {}",
                field.name,
                style(format!("({})", field.key)).dim(),
                if *default { "yes" } else { "no" }
            );
        }
    }
}
