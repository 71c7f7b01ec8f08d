//! Shared terminal output helpers for commands.

use console::style;

use crate::export::{format_amount, format_percent};
use crate::pricebook::{LoadedPricebook, PricebookSource};
use crate::quote::Breakdown;

/// One non-blocking line saying where prices came from.
pub fn print_pricebook_source(loaded: &LoadedPricebook) {
    match &loaded.source {
        PricebookSource::Reference(path) => {
            println!(
                "{} Using reference prices from {}",
                style("✓").green(),
                path.display()
            );
        }
        PricebookSource::Fallback { .. } => {
            println!(
                "{} Reference pricebook not found. Using built-in fallback prices.",
                style("⚠").yellow()
            );
        }
    }
}

/// Itemized pricing plus the final totals block.
pub fn print_breakdown(breakdown: &Breakdown) {
    if !breakdown.items.is_empty() {
        println!("{}", style("Itemized Pricing").bold());
        for item in &breakdown.items {
            println!(
                "  {:<42} ${:>12}",
                item.name,
                format_amount(item.amount as f64)
            );
        }
        println!();
    }

    println!("{}", style("Final Pricing").bold());
    print_row("Base Price", &format!("${}", format_amount(breakdown.base as f64)));
    print_row(
        &format!("Discount ({}%)", format_percent(breakdown.discount_percent)),
        &format!("-${}", format_amount(breakdown.discount_amount)),
    );
    print_row(
        "Discounted Price",
        &format!("${}", format_amount(breakdown.discounted)),
    );
    print_row(
        "Additional Items",
        &format!("${}", format_amount(breakdown.additions_total)),
    );
    println!(
        "  {:<20} {}",
        style("TOTAL PRICE").bold(),
        style(format!("${}", format_amount(breakdown.total))).bold().green()
    );
}

fn print_row(label: &str, value: &str) {
    println!("  {label:<20} {value}");
}
