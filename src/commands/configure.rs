//! Implements `tq configure`: the interactive quote session.
//!
//! Every prompt is seeded with the current (default) value, so pressing
//! enter through a section leaves it unchanged. Numeric input is
//! validated against the catalog bounds at the prompt; nothing invalid
//! reaches the quote state.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::catalog::{rim_model, Catalog, Field, FieldKind, Section};
use crate::commands::output;
use crate::pricebook::load_pricebook;
use crate::quote::{QuoteState, MODELS};

/// Options for the configure command
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Skip prompts and keep every default
    pub defaults: bool,
    /// Where to save the quote JSON
    pub output: Option<PathBuf>,
    /// Pricebook file override
    pub pricebook: Option<PathBuf>,
}

/// Execute the configure command
pub fn execute_configure(options: ConfigureOptions) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let loaded = load_pricebook(&catalog, options.pricebook.as_deref());
    output::print_pricebook_source(&loaded);

    let mut quote = QuoteState::new(&catalog);

    if !options.defaults {
        prompt_meta(&mut quote)?;

        for section in &catalog.sections {
            let customize = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Customize {}?", section.name))
                .default(false)
                .interact()?;
            if customize {
                prompt_section(&catalog, section, &mut quote)?;
            }
            if section.id == "tires" {
                print_rim_models(&quote);
            }
        }

        prompt_line_items(&mut quote)?;
    }

    let breakdown = quote.breakdown(&catalog, &loaded.book);
    println!();
    output::print_breakdown(&breakdown);

    let save_to = match options.output {
        Some(path) => Some(path),
        None if !options.defaults => {
            let save = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Save quote?")
                .default(true)
                .interact()?;
            if save {
                let path: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Output file")
                    .default("quote.json".to_string())
                    .interact_text()?;
                Some(PathBuf::from(path))
            } else {
                None
            }
        }
        None => None,
    };

    if let Some(path) = save_to {
        quote
            .to_json_file(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Quote written to {}", style("✓").green(), path.display());

        println!("\n{}", style("Next steps:").bold());
        println!(
            "  1. Run {} to reprint the totals",
            style(format!("tq price --quote {}", path.display())).cyan()
        );
        println!(
            "  2. Run {} to render the quote document",
            style(format!("tq export --quote {}", path.display())).cyan()
        );
    }

    Ok(())
}

fn prompt_meta(quote: &mut QuoteState) -> Result<()> {
    println!("\n{} Quote Information", style("→").cyan());

    let theme = ColorfulTheme::default();

    quote.meta.number = Input::with_theme(&theme)
        .with_prompt("Quote #")
        .default(quote.meta.number.clone())
        .interact_text()?;

    let date: String = Input::with_theme(&theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .default(quote.meta.date.to_string())
        .validate_with(|input: &String| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "enter a date as YYYY-MM-DD")
        })
        .interact_text()?;
    if let Ok(parsed) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
        quote.meta.date = parsed;
    }

    quote.meta.dealer = Input::with_theme(&theme)
        .with_prompt("Dealer")
        .allow_empty(true)
        .interact_text()?;
    quote.meta.contact = Input::with_theme(&theme)
        .with_prompt("Contact")
        .allow_empty(true)
        .interact_text()?;

    let model = Select::with_theme(&theme)
        .with_prompt("Model")
        .items(&MODELS)
        .default(0)
        .interact()?;
    quote.meta.model = MODELS[model].to_string();

    let discount: f64 = Input::with_theme(&theme)
        .with_prompt("Discount %")
        .default(quote.meta.discount_percent)
        .validate_with(|p: &f64| {
            if (0.0..=100.0).contains(p) {
                Ok(())
            } else {
                Err("discount must be between 0 and 100")
            }
        })
        .interact_text()?;
    quote.meta.set_discount(discount);

    Ok(())
}

fn prompt_section(catalog: &Catalog, section: &Section, quote: &mut QuoteState) -> Result<()> {
    println!("\n{} {}", style("→").cyan(), style(&section.name).bold());

    for field in &section.fields {
        prompt_field(catalog, field, quote)?;
    }

    Ok(())
}

fn prompt_field(catalog: &Catalog, field: &Field, quote: &mut QuoteState) -> Result<()> {
    let theme = ColorfulTheme::default();

    match &field.kind {
        FieldKind::Select { options, .. } => {
            // Single-option fields are fixed equipment; nothing to ask.
            if options.len() < 2 {
                return Ok(());
            }
            let current = quote
                .selection
                .label(&field.key)
                .and_then(|l| options.iter().position(|o| o == l))
                .unwrap_or(0);
            let chosen = Select::with_theme(&theme)
                .with_prompt(field.name.as_str())
                .items(options)
                .default(current)
                .interact()?;
            quote.set_choice(catalog, &field.key, &options[chosen])?;
        }
        FieldKind::Text { .. } => {
            let current = quote
                .selection
                .label(&field.key)
                .unwrap_or_default()
                .to_string();
            let value: String = Input::with_theme(&theme)
                .with_prompt(field.name.as_str())
                .default(current)
                .allow_empty(true)
                .interact_text()?;
            quote.set_text(catalog, &field.key, &value)?;
        }
        FieldKind::Number { min, max, .. } => {
            let current = quote.selection.number(&field.key).unwrap_or(*min);
            let min = *min;
            let max = *max;
            let value: f64 = Input::with_theme(&theme)
                .with_prompt(field.name.as_str())
                .default(current)
                .validate_with(move |v: &f64| {
                    if *v < min || max.is_some_and(|m| *v > m) {
                        Err(match max {
                            Some(m) => format!("enter a value between {min} and {m}"),
                            None => format!("enter a value of at least {min}"),
                        })
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            quote.set_number(catalog, &field.key, value)?;
        }
        FieldKind::Date => {
            let date: String = Input::with_theme(&theme)
                .with_prompt(field.name.as_str())
                .validate_with(|input: &String| {
                    NaiveDate::parse_from_str(input, "%Y-%m-%d")
                        .map(|_| ())
                        .map_err(|_| "enter a date as YYYY-MM-DD")
                })
                .interact_text()?;
            if let Ok(parsed) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                quote.set_date(catalog, &field.key, parsed)?;
            }
        }
        FieldKind::Flag { .. } => {
            let current = quote.selection.flag(&field.key).unwrap_or(false);
            let value = Confirm::with_theme(&theme)
                .with_prompt(field.name.as_str())
                .default(current)
                .interact()?;
            quote.set_flag(catalog, &field.key, value)?;
        }
    }

    Ok(())
}

fn print_rim_models(quote: &QuoteState) {
    for (key, name) in [
        ("ride_rim_selection", "Rims (Ride)"),
        ("steer_rim_selection", "Rims (Steer)"),
    ] {
        if let Some(model) = quote.selection.label(key).and_then(rim_model) {
            println!("  {} {}: {}", style("•").dim(), name, style(model).dim());
        }
    }
}

fn prompt_line_items(quote: &mut QuoteState) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let add = Confirm::with_theme(&theme)
            .with_prompt("Add a custom line item?")
            .default(false)
            .interact()?;
        if !add {
            break;
        }

        let name: String = Input::with_theme(&theme)
            .with_prompt("Item name")
            .validate_with(|s: &String| {
                if s.trim().is_empty() {
                    Err("name must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        let price: f64 = Input::with_theme(&theme)
            .with_prompt("Item price")
            .default(0.0)
            .validate_with(|p: &f64| {
                if *p >= 0.0 {
                    Ok(())
                } else {
                    Err("price must be non-negative")
                }
            })
            .interact_text()?;

        quote.add_line_item(&name, Some(price))?;
        println!("{} Added {}", style("✓").green(), name);
    }

    Ok(())
}
