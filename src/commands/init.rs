//! Implements `tq init`: scaffold the reference pricebook file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::pricebook::DEFAULT_PRICEBOOK_FILE;
use crate::pricing::REFERENCE_PRICEBOOK;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Overwrite an existing pricebook without asking
    pub force: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let path = PathBuf::from(DEFAULT_PRICEBOOK_FILE);

    if path.exists() && !options.force {
        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{} Keeping existing {}", style("•").dim(), path.display());
            return Ok(());
        }
    }

    std::fs::write(&path, REFERENCE_PRICEBOOK)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Created {}", style("✓").green(), path.display());

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  1. Adjust prices in {} as needed",
        style(DEFAULT_PRICEBOOK_FILE).cyan()
    );
    println!(
        "  2. Run {} to build a quote",
        style("tq configure").cyan()
    );

    Ok(())
}
