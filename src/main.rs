#![forbid(unsafe_code)]
//! Trailer Quotation Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use trailquote::commands::{
    execute_catalog, execute_configure, execute_export, execute_init, execute_price,
    CatalogOptions, ConfigureOptions, ExportFormat, ExportOptions, InitOptions, PriceOptions,
};

#[derive(Parser)]
#[command(name = "tq")]
#[command(about = "Trailer quotation configurator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pricebook file path (default: ./pricebook.json)
    #[arg(long, global = true)]
    pricebook: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the reference pricebook into the working directory
    Init {
        /// Overwrite an existing pricebook without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Build a quote interactively
    Configure {
        /// Skip prompts and keep every default
        #[arg(short = 'y', long)]
        defaults: bool,

        /// Where to save the quote JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recompute and print totals for a saved quote
    Price {
        /// Quote file to price
        #[arg(long, default_value = "quote.json")]
        quote: PathBuf,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the quote document or the flat export structure
    Export {
        /// Quote file to export
        #[arg(long, default_value = "quote.json")]
        quote: PathBuf,

        /// Output format (markdown, json)
        #[arg(long, value_enum, default_value = "markdown")]
        format: ExportFormatArg,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List catalog sections, fields, and price deltas
    Catalog {
        /// Only show one section (body, chassis, axles, tires, lights, paint, additions)
        #[arg(long)]
        section: Option<String>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

/// Output format for the export command
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum ExportFormatArg {
    #[default]
    Markdown,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { force } => {
            execute_init(InitOptions { force })?;
        }

        Commands::Configure { defaults, output } => {
            execute_configure(ConfigureOptions {
                defaults,
                output,
                pricebook: cli.pricebook,
            })?;
        }

        Commands::Price { quote, json } => {
            execute_price(PriceOptions {
                quote,
                json,
                pricebook: cli.pricebook,
            })?;
        }

        Commands::Export {
            quote,
            format,
            output,
        } => {
            let format = match format {
                ExportFormatArg::Markdown => ExportFormat::Markdown,
                ExportFormatArg::Json => ExportFormat::Json,
            };
            execute_export(ExportOptions {
                quote,
                format,
                output,
                pricebook: cli.pricebook,
            })?;
        }

        Commands::Catalog { section, json } => {
            execute_catalog(CatalogOptions {
                section,
                json,
                pricebook: cli.pricebook,
            })?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "trailquote=debug"
    } else {
        "trailquote=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
