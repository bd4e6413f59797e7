//! Timepiece Gallery CLI - Catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Validate the bundled catalog dataset
//! tg-cli catalog validate
//!
//! # Print filter facets (categories, brands, price bounds)
//! tg-cli catalog facets
//!
//! # Print the featured list
//! tg-cli catalog featured --limit 4
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};
use timepiece_storefront::catalog::{CatalogError, LocalCatalog};

#[derive(Parser)]
#[command(name = "tg-cli")]
#[command(author, version, about = "Timepiece Gallery CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the bundled catalog dataset
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Parse and validate the bundled dataset
    Validate,
    /// Print categories, brands, and price bounds
    Facets,
    /// Print the highest-priced watches
    Featured {
        /// Number of watches to list
        #[arg(short, long, default_value_t = 4)]
        limit: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<(), CatalogError> {
    let catalog = LocalCatalog::from_bundled()?;

    match command {
        Commands::Catalog {
            action: CatalogAction::Validate,
        } => {
            println!("ok: {} watches", catalog.all().len());
        }
        Commands::Catalog {
            action: CatalogAction::Facets,
        } => {
            let facets = catalog.facets();
            println!("categories:");
            for category in &facets.categories {
                println!("  {category}");
            }
            println!("brands:");
            for brand in &facets.brands {
                println!("  {brand}");
            }
            if let Some(bounds) = facets.price_bounds {
                println!("price range: {} - {}", bounds.min, bounds.max);
            }
        }
        Commands::Catalog {
            action: CatalogAction::Featured { limit },
        } => {
            for watch in catalog.featured(*limit) {
                println!("{:>4}  {:<16} {:<28} {}", watch.id, watch.brand, watch.model, watch.price);
            }
        }
    }

    Ok(())
}
