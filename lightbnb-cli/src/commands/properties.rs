//! Properties command - search listings or add a property
//!
//! `add` takes a JSON file with the property fields (no id):
//!
//! ```json
//! { "owner_id": 2, "title": "...", "cost_per_night": 5000, "city": "...", ... }
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lightbnb_db::{NewProperty, PropertyFilter, Store, DEFAULT_LIMIT};

use super::print_json;

#[derive(Parser, Debug)]
#[command(about = "Search or add property listings")]
pub struct PropertiesArgs {
    #[command(subcommand)]
    pub command: PropertiesCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertiesCommand {
    /// Search listings, cheapest first
    Search(SearchArgs),
    /// Add a property from a JSON file
    Add {
        /// Path to the property JSON
        file: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Case-insensitive substring of the city
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum nightly cost, in cents
    #[arg(long = "min-price")]
    pub minimum_price_per_night: Option<i32>,

    /// Maximum nightly cost, in cents
    #[arg(long = "max-price")]
    pub maximum_price_per_night: Option<i32>,

    /// Minimum average review score
    #[arg(long = "min-rating")]
    pub minimum_rating: Option<f64>,

    /// Maximum number of listings to return
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

impl From<&SearchArgs> for PropertyFilter {
    fn from(args: &SearchArgs) -> Self {
        Self {
            city: args.city.clone(),
            owner_id: args.owner_id,
            minimum_price_per_night: args.minimum_price_per_night,
            maximum_price_per_night: args.maximum_price_per_night,
            minimum_rating: args.minimum_rating,
        }
    }
}

pub async fn run_properties(store: &dyn Store, args: PropertiesArgs) -> Result<()> {
    match args.command {
        PropertiesCommand::Search(search) => {
            let filter = PropertyFilter::from(&search);
            let listings = store.get_all_properties(&filter, search.limit).await?;
            tracing::debug!(count = listings.len(), "listings");
            print_json(&listings)
        }
        PropertiesCommand::Add { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let property: NewProperty = serde_json::from_str(&content)
                .with_context(|| format!("Invalid property JSON in {}", file.display()))?;
            let property = store.add_property(property).await?;
            tracing::info!(id = property.id, "added property");
            print_json(&property)
        }
    }
}
