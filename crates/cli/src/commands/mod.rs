//! Subcommand implementations.

pub mod cart;
pub mod wishlist;

use basket_core::{Price, Transition};
use clap::Subcommand;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::CliError;

/// Wishlist subcommands.
#[derive(Subcommand)]
pub enum WishlistAction {
    /// Save a product
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Product category
        #[arg(short, long)]
        category: String,
    },
    /// Remove a saved product
    Remove {
        /// Product id
        id: String,
    },
    /// Check whether a product is saved (exit code 0 either way)
    Has {
        /// Product id
        id: String,
    },
    /// Print saved products as JSON
    List,
    /// Remove every saved product
    Clear,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartAction {
    /// Add one unit of a product
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Set the quantity of a line (0 or less removes it)
    Update {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Print lines, unit count and total as JSON
    List,
    /// Empty the cart
    Clear,
}

/// Product fields shared by `wishlist add` and `cart add`.
#[derive(clap::Args)]
pub struct ProductArgs {
    /// Product id
    #[arg(long)]
    pub id: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Unit price, e.g. 12.50
    #[arg(short, long)]
    pub price: Decimal,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl ProductArgs {
    /// Validated price.
    fn price(&self) -> Result<Price, CliError> {
        let price = Price::new(self.price);
        if price.is_negative() {
            return Err(CliError::InvalidPrice(self.price.to_string()));
        }
        Ok(price)
    }
}

fn log_transition(transition: &Transition) {
    if let Transition::Hydrated {
        key,
        migration,
        loaded,
        dropped,
        corrupt,
    } = transition
    {
        tracing::info!(%key, ?migration, loaded, dropped, corrupt, "loaded collection");
    }
}

#[allow(clippy::print_stdout)]
fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
