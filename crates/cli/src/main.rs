//! Basket CLI - inspect and edit persisted wishlists and carts.
//!
//! # Usage
//!
//! ```bash
//! # Save a product to the guest wishlist
//! basket wishlist add --id p1 --name "Mug" --price 12.50 --category kitchen
//!
//! # Show the cart of user u1
//! basket --user u1 cart list
//!
//! # Set a cart quantity (0 removes the line)
//! basket --user u1 cart update p1 3
//! ```
//!
//! # Commands
//!
//! - `wishlist add|remove|has|list|clear`
//! - `cart add|update|remove|list|clear`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use basket_core::{FileBackend, Identity, LocalStorage, UserId};
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;

use commands::{CartAction, WishlistAction};
use config::BasketConfig;
use error::CliError;

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Basket wishlist and cart tools")]
struct Cli {
    /// Act as this signed-in user (overrides `BASKET_USER`)
    #[arg(short, long, global = true, conflicts_with = "guest")]
    user: Option<String>,

    /// Act as a guest even if `BASKET_USER` is set
    #[arg(long, global = true)]
    guest: bool,

    /// Storage file (overrides `BASKET_STORAGE_PATH`)
    #[arg(short, long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "basket=info,basket_core=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = BasketConfig::from_env()?;

    let identity = if cli.guest {
        Identity::Guest
    } else {
        Identity::from(cli.user.map(UserId::from).or(config.user))
    };

    let path = cli.storage.unwrap_or(config.storage_path);
    tracing::debug!(path = %path.display(), %identity, "opening storage");
    let storage = LocalStorage::new(FileBackend::with_quota(path, config.storage_quota));

    match cli.command {
        Commands::Wishlist { action } => {
            commands::wishlist::run(action, &identity, &config.wishlist_namespace, storage)
        }
        Commands::Cart { action } => {
            commands::cart::run(action, &identity, &config.cart_namespace, storage)
        }
    }
}
