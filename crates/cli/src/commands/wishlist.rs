//! Wishlist commands.

use basket_core::{Identity, Product, ProductId, StorageAdapter, Wishlist};
use serde_json::json;

use super::{WishlistAction, log_transition, print_json};
use crate::error::CliError;

/// Hydrate the wishlist for `identity` and apply `action`.
///
/// # Errors
///
/// Returns an error if the price is invalid or output cannot be encoded.
pub fn run<S: StorageAdapter>(
    action: WishlistAction,
    identity: &Identity,
    namespace: &str,
    storage: S,
) -> Result<(), CliError> {
    let mut wishlist = Wishlist::with_namespace(namespace, storage);
    log_transition(&wishlist.sync_identity(identity));

    match action {
        WishlistAction::Add { product, category } => {
            let price = product.price()?;
            let mut item = Product::new(product.id, product.name, price, category);
            item.image = product.image;
            let id = item.id.clone();
            wishlist.add(item)?;
            tracing::info!(%id, count = wishlist.count(), "saved to wishlist");
        }
        WishlistAction::Remove { id } => {
            let id = ProductId::new(id);
            wishlist.remove(&id)?;
            tracing::info!(%id, count = wishlist.count(), "removed from wishlist");
        }
        WishlistAction::Has { id } => {
            let member = wishlist.is_member(&ProductId::new(id.clone()));
            print_json(&json!({ "id": id, "saved": member }))?;
        }
        WishlistAction::List => {
            print_json(&json!({
                "count": wishlist.count(),
                "items": wishlist.items(),
            }))?;
        }
        WishlistAction::Clear => {
            wishlist.clear()?;
            tracing::info!("wishlist cleared");
        }
    }

    Ok(())
}
