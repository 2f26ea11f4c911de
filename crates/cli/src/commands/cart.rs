//! Cart commands.

use basket_core::{Cart, Identity, Product, ProductId, StorageAdapter};
use serde_json::json;

use super::{CartAction, log_transition, print_json};
use crate::error::CliError;

/// Hydrate the cart for `identity` and apply `action`.
///
/// # Errors
///
/// Returns an error if the price is invalid or output cannot be encoded.
pub fn run<S: StorageAdapter>(
    action: CartAction,
    identity: &Identity,
    namespace: &str,
    storage: S,
) -> Result<(), CliError> {
    let mut cart = Cart::with_namespace(namespace, storage);
    log_transition(&cart.sync_identity(identity));

    match action {
        CartAction::Add { product } => {
            let price = product.price()?;
            // Category is not part of the cart layout.
            let mut item = Product::new(product.id, product.name, price, "");
            item.image = product.image;
            let id = item.id.clone();
            cart.add(item)?;
            tracing::info!(%id, quantity = cart.quantity(&id), "added to cart");
        }
        CartAction::Update { id, quantity } => {
            let id = ProductId::new(id);
            cart.update(&id, quantity)?;
            tracing::info!(%id, quantity = cart.quantity(&id), "cart updated");
        }
        CartAction::Remove { id } => {
            let id = ProductId::new(id);
            cart.remove(&id)?;
            tracing::info!(%id, "removed from cart");
        }
        CartAction::List => {
            print_json(&json!({
                "count": cart.count(),
                "total": cart.total(),
                "items": cart.items(),
            }))?;
        }
        CartAction::Clear => {
            cart.clear()?;
            tracing::info!("cart cleared");
        }
    }

    Ok(())
}
