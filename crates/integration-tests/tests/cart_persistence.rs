//! Integration tests for the cart against the file backend.

#![allow(clippy::unwrap_used)]

use basket_core::{
    Cart, FileBackend, Identity, LocalStorage, Price, ProductId, StorageAdapter,
};
use basket_integration_tests::product;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Cart<LocalStorage<FileBackend>> {
    Cart::new(LocalStorage::new(FileBackend::new(
        dir.path().join("storage.json"),
    )))
}

#[test]
fn test_cart_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let mut cart = open(&dir);
    cart.sync_identity(&Identity::user("u1"));
    cart.add(product("a", 250)).unwrap();
    cart.add(product("a", 250)).unwrap();
    cart.add(product("b", 1000)).unwrap();
    drop(cart);

    let mut reopened = open(&dir);
    reopened.sync_identity(&Identity::user("u1"));

    assert_eq!(reopened.quantity(&ProductId::new("a")), 2);
    assert_eq!(reopened.quantity(&ProductId::new("b")), 1);
    assert_eq!(reopened.count(), 3);
    assert_eq!(reopened.total(), Price::from_cents(1500));
}

#[test]
fn test_update_then_reopen() {
    let dir = TempDir::new().unwrap();

    let mut cart = open(&dir);
    cart.sync_identity(&Identity::Guest);
    cart.add(product("a", 100)).unwrap();
    cart.add(product("b", 100)).unwrap();
    cart.update(&ProductId::new("a"), 5).unwrap();
    cart.update(&ProductId::new("b"), 0).unwrap();
    drop(cart);

    let mut reopened = open(&dir);
    reopened.sync_identity(&Identity::Guest);

    let lines: Vec<(&str, u32)> = reopened
        .items()
        .iter()
        .map(|line| (line.id.as_str(), line.quantity))
        .collect();
    assert_eq!(lines, vec![("a", 5)]);
}

#[test]
fn test_carts_are_scoped_per_user() {
    let dir = TempDir::new().unwrap();

    let mut cart = open(&dir);
    cart.sync_identity(&Identity::user("u1"));
    cart.add(product("a", 100)).unwrap();

    cart.sync_identity(&Identity::user("u2"));
    assert_eq!(cart.count(), 0);
    cart.add(product("b", 100)).unwrap();

    let raw = LocalStorage::new(FileBackend::new(dir.path().join("storage.json")));
    let u1: serde_json::Value = serde_json::from_str(&raw.get("cart-u1").unwrap()).unwrap();
    let u2: serde_json::Value = serde_json::from_str(&raw.get("cart-u2").unwrap()).unwrap();
    assert_eq!(u1[0]["id"], "a");
    assert_eq!(u2[0]["id"], "b");
}

#[test]
fn test_stored_lines_with_bad_quantity_are_dropped() {
    let dir = TempDir::new().unwrap();
    let raw = LocalStorage::new(FileBackend::new(dir.path().join("storage.json")));
    raw.set(
        "cart-guest",
        r#"[
            {"id":"a","name":"A","price":1.5,"image":null,"quantity":2},
            {"id":"b","name":"B","price":1.5,"image":null,"quantity":-4},
            {"id":"c","name":"C","price":1.5,"image":null}
        ]"#,
    );

    let mut cart = open(&dir);
    cart.sync_identity(&Identity::Guest);

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.total(), Price::from_cents(300));
}
