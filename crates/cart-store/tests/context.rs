//! Scoped access through `CartProvider` / `use_cart`.

mod common;

use cart_kv::MemoryStore;
use cart_store::{use_cart, CartError, CartProvider, CartStore, StoreConfig};
use common::{lines, shirt};

#[test]
fn test_use_cart_outside_provider_fails_immediately() {
    assert!(matches!(use_cart(), Err(CartError::Uninitialized)));
}

#[tokio::test]
async fn test_use_cart_outside_provider_in_async_code() {
    let result = async { use_cart() }.await;
    let err = result.unwrap_err();
    assert!(matches!(err, CartError::Uninitialized));
    assert_eq!(
        err.to_string(),
        "use_cart must be used within a CartProvider scope"
    );
}

#[tokio::test]
async fn test_use_cart_inside_scope() {
    let store = CartStore::open(MemoryStore::new(), StoreConfig::default())
        .await
        .unwrap();
    let provider = CartProvider::new(store.handle());

    provider
        .scope(async {
            let cart = use_cart()?;
            cart.add_to_cart(shirt()).await?;
            cart.increment("A").await
        })
        .await
        .unwrap();

    let products = store.handle().products();
    assert_eq!(lines(&products), vec![("A".to_string(), 2)]);
}

#[tokio::test]
async fn test_sync_scope() {
    let store = CartStore::open(MemoryStore::new(), StoreConfig::default())
        .await
        .unwrap();
    let provider = CartProvider::new(store.handle());

    let empty = provider.sync_scope(|| use_cart().map(|cart| cart.products().is_empty()));
    assert!(empty.unwrap());
}

#[tokio::test]
async fn test_scope_does_not_leak_into_spawned_tasks() {
    let store = CartStore::open(MemoryStore::new(), StoreConfig::default())
        .await
        .unwrap();
    let provider = CartProvider::new(store.handle());

    let outcome = provider
        .scope(async { tokio::spawn(async { use_cart().is_err() }).await.unwrap() })
        .await;
    assert!(outcome);

    // And the scope ends with the future.
    assert!(use_cart().is_err());
}
