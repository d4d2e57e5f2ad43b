use std::sync::Arc;
use std::time::Duration;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::Storefront;
use storefront::model::Product;
use storefront::persistence::MemoryBackend;
use tokio::time::sleep;

async fn open() -> Storefront {
    Storefront::open_with_backend(StorefrontConfig::default(), Arc::new(MemoryBackend::new()))
        .await
}

#[tokio::test(start_paused = true)]
async fn test_search_indicator_is_debounced() {
    let mut shop = open().await;
    assert!(!shop.is_searching());

    shop.set_search("d");
    assert!(shop.is_searching());

    sleep(Duration::from_millis(300)).await;
    shop.set_search("da");

    // 600ms after the first keystroke, 300ms after the second
    sleep(Duration::from_millis(300)).await;
    assert!(shop.is_searching());

    sleep(Duration::from_millis(200)).await;
    assert!(!shop.is_searching());

    shop.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_blank_search_clears_indicator_immediately() {
    let mut shop = open().await;
    shop.set_search("tea");
    assert!(shop.is_searching());

    shop.set_search("   ");
    assert!(!shop.is_searching());
    assert_eq!(shop.search(), "   ");

    shop.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cart_pulse_follows_each_add() {
    let shop = open().await;
    assert!(!shop.cart_pulse_active());

    shop.add_to_cart(Product::new("1", "Bread", 5.0)).await.unwrap();
    assert!(shop.cart_pulse_active());

    sleep(Duration::from_millis(650)).await;
    assert!(!shop.cart_pulse_active());

    shop.shutdown().await.unwrap();
}
