use storefront::cart_store::ResumePhase;
use storefront::config::StorefrontConfig;
use storefront::exchange::{parse_catalog, ExchangeError};
use storefront::lifecycle::Storefront;
use storefront::model::{ProductDraft, ProductId};
use storefront::StorefrontError;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> StorefrontConfig {
    let mut config = StorefrontConfig::with_storage_dir(dir.path().join("data"));
    config.storage.key_prefix = "zad".to_string();
    config.exchange.export_dir = dir.path().join("exports");
    config
}

/// State written by one session is restored by the next, and the restored cart
/// asks for a decision before it can be changed.
#[tokio::test]
async fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let shop = Storefront::open(config_in(&dir)).await.unwrap();
    let dates = shop
        .save_product(None, ProductDraft::new("Dates", 30.0))
        .await
        .unwrap();
    shop.add_to_cart(dates.clone()).await.unwrap();
    shop.add_to_cart(dates.clone()).await.unwrap();
    shop.set_admin(true).await.unwrap();
    shop.shutdown().await.unwrap();

    let data = dir.path().join("data");
    assert!(data.join("zad-catalog.json").exists());
    assert!(data.join("zad-cart.json").exists());
    assert_eq!(
        std::fs::read_to_string(data.join("zad-admin-mode.json")).unwrap(),
        "true"
    );

    let shop = Storefront::open(config_in(&dir)).await.unwrap();
    assert!(shop.is_admin().await.unwrap());
    assert_eq!(shop.catalog.products().await.unwrap(), vec![dates.clone()]);
    assert_eq!(
        shop.resume_phase().await.unwrap(),
        ResumePhase::AwaitingDecision
    );
    assert_eq!(shop.cart.quantity(dates.id.clone()).await.unwrap(), 2);

    shop.start_fresh().await.unwrap();
    assert!(!data.join("zad-cart.json").exists());
    shop.shutdown().await.unwrap();

    let shop = Storefront::open(config_in(&dir)).await.unwrap();
    assert_eq!(shop.resume_phase().await.unwrap(), ResumePhase::Fresh);
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_cart_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("zad-cart.json"), "[{\"id\": ").unwrap();

    let shop = Storefront::open(config_in(&dir)).await.unwrap();
    assert_eq!(shop.resume_phase().await.unwrap(), ResumePhase::Fresh);
    assert!(shop.cart_items().await.unwrap().is_empty());
    shop.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_export_round_trips_through_import() {
    let dir = tempfile::tempdir().unwrap();
    let shop = Storefront::open(config_in(&dir)).await.unwrap();

    let err = shop.export_catalog().await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Exchange(ExchangeError::EmptyCatalog)
    ));
    assert!(!dir.path().join("exports").exists());

    let mut honey = ProductDraft::new("Honey", 90.0);
    honey.original_price = Some(110.0);
    honey.category = Some("Pantry".to_string());
    shop.save_product(None, honey).await.unwrap();
    shop.save_product(Some(ProductId::from(17u64)), ProductDraft::new("Tea", 3.0))
        .await
        .unwrap();
    let before = shop.catalog.products().await.unwrap();

    let path = shop.export_catalog().await.unwrap();
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("zad-backup-"));
    assert!(file_name.ends_with(".json"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(parse_catalog(&text).unwrap(), before);

    shop.catalog.replace_all(Vec::new()).await.unwrap();
    assert_eq!(shop.import_catalog(&text).await.unwrap(), 2);
    assert_eq!(shop.catalog.products().await.unwrap(), before);
    shop.shutdown().await.unwrap();
}
