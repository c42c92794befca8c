use contact_image_store::{
    models::{Config, ImageUpload, ObjectKey},
    store::MockObjectStore,
    Error, ImageGateway,
};
use pretty_assertions::assert_eq;

fn gateway_with(store: &MockObjectStore, cdn_domain: &str) -> ImageGateway {
    let config = Config::new("contact-images").with_cdn_domain(cdn_domain);
    ImageGateway::with_store(Box::new(store.clone()), &config)
}

#[tokio::test]
async fn test_upload_delete_fetch_lifecycle() {
    let store = MockObjectStore::new();
    let gateway = gateway_with(&store, "images.example.com");

    let uploaded = gateway
        .upload_image(
            ImageUpload::new("profile.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]),
            "1001",
        )
        .await
        .unwrap();

    assert_eq!(
        gateway.fetch(&uploaded.key).await.unwrap(),
        vec![0xFF, 0xD8, 0xFF, 0xE0]
    );
    assert_eq!(
        store
            .get_object_entry(uploaded.key.as_str())
            .unwrap()
            .content_type,
        "image/jpeg"
    );

    gateway.delete(&uploaded.key).await.unwrap();

    let err = gateway.fetch(&uploaded.key).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_delete_unknown_key_is_ok() {
    let store = MockObjectStore::new();
    let gateway = gateway_with(&store, "");

    let key = ObjectKey::parse("contacts/1/never-uploaded.png").unwrap();
    gateway.delete(&key).await.unwrap();
    gateway.delete(&key).await.unwrap();

    assert_eq!(store.get_delete_count(), 2);
}

#[tokio::test]
async fn test_same_name_uploads_do_not_collide() {
    let store = MockObjectStore::new();
    let gateway = gateway_with(&store, "");

    let first = gateway
        .upload_image(ImageUpload::new("me.png", b"first".to_vec()), "9")
        .await
        .unwrap();
    let second = gateway
        .upload_image(ImageUpload::new("me.png", b"second".to_vec()), "9")
        .await
        .unwrap();

    assert_ne!(first.key, second.key);
    assert_eq!(store.len(), 2);
    assert_eq!(gateway.fetch(&first.key).await.unwrap(), b"first".to_vec());
}

#[tokio::test]
async fn test_failed_delete_reports_unavailable() {
    let store = MockObjectStore::new();
    let gateway = gateway_with(&store, "");

    let uploaded = gateway
        .upload_image(ImageUpload::new("me.gif", b"GIF89a".to_vec()), "3")
        .await
        .unwrap();

    store.set_unavailable(true);
    let err = gateway.delete(&uploaded.key).await.unwrap_err();
    assert!(matches!(err, Error::StorageUnavailable(_)));

    store.set_unavailable(false);
    assert!(gateway.fetch(&uploaded.key).await.is_ok());
}

#[tokio::test]
async fn test_uploaded_image_json() {
    let store = MockObjectStore::new();
    let gateway = gateway_with(&store, "cdn.example.com");

    let uploaded = gateway
        .upload_image(
            ImageUpload::new("me.png", vec![0x89, 0x50, 0x4E, 0x47]),
            "42",
        )
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::to_value(&uploaded).unwrap();
    assert_eq!(json["key"], uploaded.key.as_str());
    assert_eq!(json["content_type"], "image/png");
    assert_eq!(json["size"], 4);
}
