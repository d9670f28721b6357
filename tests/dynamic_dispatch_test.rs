use pdfx_sandbox::application::chain::ChainStore;
use pdfx_sandbox::application::payments::PaymentStore;
use pdfx_sandbox::domain::ports::{ClockRef, KeyValueStoreRef};
use pdfx_sandbox::infrastructure::clock::SystemClock;
use pdfx_sandbox::infrastructure::in_memory::InMemoryKeyValueStore;
use pdfx_sandbox::infrastructure::json_file::JsonFileStore;
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

async fn exercise(backing: KeyValueStoreRef) {
    let clock: ClockRef = Arc::new(SystemClock);
    let chain = ChainStore::new(backing.clone(), clock.clone());
    let payments = PaymentStore::new(backing, clock);

    // Verify Send + Sync by spawning tasks
    let chain_handle = tokio::spawn(async move {
        chain.push("log", json!({ "message": "hi" })).await.unwrap();
        chain.list().await.unwrap()
    });
    let payments_handle = tokio::spawn(async move {
        let session = payments.create_session(100, None, None).await.unwrap();
        payments.confirm_session(&session.id).await.unwrap().unwrap()
    });

    let events = chain_handle.await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].r#type, "log");

    let confirmed = payments_handle.await.unwrap();
    assert_eq!(confirmed.amount_cents, 100);
}

#[tokio::test]
async fn test_in_memory_backing_as_trait_object() {
    exercise(Arc::new(InMemoryKeyValueStore::new())).await;
}

#[tokio::test]
async fn test_json_file_backing_as_trait_object() {
    let dir = tempdir().unwrap();
    exercise(Arc::new(JsonFileStore::open(dir.path()).unwrap())).await;
}

#[tokio::test]
async fn test_stores_share_one_backing_without_interference() {
    let backing: KeyValueStoreRef = Arc::new(InMemoryKeyValueStore::new());
    let clock: ClockRef = Arc::new(SystemClock);
    let chain = ChainStore::new(backing.clone(), clock.clone());
    let payments = PaymentStore::new(backing, clock);

    payments.create_session(1, None, None).await.unwrap();
    chain.push("log", json!(null)).await.unwrap();
    chain.clear().await.unwrap();

    assert!(chain.list().await.unwrap().is_empty());
    assert_eq!(payments.list().await.unwrap().len(), 1);
}
