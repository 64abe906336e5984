//! Unit tests for the in-memory object store

use crate::repositories::object_store::{InMemoryObjectStore, ObjectStore};

#[tokio::test]
async fn test_put_get_delete() {
    let store = InMemoryObjectStore::new();

    store.put("k.txt", b"hello".to_vec()).await.unwrap();
    assert_eq!(store.get("k.txt").await.unwrap(), Some(b"hello".to_vec()));

    store.put("k.txt", b"again".to_vec()).await.unwrap();
    assert_eq!(store.get("k.txt").await.unwrap(), Some(b"again".to_vec()));

    assert!(store.delete("k.txt").await.unwrap());
    assert!(!store.delete("k.txt").await.unwrap());
    assert!(store.get("k.txt").await.unwrap().is_none());
}
