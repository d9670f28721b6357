use crate::domain::ports::KeyValueStoreRef;
use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A JSON-array collection persisted under one fixed key.
///
/// Every mutation is a read-modify-write of the whole slot, serialized by a
/// mutex shared between clones of the same ledger. Reads are best effort: a
/// slot that cannot be decoded is treated as an empty collection.
pub struct Ledger<T> {
    key: &'static str,
    backing: KeyValueStoreRef,
    write_lock: Arc<Mutex<()>>,
    _records: PhantomData<fn() -> T>,
}

impl<T> Clone for Ledger<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            backing: self.backing.clone(),
            write_lock: self.write_lock.clone(),
            _records: PhantomData,
        }
    }
}

impl<T> Ledger<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(key: &'static str, backing: KeyValueStoreRef) -> Self {
        Self {
            key,
            backing,
            write_lock: Arc::new(Mutex::new(())),
            _records: PhantomData,
        }
    }

    /// Returns all records in insertion order.
    pub async fn read(&self) -> Result<Vec<T>> {
        let Some(bytes) = self.backing.load(self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "discarding malformed ledger slot");
                Ok(Vec::new())
            }
        }
    }

    async fn write(&self, records: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec(records)?;
        self.backing.save(self.key, bytes).await
    }

    pub async fn append(&self, record: T) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        records.push(record);
        self.write(&records).await
    }

    /// Applies `change` to the collection under the write lock.
    ///
    /// The slot is only rewritten when `change` returns `Some`; returning
    /// `None` leaves storage untouched.
    pub async fn update<R, F>(&self, change: F) -> Result<Option<R>>
    where
        F: FnOnce(&mut Vec<T>) -> Option<R> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        let outcome = change(&mut records);
        if outcome.is_some() {
            self.write(&records).await?;
        }
        Ok(outcome)
    }

    /// Removes every record.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(&[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::KeyValueStore;
    use crate::infrastructure::in_memory::InMemoryKeyValueStore;

    fn ledger(backing: &InMemoryKeyValueStore) -> Ledger<u32> {
        Ledger::new("numbers", Arc::new(backing.clone()))
    }

    #[tokio::test]
    async fn test_empty_slot_reads_as_empty() {
        let backing = InMemoryKeyValueStore::new();
        assert!(ledger(&backing).read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_persists_in_order() {
        let backing = InMemoryKeyValueStore::new();
        let numbers = ledger(&backing);
        numbers.append(1).await.unwrap();
        numbers.append(2).await.unwrap();

        assert_eq!(numbers.read().await.unwrap(), vec![1, 2]);
        assert_eq!(
            backing.load("numbers").await.unwrap(),
            Some(b"[1,2]".to_vec())
        );
    }

    #[tokio::test]
    async fn test_malformed_slot_degrades_to_empty() {
        let backing = InMemoryKeyValueStore::new();
        backing.save("numbers", b"{not json".to_vec()).await.unwrap();

        let numbers = ledger(&backing);
        assert!(numbers.read().await.unwrap().is_empty());

        numbers.append(9).await.unwrap();
        assert_eq!(numbers.read().await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn test_update_without_change_does_not_write() {
        let backing = InMemoryKeyValueStore::new();
        let numbers = ledger(&backing);

        let outcome: Option<()> = numbers.update(|_| None).await.unwrap();
        assert!(outcome.is_none());
        assert!(backing.load("numbers").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_empties_slot() {
        let backing = InMemoryKeyValueStore::new();
        let numbers = ledger(&backing);
        numbers.append(1).await.unwrap();
        numbers.clear().await.unwrap();

        assert!(numbers.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let backing = InMemoryKeyValueStore::new();
        let numbers = ledger(&backing);

        let mut handles = Vec::new();
        for i in 0..50 {
            let numbers = numbers.clone();
            handles.push(tokio::spawn(async move { numbers.append(i).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut stored = numbers.read().await.unwrap();
        stored.sort_unstable();
        assert_eq!(stored, (0..50).collect::<Vec<_>>());
    }
}
