use super::ledger::Ledger;
use crate::domain::chain::ChainEvent;
use crate::domain::ports::{ClockRef, KeyValueStoreRef};
use crate::error::Result;

/// Logical slot name of the event chain.
pub const CHAIN_KEY: &str = "pdfx_mock_chain";

/// Append-only log of mock ledger events.
#[derive(Clone)]
pub struct ChainStore {
    ledger: Ledger<ChainEvent>,
    clock: ClockRef,
}

impl ChainStore {
    pub fn new(backing: KeyValueStoreRef, clock: ClockRef) -> Self {
        Self {
            ledger: Ledger::new(CHAIN_KEY, backing),
            clock,
        }
    }

    /// Appends a new event stamped with the current time and returns it.
    pub async fn push(
        &self,
        r#type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Result<ChainEvent> {
        let event = ChainEvent::new(r#type, payload, self.clock.now_millis());
        self.ledger.append(event.clone()).await?;
        tracing::debug!(id = %event.id, kind = %event.r#type, "chain event appended");
        Ok(event)
    }

    /// All events, newest first. Events sharing a timestamp are returned in
    /// reverse append order.
    pub async fn list(&self) -> Result<Vec<ChainEvent>> {
        let mut events = self.ledger.read().await?;
        events.reverse();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(events)
    }

    pub async fn clear(&self) -> Result<()> {
        self.ledger.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::ManualClock;
    use crate::infrastructure::in_memory::InMemoryKeyValueStore;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn store(clock: Arc<ManualClock>) -> ChainStore {
        ChainStore::new(Arc::new(InMemoryKeyValueStore::new()), clock)
    }

    #[tokio::test]
    async fn test_push_returns_stamped_event() {
        let clock = Arc::new(ManualClock::new(1_000));
        let chain = store(clock);

        let event = chain.push("mint", json!({ "title": "x" })).await.unwrap();
        assert_eq!(event.r#type, "mint");
        assert_eq!(event.timestamp, 1_000);
        assert_eq!(chain.list().await.unwrap(), vec![event]);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let clock = Arc::new(ManualClock::new(1_000));
        let chain = store(clock.clone());

        chain.push("a", json!(null)).await.unwrap();
        clock.advance(10);
        chain.push("b", json!(null)).await.unwrap();
        clock.set(500);
        chain.push("c", json!(null)).await.unwrap();

        let types: Vec<_> = chain
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.r#type)
            .collect();
        assert_eq!(types, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_same_millisecond_events_are_unique_and_latest_first() {
        let clock = Arc::new(ManualClock::new(42));
        let chain = store(clock);

        for i in 0..20 {
            chain.push("log", json!({ "i": i })).await.unwrap();
        }
        let events = chain.list().await.unwrap();
        let ids: HashSet<_> = events.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(events[0].payload, json!({ "i": 19 }));
    }

    #[tokio::test]
    async fn test_clear_removes_all_events() {
        let chain = store(Arc::new(ManualClock::new(0)));
        chain.push("log", json!(null)).await.unwrap();
        chain.clear().await.unwrap();
        assert!(chain.list().await.unwrap().is_empty());
    }
}
