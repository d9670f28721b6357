use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A durable slot store addressed by fixed logical names.
///
/// Values are opaque bytes; the ledgers above this port decide the encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn save(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

pub type KeyValueStoreRef = Arc<dyn KeyValueStore>;

/// Wall-clock source, in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub type ClockRef = Arc<dyn Clock>;

/// Pacing applied before each effect is dispatched.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

pub type PacerRef = Arc<dyn Pacer>;
