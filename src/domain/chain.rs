use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable, timestamped record on the mock ledger.
///
/// Events are only ever created by appending and are only ever removed by
/// clearing the whole chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub payload: serde_json::Value,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ChainEvent {
    pub fn new(r#type: impl Into<String>, payload: serde_json::Value, timestamp: i64) -> Self {
        Self {
            id: format!("ev_{}_{}", timestamp, Uuid::new_v4().simple()),
            r#type: r#type.into(),
            payload,
            timestamp,
        }
    }
}
