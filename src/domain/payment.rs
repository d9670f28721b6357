use super::effect::Metadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// A mock charge awaiting confirmation.
///
/// Sessions start out `pending`. The only transitions are `pending -> paid`
/// and `pending -> failed`; both are one-way.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub id: String,
    pub amount_cents: u64,
    pub currency: String,
    pub status: PaymentStatus,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl PaymentSession {
    pub fn new(
        amount_cents: u64,
        currency: impl Into<String>,
        metadata: Option<Metadata>,
        created_at: i64,
    ) -> Self {
        Self {
            id: format!("mockpay_{}_{}", created_at, Uuid::new_v4().simple()),
            amount_cents,
            currency: currency.into(),
            status: PaymentStatus::Pending,
            created_at,
            metadata,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// Marks a pending session as paid. Returns `false` if it was not pending.
    pub fn confirm(&mut self) -> bool {
        self.settle(PaymentStatus::Paid)
    }

    /// Marks a pending session as failed. Returns `false` if it was not pending.
    pub fn fail(&mut self) -> bool {
        self.settle(PaymentStatus::Failed)
    }

    fn settle(&mut self, status: PaymentStatus) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = status;
        true
    }
}
