use super::ledger::Ledger;
use crate::domain::effect::Metadata;
use crate::domain::payment::PaymentSession;
use crate::domain::ports::{ClockRef, KeyValueStoreRef};
use crate::error::Result;

/// Logical slot name of the payment sessions.
pub const PAYMENTS_KEY: &str = "pdfx_mock_payments";

/// Currency used when a caller does not name one.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Creates and settles mock payment sessions.
#[derive(Clone)]
pub struct PaymentStore {
    ledger: Ledger<PaymentSession>,
    clock: ClockRef,
}

impl PaymentStore {
    pub fn new(backing: KeyValueStoreRef, clock: ClockRef) -> Self {
        Self {
            ledger: Ledger::new(PAYMENTS_KEY, backing),
            clock,
        }
    }

    /// Records a new `pending` session.
    pub async fn create_session(
        &self,
        amount_cents: u64,
        currency: Option<&str>,
        metadata: Option<Metadata>,
    ) -> Result<PaymentSession> {
        let session = PaymentSession::new(
            amount_cents,
            currency.unwrap_or(DEFAULT_CURRENCY),
            metadata,
            self.clock.now_millis(),
        );
        self.ledger.append(session.clone()).await?;
        tracing::info!(id = %session.id, amount_cents, "payment session created");
        Ok(session)
    }

    /// Marks a pending session as paid.
    ///
    /// Returns `None`, leaving storage untouched, when no session has this id
    /// or the session is no longer pending.
    pub async fn confirm_session(&self, id: &str) -> Result<Option<PaymentSession>> {
        self.settle(id, PaymentSession::confirm).await
    }

    /// Marks a pending session as failed, with the same rules as
    /// [`PaymentStore::confirm_session`].
    pub async fn fail_session(&self, id: &str) -> Result<Option<PaymentSession>> {
        self.settle(id, PaymentSession::fail).await
    }

    async fn settle(
        &self,
        id: &str,
        transition: fn(&mut PaymentSession) -> bool,
    ) -> Result<Option<PaymentSession>> {
        let settled = self
            .ledger
            .update(|sessions| {
                let session = sessions.iter_mut().find(|s| s.id == id)?;
                transition(session).then(|| session.clone())
            })
            .await?;
        if settled.is_none() {
            tracing::debug!(id, "no pending payment session to settle");
        }
        Ok(settled)
    }

    /// All sessions, newest first.
    pub async fn list(&self) -> Result<Vec<PaymentSession>> {
        let mut sessions = self.ledger.read().await?;
        sessions.reverse();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    pub async fn clear(&self) -> Result<()> {
        self.ledger.clear().await
    }
}
