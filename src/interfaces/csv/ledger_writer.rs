use crate::domain::chain::ChainEvent;
use crate::domain::payment::PaymentSession;
use crate::error::Result;
use std::io::Write;

/// Writes ledger listings as CSV.
///
/// Structured fields (event payloads, session metadata) are embedded as
/// compact JSON in a single column.
pub struct LedgerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_events(&mut self, events: &[ChainEvent]) -> Result<()> {
        self.writer
            .write_record(["id", "type", "timestamp", "payload"])?;
        for event in events {
            let timestamp = event.timestamp.to_string();
            let payload = serde_json::to_string(&event.payload)?;
            self.writer.write_record([
                event.id.as_str(),
                event.r#type.as_str(),
                timestamp.as_str(),
                payload.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_sessions(&mut self, sessions: &[PaymentSession]) -> Result<()> {
        self.writer.write_record([
            "id",
            "amount_cents",
            "currency",
            "status",
            "created_at",
            "metadata",
        ])?;
        for session in sessions {
            let amount = session.amount_cents.to_string();
            let status = serde_json::to_value(session.status)?;
            let created_at = session.created_at.to_string();
            let metadata = match &session.metadata {
                Some(metadata) => serde_json::to_string(metadata)?,
                None => String::new(),
            };
            self.writer.write_record([
                session.id.as_str(),
                amount.as_str(),
                session.currency.as_str(),
                status.as_str().unwrap_or_default(),
                created_at.as_str(),
                metadata.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
