use super::chain::ChainStore;
use super::interpreter::Interpreter;
use super::payments::{DEFAULT_CURRENCY, PaymentStore};
use crate::domain::effect::{DEFAULT_LOCK_PRICE_CENTS, Effect, InterpretationResult, Metadata};
use crate::domain::handlers::{EffectHandlers, HandlerResult};
use crate::domain::payment::PaymentSession;
use crate::domain::ports::PacerRef;
use crate::error::Result;
use crate::infrastructure::pacing::NoPacing;
use serde_json::json;
use std::sync::Arc;

/// Interprets scripts and applies the resulting plans.
///
/// Effects are applied strictly one after another. For each effect the
/// runner notifies the caller's handlers and mirrors the effect into the
/// chain and payment stores. Neither a failing handler nor a failing store
/// write stops the remaining effects from running.
pub struct SandboxRunner {
    interpreter: Interpreter,
    payments: PaymentStore,
    chain: ChainStore,
    pacer: PacerRef,
}

impl SandboxRunner {
    /// Creates a runner that dispatches effects without any delay.
    pub fn new(interpreter: Interpreter, payments: PaymentStore, chain: ChainStore) -> Self {
        Self {
            interpreter,
            payments,
            chain,
            pacer: Arc::new(NoPacing),
        }
    }

    /// Sets the pacing applied before each effect.
    pub fn with_pacer(mut self, pacer: PacerRef) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn payments(&self) -> &PaymentStore {
        &self.payments
    }

    pub fn chain(&self) -> &ChainStore {
        &self.chain
    }

    /// Interprets `script` and applies the plan. Returns the plan unchanged.
    pub async fn run(&self, script: &str, handlers: &dyn EffectHandlers) -> InterpretationResult {
        let plan = self.interpreter.interpret(script);
        self.execute(plan, handlers).await
    }

    /// Applies an already interpreted plan. Returns it unchanged.
    pub async fn execute(
        &self,
        plan: InterpretationResult,
        handlers: &dyn EffectHandlers,
    ) -> InterpretationResult {
        tracing::info!(effects = plan.effects.len(), "running plan");
        if let Some(explanation) = &plan.explanation {
            notify(handlers, "log", handlers.on_log(&format!("[MockAI] {explanation}")));
        }

        for effect in &plan.effects {
            self.pacer.pause().await;
            tracing::debug!(kind = effect.kind(), "dispatching effect");
            if let Err(e) = self.apply(effect, handlers).await {
                tracing::error!(kind = effect.kind(), error = %e, "effect could not be recorded");
                notify(
                    handlers,
                    "log",
                    handlers.on_log(&format!("Failed to record {}: {e}", effect.kind())),
                );
            }
        }

        tracing::info!("plan finished");
        plan
    }

    async fn apply(&self, effect: &Effect, handlers: &dyn EffectHandlers) -> Result<()> {
        match effect {
            Effect::Log { message } => {
                notify(handlers, "log", handlers.on_log(message));
                self.chain.push("log", json!({ "message": message })).await?;
            }
            Effect::AddWatermark { page, text } => {
                notify(handlers, "watermark", handlers.on_watermark(*page, text));
                self.chain
                    .push("watermark", json!({ "page": page, "text": text }))
                    .await?;
            }
            Effect::HighlightText { text } => {
                notify(handlers, "highlight", handlers.on_highlight(text));
                self.chain.push("highlight", json!({ "text": text })).await?;
            }
            Effect::LockPages { pages, price_cents } => {
                notify(handlers, "lockPages", handlers.on_lock_pages(pages, *price_cents));
                let mut metadata = Metadata::new();
                metadata.insert("reason".to_string(), json!("lockPages"));
                metadata.insert("pages".to_string(), json!(pages));
                let session = self
                    .open_session(price_cents.unwrap_or(DEFAULT_LOCK_PRICE_CENTS), metadata)
                    .await?;
                notify(
                    handlers,
                    "log",
                    handlers.on_log(&format!(
                        "Created mock payment session {} for unlocking pages.",
                        session.id
                    )),
                );
            }
            Effect::MintNft { metadata } => {
                notify(handlers, "mintNFT", handlers.on_mint_nft(metadata));
                self.chain
                    .push("mint", serde_json::Value::Object(metadata.clone()))
                    .await?;
            }
            Effect::RunPayment {
                price_cents,
                reason,
            } => {
                let mut metadata = Metadata::new();
                metadata.insert("reason".to_string(), json!(reason));
                let session = self.open_session(*price_cents, metadata).await?;
                notify(
                    handlers,
                    "log",
                    handlers.on_log(&format!("Mock payment created {}", session.id)),
                );
            }
            Effect::Unknown { op } => {
                tracing::warn!(op = %op, "skipping unknown effect");
                notify(handlers, "log", handlers.on_log(&format!("Unknown effect: {op}")));
            }
        }
        Ok(())
    }

    async fn open_session(&self, amount_cents: u64, metadata: Metadata) -> Result<PaymentSession> {
        let session = self
            .payments
            .create_session(amount_cents, Some(DEFAULT_CURRENCY), Some(metadata))
            .await?;
        self.chain
            .push("payment_session_created", serde_json::to_value(&session)?)
            .await?;
        Ok(session)
    }

    /// Confirms a pending payment session and records the confirmation on
    /// the chain. Returns the updated session, or `None` when there was no
    /// pending session with this id.
    pub async fn confirm_payment(
        &self,
        session_id: &str,
        handlers: &dyn EffectHandlers,
    ) -> Result<Option<PaymentSession>> {
        notify(
            handlers,
            "log",
            handlers.on_log(&format!("Attempting to confirm mock payment: {session_id}")),
        );
        let confirmed = self.payments.confirm_session(session_id).await?;
        match &confirmed {
            Some(_) => {
                notify(
                    handlers,
                    "log",
                    handlers.on_log(&format!("Payment {session_id} confirmed successfully!")),
                );
                self.chain
                    .push("payment_confirmed", json!({ "sessionId": session_id }))
                    .await?;
            }
            None => notify(
                handlers,
                "log",
                handlers.on_log(&format!("Failed to confirm payment {session_id}.")),
            ),
        }
        Ok(confirmed)
    }
}

/// Swallows a handler failure after logging it.
fn notify(handlers: &dyn EffectHandlers, hook: &str, result: HandlerResult) {
    if let Err(e) = result {
        tracing::warn!(hook, error = %e, "effect handler failed");
        if hook != "log" {
            let _ = handlers.on_log(&format!("Handler for {hook} failed: {e}"));
        }
    }
}
