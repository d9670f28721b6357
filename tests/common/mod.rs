#![allow(dead_code)]

use pdfx_sandbox::application::chain::ChainStore;
use pdfx_sandbox::application::interpreter::Interpreter;
use pdfx_sandbox::application::payments::PaymentStore;
use pdfx_sandbox::application::runner::SandboxRunner;
use pdfx_sandbox::domain::effect::Metadata;
use pdfx_sandbox::domain::handlers::{EffectHandlers, HandlerResult};
use pdfx_sandbox::domain::ports::{ClockRef, KeyValueStoreRef};
use pdfx_sandbox::infrastructure::clock::SystemClock;
use pdfx_sandbox::infrastructure::in_memory::InMemoryKeyValueStore;
use std::sync::{Arc, Mutex};

pub fn runner_with(backing: KeyValueStoreRef, clock: ClockRef) -> SandboxRunner {
    SandboxRunner::new(
        Interpreter::new(clock.clone()),
        PaymentStore::new(backing.clone(), clock.clone()),
        ChainStore::new(backing, clock),
    )
}

pub fn runner() -> SandboxRunner {
    runner_with(Arc::new(InMemoryKeyValueStore::new()), Arc::new(SystemClock))
}

/// One observed handler invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Log(String),
    Watermark(u32, String),
    Highlight(String),
    LockPages(Vec<u32>, Option<u64>),
    MintNft(Metadata),
}

#[derive(Default)]
pub struct RecordingHandlers {
    calls: Mutex<Vec<Call>>,
}

impl RecordingHandlers {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> HandlerResult {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl EffectHandlers for RecordingHandlers {
    fn on_log(&self, message: &str) -> HandlerResult {
        self.record(Call::Log(message.to_string()))
    }

    fn on_watermark(&self, page: u32, text: &str) -> HandlerResult {
        self.record(Call::Watermark(page, text.to_string()))
    }

    fn on_highlight(&self, text: &str) -> HandlerResult {
        self.record(Call::Highlight(text.to_string()))
    }

    fn on_lock_pages(&self, pages: &[u32], price_cents: Option<u64>) -> HandlerResult {
        self.record(Call::LockPages(pages.to_vec(), price_cents))
    }

    fn on_mint_nft(&self, metadata: &Metadata) -> HandlerResult {
        self.record(Call::MintNft(metadata.clone()))
    }
}
