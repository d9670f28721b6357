//! Hooks a presentation layer supplies to observe effects as they run.
//!
//! Every hook has a no-op default, so an implementor only overrides the
//! capabilities it cares about. A hook that returns an error is isolated by
//! the runner: the failure is logged and the rest of the plan still runs.

use super::effect::Metadata;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = std::result::Result<(), HandlerError>;

pub trait EffectHandlers: Send + Sync {
    fn on_log(&self, _message: &str) -> HandlerResult {
        Ok(())
    }

    fn on_watermark(&self, _page: u32, _text: &str) -> HandlerResult {
        Ok(())
    }

    fn on_highlight(&self, _text: &str) -> HandlerResult {
        Ok(())
    }

    fn on_lock_pages(&self, _pages: &[u32], _price_cents: Option<u64>) -> HandlerResult {
        Ok(())
    }

    fn on_mint_nft(&self, _metadata: &Metadata) -> HandlerResult {
        Ok(())
    }
}

/// Handlers that observe nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandlers;

impl EffectHandlers for NoopHandlers {}
