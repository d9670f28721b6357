use crate::domain::effect::Metadata;
use crate::domain::handlers::{EffectHandlers, HandlerResult};
use rust_decimal::Decimal;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

/// A document effect that reached the console, as shown in the effects panel.
#[derive(Debug, Clone, PartialEq)]
pub enum AppliedEffect {
    Watermark { page: u32, text: String },
    Highlight { text: String },
    LockPages { pages: Vec<u32>, price_cents: Option<u64> },
    MintNft { metadata: Metadata },
}

/// Renders effects as console lines on any writer.
///
/// Every line is prefixed with `> `. Applied document effects are also kept,
/// newest first, for callers that want to show what changed.
pub struct ConsoleHandlers<W: Write + Send> {
    out: Mutex<W>,
    applied: Mutex<Vec<AppliedEffect>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<W: Write + Send> ConsoleHandlers<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Writes `> {line}`.
    pub fn println(&self, line: &str) -> std::io::Result<()> {
        let mut out = lock(&self.out);
        writeln!(out, "> {line}")?;
        out.flush()
    }

    /// Applied effects, newest first.
    pub fn applied(&self) -> Vec<AppliedEffect> {
        lock(&self.applied).clone()
    }

    pub fn into_writer(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn apply(&self, effect: AppliedEffect, line: &str) -> HandlerResult {
        lock(&self.applied).insert(0, effect);
        self.println(&format!("EFFECT APPLIED: {line}"))?;
        Ok(())
    }
}

impl<W: Write + Send> EffectHandlers for ConsoleHandlers<W> {
    fn on_log(&self, message: &str) -> HandlerResult {
        self.println(message)?;
        Ok(())
    }

    fn on_watermark(&self, page: u32, text: &str) -> HandlerResult {
        self.apply(
            AppliedEffect::Watermark {
                page,
                text: text.to_string(),
            },
            &format!("Watermark on page {page} with text \"{text}\""),
        )
    }

    fn on_highlight(&self, text: &str) -> HandlerResult {
        self.apply(
            AppliedEffect::Highlight {
                text: text.to_string(),
            },
            &format!("Highlight text \"{text}\""),
        )
    }

    fn on_lock_pages(&self, pages: &[u32], price_cents: Option<u64>) -> HandlerResult {
        let listed = pages
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let dollars = Decimal::new(i64::try_from(price_cents.unwrap_or(0))?, 2);
        self.apply(
            AppliedEffect::LockPages {
                pages: pages.to_vec(),
                price_cents,
            },
            &format!("Locked pages [{listed}] for ${dollars}"),
        )
    }

    fn on_mint_nft(&self, metadata: &Metadata) -> HandlerResult {
        let rendered = serde_json::to_string(metadata)?;
        self.apply(
            AppliedEffect::MintNft {
                metadata: metadata.clone(),
            },
            &format!("Minted NFT with metadata: {rendered}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output(console: ConsoleHandlers<Vec<u8>>) -> String {
        String::from_utf8(console.into_writer()).unwrap()
    }

    #[test]
    fn test_console_lines() {
        let console = ConsoleHandlers::new(Vec::new());
        console.on_log("hello").unwrap();
        console.on_watermark(2, "DRAFT").unwrap();
        console.on_highlight("clause").unwrap();
        console.on_lock_pages(&[2, 3], Some(500)).unwrap();

        assert_eq!(
            output(console),
            "> hello\n\
             > EFFECT APPLIED: Watermark on page 2 with text \"DRAFT\"\n\
             > EFFECT APPLIED: Highlight text \"clause\"\n\
             > EFFECT APPLIED: Locked pages [2, 3] for $5.00\n"
        );
    }

    #[test]
    fn test_lock_without_price_shows_zero() {
        let console = ConsoleHandlers::new(Vec::new());
        console.on_lock_pages(&[2], None).unwrap();
        assert!(output(console).contains("for $0.00"));
    }

    #[test]
    fn test_applied_effects_newest_first() {
        let console = ConsoleHandlers::new(Vec::new());
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("Document Edition"));

        console.on_highlight("a").unwrap();
        console.on_mint_nft(&metadata).unwrap();

        assert_eq!(
            console.applied(),
            vec![
                AppliedEffect::MintNft { metadata },
                AppliedEffect::Highlight {
                    text: "a".to_string()
                },
            ]
        );
        assert!(output(console).contains("Minted NFT with metadata: {\"title\":\"Document Edition\"}"));
    }
}
