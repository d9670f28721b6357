//! Heuristic script interpreter.
//!
//! Scripts are free text. Each [`Rule`] pairs a keyword predicate with an
//! effect builder; every rule whose predicate matches fires, in table order,
//! regardless of where its keywords appear in the script. When no rule
//! produces anything the plan falls back to highlighting a word taken from
//! the middle of the script.

use crate::domain::effect::{DEFAULT_LOCK_PRICE_CENTS, Effect, InterpretationResult, Metadata};
use crate::domain::ports::ClockRef;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::LazyLock;

pub const EXPLANATION: &str = "Interpreted by MockAI heuristics.";
pub const DEFAULT_WATERMARK_PAGE: u32 = 1;
pub const DEFAULT_WATERMARK_TEXT: &str = "CONFIDENTIAL";
/// Pages locked by the pay/unlock rule, whatever the script says.
pub const LOCKED_PAGES: [u32; 2] = [2, 3];
pub const EDITION_TITLE: &str = "Document Edition";
pub const FALLBACK_WORD: &str = "example";

static WATERMARK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)watermark(?:.*page\s+([0-9]+))?(?:.*text\s*["'](.*?)["'])?"#)
        .expect("watermark pattern is valid")
});
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?([0-9]+(?:\.[0-9]+)?)").expect("price pattern is valid"));
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_]+").expect("word pattern is valid"));

/// What a rule gets to look at.
pub struct Script<'a> {
    /// The script exactly as written.
    pub text: &'a str,
    /// Lowercased copy used for keyword checks.
    pub lowered: String,
    /// Wall-clock time of this interpretation, in milliseconds.
    pub now_millis: i64,
}

/// One predicate -> effects entry of the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Script<'_>) -> bool,
    pub build: fn(&Script<'_>) -> Vec<Effect>,
}

/// The built-in rule table, in firing order.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "watermark",
            matches: |s| s.lowered.contains("watermark"),
            build: watermark_effects,
        },
        Rule {
            name: "lock-pages",
            matches: |s| s.lowered.contains("pay") || s.lowered.contains("unlock"),
            build: lock_pages_effects,
        },
        Rule {
            name: "mint",
            // "mint nft" is covered by "mint".
            matches: |s| s.lowered.contains("mint"),
            build: mint_effects,
        },
    ]
}

fn watermark_effects(script: &Script<'_>) -> Vec<Effect> {
    let captures = WATERMARK_RE.captures(script.text);
    let page = captures
        .as_ref()
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(DEFAULT_WATERMARK_PAGE);
    let text = captures
        .as_ref()
        .and_then(|c| c.get(2))
        .map_or(DEFAULT_WATERMARK_TEXT, |m| m.as_str())
        .to_string();

    let message = format!("Planned watermark on page {page} with text: \"{text}\"");
    vec![Effect::AddWatermark { page, text }, Effect::log(message)]
}

fn lock_pages_effects(script: &Script<'_>) -> Vec<Effect> {
    let price_cents = PRICE_RE
        .captures(script.text)
        .and_then(|c| c.get(1))
        .and_then(|m| dollars_to_cents(m.as_str()))
        .unwrap_or(DEFAULT_LOCK_PRICE_CENTS);

    vec![
        Effect::LockPages {
            pages: LOCKED_PAGES.to_vec(),
            price_cents: Some(price_cents),
        },
        Effect::log(format!("Will lock pages [2,3] for {price_cents} cents.")),
    ]
}

fn mint_effects(script: &Script<'_>) -> Vec<Effect> {
    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), EDITION_TITLE.into());
    metadata.insert("timestamp".to_string(), script.now_millis.into());

    vec![
        Effect::MintNft { metadata },
        Effect::log("Will mint NFT for current doc version."),
    ]
}

/// Converts a decimal dollar amount to cents, rounding half away from zero.
fn dollars_to_cents(amount: &str) -> Option<u64> {
    Decimal::from_str(amount)
        .ok()?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

fn fallback_effects(script: &Script<'_>) -> Vec<Effect> {
    let words: Vec<&str> = WORD_RE.find_iter(script.text).map(|m| m.as_str()).collect();
    let word = words.get(words.len() / 2).copied().unwrap_or(FALLBACK_WORD);

    vec![
        Effect::log("No direct heuristic match — defaulting to highlight."),
        Effect::HighlightText {
            text: word.to_string(),
        },
    ]
}

/// Advice returned by [`Interpreter::debug`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugSuggestion {
    pub suggestion: String,
    pub explanation: String,
}

impl DebugSuggestion {
    pub fn to_markdown(&self) -> String {
        format!(
            "### Mock AI Debugger Analysis\n**Explanation:** {}\n\n---\n\n### Suggested Code\n```javascript\n{}\n```\n",
            self.explanation, self.suggestion
        )
    }
}

/// Turns script text into a plan of effects. Holds no state between calls.
#[derive(Clone)]
pub struct Interpreter {
    rules: Vec<Rule>,
    clock: ClockRef,
}

impl Interpreter {
    pub fn new(clock: ClockRef) -> Self {
        Self {
            rules: default_rules(),
            clock,
        }
    }

    /// Appends a rule after the existing ones.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Interprets `text`. Never fails and never returns an empty plan.
    pub fn interpret(&self, text: &str) -> InterpretationResult {
        let script = Script {
            text,
            lowered: text.to_lowercase(),
            now_millis: self.clock.now_millis(),
        };

        let mut effects = Vec::new();
        for rule in &self.rules {
            if (rule.matches)(&script) {
                tracing::debug!(rule = rule.name, "rule matched");
                effects.extend((rule.build)(&script));
            }
        }
        if effects.is_empty() {
            effects = fallback_effects(&script);
        }

        InterpretationResult {
            success: true,
            effects,
            explanation: Some(EXPLANATION.to_string()),
        }
    }

    /// Appends advice about `error_message` to the script. No analysis is
    /// performed.
    pub fn debug(&self, text: &str, error_message: &str) -> DebugSuggestion {
        DebugSuggestion {
            suggestion: format!(
                "{text}\n\n// AI Suggestion: The error \"{error_message}\" might be due to an unhandled null value. Consider adding checks before accessing properties. (Mocked Response)"
            ),
            explanation: format!(
                "MockAI suggests adding safe wrappers and validating inputs for the error: {error_message}"
            ),
        }
    }
}
