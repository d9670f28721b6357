use serde::{Deserialize, Serialize};

/// Free-form metadata attached to minted editions and payment sessions.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Price charged for unlocking pages when a plan does not name one.
pub const DEFAULT_LOCK_PRICE_CENTS: u64 = 500;

/// One unit of planned document, payment or ledger work.
///
/// Effects are value objects: they carry no identity and are never mutated
/// after the interpreter produces them. The JSON shape uses an `op` tag so
/// plans can be inspected or stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Effect {
    Log {
        message: String,
    },
    AddWatermark {
        page: u32,
        text: String,
    },
    HighlightText {
        text: String,
    },
    LockPages {
        pages: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price_cents: Option<u64>,
    },
    #[serde(rename = "mintNFT")]
    MintNft {
        metadata: Metadata,
    },
    RunPayment {
        price_cents: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Any `op` this build does not know how to apply.
    #[serde(untagged)]
    Unknown {
        op: String,
    },
}

impl Effect {
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    /// The wire name of this effect kind.
    pub fn kind(&self) -> &str {
        match self {
            Self::Log { .. } => "log",
            Self::AddWatermark { .. } => "addWatermark",
            Self::HighlightText { .. } => "highlightText",
            Self::LockPages { .. } => "lockPages",
            Self::MintNft { .. } => "mintNFT",
            Self::RunPayment { .. } => "runPayment",
            Self::Unknown { op } => op,
        }
    }
}

/// The plan produced by one interpretation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResult {
    pub success: bool,
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}
