//! Proof outcome returned to callers

use crate::ir::{NdgConditions, ProofResult, ProofTrace, UnknownReason, Verdict};
use serde::{Deserialize, Serialize};

/// Result of one proof attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofReport {
    /// Name of the statement
    pub statement: String,

    pub verdict: Verdict,

    /// Set when the verdict is Unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_reason: Option<UnknownReason>,

    /// NDG conditions the proof relies on, sub-proofs included
    pub ndg: NdgConditions,

    /// Derivation of every statement expression
    pub trace: ProofTrace,

    /// Elimination steps run, sub-proofs included
    pub eliminations: usize,

    /// True when the verdict came from the memo
    pub from_cache: bool,
}

impl ProofReport {
    pub fn is_proved(&self) -> bool {
        self.verdict == Verdict::True
    }

    pub fn to_json(&self) -> ProofResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
