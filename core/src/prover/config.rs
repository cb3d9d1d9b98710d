//! Prover configuration

use serde::{Deserialize, Serialize};

/// Area-method prover configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Maximum nesting of lemma sub-proofs
    pub max_subproof_depth: usize,

    /// Node-count ceiling checked after every elimination
    pub max_expression_size: usize,

    /// Monomial-count ceiling checked before full expansion
    pub max_expansion_terms: usize,

    /// Expressions at least this large are logged by size only
    pub print_size_limit: usize,

    /// Record every pass in the proof trace
    pub record_trace: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            max_subproof_depth: 8,
            max_expression_size: 200_000,
            max_expansion_terms: 250_000,
            print_size_limit: 200,
            record_trace: true,
        }
    }
}
