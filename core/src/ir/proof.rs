//! Proof errors, verdicts and derivation traces
//!
//! A trace records every normalization pass the prover applies to each
//! statement expression, with serialization support for export.

use super::statement::Statement;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while proving
#[derive(Error, Debug)]
pub enum ProofError {
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    #[error("Invalid construction: {0}")]
    InvalidConstruction(String),

    /// A lemma needed by an elimination could not be decided
    #[error("Inconclusive: lemma `{}` could not be decided", .statement.name)]
    Inconclusive { statement: Statement },

    #[error("Sub-proof depth limit {0} exceeded")]
    DepthLimit(usize),

    #[error("Expression size {size} exceeds limit {limit}")]
    SizeLimit { size: usize, limit: usize },
}

impl ProofError {
    /// Reason to report when this error ends a proof as Unknown
    ///
    /// `None` for errors that must reach the caller instead.
    pub fn unknown_reason(&self) -> Option<UnknownReason> {
        match self {
            ProofError::Inconclusive { statement } => Some(UnknownReason::Blocked {
                lemma: statement.clone(),
            }),
            ProofError::DepthLimit(limit) => Some(UnknownReason::DepthLimit { limit: *limit }),
            ProofError::SizeLimit { size, limit } => Some(UnknownReason::SizeLimit {
                size: *size,
                limit: *limit,
            }),
            _ => None,
        }
    }
}

/// Result type for proof operations
pub type ProofResult<T> = Result<T, ProofError>;

/// Outcome of a proof attempt
///
/// False and Unknown are both "not proved" but are never conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Unknown,
}

impl Verdict {
    pub fn is_decided(self) -> bool {
        !matches!(self, Verdict::Unknown)
    }
}

impl From<bool> for Verdict {
    fn from(value: bool) -> Self {
        if value {
            Verdict::True
        } else {
            Verdict::False
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::True => write!(f, "true"),
            Verdict::False => write!(f, "false"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Why a proof ended Unknown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownReason {
    /// Blocked on an undecidable lemma
    Blocked { lemma: Statement },
    DepthLimit { limit: usize },
    SizeLimit { size: usize, limit: usize },
}

/// Identifier of a trace step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProofStepId(pub u32);

impl fmt::Display for ProofStepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step{}", self.0)
    }
}

/// One pass applied to one statement expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Unique identifier for this step
    pub id: ProofStepId,

    /// Name of the pass, e.g. `simplify` or `eliminate`
    pub pass: String,

    /// Index of the statement expression being transformed
    pub expression_index: usize,

    /// Node count after the pass
    pub size: usize,

    /// Rendered expression, absent when it was too large to print
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Optional human-readable explanation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ProofStep {
    pub fn new(
        id: ProofStepId,
        pass: impl Into<String>,
        expression_index: usize,
        size: usize,
        expression: Option<String>,
    ) -> Self {
        Self {
            id,
            pass: pass.into(),
            expression_index,
            size,
            expression,
            explanation: None,
        }
    }

    /// Create a proof step with an explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

/// Complete derivation of a proof attempt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofTrace {
    /// Ordered sequence of passes
    pub steps: Vec<ProofStep>,

    /// Final decision, once reached
    pub verdict: Option<Verdict>,

    /// Additional metadata about the proof
    pub metadata: HashMap<String, String>,
}

impl ProofTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next added step should carry
    pub fn next_id(&self) -> ProofStepId {
        ProofStepId(self.steps.len() as u32)
    }

    pub fn add_step(&mut self, step: ProofStep) {
        self.steps.push(step);
    }

    pub fn mark_decided(&mut self, verdict: Verdict) {
        self.verdict = Some(verdict);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }

    /// Steps applied to one statement expression, in order
    pub fn steps_for_expression(&self, index: usize) -> impl Iterator<Item = &ProofStep> {
        self.steps
            .iter()
            .filter(move |step| step.expression_index == index)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> ProofResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact JSON string
    pub fn to_json_compact(&self) -> ProofResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> ProofResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn statistics(&self) -> ProofStatistics {
        let mut stats = ProofStatistics {
            num_steps: self.steps.len(),
            max_size: 0,
            verdict: self.verdict,
            passes_used: HashMap::new(),
        };

        for step in &self.steps {
            stats.max_size = stats.max_size.max(step.size);
            *stats.passes_used.entry(step.pass.clone()).or_insert(0) += 1;
        }

        stats
    }
}

/// Statistics about a proof trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofStatistics {
    pub num_steps: usize,

    /// Largest node count seen after any pass
    pub max_size: usize,

    pub verdict: Option<Verdict>,

    /// How many times each pass ran
    pub passes_used: HashMap<String, usize>,
}

impl ProofStatistics {
    /// Get the most frequently applied pass
    pub fn most_used_pass(&self) -> Option<(&str, usize)> {
        self.passes_used
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(pass, count)| (pass.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::PointId;

    fn step(id: u32, pass: &str, index: usize, size: usize) -> ProofStep {
        ProofStep::new(ProofStepId(id), pass, index, size, Some("0".to_string()))
    }

    #[test]
    fn test_proof_trace_creation() {
        let mut trace = ProofTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.verdict, None);

        trace.add_step(step(0, "simplify", 0, 3));
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.next_id(), ProofStepId(1));
    }

    #[test]
    fn test_proof_trace_metadata() {
        let mut trace = ProofTrace::new();
        trace.add_metadata("statement", "midpoint");
        trace.add_metadata("depth", "0");

        assert_eq!(trace.get_metadata("statement"), Some("midpoint"));
        assert_eq!(trace.get_metadata("depth"), Some("0"));
        assert_eq!(trace.get_metadata("nonexistent"), None);
    }

    #[test]
    fn test_json_serialization_roundtrip() {
        let mut trace = ProofTrace::new();
        trace.add_metadata("test", "value");
        trace.add_step(step(0, "eliminate", 0, 12).with_explanation("eliminate M"));
        trace.mark_decided(Verdict::True);

        let json = trace.to_json().unwrap();
        let restored = ProofTrace::from_json(&json).unwrap();

        assert_eq!(restored.steps, trace.steps);
        assert_eq!(restored.verdict, Some(Verdict::True));
        assert_eq!(restored.get_metadata("test"), Some("value"));
    }

    #[test]
    fn test_compact_json() {
        let mut trace = ProofTrace::new();
        trace.add_step(step(0, "simplify", 0, 1));

        let compact = trace.to_json_compact().unwrap();
        let pretty = trace.to_json().unwrap();

        assert!(compact.len() < pretty.len());
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_oversized_expression_omitted_from_json() {
        let mut trace = ProofTrace::new();
        trace.add_step(ProofStep::new(ProofStepId(0), "simplify", 0, 500, None));
        let json = trace.to_json_compact().unwrap();
        assert!(!json.contains("\"expression\":"));
        assert!(json.contains("\"size\":500"));
    }

    #[test]
    fn test_proof_statistics() {
        let mut trace = ProofTrace::new();
        trace.add_step(step(0, "simplify", 0, 4));
        trace.add_step(step(1, "eliminate", 0, 9));
        trace.add_step(step(2, "simplify", 1, 2));

        let stats = trace.statistics();
        assert_eq!(stats.num_steps, 3);
        assert_eq!(stats.max_size, 9);

        let (most_used, count) = stats.most_used_pass().unwrap();
        assert_eq!(most_used, "simplify");
        assert_eq!(count, 2);
        assert_eq!(trace.steps_for_expression(0).count(), 2);
    }

    #[test]
    fn test_unknown_reason_mapping() {
        let lemma = Statement::collinear(PointId(0), PointId(1), PointId(2));
        let err = ProofError::Inconclusive {
            statement: lemma.clone(),
        };
        assert_eq!(err.unknown_reason(), Some(UnknownReason::Blocked { lemma }));
        assert_eq!(
            ProofError::DepthLimit(8).unknown_reason(),
            Some(UnknownReason::DepthLimit { limit: 8 })
        );
        assert_eq!(
            ProofError::InvalidStatement("empty".to_string()).unknown_reason(),
            None
        );
    }

    #[test]
    fn test_verdict_from_bool() {
        assert_eq!(Verdict::from(true), Verdict::True);
        assert_eq!(Verdict::from(false), Verdict::False);
        assert!(!Verdict::Unknown.is_decided());
        assert_eq!(Verdict::Unknown.to_string(), "unknown");
    }
}
