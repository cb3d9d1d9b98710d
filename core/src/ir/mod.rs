//! Intermediate Representation (IR) module for the area-method prover
//!
//! This module provides the data the prover works on:
//! - **symbols**: Type-safe identifiers for points and lines with string interning
//! - **construction**: Ordered construction steps and point kinds
//! - **statement**: Statements to prove and NDG side conditions
//! - **proof**: Errors, verdicts and derivation traces with serialization
//!
//! # Example
//!
//! ```rust
//! use area_method_core::ir::*;
//!
//! let statement = Statement::collinear(PointId(0), PointId(1), PointId(2));
//! assert_eq!(statement.expressions.len(), 1);
//!
//! let mut ndg = NdgConditions::new();
//! ndg.push(NdgCondition::Distinct(PointId(1), PointId(0)));
//! assert!(ndg.contains(&NdgCondition::Distinct(PointId(0), PointId(1))));
//! ```

mod construction;
mod proof;
mod statement;
mod symbols;

// Re-export all public items for convenient access
pub use construction::{
    ConstructedLine, ConstructedPoint, Construction, ConstructionStep, PointKind,
};
pub use proof::{
    ProofError, ProofResult, ProofStatistics, ProofStep, ProofStepId, ProofTrace, UnknownReason,
    Verdict,
};
pub use statement::{NdgCondition, NdgConditions, Statement};
pub use symbols::{LineId, PointId, SymbolTable};
