//! Area-Method Core
//!
//! Algebraic geometry theorem prover based on the area method

pub mod expr;        // Symbolic expressions over geometric quantities
pub mod rewrite;     // Normalization passes
pub mod ir;          // Intermediate representation (symbols, constructions, statements, proofs)
pub mod geometry;    // Construction builders and collinearity facts
pub mod elimination; // Point elimination lemmas
pub mod prover;      // Proof loop, shared context and configuration

pub use expr::{Atom, Axis, Expr};
pub use ir::*;
pub use geometry::{CollinearCache, Construct};
pub use elimination::{eliminate, to_independent_variables, LemmaOracle, LineForm};
pub use prover::{AreaMethodProver, ProofReport, ProverConfig, ProverContext};
