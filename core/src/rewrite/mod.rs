//! Normalization passes over expressions
//!
//! Every pass is a pure `&Expr -> Expr` method. The prover chains them in
//! a fixed order; see [`crate::prover`].

mod collinear;
mod fraction;
mod grouping;
mod simplify;
mod uniformize;

