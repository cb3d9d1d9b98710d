//! Point elimination
//!
//! Each derived point kind reduces to a [`LineForm`]; the lemmas in
//! `lemmas` then rewrite every atom that mentions the point. Lemmas that
//! depend on an undecided geometric fact ask a [`LemmaOracle`] for a
//! sub-proof.

mod independent;
mod lemmas;
mod line_form;

pub use independent::to_independent_variables;
pub use line_form::{construction_condition, LineForm};

use crate::expr::Expr;
use crate::geometry::CollinearCache;
use crate::ir::{Construction, NdgConditions, PointId, ProofError, ProofResult, Statement};
use lemmas::PointEliminator;

/// Decides lemmas that elimination depends on
pub trait LemmaOracle {
    /// Decide `statement` over the first `prefix_len` construction steps
    ///
    /// `Ok(true)` and `Ok(false)` are decided outcomes. A lemma that cannot
    /// be decided is reported as [`ProofError::Inconclusive`].
    fn decide(&mut self, statement: &Statement, prefix_len: usize) -> ProofResult<bool>;
}

/// Rewrite `expr` so that it no longer mentions `point`
///
/// The result is unnormalized. When `expr` does not contain the point it
/// is returned unchanged and no NDG condition is recorded.
pub fn eliminate(
    expr: &Expr,
    point: PointId,
    construction: &Construction,
    cache: &CollinearCache,
    oracle: &mut dyn LemmaOracle,
    ndg: &mut NdgConditions,
) -> ProofResult<Expr> {
    let step_index = construction.step_index_of_point(point).ok_or_else(|| {
        ProofError::InvalidConstruction(format!("point {} is not constructed", point))
    })?;
    let constructed = construction.point(point).ok_or_else(|| {
        ProofError::InvalidConstruction(format!("point {} is not constructed", point))
    })?;
    let Some(form) = LineForm::of(&constructed.kind) else {
        return Ok(expr.clone());
    };
    if !expr.contains_point(point) {
        return Ok(expr.clone());
    }

    let mut eliminator =
        PointEliminator::new(construction, cache, oracle, ndg, constructed, step_index, form);
    eliminator.run(expr, constructed)
}
