//! Rewriting residuals over free points in coordinates

use super::LemmaOracle;
use crate::expr::{Atom, Axis, Expr};
use crate::ir::{Construction, PointId, ProofError, ProofResult, Statement};
use tracing::debug;

fn x(p: PointId) -> Expr {
    Expr::coordinate(p, Axis::X)
}

fn y(p: PointId) -> Expr {
    Expr::coordinate(p, Axis::Y)
}

/// Vector components of AB
fn delta(a: PointId, b: PointId) -> (Expr, Expr) {
    (x(b) - x(a), y(b) - y(a))
}

/// Replace every area, Pythagoras and ratio atom by its coordinate form
///
/// Only atoms over free points can be rewritten; anything else, or a
/// ratio of segments that cannot be shown parallel, is inconclusive.
pub fn to_independent_variables(
    expr: &Expr,
    construction: &Construction,
    oracle: &mut dyn LemmaOracle,
) -> ProofResult<Expr> {
    expr.try_map_atoms(&mut |atom| {
        if atom.is_independent() {
            return Ok(Expr::Atom(atom.clone()));
        }
        if let Some(point) = atom.points().into_iter().find(|p| !construction.is_free(*p)) {
            debug!(point = %construction.label(point), "atom over a derived point");
            return Err(ProofError::Inconclusive {
                statement: Statement::zero(
                    format!("{} in free coordinates", construction.label(point)),
                    Expr::Atom(atom.clone()),
                ),
            });
        }

        match atom {
            Atom::Area(a, b, c) => {
                let (abx, aby) = delta(*a, *b);
                let (acx, acy) = delta(*a, *c);
                Ok(Expr::rational(1, 2) * (abx * acy - acx * aby))
            }
            Atom::Pythagoras(a, b, c) => {
                let (bax, bay) = delta(*b, *a);
                let (bcx, bcy) = delta(*b, *c);
                Ok(Expr::number(2) * (bax * bcx + bay * bcy))
            }
            Atom::Ratio(a, b, c, d) => {
                let lemma = Statement::parallel(*a, *b, *c, *d);
                if !oracle.decide(&lemma, construction.len())? {
                    return Err(ProofError::Inconclusive { statement: lemma });
                }
                let (abx, aby) = delta(*a, *b);
                let (cdx, cdy) = delta(*c, *d);
                Ok((abx * cdx.clone() + aby * cdy.clone()) / (cdx.clone() * cdx + cdy.clone() * cdy))
            }
            Atom::Scalar(_) | Atom::Coordinate(_, _) => Ok(Expr::Atom(atom.clone())),
        }
    })
}
