//! Per-atom elimination lemmas
//!
//! Area and Pythagoras atoms are affine (or quadratic) in each of their
//! points, so they expand directly over the weights of the line form.
//! Ratio atoms need to know whether the other endpoint lies on the line
//! the point moves along, which may take a sub-proof.

use super::line_form::{construction_condition, LineForm};
use super::LemmaOracle;
use crate::expr::{Atom, Expr};
use crate::geometry::CollinearCache;
use crate::ir::{
    Construction, ConstructedPoint, NdgCondition, NdgConditions, PointId, ProofResult, Statement,
};
use tracing::debug;

/// Rewrites the atoms of one expression so that `point` disappears
pub(crate) struct PointEliminator<'a> {
    construction: &'a Construction,
    cache: &'a CollinearCache,
    oracle: &'a mut dyn LemmaOracle,
    ndg: &'a mut NdgConditions,
    y: PointId,
    step_index: usize,
    form: LineForm,
    weights: Vec<(PointId, Expr)>,
}

impl<'a> PointEliminator<'a> {
    pub(crate) fn new(
        construction: &'a Construction,
        cache: &'a CollinearCache,
        oracle: &'a mut dyn LemmaOracle,
        ndg: &'a mut NdgConditions,
        point: &ConstructedPoint,
        step_index: usize,
        form: LineForm,
    ) -> Self {
        let weights = form.weights();
        Self {
            construction,
            cache,
            oracle,
            ndg,
            y: point.id,
            step_index,
            form,
            weights,
        }
    }

    pub(crate) fn run(&mut self, expr: &Expr, point: &ConstructedPoint) -> ProofResult<Expr> {
        let result = expr.try_map_atoms(&mut |atom| {
            if atom.contains_point(self.y) {
                self.atom(atom)
            } else {
                Ok(Expr::Atom(atom.clone()))
            }
        })?;
        if let Some(condition) = construction_condition(&point.kind) {
            self.ndg.push(condition);
        }
        Ok(result)
    }

    fn atom(&mut self, atom: &Atom) -> ProofResult<Expr> {
        match atom {
            Atom::Area(a, b, c) => Ok(self.area(*a, *b, *c)),
            Atom::Pythagoras(a, b, c) => Ok(self.pythagoras(*a, *b, *c)),
            Atom::Ratio(a, b, c, d) => self.ratio(*a, *b, *c, *d),
            Atom::Scalar(_) | Atom::Coordinate(_, _) => Ok(Expr::Atom(atom.clone())),
        }
    }

    /// S_abY = Σ wᵢ S_abXᵢ
    fn area(&self, a: PointId, b: PointId, c: PointId) -> Expr {
        let y = self.y;
        let occurrences = [a, b, c].iter().filter(|p| **p == y).count();
        if occurrences > 1 {
            return Expr::zero();
        }
        // Cyclic rotation keeps the sign
        let (a, b) = if a == y {
            (b, c)
        } else if b == y {
            (c, a)
        } else {
            (a, b)
        };
        Expr::sum(
            self.weights
                .iter()
                .map(|(x, w)| w.clone() * Expr::area(a, b, *x))
                .collect(),
        )
    }

    fn pythagoras(&self, a: PointId, b: PointId, c: PointId) -> Expr {
        let y = self.y;
        match (a == y, b == y, c == y) {
            // P_YYx and P_xYY vanish
            (_, true, true) | (true, true, _) => Expr::zero(),
            // P_YbY = P_bYb
            (true, false, true) => self.pythagoras_middle(b, b),
            (false, true, false) => self.pythagoras_middle(a, c),
            (true, false, false) => self.pythagoras_end(c, b),
            (false, false, true) => self.pythagoras_end(a, b),
            (false, false, false) => Expr::pythagoras(a, b, c),
        }
    }

    /// P_abY = Σ wᵢ P_abXᵢ
    fn pythagoras_end(&self, a: PointId, b: PointId) -> Expr {
        Expr::sum(
            self.weights
                .iter()
                .map(|(x, w)| w.clone() * Expr::pythagoras(a, b, *x))
                .collect(),
        )
    }

    /// P_aYb = Σ wᵢ P_aXᵢb − Σ_{i<j} wᵢwⱼ P_XᵢXⱼXᵢ
    fn pythagoras_middle(&self, a: PointId, b: PointId) -> Expr {
        let mut terms: Vec<Expr> = self
            .weights
            .iter()
            .map(|(x, w)| w.clone() * Expr::pythagoras(a, *x, b))
            .collect();
        for (i, (xi, wi)) in self.weights.iter().enumerate() {
            for (xj, wj) in &self.weights[i + 1..] {
                terms.push(-(wi.clone() * wj.clone() * Expr::pythagoras(*xi, *xj, *xi)));
            }
        }
        Expr::sum(terms)
    }

    fn ratio(&mut self, a: PointId, b: PointId, c: PointId, d: PointId) -> ProofResult<Expr> {
        let y = self.y;
        if a == b {
            return Ok(Expr::zero());
        }
        if c == d {
            // Degenerate denominator; left for the final decision to reject
            return Ok(Expr::ratio(a, b, c, d));
        }

        // Orient a segment containing Y as (x, Y)
        let orient = |p: PointId, q: PointId| if p == y { (q, true) } else { (p, false) };
        let in_numerator = a == y || b == y;
        let in_denominator = c == y || d == y;

        let (value, negate) = match (in_numerator, in_denominator) {
            (true, false) => {
                let (x, flipped) = orient(a, b);
                (self.over_segment(x, c, d)?, flipped)
            }
            (false, true) => {
                let (x, flipped) = orient(c, d);
                (Expr::one() / self.over_segment(x, a, b)?, flipped)
            }
            (true, true) => {
                let (x, first) = orient(a, b);
                let (z, second) = orient(c, d);
                if x == z {
                    (Expr::one(), first != second)
                } else {
                    (self.through_point(x, z)?, first != second)
                }
            }
            (false, false) => return Ok(Expr::ratio(a, b, c, d)),
        };
        Ok(if negate { -value } else { value })
    }

    /// xY / CD
    fn over_segment(&mut self, x: PointId, c: PointId, d: PointId) -> ProofResult<Expr> {
        let LineForm { u, v, .. } = self.form;
        if self.on_line(x)? {
            Ok(self.position(x) / Expr::ratio(c, d, u, v))
        } else {
            self.ndg.push(NdgCondition::NotParallel(c, d, u, v));
            Ok(self.offset(x) / (Expr::area(c, u, v) - Expr::area(d, u, v)))
        }
    }

    /// xY / zY
    fn through_point(&mut self, x: PointId, z: PointId) -> ProofResult<Expr> {
        if self.on_line(x)? {
            Ok(self.position(x) / self.position(z))
        } else {
            let LineForm { u, v, .. } = self.form;
            self.ndg.push(NdgCondition::NotParallel(x, z, u, v));
            Ok(self.offset(x) / self.offset(z))
        }
    }

    /// xY / UV for x on Y's line: xW/UV + t
    fn position(&self, x: PointId) -> Expr {
        let LineForm { w, u, v, ref t } = self.form;
        Expr::ratio(x, w, u, v) + t.clone()
    }

    /// S_xUV − S_WUV, zero exactly when x lies on Y's line
    fn offset(&self, x: PointId) -> Expr {
        let LineForm { w, u, v, .. } = self.form;
        Expr::area(x, u, v) - Expr::area(w, u, v)
    }

    fn on_line(&mut self, x: PointId) -> ProofResult<bool> {
        let LineForm { w, u, v, .. } = self.form;
        if x == w || (w == u && x == v) {
            return Ok(true);
        }
        // Y moves along UV itself; a triple through Y may be degenerate
        let on_base_line = self.form.is_on_base_line() || self.cache.contains(w, u, v);
        if on_base_line && (x == u || x == v || self.cache.contains(x, u, v)) {
            return Ok(true);
        }

        let lemma = Statement::zero(
            format!(
                "{} on the line of {}",
                self.construction.label(x),
                self.construction.label(self.y)
            ),
            self.offset(x),
        );
        let prefix_len = lemma
            .points()
            .iter()
            .filter_map(|p| self.construction.step_index_of_point(*p))
            .map(|index| index + 1)
            .fold(self.step_index, usize::max);
        debug!(lemma = %lemma.name, prefix_len, "ratio lemma needs a sub-proof");
        self.oracle.decide(&lemma, prefix_len)
    }
}
