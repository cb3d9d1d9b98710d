//! Common parametrization of derived points
//!
//! Every derived point Y is written Y = W + t·(V − U), which makes Y an
//! affine combination of W, U and V. The elimination lemmas only need that
//! combination, never the construction kind itself.

use crate::expr::Expr;
use crate::ir::{NdgCondition, PointId, PointKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineForm {
    pub w: PointId,
    pub u: PointId,
    pub v: PointId,
    pub t: Expr,
}

impl LineForm {
    /// Line form of a derived point, `None` for free points
    pub fn of(kind: &PointKind) -> Option<LineForm> {
        match kind {
            PointKind::Free => None,
            PointKind::PRatio { w, u, v, r } => Some(LineForm {
                w: *w,
                u: *u,
                v: *v,
                t: r.clone(),
            }),
            PointKind::Intersection { u, v, p, q } => {
                let upq = Expr::area(*u, *p, *q);
                let vpq = Expr::area(*v, *p, *q);
                Some(LineForm {
                    w: *u,
                    u: *u,
                    v: *v,
                    t: upq.clone() / (upq - vpq),
                })
            }
            PointKind::Foot { p, u, v } => Some(LineForm {
                w: *u,
                u: *u,
                v: *v,
                t: Expr::pythagoras(*p, *u, *v) / Expr::pythagoras(*u, *v, *u),
            }),
        }
    }

    /// Affine weights of Y over its defining points
    ///
    /// Coinciding points are merged, so every point occurs once. The
    /// weights always sum to 1.
    pub fn weights(&self) -> Vec<(PointId, Expr)> {
        let mut weights: Vec<(PointId, Expr)> = Vec::with_capacity(3);
        let raw = [
            (self.w, Expr::one()),
            (self.u, -self.t.clone()),
            (self.v, self.t.clone()),
        ];
        for (point, weight) in raw {
            match weights.iter_mut().find(|(p, _)| *p == point) {
                Some((_, existing)) => *existing = existing.clone() + weight,
                None => weights.push((point, weight)),
            }
        }
        weights
    }

    /// W is U or V, so Y moves along line UV itself
    pub fn is_on_base_line(&self) -> bool {
        self.w == self.u || self.w == self.v
    }
}

/// Condition the construction of a derived point relies on
pub fn construction_condition(kind: &PointKind) -> Option<NdgCondition> {
    match kind {
        PointKind::Free => None,
        PointKind::Intersection { u, v, p, q } => Some(NdgCondition::NotParallel(*u, *v, *p, *q)),
        PointKind::Foot { u, v, .. } | PointKind::PRatio { u, v, .. } => {
            Some(NdgCondition::Distinct(*u, *v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::BigRational;
    use num_traits::One;

    fn p(i: u32) -> PointId {
        PointId(i)
    }

    #[test]
    fn test_midpoint_weights_merge() {
        let kind = PointKind::PRatio {
            w: p(0),
            u: p(0),
            v: p(1),
            r: Expr::rational(1, 2),
        };
        let form = LineForm::of(&kind).unwrap();
        assert!(form.is_on_base_line());
        let weights: Vec<(PointId, Expr)> = form
            .weights()
            .into_iter()
            .map(|(point, w)| (point, w.simplify()))
            .collect();
        assert_eq!(
            weights,
            vec![(p(0), Expr::rational(1, 2)), (p(1), Expr::rational(1, 2))]
        );
    }

    #[test]
    fn test_weights_sum_to_one() {
        let kind = PointKind::PRatio {
            w: p(2),
            u: p(0),
            v: p(1),
            r: Expr::scalar("r"),
        };
        let weights = LineForm::of(&kind).unwrap().weights();
        assert_eq!(weights.len(), 3);
        let total = Expr::sum(weights.into_iter().map(|(_, w)| w).collect());
        assert_eq!(total.simplify(), Expr::Number(BigRational::one()));
    }

    #[test]
    fn test_intersection_and_foot_parameters() {
        let x = PointKind::Intersection {
            u: p(0),
            v: p(1),
            p: p(2),
            q: p(3),
        };
        let form = LineForm::of(&x).unwrap();
        assert_eq!((form.w, form.u, form.v), (p(0), p(0), p(1)));
        assert!(form.t.contains_point(p(3)));
        assert_eq!(
            construction_condition(&x),
            Some(NdgCondition::NotParallel(p(0), p(1), p(2), p(3)))
        );

        let foot = PointKind::Foot {
            p: p(2),
            u: p(0),
            v: p(1),
        };
        let form = LineForm::of(&foot).unwrap();
        assert_eq!(
            form.t,
            Expr::pythagoras(p(2), p(0), p(1)) / Expr::pythagoras(p(0), p(1), p(0))
        );
        assert_eq!(
            construction_condition(&foot),
            Some(NdgCondition::Distinct(p(0), p(1)))
        );
        assert!(LineForm::of(&PointKind::Free).is_none());
    }
}
