//! Geometric constructions
//!
//! Append free points, lines and derived points to a construction. Every
//! builder checks that it only refers to objects already constructed.
//! Shortcuts (midpoint, point on a line, reflection) desugar into the
//! primitive point kinds.

use crate::expr::Expr;
use crate::ir::{
    ConstructedLine, ConstructedPoint, Construction, ConstructionStep, LineId, PointId,
    PointKind, ProofError, ProofResult,
};
use tracing::debug;

/// Construction operations
pub trait Construct {
    /// Add an independently chosen point
    fn free_point(&mut self, label: &str) -> ProofResult<PointId>;

    /// Add the line through two distinct points
    fn line(&mut self, label: &str, a: PointId, b: PointId) -> ProofResult<LineId>;

    /// Intersect two lines
    fn intersection(&mut self, label: &str, l1: LineId, l2: LineId) -> ProofResult<PointId>;

    /// Foot of the perpendicular from `point` to `line`
    fn foot(&mut self, label: &str, point: PointId, line: LineId) -> ProofResult<PointId>;

    /// Y with vector WY = r · vector UV
    fn ratio_point(
        &mut self,
        label: &str,
        w: PointId,
        u: PointId,
        v: PointId,
        r: Expr,
    ) -> ProofResult<PointId>;

    fn midpoint(&mut self, label: &str, a: PointId, b: PointId) -> ProofResult<PointId>;

    /// Point on `line` at the symbolic position `parameter` along it
    fn point_on_line(&mut self, label: &str, line: LineId, parameter: &str)
        -> ProofResult<PointId>;

    /// Mirror image of `point` in `line`
    ///
    /// Adds an auxiliary foot point labelled `<label>_foot`.
    fn reflection(&mut self, label: &str, point: PointId, line: LineId) -> ProofResult<PointId>;
}

impl Construction {
    fn require_point(&self, point: PointId) -> ProofResult<()> {
        if self.contains_point(point) {
            Ok(())
        } else {
            Err(ProofError::InvalidConstruction(format!(
                "point {} is not constructed yet",
                point
            )))
        }
    }

    fn require_line(&self, line: LineId) -> ProofResult<(PointId, PointId)> {
        self.get_line(line).map(|l| l.through).ok_or_else(|| {
            ProofError::InvalidConstruction(format!("line {} is not constructed yet", line))
        })
    }

    fn fresh_point(&self, label: &str) -> ProofResult<PointId> {
        let taken = self
            .symbols
            .point_id(label)
            .is_some_and(|id| self.contains_point(id));
        if taken {
            return Err(ProofError::InvalidConstruction(format!(
                "duplicate point label {}",
                label
            )));
        }
        Ok(self.symbols.get_or_intern_point(label))
    }

    fn add_point(&mut self, label: &str, kind: PointKind) -> ProofResult<PointId> {
        for point in kind.defining_points() {
            self.require_point(point)?;
        }
        if let PointKind::PRatio { r, .. } = &kind {
            if let Some(missing) = r.points().into_iter().find(|p| !self.contains_point(*p)) {
                return Err(ProofError::InvalidConstruction(format!(
                    "ratio of {} refers to unconstructed point {}",
                    label, missing
                )));
            }
        }
        let id = self.fresh_point(label)?;
        let step = ConstructionStep::Point(ConstructedPoint { id, kind });
        debug!(step = %self.describe_step(&step), "construct");
        self.push(step);
        Ok(id)
    }
}

impl Construct for Construction {
    fn free_point(&mut self, label: &str) -> ProofResult<PointId> {
        self.add_point(label, PointKind::Free)
    }

    fn line(&mut self, label: &str, a: PointId, b: PointId) -> ProofResult<LineId> {
        self.require_point(a)?;
        self.require_point(b)?;
        if a == b {
            return Err(ProofError::InvalidConstruction(format!(
                "line {} needs two distinct points",
                label
            )));
        }
        if self
            .symbols
            .line_id(label)
            .is_some_and(|id| self.get_line(id).is_some())
        {
            return Err(ProofError::InvalidConstruction(format!(
                "duplicate line label {}",
                label
            )));
        }
        let id = self.symbols.get_or_intern_line(label);
        self.push(ConstructionStep::Line(ConstructedLine {
            id,
            through: (a, b),
        }));
        Ok(id)
    }

    fn intersection(&mut self, label: &str, l1: LineId, l2: LineId) -> ProofResult<PointId> {
        let (u, v) = self.require_line(l1)?;
        let (p, q) = self.require_line(l2)?;
        if l1 == l2 {
            return Err(ProofError::InvalidConstruction(format!(
                "{} intersects a line with itself",
                label
            )));
        }
        self.add_point(label, PointKind::Intersection { u, v, p, q })
    }

    fn foot(&mut self, label: &str, point: PointId, line: LineId) -> ProofResult<PointId> {
        let (u, v) = self.require_line(line)?;
        self.add_point(label, PointKind::Foot { p: point, u, v })
    }

    fn ratio_point(
        &mut self,
        label: &str,
        w: PointId,
        u: PointId,
        v: PointId,
        r: Expr,
    ) -> ProofResult<PointId> {
        self.add_point(label, PointKind::PRatio { w, u, v, r })
    }

    fn midpoint(&mut self, label: &str, a: PointId, b: PointId) -> ProofResult<PointId> {
        self.ratio_point(label, a, a, b, Expr::rational(1, 2))
    }

    fn point_on_line(
        &mut self,
        label: &str,
        line: LineId,
        parameter: &str,
    ) -> ProofResult<PointId> {
        let (a, b) = self.require_line(line)?;
        self.ratio_point(label, a, a, b, Expr::scalar(parameter))
    }

    fn reflection(&mut self, label: &str, point: PointId, line: LineId) -> ProofResult<PointId> {
        // Fail before the auxiliary foot is added
        self.require_point(point)?;
        self.require_line(line)?;
        if self
            .symbols
            .point_id(label)
            .is_some_and(|id| self.contains_point(id))
        {
            return Err(ProofError::InvalidConstruction(format!(
                "duplicate point label {}",
                label
            )));
        }
        let foot = self.foot(&format!("{}_foot", label), point, line)?;
        self.ratio_point(label, point, point, foot, Expr::number(2))
    }
}
