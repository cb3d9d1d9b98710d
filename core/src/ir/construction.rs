//! Construction steps
//!
//! A construction is an ordered list of steps; a step may only refer to
//! steps before it. Points are either free or derived from earlier points
//! by one of the closed set of [`PointKind`]s.

use super::symbols::{LineId, PointId, SymbolTable};
use crate::expr::Expr;
use serde::{Deserialize, Serialize};

/// How a point is obtained
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    /// Independently chosen, never eliminated
    Free,

    /// Y with vector WY = r · vector UV
    PRatio {
        w: PointId,
        u: PointId,
        v: PointId,
        r: Expr,
    },

    /// Intersection of line UV with line PQ
    Intersection {
        u: PointId,
        v: PointId,
        p: PointId,
        q: PointId,
    },

    /// Foot of the perpendicular from P to line UV
    Foot { p: PointId, u: PointId, v: PointId },
}

impl PointKind {
    pub fn is_free(&self) -> bool {
        matches!(self, PointKind::Free)
    }

    /// Points this one is constructed from
    pub fn defining_points(&self) -> Vec<PointId> {
        match self {
            PointKind::Free => Vec::new(),
            PointKind::PRatio { w, u, v, .. } => vec![*w, *u, *v],
            PointKind::Intersection { u, v, p, q } => vec![*u, *v, *p, *q],
            PointKind::Foot { p, u, v } => vec![*p, *u, *v],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructedPoint {
    pub id: PointId,
    pub kind: PointKind,
}

impl ConstructedPoint {
    pub fn is_eliminable(&self) -> bool {
        !self.kind.is_free()
    }
}

/// Line through two earlier points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructedLine {
    pub id: LineId,
    pub through: (PointId, PointId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionStep {
    Point(ConstructedPoint),
    Line(ConstructedLine),
}

impl ConstructionStep {
    pub fn as_point(&self) -> Option<&ConstructedPoint> {
        match self {
            ConstructionStep::Point(point) => Some(point),
            ConstructionStep::Line(_) => None,
        }
    }
}

/// Ordered construction steps plus the labels they were given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Construction {
    pub symbols: SymbolTable,
    steps: Vec<ConstructionStep>,
}

impl Construction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[ConstructionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn push(&mut self, step: ConstructionStep) {
        self.steps.push(step);
    }

    /// Index of the step that constructs `point`
    pub fn step_index_of_point(&self, point: PointId) -> Option<usize> {
        self.steps
            .iter()
            .position(|step| matches!(step, ConstructionStep::Point(p) if p.id == point))
    }

    pub fn point(&self, point: PointId) -> Option<&ConstructedPoint> {
        self.steps
            .iter()
            .filter_map(ConstructionStep::as_point)
            .find(|p| p.id == point)
    }

    pub fn get_line(&self, line: LineId) -> Option<&ConstructedLine> {
        self.steps.iter().find_map(|step| match step {
            ConstructionStep::Line(l) if l.id == line => Some(l),
            _ => None,
        })
    }

    pub fn contains_point(&self, point: PointId) -> bool {
        self.point(point).is_some()
    }

    /// True when `point` is constructed within the first `prefix_len` steps
    pub fn defines_point_before(&self, point: PointId, prefix_len: usize) -> bool {
        self.step_index_of_point(point)
            .is_some_and(|index| index < prefix_len)
    }

    pub fn is_free(&self, point: PointId) -> bool {
        self.point(point).is_some_and(|p| p.kind.is_free())
    }

    /// Iterate over constructed points in construction order
    pub fn points(&self) -> impl Iterator<Item = &ConstructedPoint> {
        self.steps.iter().filter_map(ConstructionStep::as_point)
    }

    pub fn label(&self, point: PointId) -> String {
        self.symbols.point_name(point)
    }

    /// One-line description of a step for traces
    pub fn describe_step(&self, step: &ConstructionStep) -> String {
        let n = |p: &PointId| self.label(*p);
        match step {
            ConstructionStep::Line(line) => format!(
                "line {} through {} and {}",
                self.symbols
                    .line_label(line.id)
                    .unwrap_or_else(|| line.id.to_string()),
                n(&line.through.0),
                n(&line.through.1)
            ),
            ConstructionStep::Point(point) => match &point.kind {
                PointKind::Free => format!("free point {}", n(&point.id)),
                PointKind::PRatio { w, u, v, r } => format!(
                    "point {} such that {}{} = {} * {}{}",
                    n(&point.id),
                    n(w),
                    n(&point.id),
                    r.display(&self.symbols),
                    n(u),
                    n(v)
                ),
                PointKind::Intersection { u, v, p, q } => format!(
                    "point {} at the intersection of {}{} and {}{}",
                    n(&point.id),
                    n(u),
                    n(v),
                    n(p),
                    n(q)
                ),
                PointKind::Foot { p, u, v } => format!(
                    "point {} foot of the perpendicular from {} to {}{}",
                    n(&point.id),
                    n(p),
                    n(u),
                    n(v)
                ),
            },
        }
    }
}
