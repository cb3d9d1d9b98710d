//! Atomic geometric quantities

use crate::ir::PointId;
use serde::{Deserialize, Serialize};

/// Coordinate axis of a free point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A single geometric magnitude
///
/// The derived ordering (variant first, then point ids) is the total order
/// used when canonicalizing sums and products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Atom {
    /// Signed area S_ABC of the oriented triangle ABC
    Area(PointId, PointId, PointId),

    /// Pythagoras difference P_ABC = AB² + CB² - AC²
    Pythagoras(PointId, PointId, PointId),

    /// Signed ratio AB/CD of two parallel segments
    Ratio(PointId, PointId, PointId, PointId),

    /// Free scalar parameter
    Scalar(String),

    /// Coordinate of a free point
    Coordinate(PointId, Axis),
}

impl Atom {
    /// Points referenced by this atom, in argument order
    pub fn points(&self) -> Vec<PointId> {
        match self {
            Atom::Area(a, b, c) | Atom::Pythagoras(a, b, c) => vec![*a, *b, *c],
            Atom::Ratio(a, b, c, d) => vec![*a, *b, *c, *d],
            Atom::Scalar(_) => Vec::new(),
            Atom::Coordinate(p, _) => vec![*p],
        }
    }

    pub fn contains_point(&self, point: PointId) -> bool {
        self.points().contains(&point)
    }

    /// True for atoms that are independent variables of the final test
    pub fn is_independent(&self) -> bool {
        matches!(self, Atom::Scalar(_) | Atom::Coordinate(_, _))
    }
}
