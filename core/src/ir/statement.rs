//! Statements and non-degeneracy conditions

use super::symbols::{PointId, SymbolTable};
use crate::expr::Expr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Expressions each asserted to be identically zero
///
/// Equality and hashing look at the expressions only, so two statements
/// with the same content but different names share one memo entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub name: String,
    pub expressions: Vec<Expr>,
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.expressions == other.expressions
    }
}

impl Eq for Statement {}

impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expressions.hash(state);
    }
}

impl Statement {
    pub fn new(name: impl Into<String>, expressions: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            expressions,
        }
    }

    /// Single expression asserted to be zero
    pub fn zero(name: impl Into<String>, expression: Expr) -> Self {
        Self::new(name, vec![expression])
    }

    /// `lhs = rhs`, stated as `lhs - rhs = 0`
    pub fn equality(name: impl Into<String>, lhs: Expr, rhs: Expr) -> Self {
        Self::zero(name, lhs - rhs)
    }

    /// A, B and C lie on one line
    pub fn collinear(a: PointId, b: PointId, c: PointId) -> Self {
        Self::zero(format!("collinear {} {} {}", a, b, c), Expr::area(a, b, c))
    }

    /// AB is parallel to CD
    pub fn parallel(a: PointId, b: PointId, c: PointId, d: PointId) -> Self {
        Self::zero(
            format!("parallel {}{} {}{}", a, b, c, d),
            Expr::area(a, c, d) - Expr::area(b, c, d),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn points(&self) -> BTreeSet<PointId> {
        self.expressions.iter().flat_map(Expr::points).collect()
    }

    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> impl fmt::Display + 'a {
        StatementDisplay {
            statement: self,
            symbols,
        }
    }
}

struct StatementDisplay<'a> {
    statement: &'a Statement,
    symbols: &'a SymbolTable,
}

impl fmt::Display for StatementDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.statement.name)?;
        for expression in &self.statement.expressions {
            write!(f, " {} = 0;", expression.display(self.symbols))?;
        }
        Ok(())
    }
}

/// Side condition an elimination step relies on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NdgCondition {
    Distinct(PointId, PointId),
    NotParallel(PointId, PointId, PointId, PointId),
}

impl NdgCondition {
    /// Canonical argument order, used for deduplication
    pub fn normalize(self) -> Self {
        fn pair(a: PointId, b: PointId) -> (PointId, PointId) {
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        }

        match self {
            NdgCondition::Distinct(a, b) => {
                let (a, b) = pair(a, b);
                NdgCondition::Distinct(a, b)
            }
            NdgCondition::NotParallel(a, b, c, d) => {
                let first = pair(a, b);
                let second = pair(c, d);
                let (first, second) = if first <= second {
                    (first, second)
                } else {
                    (second, first)
                };
                NdgCondition::NotParallel(first.0, first.1, second.0, second.1)
            }
        }
    }

    pub fn describe(&self, symbols: &SymbolTable) -> String {
        let n = |p: &PointId| symbols.point_name(*p);
        match self {
            NdgCondition::Distinct(a, b) => format!("{} != {}", n(a), n(b)),
            NdgCondition::NotParallel(a, b, c, d) => {
                format!("{}{} not parallel to {}{}", n(a), n(b), n(c), n(d))
            }
        }
    }
}

/// Ordered, duplicate-free NDG collector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NdgConditions {
    conditions: Vec<NdgCondition>,
}

impl NdgConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition; returns false if it was already present
    pub fn push(&mut self, condition: NdgCondition) -> bool {
        let condition = condition.normalize();
        if self.conditions.contains(&condition) {
            return false;
        }
        self.conditions.push(condition);
        true
    }

    pub fn extend(&mut self, other: &NdgConditions) {
        for condition in &other.conditions {
            self.push(condition.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NdgCondition> {
        self.conditions.iter()
    }

    pub fn contains(&self, condition: &NdgCondition) -> bool {
        self.conditions.contains(&condition.clone().normalize())
    }
}
