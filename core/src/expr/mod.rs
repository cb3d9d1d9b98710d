//! Symbolic expressions over geometric quantities
//!
//! An [`Expr`] is an immutable tree: exact rational constants, geometric
//! [`Atom`]s, and n-ary sums and products, plus binary fractions. Every
//! operation returns a new tree. The operators in this module only build
//! nodes; normalization is the job of the passes in [`crate::rewrite`].
//!
//! ```rust
//! use area_method_core::expr::Expr;
//! use area_method_core::ir::PointId;
//!
//! let (a, b, c) = (PointId(0), PointId(1), PointId(2));
//! let e = Expr::area(a, b, c) + Expr::area(a, c, b);
//! assert!(!e.is_zero());
//! assert!(e.uniformize().simplify().is_zero());
//! ```

mod atom;
mod display;
mod eval;

pub use atom::{Atom, Axis};
pub use display::ExprDisplay;

use crate::ir::PointId;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Symbolic expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Expr {
    /// Exact rational constant
    Number(BigRational),

    /// Geometric quantity
    Atom(Atom),

    /// Product of the factors
    Product(Vec<Expr>),

    /// Sum of the terms; the empty sum is zero
    Sum(Vec<Expr>),

    /// Numerator over denominator
    Fraction(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn number(value: i64) -> Self {
        Expr::Number(BigRational::from_integer(BigInt::from(value)))
    }

    /// Rational constant `numer / denom`
    ///
    /// # Panics
    /// Panics if `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Expr::Number(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    pub fn zero() -> Self {
        Expr::Number(BigRational::zero())
    }

    pub fn one() -> Self {
        Expr::Number(BigRational::one())
    }

    pub fn area(a: PointId, b: PointId, c: PointId) -> Self {
        Expr::Atom(Atom::Area(a, b, c))
    }

    pub fn pythagoras(a: PointId, b: PointId, c: PointId) -> Self {
        Expr::Atom(Atom::Pythagoras(a, b, c))
    }

    /// Signed segment ratio AB/CD
    pub fn ratio(a: PointId, b: PointId, c: PointId, d: PointId) -> Self {
        Expr::Atom(Atom::Ratio(a, b, c, d))
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Expr::Atom(Atom::Scalar(name.into()))
    }

    pub fn coordinate(point: PointId, axis: Axis) -> Self {
        Expr::Atom(Atom::Coordinate(point, axis))
    }

    /// Raw sum node
    pub fn sum(terms: Vec<Expr>) -> Self {
        Expr::Sum(terms)
    }

    /// Raw product node
    pub fn product(factors: Vec<Expr>) -> Self {
        Expr::Product(factors)
    }

    /// Raw fraction node
    pub fn fraction(numerator: Expr, denominator: Expr) -> Self {
        Expr::Fraction(Box::new(numerator), Box::new(denominator))
    }

    /// `1 · e` as a raw product, the input shape of the grouping passes
    pub fn unit_product(expr: Expr) -> Self {
        Expr::Product(vec![Expr::one(), expr])
    }

    /// Canonical zero test
    ///
    /// Only sound on normalized input: an unsimplified `S_ABC + S_ACB` is
    /// not reported as zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Expr::Number(value) => value.is_zero(),
            Expr::Atom(_) => false,
            Expr::Product(factors) => factors.iter().any(Expr::is_zero),
            Expr::Sum(terms) => terms.is_empty(),
            Expr::Fraction(numerator, _) => numerator.is_zero(),
        }
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Number(value) if value.is_one())
    }

    pub fn as_number(&self) -> Option<&BigRational> {
        match self {
            Expr::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Node count
    pub fn size(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Atom(_) => 1,
            Expr::Product(children) | Expr::Sum(children) => {
                1 + children.iter().map(Expr::size).sum::<usize>()
            }
            Expr::Fraction(numerator, denominator) => 1 + numerator.size() + denominator.size(),
        }
    }

    /// Distinct atoms in the tree
    pub fn atoms(&self) -> BTreeSet<Atom> {
        let mut atoms = BTreeSet::new();
        self.visit_atoms(&mut |atom| {
            atoms.insert(atom.clone());
        });
        atoms
    }

    /// Points referenced by any atom
    pub fn points(&self) -> BTreeSet<PointId> {
        let mut points = BTreeSet::new();
        self.visit_atoms(&mut |atom| points.extend(atom.points()));
        points
    }

    pub fn contains_point(&self, point: PointId) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Atom(atom) => atom.contains_point(point),
            Expr::Product(children) | Expr::Sum(children) => {
                children.iter().any(|child| child.contains_point(point))
            }
            Expr::Fraction(numerator, denominator) => {
                numerator.contains_point(point) || denominator.contains_point(point)
            }
        }
    }

    fn visit_atoms(&self, visit: &mut impl FnMut(&Atom)) {
        match self {
            Expr::Number(_) => {}
            Expr::Atom(atom) => visit(atom),
            Expr::Product(children) | Expr::Sum(children) => {
                for child in children {
                    child.visit_atoms(visit);
                }
            }
            Expr::Fraction(numerator, denominator) => {
                numerator.visit_atoms(visit);
                denominator.visit_atoms(visit);
            }
        }
    }

    /// Replace every atom by the expression `f` returns for it
    ///
    /// The tree shape around the atoms is preserved; no simplification
    /// happens.
    pub fn try_map_atoms<E>(
        &self,
        f: &mut impl FnMut(&Atom) -> Result<Expr, E>,
    ) -> Result<Expr, E> {
        Ok(match self {
            Expr::Number(_) => self.clone(),
            Expr::Atom(atom) => f(atom)?,
            Expr::Product(factors) => Expr::Product(
                factors
                    .iter()
                    .map(|factor| factor.try_map_atoms(f))
                    .collect::<Result<_, _>>()?,
            ),
            Expr::Sum(terms) => Expr::Sum(
                terms
                    .iter()
                    .map(|term| term.try_map_atoms(f))
                    .collect::<Result<_, _>>()?,
            ),
            Expr::Fraction(numerator, denominator) => {
                Expr::fraction(numerator.try_map_atoms(f)?, denominator.try_map_atoms(f)?)
            }
        })
    }

    pub fn map_atoms(&self, f: &mut impl FnMut(&Atom) -> Expr) -> Expr {
        let result: Result<Expr, Infallible> = self.try_map_atoms(&mut |atom| Ok(f(atom)));
        match result {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::number(value)
    }
}

impl From<BigRational> for Expr {
    fn from(value: BigRational) -> Self {
        Expr::Number(value)
    }
}

impl From<Atom> for Expr {
    fn from(atom: Atom) -> Self {
        Expr::Atom(atom)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Sum(vec![self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sum(vec![self, -rhs])
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Product(vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::fraction(self, rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Product(vec![Expr::number(-1), self])
    }
}
