//! Canonical atom orientation and child ordering

use crate::expr::{Atom, Expr};
use crate::ir::PointId;

impl Expr {
    /// Rewrite every atom into its canonical orientation and sort the
    /// children of sums and products
    ///
    /// Degenerate atoms (an area with a repeated point, a null segment in a
    /// ratio numerator) become the constant 0; a reoriented atom becomes
    /// `-1 · atom` when its sign flips. The result is not simplified.
    pub fn uniformize(&self) -> Expr {
        match self {
            Expr::Number(_) => self.clone(),
            Expr::Atom(atom) => uniform_atom(atom),
            Expr::Product(factors) => {
                let mut factors: Vec<Expr> = factors.iter().map(Expr::uniformize).collect();
                factors.sort();
                Expr::Product(factors)
            }
            Expr::Sum(terms) => {
                let mut terms: Vec<Expr> = terms.iter().map(Expr::uniformize).collect();
                terms.sort();
                Expr::Sum(terms)
            }
            Expr::Fraction(numerator, denominator) => {
                Expr::fraction(numerator.uniformize(), denominator.uniformize())
            }
        }
    }
}

fn signed(negative: bool, atom: Atom) -> Expr {
    if negative {
        Expr::Product(vec![Expr::number(-1), Expr::Atom(atom)])
    } else {
        Expr::Atom(atom)
    }
}

/// Sort three points, reporting whether the permutation was odd
fn sort_triple(a: PointId, b: PointId, c: PointId) -> ([PointId; 3], bool) {
    let mut points = [a, b, c];
    let mut odd = false;
    for i in 0..3 {
        for j in 0..(2 - i) {
            if points[j] > points[j + 1] {
                points.swap(j, j + 1);
                odd = !odd;
            }
        }
    }
    (points, odd)
}

fn uniform_atom(atom: &Atom) -> Expr {
    match atom {
        Atom::Area(a, b, c) => {
            if a == b || b == c || a == c {
                return Expr::zero();
            }
            let ([x, y, z], odd) = sort_triple(*a, *b, *c);
            signed(odd, Atom::Area(x, y, z))
        }
        Atom::Pythagoras(a, b, c) => {
            if a == b || b == c {
                return Expr::zero();
            }
            if a > c {
                Expr::Atom(Atom::Pythagoras(*c, *b, *a))
            } else {
                Expr::Atom(atom.clone())
            }
        }
        Atom::Ratio(a, b, c, d) => {
            if a == b {
                return Expr::zero();
            }
            let mut negative = false;
            let (a, b) = if a > b {
                negative = !negative;
                (*b, *a)
            } else {
                (*a, *b)
            };
            let (c, d) = if c > d {
                negative = !negative;
                (*d, *c)
            } else {
                (*c, *d)
            };
            if (a, b) == (c, d) {
                return Expr::number(if negative { -1 } else { 1 });
            }
            signed(negative, Atom::Ratio(a, b, c, d))
        }
        Atom::Scalar(_) | Atom::Coordinate(_, _) => Expr::Atom(atom.clone()),
    }
}
