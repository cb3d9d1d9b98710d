//! Label-aware rendering of expressions

use super::{Atom, Axis, Expr};
use crate::ir::SymbolTable;
use std::fmt;

/// Borrowed view that prints an expression with point labels
pub struct ExprDisplay<'a> {
    expr: &'a Expr,
    symbols: &'a SymbolTable,
}

impl Expr {
    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> ExprDisplay<'a> {
        ExprDisplay {
            expr: self,
            symbols,
        }
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(self.expr, self.symbols, f)
    }
}

fn write_expr(expr: &Expr, symbols: &SymbolTable, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        Expr::Number(value) => write!(f, "{}", value),
        Expr::Atom(atom) => write_atom(atom, symbols, f),
        Expr::Product(factors) => {
            if factors.is_empty() {
                return write!(f, "1");
            }
            for (i, factor) in factors.iter().enumerate() {
                if i > 0 {
                    write!(f, "*")?;
                }
                if matches!(factor, Expr::Sum(_) | Expr::Fraction(_, _)) {
                    write!(f, "(")?;
                    write_expr(factor, symbols, f)?;
                    write!(f, ")")?;
                } else {
                    write_expr(factor, symbols, f)?;
                }
            }
            Ok(())
        }
        Expr::Sum(terms) => {
            if terms.is_empty() {
                return write!(f, "0");
            }
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    write!(f, " + ")?;
                }
                write_expr(term, symbols, f)?;
            }
            Ok(())
        }
        Expr::Fraction(numerator, denominator) => {
            write!(f, "(")?;
            write_expr(numerator, symbols, f)?;
            write!(f, ")/(")?;
            write_expr(denominator, symbols, f)?;
            write!(f, ")")
        }
    }
}

fn write_atom(atom: &Atom, symbols: &SymbolTable, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = |p| symbols.point_name(p);
    match atom {
        Atom::Area(a, b, c) => write!(f, "S[{}{}{}]", name(*a), name(*b), name(*c)),
        Atom::Pythagoras(a, b, c) => write!(f, "P[{}{}{}]", name(*a), name(*b), name(*c)),
        Atom::Ratio(a, b, c, d) => write!(
            f,
            "[{}{}/{}{}]",
            name(*a),
            name(*b),
            name(*c),
            name(*d)
        ),
        Atom::Scalar(label) => write!(f, "{}", label),
        Atom::Coordinate(p, Axis::X) => write!(f, "x_{}", name(*p)),
        Atom::Coordinate(p, Axis::Y) => write!(f, "y_{}", name(*p)),
    }
}
