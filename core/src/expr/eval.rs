//! Exact evaluation under a valuation of the atoms

use super::{Atom, Expr};
use num_rational::BigRational;
use num_traits::{One, Zero};

impl Expr {
    /// Evaluate with exact rationals
    ///
    /// `valuation` supplies a value per atom. Returns `None` when an atom has
    /// no value or a denominator evaluates to zero.
    pub fn evaluate(
        &self,
        valuation: &mut impl FnMut(&Atom) -> Option<BigRational>,
    ) -> Option<BigRational> {
        match self {
            Expr::Number(value) => Some(value.clone()),
            Expr::Atom(atom) => valuation(atom),
            Expr::Product(factors) => {
                let mut acc = BigRational::one();
                for factor in factors {
                    acc *= factor.evaluate(valuation)?;
                }
                Some(acc)
            }
            Expr::Sum(terms) => {
                let mut acc = BigRational::zero();
                for term in terms {
                    acc += term.evaluate(valuation)?;
                }
                Some(acc)
            }
            Expr::Fraction(numerator, denominator) => {
                let den = denominator.evaluate(valuation)?;
                if den.is_zero() {
                    return None;
                }
                Some(numerator.evaluate(valuation)? / den)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_evaluate_nested() {
        // (a + 1/2) * b / (a - b)
        let e = (Expr::scalar("a") + Expr::rational(1, 2)) * Expr::scalar("b")
            / (Expr::scalar("a") - Expr::scalar("b"));
        let value = e.evaluate(&mut |atom| match atom {
            Atom::Scalar(name) if name == "a" => Some(q(3, 1)),
            Atom::Scalar(name) if name == "b" => Some(q(1, 1)),
            _ => None,
        });
        assert_eq!(value, Some(q(7, 4)));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let e = Expr::one() / (Expr::scalar("a") - Expr::scalar("a"));
        assert_eq!(e.evaluate(&mut |_| Some(q(2, 1))), None);
    }

    #[test]
    fn test_evaluate_missing_atom() {
        let e = Expr::scalar("unknown");
        assert_eq!(e.evaluate(&mut |_| None), None);
    }
}
