//! Reduction to a single numerator over a single denominator

use super::simplify::{build_fraction, build_product, build_sum};
use crate::expr::Expr;

impl Expr {
    /// Collapse nested fractions and sums of fractions into one fraction
    ///
    /// When the common denominator is trivial the polynomial is returned by
    /// itself, never wrapped as `p / 1`.
    pub fn reduce_to_single_fraction(&self) -> Expr {
        let (numerator, denominator) = split_fraction(&self.simplify());
        match denominator {
            None => numerator,
            Some(denominator) => build_fraction(numerator, denominator),
        }
    }

    /// Numerator of the single-fraction form
    pub fn numerator(&self) -> Expr {
        match self {
            Expr::Fraction(numerator, _) => (**numerator).clone(),
            other => other.clone(),
        }
    }
}

/// Fraction-free numerator and optional denominator, both normalized
fn split_fraction(expr: &Expr) -> (Expr, Option<Expr>) {
    match expr {
        Expr::Number(_) | Expr::Atom(_) => (expr.clone(), None),
        Expr::Fraction(numerator, denominator) => {
            let (nn, nd) = split_fraction(numerator);
            let (dn, dd) = split_fraction(denominator);
            let top = join_product(nn, dd);
            let bottom = join_product(dn, nd);
            (top, Some(bottom))
        }
        Expr::Product(factors) => {
            let mut numerators = Vec::with_capacity(factors.len());
            let mut denominators = Vec::new();
            for factor in factors {
                let (n, d) = split_fraction(factor);
                numerators.push(n);
                denominators.extend(d);
            }
            let top = build_product(numerators);
            if denominators.is_empty() {
                (top, None)
            } else {
                (top, Some(build_product(denominators)))
            }
        }
        Expr::Sum(terms) => {
            let parts: Vec<(Expr, Option<Expr>)> = terms.iter().map(split_fraction).collect();

            // Structurally identical denominators are shared, not multiplied
            let mut distinct: Vec<Expr> = Vec::new();
            for (_, denominator) in &parts {
                if let Some(d) = denominator {
                    if !distinct.contains(d) {
                        distinct.push(d.clone());
                    }
                }
            }
            if distinct.is_empty() {
                let top = build_sum(parts.into_iter().map(|(n, _)| n).collect());
                return (top, None);
            }

            let scaled: Vec<Expr> = parts
                .into_iter()
                .map(|(numerator, denominator)| {
                    let mut factors = vec![numerator];
                    factors.extend(
                        distinct
                            .iter()
                            .filter(|d| Some(*d) != denominator.as_ref())
                            .cloned(),
                    );
                    build_product(factors)
                })
                .collect();
            (build_sum(scaled), Some(build_product(distinct)))
        }
    }
}

fn join_product(value: Expr, other: Option<Expr>) -> Expr {
    match other {
        None => value,
        Some(other) => build_product(vec![value, other]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(name: &str) -> Expr {
        Expr::scalar(name)
    }

    #[test]
    fn test_polynomial_is_not_wrapped() {
        let e = s("a") * s("b") + Expr::number(2);
        let reduced = e.reduce_to_single_fraction();
        assert!(!matches!(reduced, Expr::Fraction(_, _)));
        assert_eq!(reduced, e.simplify());
    }

    #[test]
    fn test_sum_of_fractions() {
        // a/b + c/d -> (a d + c b) / (b d)
        let e = s("a") / s("b") + s("c") / s("d");
        let reduced = e.reduce_to_single_fraction();
        match &reduced {
            Expr::Fraction(numerator, denominator) => {
                assert_eq!(**denominator, Expr::Product(vec![s("b"), s("d")]));
                assert_eq!(
                    **numerator,
                    Expr::Sum(vec![
                        Expr::Product(vec![s("a"), s("d")]),
                        Expr::Product(vec![s("b"), s("c")]),
                    ])
                );
            }
            other => panic!("expected fraction, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_denominator() {
        // a/b + c/b -> (a + c)/b
        let e = s("a") / s("b") + s("c") / s("b");
        assert_eq!(
            e.reduce_to_single_fraction(),
            Expr::fraction(s("a") + s("c"), s("b")).simplify()
        );
    }

    #[test]
    fn test_nested_fraction_in_sum() {
        // 1 + a/(1 + b/c)  ->  (c + b c + a c... ) single fraction
        let e = Expr::one() + s("a") / (Expr::one() + s("b") / s("c"));
        let reduced = e.reduce_to_single_fraction();
        assert!(matches!(reduced, Expr::Fraction(_, _)));
        if let Expr::Fraction(n, d) = &reduced {
            assert!(!contains_fraction(n));
            assert!(!contains_fraction(d));
        }
    }

    #[test]
    fn test_idempotent() {
        let e = s("a") / s("b") + s("c") / (s("d") * s("a"));
        let once = e.reduce_to_single_fraction();
        assert_eq!(once.reduce_to_single_fraction(), once);
    }

    #[test]
    fn test_numerator() {
        let e = Expr::fraction(s("a"), s("b"));
        assert_eq!(e.numerator(), s("a"));
        assert_eq!(s("a").numerator(), s("a"));
    }

    fn contains_fraction(e: &Expr) -> bool {
        match e {
            Expr::Fraction(_, _) => true,
            Expr::Product(children) | Expr::Sum(children) => children.iter().any(contains_fraction),
            _ => false,
        }
    }
}
