//! Algebraic simplification
//!
//! `simplify` rebuilds a tree bottom-up through smart constructors. Their
//! output (the *normal form*) satisfies:
//! - a `Product` has at least two factors, at most one `Number` (first,
//!   never 0 or 1), and no `Product` or `Fraction` factor; factors are sorted;
//! - a `Sum` has at least two terms, no `Sum` or zero term, and no two terms
//!   that differ only by their rational coefficient;
//! - a `Fraction` has a non-fraction numerator whose rest differs from the
//!   denominator, and a non-numeric, non-fraction denominator with unit
//!   coefficient.

use crate::expr::Expr;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::collections::BTreeMap;

impl Expr {
    /// Constant folding, flattening, identity removal and like-term merging
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Number(_) | Expr::Atom(_) => self.clone(),
            Expr::Sum(terms) => build_sum(terms.iter().map(Expr::simplify).collect()),
            Expr::Product(factors) => {
                build_product(factors.iter().map(Expr::simplify).collect())
            }
            Expr::Fraction(numerator, denominator) => {
                build_fraction(numerator.simplify(), denominator.simplify())
            }
        }
    }
}

/// Split a normalized term into its rational coefficient and the rest
///
/// The rest is `None` for pure numbers.
pub(crate) fn split_coefficient(term: &Expr) -> (BigRational, Option<Expr>) {
    match term {
        Expr::Number(value) => (value.clone(), None),
        Expr::Product(factors) => match factors.split_first() {
            Some((Expr::Number(value), rest)) => {
                let rest = match rest {
                    [] => None,
                    [single] => Some(single.clone()),
                    many => Some(Expr::Product(many.to_vec())),
                };
                (value.clone(), rest)
            }
            _ => (BigRational::one(), Some(term.clone())),
        },
        Expr::Fraction(numerator, denominator) => {
            let (coefficient, rest) = split_coefficient(numerator);
            let rest = rest.unwrap_or_else(Expr::one);
            (
                coefficient,
                Some(Expr::fraction(rest, (**denominator).clone())),
            )
        }
        other => (BigRational::one(), Some(other.clone())),
    }
}

/// Rebuild `coefficient * rest` in normal form
fn scale(coefficient: BigRational, rest: Option<Expr>) -> Expr {
    match rest {
        None => Expr::Number(coefficient),
        Some(rest) if coefficient.is_one() => rest,
        Some(Expr::Fraction(numerator, denominator)) => build_fraction(
            build_product(vec![Expr::Number(coefficient), *numerator]),
            *denominator,
        ),
        Some(rest) => build_product(vec![Expr::Number(coefficient), rest]),
    }
}

/// Normal-form sum of normalized terms
pub(crate) fn build_sum(terms: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(terms.len());
    for term in terms {
        match term {
            Expr::Sum(inner) => flat.extend(inner),
            t if t.is_zero() => {}
            t => flat.push(t),
        }
    }

    let mut grouped: BTreeMap<Option<Expr>, BigRational> = BTreeMap::new();
    for term in &flat {
        let (coefficient, rest) = split_coefficient(term);
        *grouped.entry(rest).or_insert_with(BigRational::zero) += coefficient;
    }

    let rebuilt: Vec<Expr> = grouped
        .into_iter()
        .filter(|(_, coefficient)| !coefficient.is_zero())
        .map(|(rest, coefficient)| scale(coefficient, rest))
        .collect();

    // A unit coefficient on a sum-valued rest re-exposes a nested sum
    if rebuilt.iter().any(|term| matches!(term, Expr::Sum(_))) {
        return build_sum(rebuilt);
    }

    match rebuilt.len() {
        0 => Expr::zero(),
        1 => rebuilt.into_iter().next().unwrap_or_else(Expr::zero),
        _ => Expr::Sum(rebuilt),
    }
}

/// Normal-form product of normalized factors
pub(crate) fn build_product(factors: Vec<Expr>) -> Expr {
    let mut coefficient = BigRational::one();
    let mut rest = Vec::with_capacity(factors.len());
    let mut numerators = Vec::new();
    let mut denominators = Vec::new();

    let mut pending = factors;
    while let Some(factor) = pending.pop() {
        match factor {
            Expr::Number(value) => coefficient *= value,
            Expr::Product(inner) => pending.extend(inner),
            Expr::Fraction(numerator, denominator) => {
                numerators.push(*numerator);
                denominators.push(*denominator);
            }
            other => rest.push(other),
        }
    }

    if coefficient.is_zero() {
        return Expr::zero();
    }

    if !denominators.is_empty() {
        let mut top = vec![Expr::Number(coefficient)];
        top.extend(rest);
        top.extend(numerators);
        return build_fraction(build_product(top), build_product(denominators));
    }

    rest.sort();
    match (coefficient.is_one(), rest.len()) {
        (_, 0) => Expr::Number(coefficient),
        (true, 1) => rest.into_iter().next().unwrap_or_else(Expr::one),
        (true, _) => Expr::Product(rest),
        (false, _) => {
            let mut factors = Vec::with_capacity(rest.len() + 1);
            factors.push(Expr::Number(coefficient));
            factors.extend(rest);
            Expr::Product(factors)
        }
    }
}

/// Normal-form fraction of a normalized numerator and denominator
pub(crate) fn build_fraction(numerator: Expr, denominator: Expr) -> Expr {
    debug_assert!(
        !denominator.is_zero(),
        "fraction with a structurally zero denominator"
    );
    if denominator.is_zero() {
        return Expr::fraction(numerator, denominator);
    }
    if numerator.is_zero() {
        return Expr::zero();
    }

    match (numerator, denominator) {
        (Expr::Fraction(top, bottom), denominator) => {
            build_fraction(*top, build_product(vec![*bottom, denominator]))
        }
        (numerator, Expr::Fraction(top, bottom)) => {
            build_fraction(build_product(vec![numerator, *bottom]), *top)
        }
        (numerator, Expr::Number(value)) => {
            build_product(vec![Expr::Number(BigRational::one() / value), numerator])
        }
        (numerator, denominator) => {
            let (num_coefficient, num_rest) = split_coefficient(&numerator);
            let (den_coefficient, den_rest) = split_coefficient(&denominator);
            let coefficient = num_coefficient / den_coefficient;
            let den_rest = den_rest.unwrap_or_else(Expr::one);

            if num_rest.as_ref() == Some(&den_rest) {
                return Expr::Number(coefficient);
            }
            let top = build_product(vec![
                Expr::Number(coefficient),
                num_rest.unwrap_or_else(Expr::one),
            ]);
            Expr::fraction(top, den_rest)
        }
    }
}
