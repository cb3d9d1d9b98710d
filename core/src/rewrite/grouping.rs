//! Expansion into coefficient-led monomials and monomial grouping
//!
//! The grouping shape is a `Sum` whose every term is a `Product` starting
//! with an explicit `Number` coefficient followed by sorted non-numeric
//! factors (atoms, or opaque fractions in the same shape). Zero is the
//! empty `Sum`.

use crate::expr::Expr;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::collections::BTreeMap;

type Monomial = (BigRational, Vec<Expr>);

impl Expr {
    /// Distribute every product over its sums
    ///
    /// Callers wrap the expression first with [`Expr::unit_product`], so
    /// that the root is already a coefficient-led product.
    pub fn reduce_to_right_associative_form(&self) -> Expr {
        into_shape(expand(self))
    }

    /// Merge monomials whose factor lists coincide
    pub fn group_sum_of_products(&self) -> Expr {
        let monomials = match as_grouping_shape(self) {
            Some(monomials) => monomials,
            None => expand(self),
        };

        let mut grouped: BTreeMap<Vec<Expr>, BigRational> = BTreeMap::new();
        for (coefficient, factors) in monomials {
            *grouped.entry(factors).or_insert_with(BigRational::zero) += coefficient;
        }
        into_shape(
            grouped
                .into_iter()
                .filter(|(_, coefficient)| !coefficient.is_zero())
                .map(|(factors, coefficient)| (coefficient, factors))
                .collect(),
        )
    }

    /// Upper bound on the number of monomials a full expansion produces
    pub fn expansion_terms(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Atom(_) | Expr::Fraction(_, _) => 1,
            Expr::Sum(terms) => terms
                .iter()
                .fold(0usize, |acc, t| acc.saturating_add(t.expansion_terms())),
            Expr::Product(factors) => factors
                .iter()
                .fold(1usize, |acc, f| acc.saturating_mul(f.expansion_terms())),
        }
    }
}

fn expand(expr: &Expr) -> Vec<Monomial> {
    match expr {
        Expr::Number(value) => {
            if value.is_zero() {
                Vec::new()
            } else {
                vec![(value.clone(), Vec::new())]
            }
        }
        Expr::Atom(_) => vec![(BigRational::one(), vec![expr.clone()])],
        Expr::Sum(terms) => terms.iter().flat_map(expand).collect(),
        Expr::Product(factors) => {
            let mut acc: Vec<Monomial> = vec![(BigRational::one(), Vec::new())];
            for factor in factors {
                let expanded = expand(factor);
                let mut next = Vec::with_capacity(acc.len() * expanded.len());
                for (c1, f1) in &acc {
                    for (c2, f2) in &expanded {
                        let mut factors = f1.clone();
                        factors.extend(f2.iter().cloned());
                        next.push((c1 * c2, factors));
                    }
                }
                acc = next;
                if acc.is_empty() {
                    break;
                }
            }
            for (_, factors) in acc.iter_mut() {
                factors.sort();
            }
            acc
        }
        Expr::Fraction(numerator, denominator) => {
            let opaque = Expr::fraction(
                numerator.reduce_to_right_associative_form(),
                denominator.reduce_to_right_associative_form(),
            );
            vec![(BigRational::one(), vec![opaque])]
        }
    }
}

fn into_shape(monomials: Vec<Monomial>) -> Expr {
    Expr::Sum(
        monomials
            .into_iter()
            .map(|(coefficient, factors)| {
                let mut product = Vec::with_capacity(factors.len() + 1);
                product.push(Expr::Number(coefficient));
                product.extend(factors);
                Expr::Product(product)
            })
            .collect(),
    )
}

/// Monomials of an expression already in grouping shape
fn as_grouping_shape(expr: &Expr) -> Option<Vec<Monomial>> {
    let Expr::Sum(terms) = expr else {
        return None;
    };
    terms
        .iter()
        .map(|term| match term {
            Expr::Product(factors) => match factors.split_first() {
                Some((Expr::Number(coefficient), rest))
                    if rest.iter().all(|f| matches!(f, Expr::Atom(_) | Expr::Fraction(_, _)))
                        && rest.windows(2).all(|w| w[0] <= w[1]) =>
                {
                    Some((coefficient.clone(), rest.to_vec()))
                }
                _ => None,
            },
            _ => None,
        })
        .collect()
}
