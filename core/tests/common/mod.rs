//! Numeric model of a construction
//!
//! Free points and scalar parameters get random rational values; derived
//! points are computed from their definitions. Expressions are then
//! evaluated exactly, so a symbolic zero must evaluate to zero in every
//! instance.

#![allow(dead_code)]

use area_method_core::*;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

pub type Point = (BigRational, BigRational);

pub fn q(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// One numeric instance of a construction
pub struct Instance {
    points: HashMap<PointId, Point>,
    scalars: HashMap<String, BigRational>,
}

impl Instance {
    /// Draw an instance; `None` when a derived point is undefined
    pub fn random(construction: &Construction, rng: &mut StdRng) -> Option<Self> {
        let mut instance = Self {
            points: HashMap::new(),
            scalars: HashMap::new(),
        };
        for point in construction.points() {
            let value = match &point.kind {
                PointKind::Free => (random_rational(rng), random_rational(rng)),
                PointKind::PRatio { w, u, v, r } => {
                    instance.bind_scalars(r, rng);
                    let r = instance.value(r)?;
                    let (w, u, v) = (instance.point(*w)?, instance.point(*u)?, instance.point(*v)?);
                    (&w.0 + &r * (&v.0 - &u.0), &w.1 + &r * (&v.1 - &u.1))
                }
                PointKind::Intersection { u, v, p, q: pq } => {
                    let (u, v) = (instance.point(*u)?, instance.point(*v)?);
                    let (p, pq) = (instance.point(*p)?, instance.point(*pq)?);
                    let s_upq = area(&u, &p, &pq);
                    let denom = &s_upq - area(&v, &p, &pq);
                    if denom.is_zero() {
                        return None;
                    }
                    along(&u, &v, &(s_upq / denom))
                }
                PointKind::Foot { p, u, v } => {
                    let (p, u, v) = (instance.point(*p)?, instance.point(*u)?, instance.point(*v)?);
                    let denom = dot(&u, &v, &u, &v);
                    if denom.is_zero() {
                        return None;
                    }
                    along(&u, &v, &(dot(&u, &p, &u, &v) / denom))
                }
            };
            instance.points.insert(point.id, value);
        }
        Some(instance)
    }

    pub fn point(&self, id: PointId) -> Option<Point> {
        self.points.get(&id).cloned()
    }

    /// Exact value of `expr`, `None` when it is undefined here
    pub fn value(&self, expr: &Expr) -> Option<BigRational> {
        expr.evaluate(&mut |atom| self.atom(atom))
    }

    fn atom(&self, atom: &Atom) -> Option<BigRational> {
        match atom {
            Atom::Area(a, b, c) => Some(area(&self.point(*a)?, &self.point(*b)?, &self.point(*c)?)),
            Atom::Pythagoras(a, b, c) => {
                let (a, b, c) = (self.point(*a)?, self.point(*b)?, self.point(*c)?);
                Some(q(2, 1) * dot(&b, &a, &b, &c))
            }
            Atom::Ratio(a, b, c, d) => {
                let (a, b, c, d) = (self.point(*a)?, self.point(*b)?, self.point(*c)?, self.point(*d)?);
                let denom = dot(&c, &d, &c, &d);
                if denom.is_zero() {
                    return None;
                }
                Some(dot(&a, &b, &c, &d) / denom)
            }
            Atom::Scalar(name) => self.scalars.get(name).cloned(),
            Atom::Coordinate(p, Axis::X) => Some(self.point(*p)?.0),
            Atom::Coordinate(p, Axis::Y) => Some(self.point(*p)?.1),
        }
    }

    fn bind_scalars(&mut self, expr: &Expr, rng: &mut StdRng) {
        for atom in expr.atoms() {
            if let Atom::Scalar(name) = atom {
                self.scalars
                    .entry(name)
                    .or_insert_with(|| random_rational(rng));
            }
        }
    }
}

/// Instances drawn from a fixed seed, degenerate draws skipped
pub fn instances(construction: &Construction, seed: u64, count: usize) -> Vec<Instance> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut found = Vec::with_capacity(count);
    let mut attempts = 0;
    while found.len() < count && attempts < count * 10 {
        attempts += 1;
        if let Some(instance) = Instance::random(construction, &mut rng) {
            found.push(instance);
        }
    }
    found
}

fn random_rational(rng: &mut StdRng) -> BigRational {
    q(rng.gen_range(-40..=40), rng.gen_range(1..=9))
}

/// Signed area of triangle abc
fn area(a: &Point, b: &Point, c: &Point) -> BigRational {
    let cross = (&b.0 - &a.0) * (&c.1 - &a.1) - (&c.0 - &a.0) * (&b.1 - &a.1);
    cross / q(2, 1)
}

/// Dot product of vectors ab and cd
fn dot(a: &Point, b: &Point, c: &Point, d: &Point) -> BigRational {
    (&b.0 - &a.0) * (&d.0 - &c.0) + (&b.1 - &a.1) * (&d.1 - &c.1)
}

/// u + t (v − u)
fn along(u: &Point, v: &Point, t: &BigRational) -> Point {
    (&u.0 + t * (&v.0 - &u.0), &u.1 + t * (&v.1 - &u.1))
}

pub fn is_zero(value: &BigRational) -> bool {
    value.is_zero()
}

pub fn is_one(value: &BigRational) -> bool {
    value.is_one()
}

/// Install a test subscriber once; output shows with `--nocapture`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
