//! Elimination lemmas checked against exact numeric instances

mod common;

use area_method_core::*;
use common::{instances, is_zero, Instance};

/// Decides lemmas by evaluating them on random instances
struct NumericOracle<'a> {
    samples: &'a [Instance],
    asked: usize,
}

impl LemmaOracle for NumericOracle<'_> {
    fn decide(&mut self, statement: &Statement, _prefix_len: usize) -> ProofResult<bool> {
        self.asked += 1;
        Ok(statement.expressions.iter().all(|expr| {
            self.samples
                .iter()
                .filter_map(|instance| instance.value(expr))
                .all(|value| is_zero(&value))
        }))
    }
}

struct Figure {
    construction: Construction,
    a: PointId,
    b: PointId,
    c: PointId,
    m: PointId,
    f: PointId,
    e: PointId,
    x: PointId,
}

/// Triangle ABC with M the midpoint of AB, F the foot from A on CM,
/// E a free point on CM and X where EB meets AC
fn figure() -> Figure {
    let mut construction = Construction::new();
    let a = construction.free_point("A").unwrap();
    let b = construction.free_point("B").unwrap();
    let c = construction.free_point("C").unwrap();
    let m = construction.midpoint("M", a, b).unwrap();
    let cm = construction.line("CM", c, m).unwrap();
    let f = construction.foot("F", a, cm).unwrap();
    let e = construction.point_on_line("E", cm, "t").unwrap();
    let ac = construction.line("AC", a, c).unwrap();
    let eb = construction.line("EB", e, b).unwrap();
    let x = construction.intersection("X", ac, eb).unwrap();
    Figure { construction, a, b, c, m, f, e, x }
}

/// Expressions in Y whose meaning does not depend on parallelism
fn area_and_pythagoras(fig: &Figure, y: PointId) -> Vec<Expr> {
    let (a, b, c) = (fig.a, fig.b, fig.c);
    vec![
        Expr::area(y, b, c) + Expr::number(2) * Expr::area(a, y, c) * Expr::area(a, b, c),
        Expr::area(c, a, y) / Expr::area(a, b, c),
        Expr::pythagoras(a, y, b) - Expr::pythagoras(y, c, a),
        Expr::pythagoras(c, a, y) * Expr::area(b, y, a),
    ]
}

/// Eliminate `y` from `expr` and compare values on every instance
fn check_elimination(fig: &Figure, samples: &[Instance], y: PointId, expr: &Expr) {
    let cache = CollinearCache::from_construction(&fig.construction);
    let mut oracle = NumericOracle { samples, asked: 0 };
    let mut ndg = NdgConditions::new();

    let eliminated = eliminate(&expr.uniformize(), y, &fig.construction, &cache, &mut oracle, &mut ndg)
        .unwrap()
        .simplify();
    assert!(
        !eliminated.contains_point(y),
        "{} still contains {}",
        eliminated.display(&fig.construction.symbols),
        fig.construction.label(y)
    );
    assert!(!ndg.is_empty());

    let mut compared = 0;
    for instance in samples {
        if let (Some(before), Some(after)) = (instance.value(expr), instance.value(&eliminated)) {
            assert_eq!(
                before,
                after,
                "eliminating {} from {} changed its value",
                fig.construction.label(y),
                expr.display(&fig.construction.symbols)
            );
            compared += 1;
        }
    }
    assert!(compared > samples.len() / 2);
}

#[test]
fn test_area_and_pythagoras_eliminations() {
    let fig = figure();
    let samples = instances(&fig.construction, 3, 120);
    assert!(samples.len() >= 100);

    for y in [fig.m, fig.f, fig.e, fig.x] {
        for expr in area_and_pythagoras(&fig, y) {
            check_elimination(&fig, &samples, y, &expr);
        }
    }
    println!("✅ Area and Pythagoras lemmas agree on {} instances", samples.len());
}

#[test]
fn test_ratio_eliminations() {
    let fig = figure();
    let samples = instances(&fig.construction, 5, 120);
    let (a, b, c, m, e, x) = (fig.a, fig.b, fig.c, fig.m, fig.e, fig.x);

    let cases = [
        (m, Expr::ratio(a, m, a, b)),
        (m, Expr::ratio(m, b, a, b) + Expr::ratio(a, m, m, b)),
        (e, Expr::ratio(c, e, c, m)),
        (x, Expr::ratio(a, x, a, c)),
        (x, Expr::ratio(a, x, c, x)),
    ];
    for (y, expr) in &cases {
        check_elimination(&fig, &samples, *y, expr);
    }
    println!("✅ Ratio lemmas agree on {} cases", cases.len());
}

#[test]
fn test_elimination_skips_absent_and_free_points() {
    let fig = figure();
    let cache = CollinearCache::from_construction(&fig.construction);
    let samples = instances(&fig.construction, 9, 20);
    let mut oracle = NumericOracle { samples: &samples, asked: 0 };
    let mut ndg = NdgConditions::new();

    let expr = Expr::area(fig.a, fig.b, fig.c);
    let same = eliminate(&expr, fig.x, &fig.construction, &cache, &mut oracle, &mut ndg).unwrap();
    assert_eq!(same, expr);
    let same = eliminate(&expr, fig.a, &fig.construction, &cache, &mut oracle, &mut ndg).unwrap();
    assert_eq!(same, expr);
    assert!(ndg.is_empty());
    assert_eq!(oracle.asked, 0);
}

#[test]
fn test_collinear_triples_vanish() {
    let fig = figure();
    let cache = CollinearCache::from_construction(&fig.construction);
    let samples = instances(&fig.construction, 13, 100);
    assert!(!cache.is_empty());

    for [p, q, r] in cache.triples() {
        let area = Expr::area(*p, *q, *r);
        assert!(area.simplify_collinear_points(&cache).is_zero());
        for instance in &samples {
            if let Some(value) = instance.value(&area) {
                assert!(is_zero(&value));
            }
        }
    }
    println!("✅ {} collinear triples vanish numerically", cache.len());
}

#[test]
fn test_full_elimination_to_coordinates() {
    let fig = figure();
    let cache = CollinearCache::from_construction(&fig.construction);
    let samples = instances(&fig.construction, 17, 100);
    let mut oracle = NumericOracle { samples: &samples, asked: 0 };
    let mut ndg = NdgConditions::new();

    let expr = Expr::area(fig.x, fig.f, fig.b) + Expr::pythagoras(fig.e, fig.m, fig.c);
    let mut current = expr.uniformize().simplify();
    for y in [fig.x, fig.e, fig.f, fig.m] {
        current = eliminate(&current, y, &fig.construction, &cache, &mut oracle, &mut ndg)
            .unwrap()
            .uniformize()
            .simplify();
    }
    let coordinates =
        to_independent_variables(&current, &fig.construction, &mut oracle).unwrap();
    assert!(coordinates.atoms().iter().all(Atom::is_independent));

    for instance in &samples {
        if let (Some(before), Some(after)) = (instance.value(&expr), instance.value(&coordinates)) {
            assert_eq!(before, after);
        }
    }
    println!("✅ Coordinates: {} NDG conditions", ndg.len());
}
