//! Zeroing of areas over known collinear points

use crate::expr::{Atom, Expr};
use crate::geometry::CollinearCache;

impl Expr {
    /// Replace `S_ABC` by 0 when A, B and C are known to be collinear
    pub fn simplify_collinear_points(&self, cache: &CollinearCache) -> Expr {
        self.map_atoms(&mut |atom| match atom {
            Atom::Area(a, b, c) if a == b || b == c || a == c || cache.contains(*a, *b, *c) => {
                Expr::zero()
            }
            other => Expr::Atom(other.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::PointId;

    fn p(i: u32) -> PointId {
        PointId(i)
    }

    #[test]
    fn test_collinear_area_is_zeroed_in_any_order() {
        let mut cache = CollinearCache::new();
        cache.insert(p(0), p(1), p(2));
        for (a, b, c) in [(0, 1, 2), (2, 1, 0), (1, 2, 0), (0, 2, 1)] {
            let e = Expr::area(p(a), p(b), p(c));
            assert!(e.simplify_collinear_points(&cache).simplify().is_zero());
        }
    }

    #[test]
    fn test_other_atoms_untouched() {
        let mut cache = CollinearCache::new();
        cache.insert(p(0), p(1), p(2));
        let e = Expr::area(p(0), p(1), p(3)) + Expr::pythagoras(p(0), p(1), p(2));
        assert_eq!(e.simplify_collinear_points(&cache), e);
    }

    #[test]
    fn test_repeated_point_area() {
        let cache = CollinearCache::new();
        let e = Expr::area(p(0), p(0), p(1)) * Expr::scalar("r") + Expr::scalar("s");
        assert_eq!(
            e.simplify_collinear_points(&cache).simplify(),
            Expr::scalar("s")
        );
    }

    #[test]
    fn test_idempotent() {
        let mut cache = CollinearCache::new();
        cache.insert(p(0), p(1), p(2));
        let e = Expr::area(p(0), p(1), p(2)) + Expr::area(p(1), p(2), p(3));
        let once = e.simplify_collinear_points(&cache);
        assert_eq!(once.simplify_collinear_points(&cache), once);
    }
}
