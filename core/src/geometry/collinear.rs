//! Collinearity facts implied by a construction
//!
//! Triples are derived once per construction from the defining lines of
//! each derived point. Two triples sharing a pair of point ids are not
//! merged: a derived point may coincide with one of its defining points
//! (AB ∩ AC is A), so a shared pair of ids need not span a line.

use crate::ir::{Construction, PointId, PointKind};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Set of unordered collinear point triples
#[derive(Debug, Clone, Default)]
pub struct CollinearCache {
    triples: FxHashSet<[PointId; 3]>,
}

fn sorted(a: PointId, b: PointId, c: PointId) -> [PointId; 3] {
    let mut triple = [a, b, c];
    triple.sort();
    triple
}

impl CollinearCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive every collinear triple the construction guarantees
    pub fn from_construction(construction: &Construction) -> Self {
        let mut cache = Self::new();
        let mut rounds = 0;
        loop {
            rounds += 1;
            if !cache.apply_construction_rules(construction) {
                break;
            }
        }
        debug!(triples = cache.len(), rounds, "collinear cache built");
        cache
    }

    /// Record a collinear triple; triples with a repeated point are ignored
    pub fn insert(&mut self, a: PointId, b: PointId, c: PointId) -> bool {
        if a == b || b == c || a == c {
            return false;
        }
        self.triples.insert(sorted(a, b, c))
    }

    /// Order-independent membership test
    pub fn contains(&self, a: PointId, b: PointId, c: PointId) -> bool {
        self.triples.contains(&sorted(a, b, c))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Stored triples, each sorted by point id
    pub fn triples(&self) -> impl Iterator<Item = &[PointId; 3]> {
        self.triples.iter()
    }

    fn apply_construction_rules(&mut self, construction: &Construction) -> bool {
        let mut changed = false;
        for point in construction.points() {
            let y = point.id;
            match &point.kind {
                PointKind::Free => {}
                PointKind::Intersection { u, v, p, q } => {
                    changed |= self.insert(*u, *v, y);
                    changed |= self.insert(*p, *q, y);
                }
                PointKind::Foot { u, v, .. } => {
                    changed |= self.insert(*u, *v, y);
                }
                PointKind::PRatio { w, u, v, .. } => {
                    if w == u || w == v || self.contains(*w, *u, *v) {
                        changed |= self.insert(*u, *v, y);
                        changed |= self.insert(*u, *w, y);
                        changed |= self.insert(*v, *w, y);
                    }
                }
            }
        }
        changed
    }
}
