//! Shared proof state for one construction

use super::area_method::AreaMethodProver;
use super::config::ProverConfig;
use super::report::ProofReport;
use crate::geometry::CollinearCache;
use crate::ir::{Construction, ProofResult, Statement};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

/// State shared by every proof over one construction
///
/// The construction is fixed for the lifetime of the context; proving
/// against a different construction needs a new context. Decided
/// statements and the collinear cache are shared across all proofs and
/// sub-proofs, and the context can be used from several threads at once.
#[derive(Debug)]
pub struct ProverContext {
    construction: Construction,
    config: ProverConfig,
    proved: RwLock<FxHashMap<Statement, bool>>,
    collinear: OnceLock<CollinearCache>,
    eliminations: AtomicUsize,
}

impl ProverContext {
    pub fn new(construction: Construction) -> Self {
        Self::with_config(construction, ProverConfig::default())
    }

    pub fn with_config(construction: Construction, config: ProverConfig) -> Self {
        Self {
            construction,
            config,
            proved: RwLock::new(FxHashMap::default()),
            collinear: OnceLock::new(),
            eliminations: AtomicUsize::new(0),
        }
    }

    pub fn construction(&self) -> &Construction {
        &self.construction
    }

    pub fn config(&self) -> &ProverConfig {
        &self.config
    }

    /// Collinear triples of the construction, built on first use
    pub fn collinear_cache(&self) -> &CollinearCache {
        self.collinear
            .get_or_init(|| CollinearCache::from_construction(&self.construction))
    }

    /// Decide a statement over the whole construction
    pub fn prove(&self, statement: &Statement) -> ProofResult<ProofReport> {
        AreaMethodProver::new(self, self.construction.len(), 0).prove(statement)
    }

    /// Memoized verdict of a statement, if it was decided before
    pub fn cached_verdict(&self, statement: &Statement) -> Option<bool> {
        let proved = self.proved.read().unwrap_or_else(PoisonError::into_inner);
        proved.get(statement).copied()
    }

    pub(crate) fn remember(&self, statement: &Statement, holds: bool) {
        let mut proved = self.proved.write().unwrap_or_else(PoisonError::into_inner);
        if proved.insert(statement.clone(), holds).is_none() {
            debug!(statement = %statement.name, holds, "memoized");
        }
    }

    /// Number of decided statements in the memo
    pub fn memo_len(&self) -> usize {
        self.proved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Total elimination steps run through this context
    pub fn elimination_count(&self) -> usize {
        self.eliminations.load(Ordering::Relaxed)
    }

    pub(crate) fn record_elimination(&self) {
        self.eliminations.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Construct;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_context_is_shareable() {
        assert_send_sync::<ProverContext>();
    }

    #[test]
    fn test_memo_roundtrip() {
        let mut construction = Construction::new();
        let a = construction.free_point("A").unwrap();
        let b = construction.free_point("B").unwrap();
        let c = construction.free_point("C").unwrap();
        let context = ProverContext::new(construction);

        let statement = Statement::collinear(a, b, c);
        assert_eq!(context.cached_verdict(&statement), None);
        context.remember(&statement, false);
        context.remember(&statement, false);
        assert_eq!(context.cached_verdict(&statement), Some(false));
        assert_eq!(context.memo_len(), 1);
    }

    #[test]
    fn test_collinear_cache_built_once() {
        let mut construction = Construction::new();
        let a = construction.free_point("A").unwrap();
        let b = construction.free_point("B").unwrap();
        let m = construction.midpoint("M", a, b).unwrap();
        let context = ProverContext::new(construction);

        let first: *const CollinearCache = context.collinear_cache();
        let second: *const CollinearCache = context.collinear_cache();
        assert_eq!(first, second);
        assert!(context.collinear_cache().contains(a, m, b));
    }
}
