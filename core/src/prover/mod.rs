//! Area-method prover
//!
//! For each statement expression the prover normalizes, then eliminates
//! derived points from the last one back to the first, normalizing after
//! every step. Whatever remains over free points is rewritten in
//! coordinates and tested for identical zero.

mod area_method;
mod config;
mod context;
mod report;

pub use area_method::AreaMethodProver;
pub use config::ProverConfig;
pub use context::ProverContext;
pub use report::ProofReport;
