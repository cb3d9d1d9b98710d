//! Geometry module - construction building and derived facts
//!
//! This module knows what the construction steps mean geometrically.
//! The algebra lives in `expr`, `rewrite` and `elimination`.

pub mod collinear;
pub mod constructions;

pub use collinear::CollinearCache;
pub use constructions::Construct;
