//! Symbol interning for construction objects
//!
//! Points and lines are referred to by compact numeric ids everywhere in the
//! prover; the symbol table maps them back to the labels a user wrote.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Newtype wrapper for point identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

/// Newtype wrapper for line identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u32);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Thread-safe symbol table for interning labels to ids
///
/// Cloning the table shares the underlying storage, so every clone sees
/// points interned through any other clone.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    inner: Arc<RwLock<SymbolTableInner>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SymbolTableInner {
    point_map: FxHashMap<String, PointId>,
    line_map: FxHashMap<String, LineId>,

    // id -> label, indexed by the id value
    point_labels: Vec<String>,
    line_labels: Vec<String>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SymbolTableInner::default())),
        }
    }

    /// Intern a point label, returning its ID (creates new ID if label not seen before)
    pub fn get_or_intern_point(&self, label: &str) -> PointId {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(&id) = inner.point_map.get(label) {
            return id;
        }
        let id = PointId(inner.point_labels.len() as u32);
        inner.point_map.insert(label.to_string(), id);
        inner.point_labels.push(label.to_string());
        id
    }

    /// Intern a line label, returning its ID
    pub fn get_or_intern_line(&self, label: &str) -> LineId {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(&id) = inner.line_map.get(label) {
            return id;
        }
        let id = LineId(inner.line_labels.len() as u32);
        inner.line_map.insert(label.to_string(), id);
        inner.line_labels.push(label.to_string());
        id
    }

    /// Look up a point by label without interning it
    pub fn point_id(&self, label: &str) -> Option<PointId> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.point_map.get(label).copied()
    }

    /// Look up a line by label without interning it
    pub fn line_id(&self, label: &str) -> Option<LineId> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.line_map.get(label).copied()
    }

    /// Get the label for a point ID
    pub fn point_label(&self, id: PointId) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.point_labels.get(id.0 as usize).cloned()
    }

    /// Get the label for a line ID
    pub fn line_label(&self, id: LineId) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.line_labels.get(id.0 as usize).cloned()
    }

    /// Label of a point, falling back to its numeric id
    pub fn point_name(&self, id: PointId) -> String {
        self.point_label(id).unwrap_or_else(|| id.to_string())
    }

    /// Get the number of interned points
    pub fn num_points(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .point_labels
            .len()
    }

    /// Get the number of interned lines
    pub fn num_lines(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .line_labels
            .len()
    }
}

// Custom Serialize/Deserialize for SymbolTable to handle Arc<RwLock<>>
impl Serialize for SymbolTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SymbolTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = SymbolTableInner::deserialize(deserializer)?;
        Ok(SymbolTable {
            inner: Arc::new(RwLock::new(inner)),
        })
    }
}
