//! Lightweight arena indices used for every cross-reference in the graph.
//!
//! The source toolchain this is distilled from links declarations and types
//! with raw back-pointers, which makes the graph impossible to serialize
//! without re-walking it and leaves dangling-pointer hazards whenever a
//! Meta Unit is torn down out of order. Representing every cross-reference
//! as a `DeclRef`/`TypeRef` index into the owning Meta Unit's arenas removes
//! both problems: the index is `Copy`, trivially serializable, and only
//! ever dereferenced through the arena that produced it.

use serde::{Deserialize, Serialize};

/// Index into a Meta Unit's declaration arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclRef(pub u32);

/// Index into a Meta Unit's type arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRef(pub u32);

impl DeclRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TypeRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
