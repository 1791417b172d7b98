//! Strongly-typed IDs used across Vesta.
//!
//! This crate is intentionally small: plain `u32` newtypes with the derives
//! the rest of the workspace needs. IDs are only meaningful relative to the
//! store or context that allocated them.

use serde::{Deserialize, Serialize};

/// Identifies an interned class (or interface/annotation/enum/record)
/// definition in a type store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct ClassId(pub u32);

impl ClassId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Identifies a type parameter definition.
///
/// Both declared type parameters and capture variables share this id space;
/// the allocator decides which half an id lives in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct TypeParamId(pub u32);

impl TypeParamId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TypeParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tparam#{}", self.0)
    }
}

/// Identifies an inference variable owned by an inference session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct InferVarId(pub u32);

impl InferVarId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InferVarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ivar#{}", self.0)
    }
}
