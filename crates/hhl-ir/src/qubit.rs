//! Bit addresses.
//!
//! A bit address names one position inside one base allocation. Addresses
//! are never subdivided: every view, however deeply derived, resolves an
//! index to exactly one of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Identifier of a base allocation (quantum or classical register).
///
/// Identifiers are drawn from a process-wide counter, so an address taken
/// from one circuit can never be mistaken for an address of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegisterId(u32);

static NEXT_REGISTER_ID: AtomicU32 = AtomicU32::new(0);

impl RegisterId {
    /// Allocate a fresh identifier.
    pub fn fresh() -> Self {
        RegisterId(NEXT_REGISTER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u32) -> Self {
        RegisterId(raw)
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Address of a qubit: its allocation and its physical position in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId {
    /// The allocation this qubit lives in.
    pub register: RegisterId,
    /// Physical position inside the allocation.
    pub offset: u32,
}

impl QubitId {
    /// Create a qubit address.
    pub fn new(register: RegisterId, offset: u32) -> Self {
        Self { register, offset }
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.offset)
    }
}

/// Address of a classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClbitId {
    /// The allocation this bit lives in.
    pub register: RegisterId,
    /// Physical position inside the allocation.
    pub offset: u32,
}

impl ClbitId {
    /// Create a classical bit address.
    pub fn new(register: RegisterId, offset: u32) -> Self {
        Self { register, offset }
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.offset)
    }
}
