//! Error types for the QASM emitter.

use hhl_ir::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while rendering a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QasmError {
    /// Two registers share a name, so their declarations would clash.
    #[error("Duplicate register name: {0}")]
    DuplicateRegisterName(String),

    /// A qubit does not belong to any declared register.
    #[error("Qubit {0} does not belong to a declared register")]
    UndeclaredQubit(QubitId),

    /// A classical bit does not belong to any declared register.
    #[error("Classical bit {0} does not belong to a declared register")]
    UndeclaredClbit(ClbitId),
}

/// Result type for rendering.
pub type QasmResult<T> = Result<T, QasmError>;
