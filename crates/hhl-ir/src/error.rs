//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while deriving views or attaching instructions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Index outside the bounds of a register view.
    #[error("Index {index} out of range for register of size {size}")]
    IndexOutOfRange {
        /// The requested logical index.
        index: usize,
        /// Size of the view that was indexed.
        size: usize,
    },

    /// Slice bounds that do not describe a sub-range of the parent view.
    #[error("Invalid slice [{start}:{stop}:{step}] of register of size {size}")]
    InvalidSlice {
        /// First index of the slice.
        start: usize,
        /// One past the last index of the slice.
        stop: usize,
        /// Stride between selected indices.
        step: usize,
        /// Size of the parent view.
        size: usize,
    },

    /// The same qubit appears twice in one operand list.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateOperand {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same classical bit appears twice in one operand list.
    #[error("Duplicate classical bit {clbit} in operation{}", format_gate_context(.gate_name))]
    DuplicateClbit {
        /// The duplicate classical bit.
        clbit: ClbitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Qubit does not belong to any register known to the container.
    #[error("Qubit {qubit} does not belong to a known register{}", format_gate_context(.gate_name))]
    UnknownRegister {
        /// The untraceable qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit does not belong to any register known to the container.
    #[error("Classical bit {clbit} does not belong to a known register{}", format_gate_context(.gate_name))]
    UnknownClassicalRegister {
        /// The untraceable classical bit.
        clbit: ClbitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Measurement with unequal numbers of qubits and classical bits.
    #[error("Measurement of {qubits} qubits into {clbits} classical bits")]
    MeasureMismatch {
        /// Number of measured qubits.
        qubits: usize,
        /// Number of target classical bits.
        clbits: usize,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
