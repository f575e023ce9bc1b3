//! Error types for the algorithm builders.

use hhl_auto::AutoError;
use hhl_ir::IrError;
use thiserror::Error;

/// Errors that can occur while assembling algorithm circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// The calibration table has no entry for this power.
    #[error("No calibrated parameters for power {0}")]
    UnimplementedPower(u64),

    /// `2^exponent` does not fit the calibration key type.
    #[error("Power 2^{0} is too large")]
    PowerOverflow(usize),

    /// The callback received an eigen-register of the wrong size.
    #[error("Expected a target register of {expected} qubits, got {got}")]
    TargetSize { expected: usize, got: usize },

    /// Configuration values that cannot describe a circuit.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed calibration or configuration JSON.
    #[error("Calibration error: {0}")]
    Calibration(#[from] serde_json::Error),

    /// Error from the circuit IR.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Error from tree inversion or control.
    #[error("Transform error: {0}")]
    Auto(#[from] AutoError),
}

/// Result type for algorithm builders.
pub type AlgoResult<T> = Result<T, AlgoError>;
