//! Error types for inversion and controlled wrapping.

use hhl_ir::IrError;
use thiserror::Error;

/// Errors that can occur while transforming instruction trees.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AutoError {
    /// No inverse rule is known for this operation.
    #[error("Operation {0} has no inverse rule")]
    UnsupportedInverse(String),

    /// No controlled form is known for this operation.
    #[error("Operation {0} has no controlled form")]
    UnsupportedControl(String),

    /// Operand error in the rewritten tree.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for tree transformations.
pub type AutoResult<T> = Result<T, AutoError>;
