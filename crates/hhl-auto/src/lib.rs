//! Transformations of composite instruction trees.
//!
//! This crate derives new, unattached instruction trees from existing ones:
//!
//! - **Inversion**: [`inverse_instruction`] reverses a composite's children
//!   and inverts each of them with a per-primitive rule
//! - **Control**: [`controlled_instruction`] adds a leading control operand
//!   to every node of a tree
//!
//! Neither transformation touches the source tree, so an attached
//! instruction can be read any number of times.
//!
//! # Example
//!
//! ```rust
//! use hhl_auto::inverse_instruction;
//! use hhl_ir::{Circuit, CompositeGate, GateContainer};
//!
//! let mut circuit = Circuit::new("demo");
//! let q = circuit.add_qreg("q", 2);
//!
//! let mut prep = CompositeGate::new(&circuit, "prep", &q);
//! prep.h(q.get(0)?)?.s(q.get(1)?)?;
//! let prep = prep.build();
//!
//! let undo = inverse_instruction(&prep).unwrap();
//! assert_eq!(undo.name(), "prep_dg");
//! assert_eq!(undo.children()[0].name(), "sdg");
//!
//! circuit.attach(prep)?;
//! circuit.attach(undo)?;
//! # Ok::<(), hhl_ir::IrError>(())
//! ```

pub mod control;
pub mod error;
pub mod inverse;

pub use control::{CONTROL_MARKER, controlled_gate, controlled_instruction};
pub use error::{AutoError, AutoResult};
pub use inverse::{inverse_custom_gate, inverse_gate, inverse_instruction, is_self_inverse};
