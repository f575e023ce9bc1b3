//! Register views and composite instruction trees.
//!
//! This crate provides the data structures the HHL builders are written
//! against: zero-copy register views and a hierarchical instruction tree
//! whose interior nodes are named composites.
//!
//! # Core Components
//!
//! - **Addresses**: [`QubitId`], [`ClbitId`] identify one position of one
//!   allocation
//! - **Registers**: [`QuantumRegister`], [`ClassicalRegister`] and the
//!   [`RegisterSet`] a container recognises
//! - **Views**: [`QuantumView`] with base, slice and bond kinds and an
//!   in-place orientation flip
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   opaque user-defined ones
//! - **Parameters**: [`ParameterExpression`] for angles built from π
//! - **Instructions**: [`Instruction`] trees with composite and annotation
//!   nodes
//! - **Containers**: the [`GateContainer`] trait, implemented by the root
//!   [`Circuit`] and by [`CompositeGate`]
//!
//! # Example: a composite over a reversed bond
//!
//! ```rust
//! use hhl_ir::{Circuit, CompositeGate, GateContainer, QuantumView, StandardGate};
//!
//! let mut circuit = Circuit::new("demo");
//! let a = circuit.add_qreg("a", 1);
//! let b = circuit.add_qreg("b", 2);
//!
//! let mut ab = QuantumView::bond([&a, &b]);
//! ab.reverse();
//! assert_eq!(ab.get(0)?, b.get(1)?);
//!
//! let mut stage = CompositeGate::new(&circuit, "stage", &ab);
//! stage.comment("[demo] Start.")?;
//! stage.layer(StandardGate::H, &ab)?;
//! stage.cx(ab.get(0)?, ab.get(2)?)?;
//! circuit.attach(stage.build())?;
//!
//! assert_eq!(circuit.num_ops(), 1);
//! assert_eq!(circuit.num_leaves(), 5);
//! # Ok::<(), hhl_ir::IrError>(())
//! ```

pub mod circuit;
pub mod composite;
pub mod container;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;
pub mod register;
pub mod view;

pub use circuit::{Circuit, CircuitData};
pub use composite::CompositeGate;
pub use container::{GateContainer, Scope};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, CustomInverse, Gate, GateKind, StandardGate};
pub use instruction::{Composite, Instruction, InstructionKind, Leaves};
pub use parameter::ParameterExpression;
pub use qubit::{ClbitId, QubitId, RegisterId};
pub use register::{ClassicalRegister, QuantumRegister, RegisterSet};
pub use view::{Orientation, QuantumView, ViewKind};
