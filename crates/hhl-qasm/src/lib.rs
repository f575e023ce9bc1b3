//! OpenQASM 2.0 rendering for HHL circuits.
//!
//! The emitter walks an instruction tree depth-first and writes one line
//! per leaf. Composite nodes leave no trace of their own; annotation nodes
//! become `// text` comment lines.
//!
//! # Example
//!
//! ```rust
//! use hhl_ir::{Circuit, GateContainer};
//! use hhl_qasm::emit;
//!
//! let mut circuit = Circuit::new("demo");
//! let q = circuit.add_qreg("q", 1);
//! circuit.comment("[demo] Start.")?;
//! circuit.h(q.get(0)?)?;
//!
//! let qasm = emit(&circuit).unwrap();
//! assert!(qasm.ends_with("// [demo] Start.\nh q[0];\n"));
//! # Ok::<(), hhl_ir::IrError>(())
//! ```

pub mod emitter;
pub mod error;

pub use emitter::{emit, emit_body, emit_param};
pub use error::{QasmError, QasmResult};
