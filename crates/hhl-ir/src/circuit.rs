//! Root circuit.

use serde::{Deserialize, Serialize};

use crate::container::{GateContainer, Scope};
use crate::instruction::Instruction;
use crate::register::{ClassicalRegister, QuantumRegister, RegisterSet};
use crate::view::QuantumView;

/// A quantum circuit: the root of an instruction tree.
///
/// # Example
///
/// ```
/// use hhl_ir::{Circuit, GateContainer};
///
/// let mut circuit = Circuit::new("bell");
/// let q = circuit.add_qreg("q", 2);
/// let c = circuit.add_creg("c", 2);
///
/// circuit.h(q.get(0)?)?.cx(q.get(0)?, q.get(1)?)?;
/// circuit.measure(q.get(0)?, c.clbit(0)?)?;
/// circuit.measure(q.get(1)?, c.clbit(1)?)?;
///
/// assert_eq!(circuit.num_qubits(), 2);
/// assert_eq!(circuit.num_ops(), 4);
/// # Ok::<(), hhl_ir::IrError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    name: String,
    scope: Scope,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Scope::default(),
        }
    }

    /// Allocate a quantum register and return a view over it.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: usize) -> QuantumView {
        let register = QuantumRegister::new(name, size);
        let view = QuantumView::wrap(&register);
        self.scope.registers_mut().push_quantum(register);
        view
    }

    /// Allocate a classical register.
    pub fn add_creg(&mut self, name: impl Into<String>, size: usize) -> ClassicalRegister {
        let register = ClassicalRegister::new(name, size);
        self.scope.registers_mut().push_classical(register.clone());
        register
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.scope.registers().num_qubits()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.scope.registers().num_clbits()
    }

    /// Get the number of top-level instructions.
    pub fn num_ops(&self) -> usize {
        self.scope.instructions().len()
    }

    /// Count primitive leaves of the whole tree, annotations included.
    pub fn num_leaves(&self) -> usize {
        self.scope
            .instructions()
            .iter()
            .map(|i| i.leaves().count())
            .sum()
    }

    /// Snapshot the circuit as plain data.
    pub fn to_data(&self) -> CircuitData {
        CircuitData {
            name: self.name.clone(),
            registers: self.scope.registers().clone(),
            instructions: self.scope.instructions().to_vec(),
        }
    }
}

impl GateContainer for Circuit {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }
}

/// Serializable snapshot of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitData {
    /// Circuit name.
    pub name: String,
    /// Registers in allocation order.
    pub registers: RegisterSet,
    /// Top-level instructions.
    pub instructions: Vec<Instruction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;

    #[test]
    fn test_circuit_creation() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 3);
        circuit.add_creg("c", 1);

        assert_eq!(circuit.name(), "test");
        assert_eq!(q.len(), 3);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 1);
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_duplicate_operand_rejected() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);
        let q0 = q.get(0).unwrap();

        let err = circuit.cx(q0, q0).unwrap_err();
        assert!(matches!(err, IrError::DuplicateOperand { .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_unknown_register_rejected() {
        let mut circuit = Circuit::new("a");
        let mut other = Circuit::new("b");
        let foreign = other.add_qreg("q", 1);

        let err = circuit.h(foreign.get(0).unwrap()).unwrap_err();
        assert!(matches!(err, IrError::UnknownRegister { .. }));
    }

    #[test]
    fn test_unknown_register_in_child_rejected() {
        let mut circuit = Circuit::new("a");
        let mut other = Circuit::new("b");
        let foreign = other.add_qreg("q", 1);

        let child = Instruction::single_qubit_gate(
            crate::gate::StandardGate::H,
            foreign.get(0).unwrap(),
        );
        let wrap = Instruction::composite("wrap", vec![], [], vec![child]);

        let err = circuit.attach(wrap).unwrap_err();
        assert!(matches!(err, IrError::UnknownRegister { .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_duplicate_operand_in_child_rejected() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);
        let q0 = q.get(0).unwrap();

        let child = Instruction::two_qubit_gate(crate::gate::StandardGate::CX, q0, q0);
        let wrap = Instruction::composite("wrap", vec![], q.qubits(), vec![child]);

        let err = circuit.attach(wrap).unwrap_err();
        assert!(matches!(err, IrError::DuplicateOperand { .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_qubit_count_checked() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);

        let err = circuit
            .gate(crate::gate::StandardGate::CX, [q.get(0).unwrap()])
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_comment_has_no_operands() {
        let mut circuit = Circuit::new("test");
        circuit.comment("[demo] Start.").unwrap();

        let instruction = &circuit.instructions()[0];
        assert!(instruction.is_annotation());
        assert_eq!(instruction.annotation_text(), Some("[demo] Start."));
        assert!(instruction.qubits.is_empty());
    }

    #[test]
    fn test_measure_mismatch() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);
        let c = circuit.add_creg("c", 1);

        let mut instruction = Instruction::measure(q.get(0).unwrap(), c.clbit(0).unwrap());
        instruction.qubits.push(q.get(1).unwrap());
        let err = circuit.attach(instruction).unwrap_err();
        assert!(matches!(err, IrError::MeasureMismatch { qubits: 2, clbits: 1 }));
    }

    #[test]
    fn test_circuit_data_serialization() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);
        circuit.h(q.get(0).unwrap()).unwrap();
        circuit.cp(0.5, q.get(0).unwrap(), q.get(1).unwrap()).unwrap();

        let data = circuit.to_data();
        let json = serde_json::to_string(&data).unwrap();
        let back: CircuitData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
