//! Base allocations and the register set a container recognises.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId, RegisterId};

/// A named allocation of qubits.
///
/// The identity and size of a register never change once it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    id: RegisterId,
    name: String,
    size: usize,
}

impl QuantumRegister {
    /// Allocate a new register with a fresh identifier.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            id: RegisterId::fresh(),
            name: name.into(),
            size,
        }
    }

    /// Get the allocation identifier.
    pub fn id(&self) -> RegisterId {
        self.id
    }

    /// Get the register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Check if a qubit address belongs to this register.
    pub fn contains(&self, qubit: QubitId) -> bool {
        qubit.register == self.id && (qubit.offset as usize) < self.size
    }

    /// Get the qubit at a physical position.
    pub fn qubit(&self, index: usize) -> IrResult<QubitId> {
        if index >= self.size {
            return Err(IrError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(QubitId::new(self.id, position(index)))
    }
}

/// A named allocation of classical bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    id: RegisterId,
    name: String,
    size: usize,
}

impl ClassicalRegister {
    /// Allocate a new classical register with a fresh identifier.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            id: RegisterId::fresh(),
            name: name.into(),
            size,
        }
    }

    /// Get the allocation identifier.
    pub fn id(&self) -> RegisterId {
        self.id
    }

    /// Get the register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of bits.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Check if a classical bit address belongs to this register.
    pub fn contains(&self, clbit: ClbitId) -> bool {
        clbit.register == self.id && (clbit.offset as usize) < self.size
    }

    /// Get the classical bit at a position.
    pub fn clbit(&self, index: usize) -> IrResult<ClbitId> {
        if index >= self.size {
            return Err(IrError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(ClbitId::new(self.id, position(index)))
    }

    /// Iterate over all classical bits in order.
    pub fn iter(&self) -> impl Iterator<Item = ClbitId> + '_ {
        (0..self.size).map(|i| ClbitId::new(self.id, position(i)))
    }
}

/// Physical positions are stored as `u32`; registers never grow past that.
pub(crate) fn position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

/// The registers a container recognises as valid operand sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSet {
    quantum: Vec<QuantumRegister>,
    classical: Vec<ClassicalRegister>,
}

impl RegisterSet {
    /// Create an empty register set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all quantum registers in allocation order.
    pub fn quantum(&self) -> &[QuantumRegister] {
        &self.quantum
    }

    /// Get all classical registers in allocation order.
    pub fn classical(&self) -> &[ClassicalRegister] {
        &self.classical
    }

    /// Look up a quantum register by id.
    pub fn quantum_register(&self, id: RegisterId) -> Option<&QuantumRegister> {
        self.quantum.iter().find(|r| r.id == id)
    }

    /// Look up a classical register by id.
    pub fn classical_register(&self, id: RegisterId) -> Option<&ClassicalRegister> {
        self.classical.iter().find(|r| r.id == id)
    }

    /// Check if a qubit is traceable to a known register.
    pub fn contains_qubit(&self, qubit: QubitId) -> bool {
        self.quantum.iter().any(|r| r.contains(qubit))
    }

    /// Check if a classical bit is traceable to a known register.
    pub fn contains_clbit(&self, clbit: ClbitId) -> bool {
        self.classical.iter().any(|r| r.contains(clbit))
    }

    /// Total number of qubits over all quantum registers.
    pub fn num_qubits(&self) -> usize {
        self.quantum.iter().map(QuantumRegister::len).sum()
    }

    /// Total number of bits over all classical registers.
    pub fn num_clbits(&self) -> usize {
        self.classical.iter().map(ClassicalRegister::len).sum()
    }

    pub(crate) fn push_quantum(&mut self, register: QuantumRegister) {
        self.quantum.push(register);
    }

    pub(crate) fn push_classical(&mut self, register: ClassicalRegister) {
        self.classical.push(register);
    }

    /// Check the attachment preconditions of an instruction tree.
    ///
    /// Every operand of the instruction and of all its descendants must be
    /// traceable to a known register, and no operand may repeat within a
    /// single node's operand lists. Gate instructions must also receive as
    /// many qubits as the gate acts on.
    pub fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        self.validate_node(instruction)?;
        instruction
            .children()
            .iter()
            .try_for_each(|child| self.validate(child))
    }

    fn validate_node(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        if let Some(gate) = instruction.as_gate() {
            let expected = gate.num_qubits();
            let got = position(instruction.qubits.len());
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        if instruction.is_measure() && instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::MeasureMismatch {
                qubits: instruction.qubits.len(),
                clbits: instruction.clbits.len(),
            });
        }

        for &qubit in &instruction.qubits {
            if !self.contains_qubit(qubit) {
                return Err(IrError::UnknownRegister {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if !self.contains_clbit(clbit) {
                return Err(IrError::UnknownClassicalRegister {
                    clbit,
                    gate_name: gate_name(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateOperand {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        let mut seen = FxHashSet::default();
        for &clbit in &instruction.clbits {
            if !seen.insert(clbit) {
                return Err(IrError::DuplicateClbit {
                    clbit,
                    gate_name: gate_name(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_membership() {
        let reg = QuantumRegister::new("q", 3);
        assert!(reg.contains(reg.qubit(2).unwrap()));
        assert!(!reg.contains(QubitId::new(reg.id(), 3)));
        assert!(matches!(
            reg.qubit(3),
            Err(IrError::IndexOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn test_register_set_lookup() {
        let mut set = RegisterSet::new();
        let q = QuantumRegister::new("q", 2);
        let c = ClassicalRegister::new("c", 1);
        let qid = q.id();
        set.push_quantum(q);
        set.push_classical(c.clone());

        assert_eq!(set.num_qubits(), 2);
        assert_eq!(set.num_clbits(), 1);
        assert_eq!(set.quantum_register(qid).unwrap().name(), "q");
        assert!(set.contains_clbit(c.clbit(0).unwrap()));
        assert!(!set.contains_qubit(QuantumRegister::new("other", 1).qubit(0).unwrap()));
    }
}
