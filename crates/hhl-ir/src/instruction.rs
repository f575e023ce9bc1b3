//! Instruction tree nodes.
//!
//! An [`Instruction`] is either a primitive (a gate, a measurement, a reset
//! or a barrier), a composite whose effect is entirely defined by its
//! children, or an annotation that only carries diagnostic text.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, QubitId};

/// A named operation defined by an ordered list of child instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    /// Name of the composite operation.
    pub name: String,
    /// Parameters the composite was built from.
    pub params: Vec<ParameterExpression>,
    /// Children in attachment order.
    pub children: Vec<Instruction>,
}

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A primitive gate.
    Gate(Gate),
    /// A composite operation.
    Composite(Composite),
    /// Zero-effect diagnostic text.
    Annotation(String),
    /// Measurement operation.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a composite instruction from already built children.
    pub fn composite(
        name: impl Into<String>,
        params: Vec<ParameterExpression>,
        qubits: impl IntoIterator<Item = QubitId>,
        children: Vec<Instruction>,
    ) -> Self {
        Self {
            kind: InstructionKind::Composite(Composite {
                name: name.into(),
                params,
                children,
            }),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create an annotation carrying diagnostic text.
    pub fn annotation(text: impl Into<String>) -> Self {
        Self {
            kind: InstructionKind::Annotation(text.into()),
            qubits: vec![],
            clbits: vec![],
        }
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a composite.
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, InstructionKind::Composite(_))
    }

    /// Check if this is an annotation.
    pub fn is_annotation(&self) -> bool {
        matches!(self.kind, InstructionKind::Annotation(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the composite if this is one.
    pub fn as_composite(&self) -> Option<&Composite> {
        match &self.kind {
            InstructionKind::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Get the annotation text if this is an annotation.
    pub fn annotation_text(&self) -> Option<&str> {
        match &self.kind {
            InstructionKind::Annotation(text) => Some(text),
            _ => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Composite(c) => &c.name,
            InstructionKind::Annotation(_) => "comment",
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
        }
    }

    /// Get the parameters in order.
    pub fn params(&self) -> Vec<&ParameterExpression> {
        match &self.kind {
            InstructionKind::Gate(g) => g.kind.parameters(),
            InstructionKind::Composite(c) => c.params.iter().collect(),
            _ => vec![],
        }
    }

    /// Get the children; empty for everything but composites.
    pub fn children(&self) -> &[Instruction] {
        match &self.kind {
            InstructionKind::Composite(c) => &c.children,
            _ => &[],
        }
    }

    /// Iterate over the leaves of this tree in depth-first order.
    ///
    /// A leaf is any non-composite node, annotations included. A composite
    /// without children contributes nothing.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }
}

/// Depth-first iterator over the leaves of an instruction tree.
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a Instruction>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match &node.kind {
                InstructionKind::Composite(c) => self.stack.extend(c.children.iter().rev()),
                _ => return Some(node),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::RegisterId;

    fn q(i: u32) -> QubitId {
        QubitId::new(RegisterId::from_raw(0), i)
    }

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, q(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert!(inst.children().is_empty());
    }

    #[test]
    fn test_annotation_has_no_operands() {
        let inst = Instruction::annotation("[QPE] Starting block.");
        assert!(inst.is_annotation());
        assert!(inst.qubits.is_empty());
        assert_eq!(inst.annotation_text(), Some("[QPE] Starting block."));
    }

    #[test]
    fn test_leaves_depth_first() {
        let inner = Instruction::composite(
            "inner",
            vec![],
            [q(1)],
            vec![
                Instruction::single_qubit_gate(StandardGate::X, q(1)),
                Instruction::single_qubit_gate(StandardGate::Z, q(1)),
            ],
        );
        let outer = Instruction::composite(
            "outer",
            vec![ParameterExpression::constant(2.0)],
            [q(0), q(1)],
            vec![
                Instruction::single_qubit_gate(StandardGate::H, q(0)),
                inner,
                Instruction::annotation("done"),
            ],
        );

        let names: Vec<_> = outer.leaves().map(Instruction::name).collect();
        assert_eq!(names, vec!["h", "x", "z", "comment"]);
        assert_eq!(outer.params().len(), 1);
        assert_eq!(outer.children().len(), 3);
    }
}
