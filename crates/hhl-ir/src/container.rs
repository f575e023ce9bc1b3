//! Containers that accept attached instructions.
//!
//! Every place an instruction can be attached to (the root [`Circuit`] or a
//! [`CompositeGate`] under construction) implements [`GateContainer`]. The
//! trait is the single builder interface: its provided methods are the
//! instruction verbs, and all of them funnel through [`Scope::attach`],
//! which enforces the attachment preconditions.
//!
//! [`Circuit`]: crate::Circuit
//! [`CompositeGate`]: crate::CompositeGate

use tracing::trace;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, QubitId};
use crate::register::RegisterSet;
use crate::view::QuantumView;

/// Registers recognised by a container and the instructions attached to it.
///
/// Attached instructions are only reachable through shared references, so
/// they cannot change once attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    registers: RegisterSet,
    instructions: Vec<Instruction>,
}

impl Scope {
    /// Create an empty scope recognising the given registers.
    pub fn new(registers: RegisterSet) -> Self {
        Self {
            registers,
            instructions: vec![],
        }
    }

    /// Get the recognised registers.
    pub fn registers(&self) -> &RegisterSet {
        &self.registers
    }

    /// Get the attached instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Validate and append an instruction.
    ///
    /// Nothing is appended when validation fails.
    pub fn attach(&mut self, instruction: Instruction) -> IrResult<&Instruction> {
        self.registers.validate(&instruction)?;
        trace!(
            name = instruction.name(),
            qubits = instruction.qubits.len(),
            "attached instruction"
        );
        let index = self.instructions.len();
        self.instructions.push(instruction);
        Ok(&self.instructions[index])
    }

    pub(crate) fn registers_mut(&mut self) -> &mut RegisterSet {
        &mut self.registers
    }

    pub(crate) fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

/// Anything instructions can be attached to.
pub trait GateContainer {
    /// Get the underlying scope.
    fn scope(&self) -> &Scope;

    /// Get the underlying scope mutably.
    fn scope_mut(&mut self) -> &mut Scope;

    /// Get the registers this container recognises.
    fn registers(&self) -> &RegisterSet {
        self.scope().registers()
    }

    /// Get the attached instructions in order.
    fn instructions(&self) -> &[Instruction] {
        self.scope().instructions()
    }

    /// Validate and attach an instruction, returning the attached node.
    ///
    /// Fails with [`IrError::UnknownRegister`] when an operand is not
    /// traceable to a known register and with [`IrError::DuplicateOperand`]
    /// when an operand repeats. The container is unchanged on failure.
    fn attach(&mut self, instruction: Instruction) -> IrResult<&Instruction> {
        self.scope_mut().attach(instruction)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(StandardGate::Y, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(StandardGate::S, qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(StandardGate::T, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    fn rx(&mut self, theta: impl Into<ParameterExpression>, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    fn ry(&mut self, theta: impl Into<ParameterExpression>, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    fn rz(&mut self, theta: impl Into<ParameterExpression>, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply phase gate.
    fn p(&mut self, theta: impl Into<ParameterExpression>, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(
            StandardGate::P(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply universal U gate.
    fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.attach(Instruction::single_qubit_gate(
            StandardGate::U(theta.into(), phi.into(), lambda.into()),
            qubit,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply CZ gate.
    fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::two_qubit_gate(StandardGate::CZ, control, target))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    /// Apply controlled-phase gate.
    fn cp(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.attach(Instruction::two_qubit_gate(
            StandardGate::CP(theta.into()),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled universal gate.
    fn cu(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.attach(Instruction::two_qubit_gate(
            StandardGate::CU(theta.into(), phi.into(), lambda.into()),
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply controlled sqrt(X) gate.
    fn csx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::two_qubit_gate(StandardGate::CSX, control, target))?;
        Ok(self)
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::gate(StandardGate::CCX, [c1, c2, target]))?;
        Ok(self)
    }

    /// Apply doubly-controlled Z gate.
    fn ccz(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::gate(StandardGate::CCZ, [c1, c2, target]))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary primitive gate.
    fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.attach(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Attach a composite holding one copy of a single-qubit gate per qubit
    /// of `view`, in logical order.
    fn layer(&mut self, gate: StandardGate, view: &QuantumView) -> IrResult<&mut Self> {
        if gate.num_qubits() != 1 {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: 1,
            });
        }
        let qubits = view.qubits();
        let children = qubits
            .iter()
            .map(|&q| Instruction::single_qubit_gate(gate.clone(), q))
            .collect();
        let name = format!("{}_layer", gate.name());
        self.attach(Instruction::composite(name, vec![], qubits, children))?;
        Ok(self)
    }

    /// Attach an annotation with diagnostic text.
    fn comment(&mut self, text: impl Into<String>) -> IrResult<&mut Self> {
        self.attach(Instruction::annotation(text))?;
        Ok(self)
    }

    /// Measure a qubit to a classical bit.
    fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.attach(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.attach(Instruction::reset(qubit))?;
        Ok(self)
    }

    /// Apply a barrier to the qubits of a view.
    fn barrier(&mut self, view: &QuantumView) -> IrResult<&mut Self> {
        self.attach(Instruction::barrier(view.qubits()))?;
        Ok(self)
    }
}
