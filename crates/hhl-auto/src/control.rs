//! Controlled wrapping of instruction trees.

use hhl_ir::IrError;
use hhl_ir::gate::{Gate, GateKind, StandardGate};
use hhl_ir::instruction::{Composite, Instruction, InstructionKind};
use hhl_ir::parameter::ParameterExpression;
use hhl_ir::qubit::QubitId;

use crate::error::{AutoError, AutoResult};

/// Prefix added to annotation text for each level of control.
pub const CONTROL_MARKER: &str = "c-";

/// Prefix added to the name of a controlled composite.
pub const CONTROLLED_PREFIX: &str = "c_";

/// Map a standard gate to the gate with one extra leading control.
///
/// Returns `None` when no single primitive implements the controlled form,
/// and for the identity, which [`controlled_instruction`] keeps as is.
pub fn controlled_gate(gate: &StandardGate) -> Option<StandardGate> {
    let controlled = match gate {
        StandardGate::X => StandardGate::CX,
        StandardGate::Y => StandardGate::CY,
        StandardGate::Z => StandardGate::CZ,
        StandardGate::H => StandardGate::CH,
        StandardGate::S => StandardGate::CP(ParameterExpression::pi_over_power_of_two(1)),
        StandardGate::Sdg => {
            StandardGate::CP(ParameterExpression::pi_over_power_of_two(1).negated())
        }
        StandardGate::T => StandardGate::CP(ParameterExpression::pi_over_power_of_two(2)),
        StandardGate::Tdg => {
            StandardGate::CP(ParameterExpression::pi_over_power_of_two(2).negated())
        }
        StandardGate::SX => StandardGate::CSX,
        StandardGate::SXdg => StandardGate::CSXdg,
        StandardGate::Rx(theta) => StandardGate::CRx(theta.clone()),
        StandardGate::Ry(theta) => StandardGate::CRy(theta.clone()),
        StandardGate::Rz(theta) => StandardGate::CRz(theta.clone()),
        StandardGate::P(lambda) => StandardGate::CP(lambda.clone()),
        StandardGate::U(theta, phi, lambda) => {
            StandardGate::CU(theta.clone(), phi.clone(), lambda.clone())
        }
        StandardGate::CX => StandardGate::CCX,
        StandardGate::CZ => StandardGate::CCZ,
        StandardGate::Swap => StandardGate::CSwap,
        _ => return None,
    };
    Some(controlled)
}

/// Wrap an instruction so that it only acts when `control` is set.
///
/// The control is placed first in the operand list of every rewritten node.
/// Composites keep their shape, gain the [`CONTROLLED_PREFIX`] and have each
/// child wrapped. Annotations only gain one [`CONTROL_MARKER`] and stay
/// without operands. The identity stays the identity on its own target.
///
/// Fails with [`IrError::DuplicateOperand`] if `control` already appears in
/// the tree and with [`AutoError::UnsupportedControl`] for gates without a
/// controlled primitive, custom gates, measurement and reset.
pub fn controlled_instruction(
    instruction: &Instruction,
    control: QubitId,
) -> AutoResult<Instruction> {
    if instruction.qubits.contains(&control) {
        return Err(IrError::DuplicateOperand {
            qubit: control,
            gate_name: Some(instruction.name().to_string()),
        }
        .into());
    }

    let kind = match &instruction.kind {
        InstructionKind::Gate(gate) => {
            let GateKind::Standard(standard) = &gate.kind else {
                return Err(AutoError::UnsupportedControl(gate.name().to_string()));
            };
            if *standard == StandardGate::I {
                return Ok(instruction.clone());
            }
            let controlled = controlled_gate(standard)
                .ok_or_else(|| AutoError::UnsupportedControl(standard.name().to_string()))?;
            InstructionKind::Gate(Gate::standard(controlled))
        }

        InstructionKind::Composite(composite) => {
            let children = composite
                .children
                .iter()
                .map(|child| controlled_instruction(child, control))
                .collect::<AutoResult<Vec<_>>>()?;
            InstructionKind::Composite(Composite {
                name: format!("{CONTROLLED_PREFIX}{}", composite.name),
                params: composite.params.clone(),
                children,
            })
        }

        InstructionKind::Annotation(text) => {
            return Ok(Instruction::annotation(format!("{CONTROL_MARKER}{text}")));
        }

        InstructionKind::Barrier => InstructionKind::Barrier,

        InstructionKind::Measure | InstructionKind::Reset => {
            return Err(AutoError::UnsupportedControl(instruction.name().to_string()));
        }
    };

    let mut qubits = Vec::with_capacity(instruction.qubits.len() + 1);
    qubits.push(control);
    qubits.extend_from_slice(&instruction.qubits);

    Ok(Instruction {
        kind,
        qubits,
        clbits: vec![],
    })
}
