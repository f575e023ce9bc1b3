//! Structural inversion of instruction trees.

use hhl_ir::gate::{CustomGate, CustomInverse, Gate, GateKind, StandardGate};
use hhl_ir::instruction::{Composite, Instruction, InstructionKind};
use hhl_ir::parameter::ParameterExpression;
use tracing::debug;

use crate::error::{AutoError, AutoResult};

/// Suffix marking an inverted composite.
pub const DAGGER_SUFFIX: &str = "_dg";

/// Compute the inverse of a standard gate.
///
/// For unitary gates U, this returns U† (U-dagger).
///
/// # Examples
///
/// - H† = H (Hadamard is self-inverse)
/// - S† = Sdg
/// - Rx(θ)† = Rx(-θ)
/// - U(θ, φ, λ)† = U(-θ, -λ, -φ)
pub fn inverse_gate(gate: &StandardGate) -> StandardGate {
    match gate {
        // Self-inverse gates (Hermitian)
        StandardGate::I
        | StandardGate::X
        | StandardGate::Y
        | StandardGate::Z
        | StandardGate::H
        | StandardGate::CX
        | StandardGate::CY
        | StandardGate::CZ
        | StandardGate::CH
        | StandardGate::Swap
        | StandardGate::CCX
        | StandardGate::CCZ
        | StandardGate::CSwap => gate.clone(),

        // Adjoint pairs
        StandardGate::S => StandardGate::Sdg,
        StandardGate::Sdg => StandardGate::S,
        StandardGate::T => StandardGate::Tdg,
        StandardGate::Tdg => StandardGate::T,
        StandardGate::SX => StandardGate::SXdg,
        StandardGate::SXdg => StandardGate::SX,
        StandardGate::CSX => StandardGate::CSXdg,
        StandardGate::CSXdg => StandardGate::CSX,

        // Rotations: negate the angle
        StandardGate::Rx(theta) => StandardGate::Rx(theta.negated()),
        StandardGate::Ry(theta) => StandardGate::Ry(theta.negated()),
        StandardGate::Rz(theta) => StandardGate::Rz(theta.negated()),
        StandardGate::P(lambda) => StandardGate::P(lambda.negated()),
        StandardGate::CRx(theta) => StandardGate::CRx(theta.negated()),
        StandardGate::CRy(theta) => StandardGate::CRy(theta.negated()),
        StandardGate::CRz(theta) => StandardGate::CRz(theta.negated()),
        StandardGate::CP(lambda) => StandardGate::CP(lambda.negated()),

        StandardGate::U(theta, phi, lambda) => {
            let (theta, phi, lambda) = inverse_euler(theta, phi, lambda);
            StandardGate::U(theta, phi, lambda)
        }
        StandardGate::CU(theta, phi, lambda) => {
            let (theta, phi, lambda) = inverse_euler(theta, phi, lambda);
            StandardGate::CU(theta, phi, lambda)
        }
    }
}

fn inverse_euler(
    theta: &ParameterExpression,
    phi: &ParameterExpression,
    lambda: &ParameterExpression,
) -> (ParameterExpression, ParameterExpression, ParameterExpression) {
    (theta.negated(), lambda.negated(), phi.negated())
}

/// Compute the inverse of a custom gate from its declared rule.
pub fn inverse_custom_gate(gate: &CustomGate) -> AutoResult<CustomGate> {
    match &gate.inverse {
        CustomInverse::SelfInverse => Ok(gate.clone()),
        CustomInverse::Replacement(replacement) => {
            // The replacement's own inverse is the original gate.
            let mut inverse = (**replacement).clone();
            let mut original = gate.clone();
            original.inverse = CustomInverse::Undefined;
            inverse.inverse = CustomInverse::Replacement(Box::new(original));
            Ok(inverse)
        }
        CustomInverse::Undefined => Err(AutoError::UnsupportedInverse(gate.name.clone())),
    }
}

/// Compute the inverse of an instruction.
///
/// A composite is inverted by reversing its children and inverting each of
/// them; its operands and parameters are kept and its name gains or loses
/// the [`DAGGER_SUFFIX`]. Annotations and barriers are their own inverse.
/// Measurement and reset fail with [`AutoError::UnsupportedInverse`], and so
/// does any tree containing them.
pub fn inverse_instruction(instruction: &Instruction) -> AutoResult<Instruction> {
    let kind = match &instruction.kind {
        InstructionKind::Gate(gate) => {
            let kind = match &gate.kind {
                GateKind::Standard(g) => GateKind::Standard(inverse_gate(g)),
                GateKind::Custom(g) => GateKind::Custom(inverse_custom_gate(g)?),
            };
            InstructionKind::Gate(Gate { kind })
        }

        InstructionKind::Composite(composite) => {
            let children = composite
                .children
                .iter()
                .rev()
                .map(inverse_instruction)
                .collect::<AutoResult<Vec<_>>>()?;
            debug!(
                name = %composite.name,
                children = children.len(),
                "inverted composite"
            );
            InstructionKind::Composite(Composite {
                name: dagger_name(&composite.name),
                params: composite.params.clone(),
                children,
            })
        }

        InstructionKind::Annotation(_) | InstructionKind::Barrier => instruction.kind.clone(),

        InstructionKind::Measure => return Err(AutoError::UnsupportedInverse("measure".into())),

        InstructionKind::Reset => return Err(AutoError::UnsupportedInverse("reset".into())),
    };

    Ok(Instruction {
        kind,
        qubits: instruction.qubits.clone(),
        clbits: instruction.clbits.clone(),
    })
}

/// Toggle the dagger suffix of a composite name.
pub fn dagger_name(name: &str) -> String {
    match name.strip_suffix(DAGGER_SUFFIX) {
        Some(base) => base.to_string(),
        None => format!("{name}{DAGGER_SUFFIX}"),
    }
}

/// Check if a gate is self-inverse (Hermitian).
pub fn is_self_inverse(gate: &StandardGate) -> bool {
    matches!(
        gate,
        StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::CCX
            | StandardGate::CCZ
            | StandardGate::CSwap
    )
}
