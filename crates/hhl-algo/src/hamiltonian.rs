//! Controlled simulation of the 4x4 Hamiltonian.
//!
//! `hamiltonian4x4` builds one controlled application of `U^(2^i)` from five
//! rotation parameters. Powers are not obtained by repetition: each power
//! has its own calibrated parameter set (see [`PowerCalibration`]).

use hhl_auto::inverse_instruction;
use hhl_ir::{
    CompositeGate, GateContainer, Instruction, ParameterExpression, QuantumView, QubitId,
    StandardGate,
};

use crate::calibration::{HamiltonianParams, PowerCalibration};
use crate::error::{AlgoError, AlgoResult};
use crate::qpe::ControlledPowers;

/// Number of qubits the Hamiltonian acts on.
pub const HAMILTONIAN_TARGETS: usize = 2;

/// Build a controlled RZZ: a global phase `θ` on `target` when `ctrl` is set.
pub fn crzz<C>(
    parent: &C,
    theta: impl Into<ParameterExpression>,
    ctrl: QubitId,
    target: QubitId,
) -> AlgoResult<Instruction>
where
    C: GateContainer + ?Sized,
{
    let theta = theta.into();
    let mut gate = CompositeGate::with_qubits(parent, "CRZZ", [ctrl, target])
        .with_params(vec![theta.clone()]);
    gate.comment("c-RZZ")?;
    gate.cp(theta.clone(), ctrl, target)?
        .cx(ctrl, target)?
        .cp(theta, ctrl, target)?
        .cx(ctrl, target)?;
    Ok(gate.build())
}

/// Build a controlled RX.
///
/// The `cu(θ, π/2, 3π/2)` leaves an extra phase that a `crzz(π)` removes.
pub fn crx<C>(
    parent: &C,
    theta: impl Into<ParameterExpression>,
    ctrl: QubitId,
    target: QubitId,
) -> AlgoResult<Instruction>
where
    C: GateContainer + ?Sized,
{
    let theta = theta.into();
    let mut gate = CompositeGate::with_qubits(parent, "CRX", [ctrl, target])
        .with_params(vec![theta.clone()]);
    gate.comment("c-RX")?;
    gate.cu(
        theta,
        ParameterExpression::pi_over_power_of_two(1),
        ParameterExpression::constant(3.0) * ParameterExpression::pi_over_power_of_two(1),
        ctrl,
        target,
    )?;
    let phase_fix = crzz(&gate, ParameterExpression::pi(), ctrl, target)?;
    gate.attach(phase_fix)?;
    Ok(gate.build())
}

/// Build the controlled 4x4 Hamiltonian simulation on `targets`.
pub fn hamiltonian4x4<C>(
    parent: &C,
    ctrl: QubitId,
    targets: [QubitId; HAMILTONIAN_TARGETS],
    params: &HamiltonianParams,
) -> AlgoResult<Instruction>
where
    C: GateContainer + ?Sized,
{
    let [t0, t1] = targets;
    let mut gate = CompositeGate::with_qubits(parent, "Hamiltonian4x4", [ctrl, t0, t1]);

    gate.comment("[HS] Start.")?;
    gate.ccz(ctrl, t0, t1)?;

    let stage = crx(&gate, params[0], ctrl, t1)?;
    gate.attach(stage)?;
    let csx = Instruction::two_qubit_gate(StandardGate::CSX, ctrl, t1);
    gate.attach(inverse_instruction(&csx)?)?;
    let stage = crzz(&gate, params[1], ctrl, t1)?;
    gate.attach(stage)?;

    let stage = crx(&gate, params[2], ctrl, t0)?;
    gate.attach(stage)?;
    let stage = crzz(&gate, params[3], ctrl, t0)?;
    gate.attach(stage)?;

    gate.ccx(ctrl, t0, t1)?;
    let stage = crx(&gate, params[4], ctrl, t0)?;
    gate.attach(stage)?;
    gate.ccx(ctrl, t0, t1)?;

    gate.ccz(ctrl, t0, t1)?;
    gate.comment("[HS] End.")?;
    Ok(gate.build())
}

/// Controlled powers of the 4x4 Hamiltonian read from a calibration table.
#[derive(Debug, Clone, Copy)]
pub struct CalibratedHamiltonianPowers<'a> {
    calibration: &'a PowerCalibration,
}

impl<'a> CalibratedHamiltonianPowers<'a> {
    /// Use the given calibration table.
    pub fn new(calibration: &'a PowerCalibration) -> Self {
        Self { calibration }
    }
}

impl ControlledPowers for CalibratedHamiltonianPowers<'_> {
    fn apply_power(
        &mut self,
        exponent: usize,
        container: &mut CompositeGate,
        control: QubitId,
        target: &QuantumView,
    ) -> AlgoResult<()> {
        if target.len() != HAMILTONIAN_TARGETS {
            return Err(AlgoError::TargetSize {
                expected: HAMILTONIAN_TARGETS,
                got: target.len(),
            });
        }
        let params = self.calibration.for_exponent(exponent)?;
        let gate = hamiltonian4x4(&*container, control, [target.get(0)?, target.get(1)?], params)?;
        container.attach(gate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::BASE_PARAMS;
    use hhl_ir::Circuit;

    #[test]
    fn test_crzz_structure() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);
        let gate = crzz(&circuit, 0.5, q.get(0).unwrap(), q.get(1).unwrap()).unwrap();

        let names: Vec<_> = gate.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["comment", "cp", "cx", "cp", "cx"]);
        assert_eq!(gate.children()[0].annotation_text(), Some("c-RZZ"));
        assert_eq!(gate.params()[0].value(), 0.5);
    }

    #[test]
    fn test_crx_structure() {
        let mut circuit = Circuit::new("test");
        let q = circuit.add_qreg("q", 2);
        let gate = crx(&circuit, 0.25, q.get(0).unwrap(), q.get(1).unwrap()).unwrap();

        let names: Vec<_> = gate.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["comment", "cu", "CRZZ"]);
        let lambda = gate.children()[1].params()[2].value();
        assert!((lambda - 1.5 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_hamiltonian_stages() {
        let mut circuit = Circuit::new("test");
        let ctrl = circuit.add_qreg("ctrl", 1);
        let b = circuit.add_qreg("b", 2);
        let gate = hamiltonian4x4(
            &circuit,
            ctrl.get(0).unwrap(),
            [b.get(0).unwrap(), b.get(1).unwrap()],
            &BASE_PARAMS,
        )
        .unwrap();

        let names: Vec<_> = gate.children().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "comment", "ccz", "CRX", "csxdg", "CRZZ", "CRX", "CRZZ", "ccx", "CRX", "ccx",
                "ccz", "comment"
            ]
        );
        assert_eq!(gate.qubits.len(), 3);
        circuit.attach(gate).unwrap();
    }

    #[test]
    fn test_calibrated_powers_reject_wrong_target() {
        let mut circuit = Circuit::new("test");
        let ctrl = circuit.add_qreg("ctrl", 1);
        let wide = circuit.add_qreg("wide", 3);
        let calibration = PowerCalibration::default();
        let mut powers = CalibratedHamiltonianPowers::new(&calibration);

        let mut stage = CompositeGate::new(&circuit, "stage", &ctrl);
        let err = powers
            .apply_power(0, &mut stage, ctrl.get(0).unwrap(), &wide)
            .unwrap_err();
        assert!(matches!(err, AlgoError::TargetSize { expected: 2, got: 3 }));

        let b = wide.range(0..2).unwrap();
        let err = powers
            .apply_power(5, &mut stage, ctrl.get(0).unwrap(), &b)
            .unwrap_err();
        assert!(matches!(err, AlgoError::UnimplementedPower(32)));
        assert!(stage.instructions().is_empty());
    }
}
