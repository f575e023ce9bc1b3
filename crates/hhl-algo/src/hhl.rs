//! The HHL circuit for a fixed 4x4 system.
//!
//! The circuit solves `A x = b` for the 4x4 matrix whose controlled
//! evolution is provided by [`hamiltonian4x4`](crate::hamiltonian4x4). It
//! has four parts, each framed by `[4x4]` annotations:
//!
//! 1. phase estimation of `b` into the clock register,
//! 2. a rotation of the ancilla controlled by the (inverted) eigenvalues,
//! 3. the inverse phase estimation,
//! 4. an optional measurement of the ancilla.

use hhl_auto::inverse_instruction;
use hhl_ir::{
    Circuit, ClassicalRegister, GateContainer, ParameterExpression, QuantumView, StandardGate,
};
use tracing::{info, instrument};

use crate::config::HhlConfig;
use crate::error::{AlgoError, AlgoResult};
use crate::hamiltonian::{CalibratedHamiltonianPowers, HAMILTONIAN_TARGETS};
use crate::qpe::attach_phase_estimation;

/// An assembled HHL circuit and the views over its registers.
#[derive(Debug, Clone)]
pub struct HhlCircuit {
    /// The complete circuit.
    pub circuit: Circuit,
    /// The rotated ancilla qubit.
    pub ancilla: QuantumView,
    /// The clock register, as oriented after phase estimation.
    pub clock: QuantumView,
    /// The register holding `b` and, after post-selection, `x`.
    pub b: QuantumView,
    /// Classical bit receiving the ancilla measurement.
    pub result: ClassicalRegister,
}

/// `2^exponent · π`, kept as `π / 2^k` when the exponent is not positive.
fn pi_times_power_of_two(exponent: i32) -> ParameterExpression {
    if exponent <= 0 {
        ParameterExpression::pi_over_power_of_two(exponent.unsigned_abs())
    } else {
        ParameterExpression::pi() * ParameterExpression::constant(2f64.powi(exponent))
    }
}

/// Build the HHL 4x4 circuit.
#[instrument(skip(config), fields(clock_size = config.clock_size, r = config.rotation_exponent))]
pub fn build_hhl4x4(config: &HhlConfig) -> AlgoResult<HhlCircuit> {
    config.validate()?;
    let n = config.clock_size;

    let mut circuit = Circuit::new("hhl4x4");
    let ancilla = circuit.add_qreg("ancilla", 1);
    let mut clock = circuit.add_qreg("clock", n);
    let b = circuit.add_qreg("b", HAMILTONIAN_TARGETS);
    let result = circuit.add_creg("result", 1);

    // 0. Initialise b
    circuit.comment("[4x4] Initialising b.")?;
    circuit.layer(StandardGate::H, &b)?;
    circuit.comment("[4x4] Initialisation done!")?;

    // 1. Quantum phase estimation
    circuit.comment("[4x4] 1. Quantum phase estimation.")?;
    let mut powers = CalibratedHamiltonianPowers::new(&config.calibration);
    let qpe = attach_phase_estimation(&mut circuit, &mut clock, &b, &mut powers, config.qft_order)?
        .clone();

    // 2. Eigenvalue-controlled rotation of the ancilla
    circuit.comment("[4x4] Inverting computed eigenvalues.")?;
    circuit.swap(clock.get(1)?, clock.get(2)?)?;

    circuit.comment("[4x4] 2. Phase rotation.")?;
    let target = ancilla.get(0)?;
    for i in 0..n {
        let exponent = config.rotation_power(i).ok_or_else(|| {
            AlgoError::InvalidConfig(format!(
                "rotation_exponent {} overflows",
                config.rotation_exponent
            ))
        })?;
        circuit.comment("CRY")?;
        circuit.cu(
            pi_times_power_of_two(exponent),
            0,
            0,
            clock.get(n - 1 - i)?,
            target,
        )?;
    }

    circuit.comment("Inverting the inversion of eigenvalues.")?;
    circuit.swap(clock.get(1)?, clock.get(2)?)?;

    // 3. Uncompute the phase estimation
    circuit.comment("[4x4] 3. Inverting quantum phase estimation.")?;
    circuit.attach(inverse_instruction(&qpe)?)?;

    // 4. Measure the ancilla
    if config.measure {
        circuit.comment("[4x4] 4. Measurement.")?;
        circuit.measure(target, result.clbit(0)?)?;
    }

    info!(
        ops = circuit.num_ops(),
        leaves = circuit.num_leaves(),
        "built HHL circuit"
    );

    Ok(HhlCircuit {
        circuit,
        ancilla,
        clock,
        b,
        result,
    })
}
