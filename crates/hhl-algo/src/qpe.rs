//! Quantum phase estimation.

use hhl_ir::{
    CompositeGate, GateContainer, Instruction, ParameterExpression, QuantumView, QubitId,
    StandardGate,
};
use tracing::debug;

use crate::error::AlgoResult;
use crate::qft::attach_inverse_qft;

/// Name of the phase estimation composite.
pub const QPE: &str = "QPE";

/// Name of each controlled-power stage.
pub const POWER_STAGE: &str = "ControlledPower";

/// Applies controlled powers `U^(2^exponent)` of the estimated operator.
///
/// Implementations attach to `container` the operation `U^(2^exponent)` on
/// `target`, controlled by `control`. Closures with the matching signature
/// implement this trait.
pub trait ControlledPowers {
    /// Attach the controlled `2^exponent`-th power.
    fn apply_power(
        &mut self,
        exponent: usize,
        container: &mut CompositeGate,
        control: QubitId,
        target: &QuantumView,
    ) -> AlgoResult<()>;
}

impl<F> ControlledPowers for F
where
    F: FnMut(usize, &mut CompositeGate, QubitId, &QuantumView) -> AlgoResult<()>,
{
    fn apply_power(
        &mut self,
        exponent: usize,
        container: &mut CompositeGate,
        control: QubitId,
        target: &QuantumView,
    ) -> AlgoResult<()> {
        self(exponent, container, control, target)
    }
}

/// Build a phase estimation composite over `phase` and `eigen`.
///
/// The composite acts on `phase ++ eigen` and holds, besides annotations,
/// `n + 2` stages for a phase register of `n` qubits: a Hadamard layer on
/// `phase`, one [`POWER_STAGE`] per exponent `i` controlled by
/// `phase[n - 1 - i]`, and the inverse QFT on `phase`. `order` selects the
/// QFT approximation as in [`attach_inverse_qft`].
///
/// The inverse QFT leaves `phase` flipped. Since the composite is not
/// attached yet, the flipped view is returned next to it rather than
/// written back.
pub fn phase_estimation<C, P>(
    parent: &C,
    phase: &QuantumView,
    eigen: &QuantumView,
    powers: &mut P,
    order: Option<usize>,
) -> AlgoResult<(Instruction, QuantumView)>
where
    C: GateContainer + ?Sized,
    P: ControlledPowers + ?Sized,
{
    let n = phase.len();
    debug!(phase = n, eigen = eigen.len(), ?order, "building phase estimation");

    let operands = QuantumView::bond([phase, eigen]).qubits();
    // Reject bad operands before any callback runs.
    parent
        .registers()
        .validate(&Instruction::composite(QPE, vec![], operands.clone(), vec![]))?;

    let mut qpe = CompositeGate::with_qubits(parent, QPE, operands);
    let mut phase = phase.clone();

    qpe.comment("[QPE] Starting block.")?;
    qpe.comment("[QPE] 1. Hadamard gate.")?;
    qpe.layer(StandardGate::H, &phase)?;

    qpe.comment("[QPE] 2. Phase estimation.")?;
    for i in 0..n {
        qpe.comment(format!("[QPE] 2.{i}. Start of step {i} of phase estimation."))?;

        let control = phase.get(n - 1 - i)?;
        let mut stage = CompositeGate::with_qubits(
            &qpe,
            POWER_STAGE,
            std::iter::once(control).chain(eigen.iter()),
        )
        .with_params(vec![ParameterExpression::constant(i as f64)]);
        powers.apply_power(i, &mut stage, control, eigen)?;
        qpe.attach(stage.build())?;

        qpe.comment(format!("[QPE] 2.{i}. End of step {i} of phase estimation."))?;
    }

    qpe.comment("[QPE] 3. Inverse QFT.")?;
    attach_inverse_qft(&mut qpe, &mut phase, order)?;
    qpe.comment("[QPE] End block.")?;

    Ok((qpe.build(), phase))
}

/// Attach a phase estimation composite and flip `phase`.
///
/// Nothing is attached and `phase` is untouched if building or attaching
/// fails.
pub fn attach_phase_estimation<'c, C, P>(
    container: &'c mut C,
    phase: &mut QuantumView,
    eigen: &QuantumView,
    powers: &mut P,
    order: Option<usize>,
) -> AlgoResult<&'c Instruction>
where
    C: GateContainer + ?Sized,
    P: ControlledPowers + ?Sized,
{
    let (qpe, flipped) = phase_estimation(&*container, phase, eigen, powers, order)?;
    let attached = container.attach(qpe)?;
    *phase = flipped;
    Ok(attached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlgoError;
    use hhl_ir::{Circuit, IrError};

    #[test]
    fn test_stage_count_and_order() {
        let mut circuit = Circuit::new("test");
        let mut phase = circuit.add_qreg("phase", 4);
        let eigen = circuit.add_qreg("eigen", 2);

        let mut powers = |_: usize,
                          stage: &mut CompositeGate,
                          control: QubitId,
                          target: &QuantumView|
         -> AlgoResult<()> {
            stage.cx(control, target.get(0)?)?;
            Ok(())
        };
        let qpe = attach_phase_estimation(&mut circuit, &mut phase, &eigen, &mut powers, None)
            .unwrap()
            .clone();

        let stages: Vec<_> = qpe
            .children()
            .iter()
            .filter(|c| !c.is_annotation())
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(stages.len(), 4 + 2);
        assert_eq!(stages[0], "h_layer");
        assert!(stages[1..5].iter().all(|s| s == POWER_STAGE));
        assert_eq!(stages[5], "QFT_dg");
        assert_eq!(qpe.qubits.len(), 6);
        assert!(phase.is_reversed());
    }

    #[test]
    fn test_callback_receives_reversed_controls() {
        let mut circuit = Circuit::new("test");
        let mut phase = circuit.add_qreg("phase", 3);
        let eigen = circuit.add_qreg("eigen", 1);
        let expected: Vec<_> = (0..3).map(|i| phase.get(2 - i).unwrap()).collect();

        let mut seen = vec![];
        let mut powers = |i: usize,
                          _: &mut CompositeGate,
                          control: QubitId,
                          target: &QuantumView|
         -> AlgoResult<()> {
            assert_eq!(target.len(), 1);
            seen.push((i, control));
            Ok(())
        };
        attach_phase_estimation(&mut circuit, &mut phase, &eigen, &mut powers, None).unwrap();

        let expected: Vec<_> = expected.into_iter().enumerate().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_failing_callback_leaves_circuit_untouched() {
        let mut circuit = Circuit::new("test");
        let mut phase = circuit.add_qreg("phase", 2);
        let eigen = circuit.add_qreg("eigen", 2);

        let mut powers = |i: usize,
                          _: &mut CompositeGate,
                          _: QubitId,
                          _: &QuantumView|
         -> AlgoResult<()> {
            if i == 1 {
                return Err(AlgoError::UnimplementedPower(2));
            }
            Ok(())
        };
        let err = attach_phase_estimation(&mut circuit, &mut phase, &eigen, &mut powers, None)
            .unwrap_err();

        assert!(matches!(err, AlgoError::UnimplementedPower(2)));
        assert_eq!(circuit.num_ops(), 0);
        assert!(!phase.is_reversed());
    }

    #[test]
    fn test_overlapping_registers_rejected_before_callbacks() {
        let mut circuit = Circuit::new("test");
        let mut phase = circuit.add_qreg("phase", 2);
        let eigen = phase.range(1..2).unwrap();

        let mut calls = 0;
        let mut powers = |_: usize,
                          _: &mut CompositeGate,
                          _: QubitId,
                          _: &QuantumView|
         -> AlgoResult<()> {
            calls += 1;
            Ok(())
        };
        let err = attach_phase_estimation(&mut circuit, &mut phase, &eigen, &mut powers, None)
            .unwrap_err();

        assert!(matches!(err, AlgoError::Ir(IrError::DuplicateOperand { .. })));
        assert_eq!(calls, 0);
    }
}
