//! Quantum Fourier transform and the conjugation pattern built on it.
//!
//! The transform reverses the bit order of the register it acts on. Rather
//! than undoing that with swap gates, the helpers here flip the orientation
//! of the caller's view: right after the forward transform, and right
//! before the inverse one. Indexing the view therefore keeps addressing the
//! same logical bits on both sides of a conjugation.

use hhl_auto::inverse_instruction;
use hhl_ir::{
    CompositeGate, GateContainer, Instruction, ParameterExpression, QuantumView,
};
use tracing::debug;

use crate::error::AlgoResult;

/// Name of the approximate transform composite.
pub const APPROXIMATE_QFT: &str = "ApproximateQFT";

/// Name of the exact transform composite.
pub const QFT: &str = "QFT";

/// Default approximation order for a register of `n` qubits:
/// `ceil(log2(n)) + 2`.
///
/// Controlled phases below `π / 2^order` are dropped, which bounds the
/// introduced error while keeping the gate count near-linear.
pub fn default_order(n: usize) -> usize {
    if n <= 1 {
        return 2;
    }
    let bits = usize::BITS - (n - 1).leading_zeros();
    bits as usize + 2
}

/// Build an approximate QFT over `view`.
///
/// Qubit `i` receives controlled phases `π / 2^(i-j)` from every `j` with
/// `i - order < j < i`, then a Hadamard. `None` and zero both select
/// [`default_order`]. The composite is returned unattached.
pub fn approximate_qft<C>(
    parent: &C,
    view: &QuantumView,
    order: Option<usize>,
) -> AlgoResult<Instruction>
where
    C: GateContainer + ?Sized,
{
    let order = match order {
        Some(order) if order > 0 => order,
        _ => default_order(view.len()),
    };
    build_qft(parent, APPROXIMATE_QFT, view, order)
}

/// Build the exact QFT over `view`.
pub fn exact_qft<C>(parent: &C, view: &QuantumView) -> AlgoResult<Instruction>
where
    C: GateContainer + ?Sized,
{
    build_qft(parent, QFT, view, view.len())
}

fn build_qft<C>(
    parent: &C,
    name: &str,
    view: &QuantumView,
    order: usize,
) -> AlgoResult<Instruction>
where
    C: GateContainer + ?Sized,
{
    let n = view.len();
    debug!(name, qubits = n, order, "building QFT");

    let order_param = ParameterExpression::constant(order as f64);
    let mut qft = CompositeGate::new(parent, name, view).with_params(vec![order_param]);
    for i in 0..n {
        let target = view.get(i)?;
        for j in (i + 1).saturating_sub(order)..i {
            let distance = u32::try_from(i - j).unwrap_or(u32::MAX);
            qft.cp(
                ParameterExpression::pi_over_power_of_two(distance),
                target,
                view.get(j)?,
            )?;
        }
        qft.h(target)?;
    }
    Ok(qft.build())
}

fn qft_for<C>(parent: &C, view: &QuantumView, order: Option<usize>) -> AlgoResult<Instruction>
where
    C: GateContainer + ?Sized,
{
    match order {
        Some(order) if order < view.len() => approximate_qft(parent, view, Some(order)),
        _ => exact_qft(parent, view),
    }
}

/// Attach a QFT over `view` and flip the view's orientation.
///
/// `None`, or an order of at least the register size, gives the exact
/// transform. The view is only flipped once the transform is attached.
pub fn attach_qft<'c, C>(
    container: &'c mut C,
    view: &mut QuantumView,
    order: Option<usize>,
) -> AlgoResult<&'c Instruction>
where
    C: GateContainer + ?Sized,
{
    let qft = qft_for(&*container, view, order)?;
    let attached = container.attach(qft)?;
    view.reverse();
    Ok(attached)
}

/// Flip the view's orientation and attach an inverse QFT over it.
///
/// On failure the flip is undone, so the view is left as it was given.
pub fn attach_inverse_qft<'c, C>(
    container: &'c mut C,
    view: &mut QuantumView,
    order: Option<usize>,
) -> AlgoResult<&'c Instruction>
where
    C: GateContainer + ?Sized,
{
    view.reverse();
    let inverse = match qft_for(&*container, view, order)
        .and_then(|qft| Ok(inverse_instruction(&qft)?))
    {
        Ok(inverse) => inverse,
        Err(err) => {
            view.reverse();
            return Err(err);
        }
    };
    match container.attach(inverse) {
        Ok(attached) => Ok(attached),
        Err(err) => {
            view.reverse();
            Err(err.into())
        }
    }
}

/// Apply `op` to `view` in the Fourier basis.
///
/// Attaches the transform, calls `op` with the flipped view, then attaches
/// the inverse transform. The view ends in the orientation it started in.
pub fn apply_in_fourier_basis<C, F>(
    container: &mut C,
    view: &mut QuantumView,
    order: Option<usize>,
    op: F,
) -> AlgoResult<()>
where
    C: GateContainer + ?Sized,
    F: FnOnce(&mut C, &QuantumView) -> AlgoResult<()>,
{
    attach_qft(container, view, order)?;
    op(container, view)?;
    attach_inverse_qft(container, view, order)?;
    Ok(())
}

/// Physically reverse the bit order of `view` with swap gates.
pub fn swap_bit_order<C>(container: &mut C, view: &QuantumView) -> AlgoResult<()>
where
    C: GateContainer + ?Sized,
{
    let n = view.len();
    for i in 0..n / 2 {
        container.swap(view.get(i)?, view.get(n - 1 - i)?)?;
    }
    Ok(())
}
