//! Conjugation, phase estimation and the HHL 4x4 circuit.
//!
//! This crate assembles algorithm-level composites on top of `hhl-ir`:
//!
//! - **QFT**: [`approximate_qft`], [`exact_qft`] and the conjugation
//!   helpers [`attach_qft`], [`attach_inverse_qft`] and
//!   [`apply_in_fourier_basis`], which keep the caller's view orientation
//!   in step with the bit reversal the transform performs
//! - **Phase estimation**: [`phase_estimation`] driven by a
//!   [`ControlledPowers`] callback
//! - **Hamiltonian simulation**: [`crzz`], [`crx`] and [`hamiltonian4x4`],
//!   with [`CalibratedHamiltonianPowers`] reading a [`PowerCalibration`]
//! - **HHL**: [`build_hhl4x4`] configured by [`HhlConfig`]
//!
//! # Example
//!
//! ```rust
//! use hhl_algo::{HhlConfig, build_hhl4x4};
//!
//! let config = HhlConfig::from_json(r#"{ "measure": false }"#).unwrap();
//! let hhl = build_hhl4x4(&config).unwrap();
//!
//! assert_eq!(hhl.circuit.num_qubits(), 7);
//! assert!(hhl.clock.is_reversed());
//! ```

pub mod calibration;
pub mod config;
pub mod error;
pub mod hamiltonian;
pub mod hhl;
pub mod qft;
pub mod qpe;

pub use calibration::{BASE_PARAMS, HamiltonianParams, PowerCalibration};
pub use config::HhlConfig;
pub use error::{AlgoError, AlgoResult};
pub use hamiltonian::{CalibratedHamiltonianPowers, crx, crzz, hamiltonian4x4};
pub use hhl::{HhlCircuit, build_hhl4x4};
pub use qft::{
    apply_in_fourier_basis, approximate_qft, attach_inverse_qft, attach_qft, default_order,
    exact_qft, swap_bit_order,
};
pub use qpe::{ControlledPowers, attach_phase_estimation, phase_estimation};
