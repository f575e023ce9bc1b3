//! HHL circuit configuration.

use serde::{Deserialize, Serialize};

use crate::calibration::PowerCalibration;
use crate::error::{AlgoError, AlgoResult};

/// Smallest clock register the eigenvalue inversion can address.
pub const MIN_CLOCK_SIZE: usize = 3;

/// Parameters of the HHL 4x4 circuit.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HhlConfig {
    /// `r` in the controlled-rotation angles `2^(n - i - r) π`.
    pub rotation_exponent: i32,
    /// QFT approximation order; `None` selects the exact transform.
    pub qft_order: Option<usize>,
    /// Number of clock (phase) qubits.
    pub clock_size: usize,
    /// Parameters for the controlled Hamiltonian powers.
    pub calibration: PowerCalibration,
    /// Whether to measure the ancilla at the end.
    pub measure: bool,
}

impl Default for HhlConfig {
    fn default() -> Self {
        Self {
            rotation_exponent: 6,
            qft_order: None,
            clock_size: 4,
            calibration: PowerCalibration::default(),
            measure: true,
        }
    }
}

impl HhlConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> AlgoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values describe a buildable circuit.
    pub fn validate(&self) -> AlgoResult<()> {
        if self.clock_size < MIN_CLOCK_SIZE {
            return Err(AlgoError::InvalidConfig(format!(
                "clock_size must be at least {MIN_CLOCK_SIZE}, got {}",
                self.clock_size
            )));
        }
        if i32::try_from(self.clock_size).is_err() {
            return Err(AlgoError::InvalidConfig(format!(
                "clock_size {} is too large",
                self.clock_size
            )));
        }
        for i in [0, self.clock_size - 1] {
            match self.rotation_power(i) {
                Some(power) if power.unsigned_abs() < f64::MAX_EXP as u32 => {}
                _ => {
                    return Err(AlgoError::InvalidConfig(format!(
                        "rotation_exponent {} gives an unrepresentable angle",
                        self.rotation_exponent
                    )));
                }
            }
        }
        Ok(())
    }

    /// Power of two in the angle `2^(n - i - r) π` of the `i`-th rotation.
    ///
    /// `None` when the exponent does not fit an `i32`.
    pub fn rotation_power(&self, i: usize) -> Option<i32> {
        let n = i32::try_from(self.clock_size).ok()?;
        let i = i32::try_from(i).ok()?;
        n.checked_sub(i)?.checked_sub(self.rotation_exponent)
    }
}
