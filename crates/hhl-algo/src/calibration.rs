//! Calibrated parameters for powers of the 4x4 Hamiltonian.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AlgoError, AlgoResult};

/// Parameters of one Hamiltonian-simulation circuit.
pub type HamiltonianParams = [f64; 5];

/// Parameters of `U` itself.
pub const BASE_PARAMS: HamiltonianParams =
    [0.19634953, 0.37900987, 0.9817477, 1.87900984, 0.58904862];

const CALIBRATED: [(u64, HamiltonianParams); 4] = [
    (1, BASE_PARAMS),
    (2, [1.9634954, 1.11532058, 1.9634954, 2.61532069, 1.17809726]),
    (4, [-0.78539816, 1.01714584, 3.92699082, 2.51714589, 2.35619449]),
    (
        8,
        [-9.01416169e-09, -0.750000046, 1.57079632, 0.750000039, -1.57079633],
    ),
];

/// Lookup from a power `2^i` of the Hamiltonian to the parameters that
/// implement `U^(2^i)` with a single circuit.
///
/// Serialized as a JSON object keyed by power:
///
/// ```json
/// { "1": [0.19634953, 0.37900987, 0.9817477, 1.87900984, 0.58904862] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PowerCalibration {
    entries: BTreeMap<u64, HamiltonianParams>,
}

impl PowerCalibration {
    /// Create an empty calibration.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Parse a calibration from JSON text.
    pub fn from_json(json: &str) -> AlgoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> AlgoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add or replace the parameters for a power.
    #[must_use]
    pub fn with_power(mut self, power: u64, params: HamiltonianParams) -> Self {
        self.entries.insert(power, params);
        self
    }

    /// Get the parameters for a power.
    pub fn get(&self, power: u64) -> AlgoResult<&HamiltonianParams> {
        self.entries
            .get(&power)
            .ok_or(AlgoError::UnimplementedPower(power))
    }

    /// Get the parameters for the power `2^exponent`.
    pub fn for_exponent(&self, exponent: usize) -> AlgoResult<&HamiltonianParams> {
        let power = u32::try_from(exponent)
            .ok()
            .and_then(|e| 1u64.checked_shl(e))
            .ok_or(AlgoError::PowerOverflow(exponent))?;
        self.get(power)
    }

    /// Iterate over the calibrated powers in increasing order.
    pub fn powers(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }

    /// Number of calibrated powers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no power is calibrated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PowerCalibration {
    /// The calibrated powers 1, 2, 4 and 8.
    fn default() -> Self {
        Self {
            entries: CALIBRATED.into_iter().collect(),
        }
    }
}
