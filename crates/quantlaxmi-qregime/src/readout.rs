//! Probability extraction from fixed basis states.
//!
//! Index convention: `index = b0 + 2·b1 + 4·b2 + 8·b3`.

use crate::circuit::REGIME_QUBITS;
use crate::error::{QuantumRegimeError, Result};
use crate::statevector::StateVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Basis index assigned to each regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutTable {
    /// |1111⟩
    pub bull: usize,
    /// |0000⟩
    pub bear: usize,
    /// q0 = q1 = 1, q2 = q3 = 0
    pub shock: usize,
}

impl ReadoutTable {
    /// Production table. Kept verbatim; not derived from the encoding.
    pub const DEFAULT: ReadoutTable = ReadoutTable {
        bull: 15,
        bear: 0,
        shock: 3,
    };

    /// (label, index) pairs in report order.
    pub fn entries(&self) -> [(&'static str, usize); 3] {
        [("bull", self.bull), ("bear", self.bear), ("shock", self.shock)]
    }
}

impl Default for ReadoutTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Named regime probabilities, each `|amp[index]|²` for its table entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeProbabilities {
    pub bull: f64,
    pub bear: f64,
    pub shock: f64,
}

/// Reads regime probabilities out of a finished state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityExtractor {
    table: ReadoutTable,
    n_qubits: usize,
}

impl Default for ProbabilityExtractor {
    fn default() -> Self {
        Self::new(ReadoutTable::DEFAULT)
    }
}

impl ProbabilityExtractor {
    pub fn new(table: ReadoutTable) -> Self {
        Self {
            table,
            n_qubits: REGIME_QUBITS,
        }
    }

    pub fn table(&self) -> &ReadoutTable {
        &self.table
    }

    /// Fails with `IndexOutOfRange` if the state is not 2^n wide for the
    /// configured n, or a table index does not fit the state.
    pub fn extract(&self, state: &StateVector) -> Result<RegimeProbabilities> {
        let dimension = state.dimension();
        let expected = 1usize << self.n_qubits;
        if dimension != expected {
            return Err(QuantumRegimeError::IndexOutOfRange {
                label: "dimension",
                index: expected,
                dimension,
            });
        }

        let read = |label: &'static str, index: usize| {
            state
                .probability(index)
                .ok_or(QuantumRegimeError::IndexOutOfRange {
                    label,
                    index,
                    dimension,
                })
        };

        let probs = RegimeProbabilities {
            bull: read("bull", self.table.bull)?,
            bear: read("bear", self.table.bear)?,
            shock: read("shock", self.table.shock)?,
        };
        debug!(bull = probs.bull, bear = probs.bear, shock = probs.shock, "extracted");
        Ok(probs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_default_table() {
        let t = ReadoutTable::default();
        assert_eq!(t.entries(), [("bull", 15), ("bear", 0), ("shock", 3)]);
    }

    #[test]
    fn test_extract_zero_state() {
        let p = ProbabilityExtractor::default()
            .extract(&StateVector::zero_state(4).unwrap())
            .unwrap();
        assert_eq!(p.bear, 1.0);
        assert_eq!(p.bull, 0.0);
        assert_eq!(p.shock, 0.0);
    }

    #[test]
    fn test_extract_shock_index() {
        let mut s = StateVector::zero_state(4).unwrap();
        s.apply_rotation(0, PI).unwrap();
        s.apply_rotation(1, PI).unwrap();
        let p = ProbabilityExtractor::default().extract(&s).unwrap();
        assert!((p.shock - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = ProbabilityExtractor::default()
            .extract(&StateVector::zero_state(3).unwrap())
            .unwrap_err();
        assert!(matches!(err, QuantumRegimeError::IndexOutOfRange { dimension: 8, .. }));
    }

    #[test]
    fn test_table_index_out_of_range() {
        let table = ReadoutTable {
            bull: 16,
            ..ReadoutTable::DEFAULT
        };
        let err = ProbabilityExtractor::new(table)
            .extract(&StateVector::zero_state(4).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            QuantumRegimeError::IndexOutOfRange {
                label: "bull",
                index: 16,
                dimension: 16
            }
        );
    }
}
