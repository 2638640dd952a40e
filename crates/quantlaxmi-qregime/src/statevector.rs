//! Dense statevector over 2^n basis states.
//!
//! Bit `i` of a basis index is the state of qubit `i` (LSB = qubit 0).
//! Amplitudes are mutated in place by the gate primitives; every primitive
//! is unitary, so `Σ|a|²` stays at 1 up to rounding.

use crate::error::{QuantumRegimeError, Result};
use num_complex::Complex64;
use tracing::debug;

/// Default tolerance for the unit-norm check.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Widest register `zero_state` will allocate (2^24 amplitudes, 256 MiB).
pub const MAX_QUBITS: usize = 24;

/// Complex amplitude vector, exclusively owned by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
    n_qubits: usize,
}

impl StateVector {
    /// |0…0⟩: amplitude 1 at index 0, zero elsewhere.
    pub fn zero_state(n_qubits: usize) -> Result<Self> {
        if n_qubits > MAX_QUBITS {
            return Err(QuantumRegimeError::RegisterTooLarge {
                n_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1usize << n_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            n_qubits,
        })
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// `|a_index|²`, or `None` past the end.
    pub fn probability(&self, index: usize) -> Option<f64> {
        self.amplitudes.get(index).map(|a| a.norm_sqr())
    }

    /// Squared magnitudes of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// `Σ|a|²`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Fails with `Normalization` unless `|Σ|a|² − 1| <= tolerance`.
    ///
    /// A violation means a gate implementation is broken. It is never
    /// renormalized away. A NaN norm or tolerance always fails.
    pub fn check_normalized(&self, tolerance: f64) -> Result<()> {
        let norm_sqr = self.norm_sqr();
        let within = (norm_sqr - 1.0).abs() <= tolerance;
        if !within {
            return Err(QuantumRegimeError::Normalization {
                norm_sqr,
                tolerance,
            });
        }
        Ok(())
    }

    fn check_qubit(&self, gate: &'static str, qubit: usize) -> Result<()> {
        if qubit >= self.n_qubits {
            return Err(QuantumRegimeError::GateApplication {
                gate,
                qubit,
                n_qubits: self.n_qubits,
            });
        }
        Ok(())
    }

    fn check_pair(&self, gate: &'static str, control: usize, target: usize) -> Result<()> {
        self.check_qubit(gate, control)?;
        self.check_qubit(gate, target)?;
        if control == target {
            return Err(QuantumRegimeError::GateApplication {
                gate,
                qubit: target,
                n_qubits: self.n_qubits,
            });
        }
        Ok(())
    }

    /// Y-rotation on `qubit`.
    ///
    /// Each (bit=0, bit=1) pair is updated from its pre-update values:
    /// `a0' = c·a0 − s·a1`, `a1' = s·a0 + c·a1` with `c = cos(θ/2)`, `s = sin(θ/2)`.
    pub fn apply_rotation(&mut self, qubit: usize, angle: f64) -> Result<()> {
        self.check_qubit("Rotation", qubit)?;
        let (s, c) = (angle / 2.0).sin_cos();
        let mask = 1usize << qubit;

        for i0 in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            let i1 = i0 | mask;
            let a0 = self.amplitudes[i0];
            let a1 = self.amplitudes[i1];
            self.amplitudes[i0] = a0 * c - a1 * s;
            self.amplitudes[i1] = a0 * s + a1 * c;
        }

        debug!(qubit, angle, "applied rotation");
        Ok(())
    }

    /// Flip `target` wherever `control` is 1. Each pair is swapped once.
    pub fn apply_controlled_not(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_pair("ControlledNot", control, target)?;
        let cmask = 1usize << control;
        let tmask = 1usize << target;

        for i in (0..self.amplitudes.len()).filter(|i| i & cmask != 0 && i & tmask == 0) {
            self.amplitudes.swap(i, i | tmask);
        }

        debug!(control, target, "applied controlled-not");
        Ok(())
    }

    /// Negate amplitudes where both `control` and `target` are 1.
    pub fn apply_controlled_phase(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_pair("ControlledPhase", control, target)?;
        let both = (1usize << control) | (1usize << target);

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }

        debug!(control, target, "applied controlled-phase");
        Ok(())
    }
}
