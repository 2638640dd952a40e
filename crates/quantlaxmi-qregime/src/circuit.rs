//! Circuits as ordered gate lists, and the fixed regime-encoding topology.
//!
//! ```text
//! q0 trend      ─ry(θ0)─⊕──⊕──⊕──────────
//! q1 leadership ─ry(θ1)─┼──●──┼──●───────
//! q2 stress     ─ry(θ2)─┼─────●──┼──●────
//! q3 liquidity  ─ry(θ3)─●────────Z──Z────
//! ```
//!
//! The three CNOTs all target q0 and compose as XOR, so their order is free;
//! the two CZs are diagonal and commute. The builder still emits them in the
//! canonical order below.

use crate::error::{QuantumRegimeError, Result};
use crate::features::NormalizedFeatures;
use crate::gates::Gate;
use crate::statevector::StateVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Register size of the regime topology.
pub const REGIME_QUBITS: usize = 4;

/// (control, target) of the entangling CNOTs, in execution order.
pub const REGIME_CNOTS: [(usize, usize); 3] = [(3, 0), (1, 0), (2, 0)];

/// (control, target) of the controlled-phase gates, in execution order.
pub const REGIME_CZS: [(usize, usize); 2] = [(1, 3), (2, 3)];

/// Ordered gate sequence over a fixed register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    n_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            gates: Vec::new(),
        }
    }

    /// Append a gate, rejecting qubit indices outside the register.
    pub fn push(&mut self, gate: Gate) -> Result<&mut Self> {
        let max = gate.max_qubit();
        if max >= self.n_qubits {
            return Err(QuantumRegimeError::GateApplication {
                gate: gate.name(),
                qubit: max,
                n_qubits: self.n_qubits,
            });
        }
        self.gates.push(gate);
        Ok(self)
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Apply every gate in order to `state`.
    pub fn execute(&self, state: &mut StateVector) -> Result<()> {
        for (step, gate) in self.gates.iter().enumerate() {
            debug!(step, %gate, "executing gate");
            gate.apply(state)?;
        }
        Ok(())
    }

    /// Execute from a fresh |0…0⟩ register.
    pub fn run(&self) -> Result<StateVector> {
        let mut state = StateVector::zero_state(self.n_qubits)?;
        self.execute(&mut state)?;
        Ok(state)
    }
}

/// Build the regime-encoding circuit: four rotations θ_i = f_i·π, then the
/// fixed entanglers.
pub fn regime_circuit(features: &NormalizedFeatures) -> Result<Circuit> {
    let mut circuit = Circuit::new(REGIME_QUBITS);

    for (qubit, angle) in features.angles().into_iter().enumerate() {
        circuit.push(Gate::Rotation { qubit, angle })?;
    }
    for (control, target) in REGIME_CNOTS {
        circuit.push(Gate::ControlledNot { control, target })?;
    }
    for (control, target) in REGIME_CZS {
        circuit.push(Gate::ControlledPhase { control, target })?;
    }

    Ok(circuit)
}

/// Closed-form probability of basis index `index` after [`regime_circuit`].
///
/// `P(b0,b1,b2,b3) = P0(b0⊕b1⊕b2⊕b3)·P1(b1)·P2(b2)·P3(b3)` with
/// `Pi(0) = cos²(θi/2)`, `Pi(1) = sin²(θi/2)`.
pub fn regime_closed_form_probability(features: &NormalizedFeatures, index: usize) -> f64 {
    let angles = features.angles();
    let bit = |q: usize| (index >> q) & 1;
    let p = |q: usize, b: usize| {
        let (s, c) = (angles[q] / 2.0).sin_cos();
        if b == 0 { c * c } else { s * s }
    };

    let a0 = bit(0) ^ bit(1) ^ bit(2) ^ bit(3);
    p(0, a0) * p(1, bit(1)) * p(2, bit(2)) * p(3, bit(3))
}
