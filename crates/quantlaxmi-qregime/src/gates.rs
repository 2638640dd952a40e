//! Gate variants.

use crate::error::Result;
use crate::statevector::StateVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One unitary update to a [`StateVector`]. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Y-rotation of one qubit by `angle` radians.
    Rotation { qubit: usize, angle: f64 },
    /// Flip `target` when `control` is 1.
    ControlledNot { control: usize, target: usize },
    /// Negate the amplitude when both qubits are 1.
    ControlledPhase { control: usize, target: usize },
}

impl Gate {
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Rotation { .. } => "Rotation",
            Gate::ControlledNot { .. } => "ControlledNot",
            Gate::ControlledPhase { .. } => "ControlledPhase",
        }
    }

    /// Apply in place. Fails without touching the state if a qubit index is
    /// outside the register.
    pub fn apply(&self, state: &mut StateVector) -> Result<()> {
        match *self {
            Gate::Rotation { qubit, angle } => state.apply_rotation(qubit, angle),
            Gate::ControlledNot { control, target } => state.apply_controlled_not(control, target),
            Gate::ControlledPhase { control, target } => {
                state.apply_controlled_phase(control, target)
            }
        }
    }

    /// Highest qubit index the gate touches.
    pub fn max_qubit(&self) -> usize {
        match *self {
            Gate::Rotation { qubit, .. } => qubit,
            Gate::ControlledNot { control, target } | Gate::ControlledPhase { control, target } => {
                control.max(target)
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Rotation { qubit, angle } => write!(f, "ry({:.6}) q{}", angle, qubit),
            Gate::ControlledNot { control, target } => write!(f, "cx q{} -> q{}", control, target),
            Gate::ControlledPhase { control, target } => write!(f, "cz q{} q{}", control, target),
        }
    }
}
