//! Error taxonomy for the regime pipeline.
//!
//! Every error is local to one pipeline run. A run either yields a complete,
//! tolerance-valid report or fails with one of these.

use thiserror::Error;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, QuantumRegimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumRegimeError {
    /// Raw statistic is NaN/infinite, or a normalized feature is outside [0, 1].
    #[error("Invalid feature '{field}': {value}")]
    InvalidFeature { field: String, value: f64 },

    /// Gate references a qubit outside the register.
    #[error("Gate {gate} references qubit {qubit}, register has {n_qubits} qubits")]
    GateApplication {
        gate: &'static str,
        qubit: usize,
        n_qubits: usize,
    },

    /// Register too wide to allocate 2^n amplitudes.
    #[error("Register of {n_qubits} qubits exceeds the {max}-qubit limit")]
    RegisterTooLarge { n_qubits: usize, max: usize },

    /// Post-execution magnitude sum drifted from 1.
    #[error("State norm violated: sum |a|^2 = {norm_sqr} (tolerance {tolerance})")]
    Normalization { norm_sqr: f64, tolerance: f64 },

    /// Readout index exceeds the state dimension, or the dimension is not 2^n.
    #[error("Readout '{label}' index {index} out of range for dimension {dimension}")]
    IndexOutOfRange {
        label: &'static str,
        index: usize,
        dimension: usize,
    },

    /// Price series too short for the rolling window.
    #[error("Insufficient history for {series}: need {needed} closes, have {available}")]
    InsufficientHistory {
        series: String,
        needed: usize,
        available: usize,
    },

    /// Engine or window setting that cannot produce a valid run.
    #[error("Invalid config '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Price series of unequal length.
    #[error("Series {series} has {actual} closes, expected {expected}")]
    MisalignedSeries {
        series: String,
        expected: usize,
        actual: usize,
    },
}

impl QuantumRegimeError {
    pub(crate) fn invalid_feature(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidFeature {
            field: field.into(),
            value,
        }
    }

    pub(crate) fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
