//! # QuantLaxmi Quantum Regime Encoder
//!
//! Encodes four market statistics as Y-rotations on a 4-qubit register,
//! entangles them through a fixed gate sequence, and reads regime
//! probabilities off the final statevector.
//!
//! ## Architecture
//!
//! ```text
//! FeatureVector → FeatureNormalizer → regime_circuit → StateVector → ProbabilityExtractor → RegimeReport
//!    [raw x]        [1/(1+e^-5x)]       [θ = f·π]      [2^4 amps]      [|a|² @ 15,0,3]      [+ label]
//! ```
//!
//! ## Determinism Guarantees
//! - No state carried between runs: each evaluation builds a fresh register
//! - Identical input → bit-identical report (SHA-256 digest via [`CanonicalBytes`])
//! - Unit-norm check before every read-out; a violation is an error, never renormalized

pub mod circuit;
pub mod classify;
pub mod error;
pub mod features;
pub mod gates;
pub mod market;
pub mod readout;
pub mod report;
pub mod statevector;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

// Re-exports
pub use circuit::{Circuit, REGIME_QUBITS, regime_circuit, regime_closed_form_probability};
pub use classify::{ClassifierThresholds, RegimeLabel};
pub use error::{QuantumRegimeError, Result};
pub use features::{
    DEFAULT_STEEPNESS, FeatureNormalizer, FeatureVector, NormalizedFeatures, normalize,
};
pub use gates::Gate;
pub use market::{MarketPanel, WindowConfig};
pub use readout::{ProbabilityExtractor, ReadoutTable, RegimeProbabilities};
pub use report::RegimeReport;
pub use statevector::{MAX_QUBITS, NORM_TOLERANCE, StateVector};

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantumRegimeConfig {
    /// Logistic steepness k
    pub steepness: f64,
    /// Allowed |Σ|a|² − 1| before read-out
    pub norm_tolerance: f64,
    /// Basis index per regime
    pub readout: ReadoutTable,
    /// Label thresholds
    pub thresholds: ClassifierThresholds,
}

impl Default for QuantumRegimeConfig {
    fn default() -> Self {
        Self {
            steepness: DEFAULT_STEEPNESS,
            norm_tolerance: NORM_TOLERANCE,
            readout: ReadoutTable::DEFAULT,
            thresholds: ClassifierThresholds::default(),
        }
    }
}

impl QuantumRegimeConfig {
    /// Reject settings that would silently weaken the pipeline checks.
    pub fn validate(&self) -> Result<()> {
        if !self.steepness.is_finite() {
            return Err(QuantumRegimeError::invalid_config(
                "steepness",
                format!("{} is not finite", self.steepness),
            ));
        }
        if !(self.norm_tolerance.is_finite() && self.norm_tolerance > 0.0) {
            return Err(QuantumRegimeError::invalid_config(
                "norm_tolerance",
                format!("{} is not a finite positive tolerance", self.norm_tolerance),
            ));
        }
        self.thresholds.validate()
    }
}

/// Stateless pipeline entry point.
///
/// Holds configuration only; every call owns its `StateVector` and `Circuit`
/// and drops them on return.
#[derive(Debug, Clone, Default)]
pub struct QuantumRegimeEngine {
    config: QuantumRegimeConfig,
}

impl QuantumRegimeEngine {
    /// Fails with `InvalidConfig` if `config` does not validate.
    pub fn try_new(config: QuantumRegimeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &QuantumRegimeConfig {
        &self.config
    }

    /// Raw statistics → report.
    pub fn evaluate(&self, features: &FeatureVector) -> Result<RegimeReport> {
        let normalized =
            FeatureNormalizer::new(self.config.steepness).normalize_vector(features)?;
        self.evaluate_normalized(&normalized)
    }

    /// Already-normalized features → report.
    pub fn evaluate_normalized(&self, features: &NormalizedFeatures) -> Result<RegimeReport> {
        let state = self.final_state(features)?;
        let probabilities = ProbabilityExtractor::new(self.config.readout).extract(&state)?;
        let label = self.config.thresholds.classify(&probabilities);
        debug!(%label, "regime evaluated");
        Ok(RegimeReport::assemble(*features, probabilities, label))
    }

    /// Final register after the regime circuit, norm-checked.
    pub fn final_state(&self, features: &NormalizedFeatures) -> Result<StateVector> {
        let state = regime_circuit(features)?.run()?;
        state.check_normalized(self.config.norm_tolerance)?;
        Ok(state)
    }

    /// Full 16-state distribution for raw statistics.
    pub fn state_probabilities(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let normalized =
            FeatureNormalizer::new(self.config.steepness).normalize_vector(features)?;
        Ok(self.final_state(&normalized)?.probabilities())
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(features: &FeatureVector) -> Result<RegimeReport> {
    QuantumRegimeEngine::default().evaluate(features)
}

// =============================================================================
// Canonical Bytes
// =============================================================================

/// Trait for types that can be serialized to canonical bytes.
pub trait CanonicalBytes {
    fn canonical_bytes(&self) -> Vec<u8>;

    fn canonical_digest(&self) -> String {
        let bytes = self.canonical_bytes();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hex::encode(hasher.finalize())
    }
}

impl CanonicalBytes for QuantumRegimeConfig {
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.steepness.to_bits().to_le_bytes());
        buf.extend_from_slice(&self.norm_tolerance.to_bits().to_le_bytes());
        for (_, index) in self.readout.entries() {
            buf.extend_from_slice(&(index as u32).to_le_bytes());
        }
        for t in [
            self.thresholds.shock,
            self.thresholds.bull,
            self.thresholds.bear,
        ] {
            buf.extend_from_slice(&t.to_bits().to_le_bytes());
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_canonical_deterministic() {
        let c1 = QuantumRegimeConfig::default();
        let c2 = QuantumRegimeConfig::default();
        assert_eq!(c1.canonical_bytes(), c2.canonical_bytes());
        assert_eq!(c1.canonical_digest(), c2.canonical_digest());
    }

    #[test]
    fn test_config_digest_tracks_readout() {
        let mut c = QuantumRegimeConfig::default();
        let before = c.canonical_digest();
        c.readout.shock = 12;
        assert_ne!(before, c.canonical_digest());
    }

    #[test]
    fn test_engine_creation() {
        let engine = QuantumRegimeEngine::default();
        assert_eq!(engine.config().steepness, 5.0);
        assert_eq!(engine.config().readout, ReadoutTable::DEFAULT);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let cases = [
            (
                QuantumRegimeConfig {
                    steepness: f64::NAN,
                    ..Default::default()
                },
                "steepness",
            ),
            (
                QuantumRegimeConfig {
                    steepness: f64::INFINITY,
                    ..Default::default()
                },
                "steepness",
            ),
            (
                QuantumRegimeConfig {
                    norm_tolerance: f64::NAN,
                    ..Default::default()
                },
                "norm_tolerance",
            ),
            (
                QuantumRegimeConfig {
                    norm_tolerance: -1.0,
                    ..Default::default()
                },
                "norm_tolerance",
            ),
            (
                QuantumRegimeConfig {
                    norm_tolerance: 0.0,
                    ..Default::default()
                },
                "norm_tolerance",
            ),
        ];
        for (config, name) in cases {
            match QuantumRegimeEngine::try_new(config).unwrap_err() {
                QuantumRegimeError::InvalidConfig { field, .. } => assert_eq!(field, name),
                other => panic!("unexpected error: {other:?}"),
            }
        }

        let mut config = QuantumRegimeConfig::default();
        config.thresholds.shock = 2.0;
        assert!(QuantumRegimeEngine::try_new(config).is_err());
    }

    #[test]
    fn test_final_state_propagates_norm_violation() {
        // Bypass validation: no tolerance below zero can be met
        let engine = QuantumRegimeEngine {
            config: QuantumRegimeConfig {
                norm_tolerance: -1.0,
                ..Default::default()
            },
        };
        let features = NormalizedFeatures::new(0.5, 0.5, 0.5, 0.5).unwrap();
        assert!(matches!(
            engine.final_state(&features),
            Err(QuantumRegimeError::Normalization { tolerance, .. }) if tolerance == -1.0
        ));
        assert!(matches!(
            engine.evaluate_normalized(&features),
            Err(QuantumRegimeError::Normalization { .. })
        ));
    }

    #[test]
    fn test_config_partial_deserialize() {
        let c: QuantumRegimeConfig = serde_json::from_str(r#"{"steepness": 3.0}"#).unwrap();
        assert_eq!(c.steepness, 3.0);
        assert_eq!(c.norm_tolerance, NORM_TOLERANCE);
    }
}
