//! Feature vectors and logistic normalization.
//!
//! Raw rolling-window statistics are squashed to (0, 1) before being used as
//! rotation fractions. NaN/Inf never reach the circuit.

use crate::error::{QuantumRegimeError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Default logistic steepness `k` in `1 / (1 + exp(-k·x))`.
pub const DEFAULT_STEEPNESS: f64 = 5.0;

/// Field names in qubit order.
pub const FEATURE_NAMES: [&str; 4] = ["trend", "leadership", "stress", "liquidity"];

/// Raw market statistics, one per qubit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Rolling mean of SPX log returns
    pub trend: f64,
    /// NDX momentum minus SPX momentum
    pub leadership: f64,
    /// Rolling std of SPX log returns
    pub stress: f64,
    /// Negated rolling mean of VIX log returns
    pub liquidity: f64,
}

impl FeatureVector {
    pub fn new(trend: f64, leadership: f64, stress: f64, liquidity: f64) -> Self {
        Self {
            trend,
            leadership,
            stress,
            liquidity,
        }
    }

    /// Values in qubit order (q0..q3).
    pub fn to_array(&self) -> [f64; 4] {
        [self.trend, self.leadership, self.stress, self.liquidity]
    }
}

/// Logistic squashing with the default steepness.
pub fn normalize(x: f64) -> Result<f64> {
    FeatureNormalizer::default().normalize("value", x)
}

/// Maps raw statistics to the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureNormalizer {
    pub steepness: f64,
}

impl Default for FeatureNormalizer {
    fn default() -> Self {
        Self {
            steepness: DEFAULT_STEEPNESS,
        }
    }
}

impl FeatureNormalizer {
    pub fn new(steepness: f64) -> Self {
        Self { steepness }
    }

    /// `1 / (1 + exp(-k·x))`. Rejects NaN/±Inf input and a NaN result.
    pub fn normalize(&self, field: &str, x: f64) -> Result<f64> {
        if !x.is_finite() {
            return Err(QuantumRegimeError::invalid_feature(field, x));
        }
        let y = 1.0 / (1.0 + (-self.steepness * x).exp());
        if y.is_nan() {
            return Err(QuantumRegimeError::invalid_feature(field, y));
        }
        Ok(y)
    }

    /// Normalize all four fields, failing on the first invalid one.
    pub fn normalize_vector(&self, features: &FeatureVector) -> Result<NormalizedFeatures> {
        NormalizedFeatures::new(
            self.normalize(FEATURE_NAMES[0], features.trend)?,
            self.normalize(FEATURE_NAMES[1], features.leadership)?,
            self.normalize(FEATURE_NAMES[2], features.stress)?,
            self.normalize(FEATURE_NAMES[3], features.liquidity)?,
        )
    }
}

/// Features in [0, 1], order-preserving with [`FeatureVector`].
///
/// Only constructible through [`NormalizedFeatures::new`]; deserialization
/// runs the same range check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedFeatures")]
pub struct NormalizedFeatures {
    trend: f64,
    leadership: f64,
    stress: f64,
    liquidity: f64,
}

#[derive(Deserialize)]
struct UncheckedFeatures {
    trend: f64,
    leadership: f64,
    stress: f64,
    liquidity: f64,
}

impl TryFrom<UncheckedFeatures> for NormalizedFeatures {
    type Error = QuantumRegimeError;

    fn try_from(raw: UncheckedFeatures) -> Result<Self> {
        Self::new(raw.trend, raw.leadership, raw.stress, raw.liquidity)
    }
}

impl NormalizedFeatures {
    /// Construct from already-normalized values.
    ///
    /// The closed interval is accepted so that fully collapsed encodings
    /// (θ = 0 or θ = π) can be driven directly.
    pub fn new(trend: f64, leadership: f64, stress: f64, liquidity: f64) -> Result<Self> {
        let values = [trend, leadership, stress, liquidity];
        for (name, v) in FEATURE_NAMES.iter().zip(values) {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(QuantumRegimeError::invalid_feature(*name, v));
            }
        }
        Ok(Self {
            trend,
            leadership,
            stress,
            liquidity,
        })
    }

    pub fn trend(&self) -> f64 {
        self.trend
    }

    pub fn leadership(&self) -> f64 {
        self.leadership
    }

    pub fn stress(&self) -> f64 {
        self.stress
    }

    pub fn liquidity(&self) -> f64 {
        self.liquidity
    }

    /// Values in qubit order (q0..q3).
    pub fn to_array(&self) -> [f64; 4] {
        [self.trend, self.leadership, self.stress, self.liquidity]
    }

    /// Rotation angles θ_i = f_i·π.
    pub fn angles(&self) -> [f64; 4] {
        self.to_array().map(|f| f * PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_midpoint() {
        let v = normalize(0.0).unwrap();
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_monotonic() {
        let xs: Vec<f64> = (-200..=200).map(|i| i as f64 * 0.01).collect();
        for w in xs.windows(2) {
            assert!(normalize(w[0]).unwrap() < normalize(w[1]).unwrap());
        }
    }

    #[test]
    fn test_normalize_open_interval() {
        for x in [-3.0, -0.5, 0.1, 2.0, 4.0] {
            let v = normalize(x).unwrap();
            assert!(v > 0.0 && v < 1.0);
        }
    }

    #[test]
    fn test_normalize_rejects_non_finite() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                normalize(x),
                Err(QuantumRegimeError::InvalidFeature { .. })
            ));
        }
    }

    #[test]
    fn test_normalize_vector_names_field() {
        let fv = FeatureVector::new(0.01, 0.0, f64::NAN, 0.0);
        let err = FeatureNormalizer::default().normalize_vector(&fv).unwrap_err();
        match err {
            QuantumRegimeError::InvalidFeature { field, .. } => assert_eq!(field, "stress"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_steepness_applied() {
        let n = FeatureNormalizer::new(1.0);
        let expected = 1.0 / (1.0 + (-1.0f64).exp());
        assert!((n.normalize("x", 1.0).unwrap() - expected).abs() < 1e-15);
    }

    #[test]
    fn test_normalized_features_bounds() {
        assert!(NormalizedFeatures::new(0.0, 1.0, 0.5, 0.25).is_ok());
        assert!(NormalizedFeatures::new(1.01, 0.5, 0.5, 0.5).is_err());
        assert!(NormalizedFeatures::new(0.5, -0.1, 0.5, 0.5).is_err());
        assert!(NormalizedFeatures::new(0.5, 0.5, 0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_nan_steepness_rejected_as_feature() {
        let fv = FeatureVector::new(0.01, 0.0, 0.02, 0.0);
        let err = FeatureNormalizer::new(f64::NAN)
            .normalize_vector(&fv)
            .unwrap_err();
        match err {
            QuantumRegimeError::InvalidFeature { field, value } => {
                assert_eq!(field, "trend");
                assert!(value.is_nan());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_checks_range() {
        let ok: NormalizedFeatures = serde_json::from_str(
            r#"{"trend": 0.0, "leadership": 1.0, "stress": 0.5, "liquidity": 0.25}"#,
        )
        .unwrap();
        assert_eq!(ok, NormalizedFeatures::new(0.0, 1.0, 0.5, 0.25).unwrap());

        let bad = serde_json::from_str::<NormalizedFeatures>(
            r#"{"trend": 0.5, "leadership": 0.5, "stress": 1.5, "liquidity": 0.5}"#,
        );
        let msg = bad.unwrap_err().to_string();
        assert!(msg.contains("stress"), "{msg}");
    }

    #[test]
    fn test_serialize_round_trips_fields() {
        let nf = NormalizedFeatures::new(0.1, 0.2, 0.3, 0.4).unwrap();
        let json = serde_json::to_value(nf).unwrap();
        assert_eq!(json["stress"], 0.3);
        let back: NormalizedFeatures = serde_json::from_value(json).unwrap();
        assert_eq!(back, nf);
    }

    #[test]
    fn test_angles() {
        let nf = NormalizedFeatures::new(0.0, 0.5, 1.0, 0.25).unwrap();
        let a = nf.angles();
        assert_eq!(a[0], 0.0);
        assert!((a[1] - PI / 2.0).abs() < 1e-15);
        assert!((a[2] - PI).abs() < 1e-15);
        assert!((a[3] - PI / 4.0).abs() < 1e-15);
    }
}
