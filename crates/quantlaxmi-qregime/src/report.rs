//! Regime report: the value handed to external consumers.

use crate::CanonicalBytes;
use crate::classify::RegimeLabel;
use crate::features::NormalizedFeatures;
use crate::readout::RegimeProbabilities;
use serde::{Deserialize, Serialize};

/// Output of one pipeline run. Immutable; the core keeps no reference to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeReport {
    pub features: NormalizedFeatures,
    pub probabilities: RegimeProbabilities,
    pub label: RegimeLabel,
}

impl RegimeReport {
    /// Bundle upstream results. No computation happens here.
    pub fn assemble(
        features: NormalizedFeatures,
        probabilities: RegimeProbabilities,
        label: RegimeLabel,
    ) -> Self {
        Self {
            features,
            probabilities,
            label,
        }
    }
}

impl CanonicalBytes for RegimeReport {
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(7 * 8 + 1);
        for v in self.features.to_array() {
            buf.extend_from_slice(&v.to_bits().to_le_bytes());
        }
        for v in [
            self.probabilities.bull,
            self.probabilities.bear,
            self.probabilities.shock,
        ] {
            buf.extend_from_slice(&v.to_bits().to_le_bytes());
        }
        buf.push(self.label.tag());
        buf
    }
}
