//! Discrete regime label from regime probabilities.

use crate::error::{QuantumRegimeError, Result};
use crate::readout::RegimeProbabilities;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market regime label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeLabel {
    /// Shock probability above threshold
    VolatilityEvent,
    /// Bull probability above threshold
    RiskOn,
    /// Bear probability above threshold
    RiskOff,
    /// Nothing dominant
    Transition,
}

impl RegimeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegimeLabel::VolatilityEvent => "VOLATILITY EVENT",
            RegimeLabel::RiskOn => "RISK ON",
            RegimeLabel::RiskOff => "RISK OFF",
            RegimeLabel::Transition => "TRANSITION",
        }
    }

    /// Stable byte tag for canonical encoding.
    pub(crate) fn tag(&self) -> u8 {
        match self {
            RegimeLabel::VolatilityEvent => 0,
            RegimeLabel::RiskOn => 1,
            RegimeLabel::RiskOff => 2,
            RegimeLabel::Transition => 3,
        }
    }
}

impl fmt::Display for RegimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict-inequality thresholds. Shock takes priority over bull, bull over bear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    pub shock: f64,
    pub bull: f64,
    pub bear: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            shock: 0.55,
            bull: 0.65,
            bear: 0.65,
        }
    }
}

impl ClassifierThresholds {
    pub fn classify(&self, probs: &RegimeProbabilities) -> RegimeLabel {
        if probs.shock > self.shock {
            RegimeLabel::VolatilityEvent
        } else if probs.bull > self.bull {
            RegimeLabel::RiskOn
        } else if probs.bear > self.bear {
            RegimeLabel::RiskOff
        } else {
            RegimeLabel::Transition
        }
    }

    /// Every threshold must be a probability in [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, t) in [
            ("thresholds.shock", self.shock),
            ("thresholds.bull", self.bull),
            ("thresholds.bear", self.bear),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(QuantumRegimeError::invalid_config(
                    name,
                    format!("{t} is not in [0, 1]"),
                ));
            }
        }
        Ok(())
    }
}
