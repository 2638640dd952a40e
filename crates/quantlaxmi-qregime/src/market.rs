//! Feature derivation from a panel of daily closes.
//!
//! Only the last value of each rolling statistic is used:
//! - trend      = mean of last `momentum` SPX log returns
//! - leadership = NDX momentum − SPX momentum
//! - stress     = sample std (n−1) of last `volatility` SPX log returns
//! - liquidity  = −mean of last `liquidity` VIX log returns
//!
//! Fetching the closes is the caller's job.

use crate::error::{QuantumRegimeError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Rolling window lengths, in returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub momentum: usize,
    pub volatility: usize,
    pub liquidity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            momentum: 20,
            volatility: 20,
            liquidity: 10,
        }
    }
}

impl WindowConfig {
    /// Means need one return, the n−1 sample std needs two.
    pub fn validate(&self) -> Result<()> {
        for (name, window, min) in [
            ("windows.momentum", self.momentum, 1),
            ("windows.volatility", self.volatility, 2),
            ("windows.liquidity", self.liquidity, 1),
        ] {
            if window < min {
                return Err(QuantumRegimeError::invalid_config(
                    name,
                    format!("window {window} is below the minimum of {min} returns"),
                ));
            }
        }
        Ok(())
    }
}

/// Aligned close series, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPanel {
    spx: Vec<f64>,
    ndx: Vec<f64>,
    vix: Vec<f64>,
}

impl MarketPanel {
    /// All three series must have the same length.
    pub fn new(spx: Vec<f64>, ndx: Vec<f64>, vix: Vec<f64>) -> Result<Self> {
        let expected = spx.len();
        for (series, len) in [("NDX", ndx.len()), ("VIX", vix.len())] {
            if len != expected {
                return Err(QuantumRegimeError::MisalignedSeries {
                    series: series.to_string(),
                    expected,
                    actual: len,
                });
            }
        }
        Ok(Self { spx, ndx, vix })
    }

    pub fn len(&self) -> usize {
        self.spx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spx.is_empty()
    }

    /// Statistics at the last row.
    pub fn features(&self, windows: &WindowConfig) -> Result<FeatureVector> {
        windows.validate()?;
        let spx = log_returns("SPX", &self.spx)?;
        let ndx = log_returns("NDX", &self.ndx)?;
        let vix = log_returns("VIX", &self.vix)?;

        let spx_momentum = tail_mean("SPX", &spx, windows.momentum)?;
        let ndx_momentum = tail_mean("NDX", &ndx, windows.momentum)?;

        Ok(FeatureVector {
            trend: spx_momentum,
            leadership: ndx_momentum - spx_momentum,
            stress: tail_std("SPX", &spx, windows.volatility)?,
            liquidity: -tail_mean("VIX", &vix, windows.liquidity)?,
        })
    }
}

/// `ln(p_t / p_{t-1})`. Undefined for non-positive or non-finite closes.
fn log_returns(series: &str, closes: &[f64]) -> Result<Vec<f64>> {
    if let Some(&bad) = closes.iter().find(|p| !p.is_finite() || **p <= 0.0) {
        return Err(QuantumRegimeError::invalid_feature(series, bad));
    }
    Ok(closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

fn tail<'a>(series: &str, returns: &'a [f64], window: usize) -> Result<&'a [f64]> {
    if returns.len() < window {
        return Err(QuantumRegimeError::InsufficientHistory {
            series: series.to_string(),
            needed: window + 1,
            available: returns.len() + 1,
        });
    }
    Ok(&returns[returns.len() - window..])
}

fn tail_mean(series: &str, returns: &[f64], window: usize) -> Result<f64> {
    let xs = tail(series, returns, window)?;
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

fn tail_std(series: &str, returns: &[f64], window: usize) -> Result<f64> {
    let xs = tail(series, returns, window)?;
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok(var.sqrt())
}
