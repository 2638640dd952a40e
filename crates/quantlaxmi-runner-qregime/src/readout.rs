//! Report rendering: console read-out and JSON envelope.

use chrono::{DateTime, Utc};
use quantlaxmi_qregime::{CanonicalBytes, QuantumRegimeConfig, RegimeReport};
use serde::Serialize;
use std::fmt::Write;

/// JSON output of one run.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope {
    pub generated_at: DateTime<Utc>,
    /// Date of the last close row, when run from a panel
    pub as_of: Option<String>,
    pub config_digest: String,
    pub report_digest: String,
    pub report: RegimeReport,
}

impl ReportEnvelope {
    pub fn new(report: RegimeReport, config: &QuantumRegimeConfig, as_of: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            as_of,
            config_digest: config.canonical_digest(),
            report_digest: report.canonical_digest(),
            report,
        }
    }
}

/// Console read-out.
pub fn render_text(report: &RegimeReport, as_of: Option<&str>) -> String {
    let f = &report.features;
    let p = &report.probabilities;
    let mut out = String::new();

    let _ = writeln!(out, "\n==============================");
    let _ = writeln!(out, " QUANTUM REGIME READOUT");
    let _ = writeln!(out, "==============================");
    if let Some(date) = as_of {
        let _ = writeln!(out, "As of              : {}", date);
    }
    let _ = writeln!(out, "Trend Strength     : {:.3}", f.trend());
    let _ = writeln!(out, "Tech Leadership    : {:.3}", f.leadership());
    let _ = writeln!(out, "Stress Level       : {:.3}", f.stress());
    let _ = writeln!(out, "Liquidity Regime   : {:.3}", f.liquidity());

    let _ = writeln!(out, "\nQuantum Probabilities");
    let _ = writeln!(out, "Bull  : {:.3}", p.bull);
    let _ = writeln!(out, "Bear  : {:.3}", p.bear);
    let _ = writeln!(out, "Shock : {:.3}", p.shock);

    let _ = writeln!(out, "\nRegime: {}", report.label);
    out
}

/// All basis-state probabilities, one line per state, q3..q0 bit order.
pub fn render_states(probabilities: &[f64]) -> String {
    let width = probabilities.len().max(2).trailing_zeros() as usize;
    let mut out = String::new();
    for (index, p) in probabilities.iter().enumerate() {
        let _ = writeln!(out, "|{:0width$b}> {:>2}  {:.6}", index, index, p, width = width);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantlaxmi_qregime::{NormalizedFeatures, QuantumRegimeEngine};

    fn symmetric_report() -> RegimeReport {
        QuantumRegimeEngine::default()
            .evaluate_normalized(&NormalizedFeatures::new(0.5, 0.5, 0.5, 0.5).unwrap())
            .unwrap()
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&symmetric_report(), Some("2026-04-02"));
        assert!(text.contains("As of              : 2026-04-02"));
        assert!(text.contains("Trend Strength     : 0.500"));
        assert!(text.contains("Bull  : 0.06"));
        assert!(text.contains("Regime: TRANSITION"));
    }

    #[test]
    fn test_render_states() {
        let mut probs = vec![0.0; 16];
        probs[3] = 1.0;
        let text = render_states(&probs);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[3], "|0011>  3  1.000000");
        assert!(lines[15].starts_with("|1111> 15"));
    }

    #[test]
    fn test_envelope_json() {
        let report = symmetric_report();
        let env = ReportEnvelope::new(report, &QuantumRegimeConfig::default(), None);
        let json: serde_json::Value = serde_json::to_value(&env).unwrap();
        assert_eq!(json["report"]["label"], "Transition");
        assert_eq!(json["report_digest"].as_str().unwrap().len(), 64);
        assert!(json["as_of"].is_null());
    }
}
