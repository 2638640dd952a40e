//! Close-panel CSV loading.
//!
//! Expected layout: a header row, one row per session, oldest first.
//!
//! ```text
//! date,SPX,NDX,DOW,VIX
//! 2026-04-01,5611.85,19581.78,41989.96,21.77
//! ```
//!
//! Extra columns are ignored. The date column is optional.

use crate::config::ColumnConfig;
use anyhow::{Context, Result, anyhow};
use quantlaxmi_qregime::MarketPanel;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Panel plus the last row's date label, if present.
#[derive(Debug, Clone)]
pub struct LoadedPanel {
    pub panel: MarketPanel,
    pub as_of: Option<String>,
}

/// Load a close panel from a CSV file.
pub fn load_panel(path: &Path, columns: &ColumnConfig) -> Result<LoadedPanel> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open closes file: {}", path.display()))?;
    let loaded = read_panel(file, columns)
        .with_context(|| format!("Failed to read closes file: {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = loaded.panel.len(),
        as_of = loaded.as_of.as_deref().unwrap_or("-"),
        "loaded close panel"
    );
    Ok(loaded)
}

/// Parse a close panel from any reader.
pub fn read_panel<R: Read>(reader: R, columns: &ColumnConfig) -> Result<LoadedPanel> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Missing column '{}' (have: {:?})", name, headers))
    };
    let spx_idx = find(&columns.spx)?;
    let ndx_idx = find(&columns.ndx)?;
    let vix_idx = find(&columns.vix)?;
    let date_idx = headers.iter().position(|h| h == columns.date);

    let mut spx = Vec::new();
    let mut ndx = Vec::new();
    let mut vix = Vec::new();
    let mut as_of = None;

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |idx: usize, name: &str| -> Result<f64> {
            let raw = record.get(idx).unwrap_or_default();
            raw.parse::<f64>()
                .map_err(|e| anyhow!("Row {}: bad {} value '{}': {}", row + 1, name, raw, e))
        };
        spx.push(field(spx_idx, &columns.spx)?);
        ndx.push(field(ndx_idx, &columns.ndx)?);
        vix.push(field(vix_idx, &columns.vix)?);
        if let Some(idx) = date_idx {
            as_of = record.get(idx).map(str::to_string);
        }
    }

    let panel = MarketPanel::new(spx, ndx, vix)?;
    Ok(LoadedPanel { panel, as_of })
}
