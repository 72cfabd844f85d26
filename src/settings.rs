use std::path::PathBuf;

use clap::Parser;

use crate::engine::risk::{RiskClassifier, DEFAULT_RISK_CUTOFF};

/// Command-line / environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "noise-atlas", version, about = "Noise exposure explorer for European countries")]
pub struct Settings {
    /// Exposure table (.json, .csv or .parquet).
    #[arg(long, env = "NOISE_ATLAS_EXPOSURE", default_value = "data/noise_data.json")]
    pub exposure: PathBuf,

    /// Country boundaries (GeoJSON FeatureCollection).
    #[arg(long, env = "NOISE_ATLAS_BOUNDARIES", default_value = "data/europe.geojson")]
    pub boundaries: PathBuf,

    /// Exposure share, in percent, above which the risk counts as elevated.
    #[arg(
        long,
        env = "NOISE_ATLAS_RISK_CUTOFF",
        default_value_t = DEFAULT_RISK_CUTOFF,
        value_parser = parse_cutoff
    )]
    pub risk_cutoff: f64,
}

impl Settings {
    pub fn classifier(&self) -> RiskClassifier {
        RiskClassifier::new(self.risk_cutoff)
    }
}

fn parse_cutoff(s: &str) -> Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("cutoff must be a finite number, got {s}"))
    }
}
