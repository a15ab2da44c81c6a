use anyhow::Context;
use seabedcore::prelude::{FilterConfig, TargetBand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run settings as loaded from YAML; unset keys keep the built-in defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub marker: String,
    pub unit_suffix: String,
    pub threshold_mm: i32,
    pub bands: Vec<TargetBand>,
    pub report: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let filter = FilterConfig::default();
        Self {
            marker: filter.marker,
            unit_suffix: filter.unit_suffix,
            threshold_mm: filter.threshold_mm,
            bands: filter.bands,
            report: None,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Command-line values win over whatever the config file said.
    pub fn apply_overrides(
        &mut self,
        threshold_mm: Option<i32>,
        marker: Option<String>,
        unit_suffix: Option<String>,
        report: Option<PathBuf>,
    ) {
        if let Some(threshold_mm) = threshold_mm {
            self.threshold_mm = threshold_mm;
        }
        if let Some(marker) = marker {
            self.marker = marker;
        }
        if let Some(unit_suffix) = unit_suffix {
            self.unit_suffix = unit_suffix;
        }
        if report.is_some() {
            self.report = report;
        }
    }

    pub fn to_filter_config(&self) -> FilterConfig {
        FilterConfig {
            marker: self.marker.clone(),
            unit_suffix: self.unit_suffix.clone(),
            threshold_mm: self.threshold_mm,
            bands: self.bands.clone(),
        }
    }
}
