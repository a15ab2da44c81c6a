use serde::{Deserialize, Serialize};

use crate::report::LineOutcome;

/// Number of accepted readings kept for the rolling median.
pub const WINDOW_LEN: usize = 3;

pub const DEFAULT_MARKER: &str = "Distance:";
pub const DEFAULT_UNIT_SUFFIX: &str = "mm";
pub const DEFAULT_THRESHOLD_MM: i32 = 50;

/// Inclusive target range `center_mm ± tolerance_mm` that switches the LED on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetBand {
    pub center_mm: i32,
    pub tolerance_mm: i32,
    /// Text shown after "You are at"; derived from the bounds when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TargetBand {
    pub fn new(center_mm: i32, tolerance_mm: i32) -> Self {
        Self {
            center_mm,
            tolerance_mm,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{}mm +-{}mm", self.center_mm, self.tolerance_mm),
        }
    }

    pub fn contains(&self, reading: i32) -> bool {
        let reading = i64::from(reading);
        let center = i64::from(self.center_mm);
        let tolerance = i64::from(self.tolerance_mm);
        reading >= center - tolerance && reading <= center + tolerance
    }
}

/// Shared configuration for the filter stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub marker: String,
    pub unit_suffix: String,
    pub threshold_mm: i32,
    pub bands: Vec<TargetBand>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            unit_suffix: DEFAULT_UNIT_SUFFIX.to_string(),
            threshold_mm: DEFAULT_THRESHOLD_MM,
            bands: vec![
                TargetBand::new(500, 5).with_label("50cm +-5cm"),
                TargetBand::new(300, 5).with_label("30cm +-5cm"),
            ],
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> StageResult<()> {
        if self.marker.is_empty() {
            return Err(StageError::InvalidConfig("marker must not be empty".into()));
        }
        if self.threshold_mm < 0 {
            return Err(StageError::InvalidConfig(format!(
                "threshold {}mm is negative",
                self.threshold_mm
            )));
        }
        if self.bands.is_empty() {
            return Err(StageError::InvalidConfig(
                "at least one target band is required".into(),
            ));
        }
        if let Some(band) = self.bands.iter().find(|band| band.tolerance_mm < 0) {
            return Err(StageError::InvalidConfig(format!(
                "band at {}mm has negative tolerance {}mm",
                band.center_mm, band.tolerance_mm
            )));
        }
        Ok(())
    }
}

/// Input payload for a filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageInput {
    pub reading: i32,
    pub line_number: usize,
}

/// Output produced by each stage: either the reading moves on, or the line is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutput {
    Forward(StageInput),
    Verdict(LineOutcome),
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing the per-reading filter stages.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &FilterConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_bounds_are_inclusive() {
        let band = TargetBand::new(500, 5);
        assert!(band.contains(495));
        assert!(band.contains(500));
        assert!(band.contains(505));
        assert!(!band.contains(494));
        assert!(!band.contains(506));
    }

    #[test]
    fn band_handles_extreme_readings() {
        let band = TargetBand::new(i32::MAX, 5);
        assert!(band.contains(i32::MAX));
        assert!(!TargetBand::new(500, 5).contains(i32::MIN));
    }

    #[test]
    fn default_config_is_valid() {
        let config = FilterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold_mm, 50);
        assert_eq!(config.bands.len(), 2);
        assert_eq!(config.bands[1].label(), "30cm +-5cm");
    }

    #[test]
    fn unlabeled_band_describes_its_bounds() {
        assert_eq!(TargetBand::new(750, 10).label(), "750mm +-10mm");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let empty_marker = FilterConfig {
            marker: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            empty_marker.validate(),
            Err(StageError::InvalidConfig(_))
        ));

        let negative = FilterConfig {
            threshold_mm: -1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let no_bands = FilterConfig {
            bands: Vec::new(),
            ..Default::default()
        };
        assert!(no_bands.validate().is_err());

        let bad_band = FilterConfig {
            bands: vec![TargetBand::new(300, -2)],
            ..Default::default()
        };
        assert!(bad_band.validate().is_err());
    }
}
