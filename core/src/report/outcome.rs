use serde::{Deserialize, Serialize};

use crate::prelude::TargetBand;

/// Verdict reached for a single input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineOutcome {
    /// The distance marker was not found.
    InvalidFormat,
    /// The marker was found but the payload is not an integer.
    InvalidLine,
    /// Sensor error sample (reading of 0).
    ZeroSkipped,
    Outlier {
        reading: i32,
        median: i32,
        threshold_mm: i32,
    },
    InRange {
        reading: i32,
        band: TargetBand,
    },
    OutsideRange {
        reading: i32,
    },
}

impl LineOutcome {
    /// Accepted readings are the ones that reach the classifier and enter the window.
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            LineOutcome::InRange { .. } | LineOutcome::OutsideRange { .. }
        )
    }

    /// Console message for this outcome; zero samples are silent.
    pub fn describe(&self, line: &str) -> Option<String> {
        match self {
            LineOutcome::InvalidFormat => Some(format!("Skipping invalid line format: {}", line)),
            LineOutcome::InvalidLine => Some(format!("Skipping invalid line: {}", line)),
            LineOutcome::ZeroSkipped => None,
            LineOutcome::Outlier {
                reading,
                median,
                threshold_mm,
            } => Some(format!(
                "Discarding outlier: {}mm (median of last 3: {}mm, threshold {}mm)",
                reading, median, threshold_mm
            )),
            LineOutcome::InRange { band, .. } => Some(format!(
                "LED ON: Stop. You are at {} from seabed.",
                band.label()
            )),
            LineOutcome::OutsideRange { reading } => {
                Some(format!("LED OFF: Outside target range: {}", reading))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_message_uses_band_label() {
        let outcome = LineOutcome::InRange {
            reading: 502,
            band: TargetBand::new(500, 5).with_label("50cm +-5cm"),
        };
        assert_eq!(
            outcome.describe("ignored").as_deref(),
            Some("LED ON: Stop. You are at 50cm +-5cm from seabed.")
        );

        let unlabeled = LineOutcome::InRange {
            reading: 300,
            band: TargetBand::new(300, 5),
        };
        assert_eq!(
            unlabeled.describe("").unwrap(),
            "LED ON: Stop. You are at 300mm +-5mm from seabed."
        );
    }

    #[test]
    fn outlier_message_reports_threshold_in_use() {
        let outcome = LineOutcome::Outlier {
            reading: 600,
            median: 500,
            threshold_mm: 50,
        };
        assert_eq!(
            outcome.describe("").unwrap(),
            "Discarding outlier: 600mm (median of last 3: 500mm, threshold 50mm)"
        );
    }

    #[test]
    fn zero_sample_is_silent() {
        assert!(LineOutcome::ZeroSkipped.describe("Distance:0mm").is_none());
        assert!(!LineOutcome::ZeroSkipped.is_accepted());
    }

    #[test]
    fn malformed_messages_echo_the_line() {
        assert_eq!(
            LineOutcome::InvalidFormat.describe("garbage").unwrap(),
            "Skipping invalid line format: garbage"
        );
        assert_eq!(
            LineOutcome::InvalidLine.describe("Distance:x").unwrap(),
            "Skipping invalid line: Distance:x"
        );
    }
}
