use crate::prelude::{
    FilterConfig, ProcessingStage, StageError, StageInput, StageOutput, StageResult, TargetBand,
};
use crate::report::LineOutcome;
use crate::telemetry::log::LogManager;

/// Classifies accepted readings against the configured target bands, first match wins.
pub struct BandStage {
    bands: Option<Vec<TargetBand>>,
    logger: LogManager,
}

impl BandStage {
    pub fn new() -> Self {
        Self {
            bands: None,
            logger: LogManager::for_stage("seabedcore::band"),
        }
    }
}

impl Default for BandStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for BandStage {
    fn initialize(&mut self, config: &FilterConfig) -> StageResult<()> {
        if config.bands.is_empty() {
            return Err(StageError::InvalidConfig(
                "at least one target band is required".into(),
            ));
        }
        self.bands = Some(config.bands.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let bands = self
            .bands
            .as_ref()
            .ok_or_else(|| StageError::Internal("band stage not initialized".into()))?;

        let outcome = match bands.iter().find(|band| band.contains(input.reading)) {
            Some(band) => {
                self.logger.debug(&format!(
                    "line {}: {}mm inside band {}",
                    input.line_number,
                    input.reading,
                    band.label()
                ));
                LineOutcome::InRange {
                    reading: input.reading,
                    band: band.clone(),
                }
            }
            None => LineOutcome::OutsideRange {
                reading: input.reading,
            },
        };

        Ok(StageOutput::Verdict(outcome))
    }

    fn cleanup(&mut self) {
        self.bands = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(stage: &mut BandStage, reading: i32) -> LineOutcome {
        match stage
            .execute(StageInput {
                reading,
                line_number: 0,
            })
            .unwrap()
        {
            StageOutput::Verdict(outcome) => outcome,
            StageOutput::Forward(_) => panic!("band stage must settle every reading"),
        }
    }

    fn initialized() -> BandStage {
        let mut stage = BandStage::new();
        stage.initialize(&FilterConfig::default()).unwrap();
        stage
    }

    #[test]
    fn fifty_centimeter_band_edges() {
        let mut stage = initialized();
        for reading in [495, 500, 505] {
            match classify(&mut stage, reading) {
                LineOutcome::InRange { band, .. } => assert_eq!(band.center_mm, 500),
                other => panic!("{} classified as {:?}", reading, other),
            }
        }
    }

    #[test]
    fn thirty_centimeter_band_edges() {
        let mut stage = initialized();
        for reading in [295, 300, 305] {
            match classify(&mut stage, reading) {
                LineOutcome::InRange { band, .. } => assert_eq!(band.center_mm, 300),
                other => panic!("{} classified as {:?}", reading, other),
            }
        }
    }

    #[test]
    fn everything_else_is_outside() {
        let mut stage = initialized();
        for reading in [1, 294, 306, 400, 494, 506, 10_000, -500] {
            assert_eq!(
                classify(&mut stage, reading),
                LineOutcome::OutsideRange { reading }
            );
        }
    }

    #[test]
    fn overlapping_bands_prefer_first() {
        let mut stage = BandStage::new();
        let config = FilterConfig {
            bands: vec![TargetBand::new(100, 20), TargetBand::new(110, 20)],
            ..Default::default()
        };
        stage.initialize(&config).unwrap();
        match classify(&mut stage, 115) {
            LineOutcome::InRange { band, .. } => assert_eq!(band.center_mm, 100),
            other => panic!("unexpected {:?}", other),
        }
        stage.cleanup();
    }

    #[test]
    fn empty_band_list_is_rejected() {
        let mut stage = BandStage::new();
        let config = FilterConfig {
            bands: Vec::new(),
            ..Default::default()
        };
        assert!(stage.initialize(&config).is_err());
    }
}
