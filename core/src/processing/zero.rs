use crate::prelude::{FilterConfig, ProcessingStage, StageInput, StageOutput, StageResult};
use crate::report::LineOutcome;
use crate::telemetry::log::LogManager;

/// Drops the zero samples the sensor emits on a failed echo.
pub struct ZeroStage {
    logger: LogManager,
}

impl ZeroStage {
    pub fn new() -> Self {
        Self {
            logger: LogManager::for_stage("seabedcore::zero"),
        }
    }
}

impl Default for ZeroStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for ZeroStage {
    fn initialize(&mut self, _config: &FilterConfig) -> StageResult<()> {
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        if input.reading == 0 {
            self.logger
                .debug(&format!("line {}: zero reading skipped", input.line_number));
            return Ok(StageOutput::Verdict(LineOutcome::ZeroSkipped));
        }
        Ok(StageOutput::Forward(input))
    }

    fn cleanup(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_reading_is_settled_as_skipped() {
        let mut stage = ZeroStage::new();
        stage.initialize(&FilterConfig::default()).unwrap();
        let output = stage
            .execute(StageInput {
                reading: 0,
                line_number: 1,
            })
            .unwrap();
        assert_eq!(output, StageOutput::Verdict(LineOutcome::ZeroSkipped));
    }

    #[test]
    fn non_zero_readings_pass_through() {
        let mut stage = ZeroStage::new();
        stage.initialize(&FilterConfig::default()).unwrap();
        for reading in [1, -1, 500] {
            let input = StageInput {
                reading,
                line_number: 3,
            };
            assert_eq!(stage.execute(input).unwrap(), StageOutput::Forward(input));
        }
        stage.cleanup();
    }
}
