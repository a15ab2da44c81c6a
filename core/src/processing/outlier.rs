use crate::math::stats::StatsHelper;
use crate::prelude::{
    FilterConfig, ProcessingStage, StageError, StageInput, StageOutput, StageResult,
};
use crate::processing::window::ReadingWindow;
use crate::report::LineOutcome;
use crate::telemetry::log::LogManager;

/// Median-of-three outlier rejection over the last accepted readings.
///
/// Until three readings have been admitted no rejection is possible, so the
/// first three non-zero readings always pass. Afterwards a reading whose
/// absolute deviation from the window median exceeds the threshold is settled
/// as an outlier and never reaches the window.
pub struct OutlierStage {
    window: ReadingWindow,
    threshold_mm: Option<i32>,
    logger: LogManager,
}

impl OutlierStage {
    pub fn new() -> Self {
        Self {
            window: ReadingWindow::new(),
            threshold_mm: None,
            logger: LogManager::for_stage("seabedcore::outlier"),
        }
    }

    /// Adds an accepted reading to the window, evicting the oldest when full.
    pub fn admit(&mut self, reading: i32) {
        self.window.push(reading);
    }

    pub fn window(&self) -> &ReadingWindow {
        &self.window
    }
}

impl Default for OutlierStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for OutlierStage {
    fn initialize(&mut self, config: &FilterConfig) -> StageResult<()> {
        if config.threshold_mm < 0 {
            return Err(StageError::InvalidConfig(format!(
                "threshold {}mm is negative",
                config.threshold_mm
            )));
        }
        self.threshold_mm = Some(config.threshold_mm);
        self.window.reset();
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let threshold_mm = self
            .threshold_mm
            .ok_or_else(|| StageError::Internal("outlier stage not initialized".into()))?;

        let Some(median) = self.window.median() else {
            return Ok(StageOutput::Forward(input));
        };

        if StatsHelper::deviation(input.reading, median) > i64::from(threshold_mm) {
            self.logger.debug(&format!(
                "line {}: {}mm rejected against median {}mm",
                input.line_number, input.reading, median
            ));
            return Ok(StageOutput::Verdict(LineOutcome::Outlier {
                reading: input.reading,
                median,
                threshold_mm,
            }));
        }

        Ok(StageOutput::Forward(input))
    }

    fn cleanup(&mut self) {
        self.window.reset();
        self.threshold_mm = None;
    }
}
