use crate::prelude::{
    FilterConfig, ProcessingStage, StageError, StageInput, StageOutput, StageResult,
};
use crate::processing::band::BandStage;
use crate::processing::outlier::OutlierStage;
use crate::processing::parser::{LineParser, ParseError};
use crate::processing::window::ReadingWindow;
use crate::processing::zero::ZeroStage;
use crate::report::LineOutcome;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{ReadingCounters, Summary};

/// Per-line filter chain: parse, zero filter, median outlier filter, band classifier.
///
/// Holds no I/O; callers feed it one line at a time and decide how to report
/// the returned outcome.
pub struct SensorPipeline {
    parser: LineParser,
    zero: ZeroStage,
    outlier: OutlierStage,
    band: BandStage,
    counters: ReadingCounters,
    logger: LogManager,
}

impl SensorPipeline {
    pub fn new(config: FilterConfig) -> StageResult<Self> {
        config.validate()?;

        let mut zero = ZeroStage::new();
        zero.initialize(&config)?;
        let mut outlier = OutlierStage::new();
        outlier.initialize(&config)?;
        let mut band = BandStage::new();
        band.initialize(&config)?;

        let logger = LogManager::for_stage("seabedcore::pipeline");
        logger.record(&format!(
            "pipeline ready: marker {:?}, threshold {}mm, {} band(s)",
            config.marker,
            config.threshold_mm,
            config.bands.len()
        ));

        Ok(Self {
            parser: LineParser::from_config(&config),
            zero,
            outlier,
            band,
            counters: ReadingCounters::new(),
            logger,
        })
    }

    pub fn process_line(&mut self, line: &str) -> StageResult<LineOutcome> {
        let line_number = self.counters.snapshot().lines_read + 1;
        let outcome = self.classify(line, line_number)?;
        self.counters.record(&outcome);
        Ok(outcome)
    }

    fn classify(&mut self, line: &str, line_number: usize) -> StageResult<LineOutcome> {
        let reading = match self.parser.parse(line) {
            Ok(reading) => reading,
            Err(err) => {
                self.logger
                    .debug(&format!("line {}: {}", line_number, err));
                return Ok(match err {
                    ParseError::MissingMarker(_) => LineOutcome::InvalidFormat,
                    ParseError::InvalidNumber(_) | ParseError::Overflow(_) => {
                        LineOutcome::InvalidLine
                    }
                });
            }
        };

        let input = StageInput {
            reading,
            line_number,
        };

        let input = match self.zero.execute(input)? {
            StageOutput::Forward(input) => input,
            StageOutput::Verdict(outcome) => return Ok(outcome),
        };

        let input = match self.outlier.execute(input)? {
            StageOutput::Forward(input) => input,
            StageOutput::Verdict(outcome) => return Ok(outcome),
        };

        match self.band.execute(input)? {
            StageOutput::Verdict(outcome) => {
                if outcome.is_accepted() {
                    self.outlier.admit(input.reading);
                }
                Ok(outcome)
            }
            StageOutput::Forward(_) => Err(StageError::Internal(format!(
                "line {}: reading left unclassified",
                line_number
            ))),
        }
    }

    pub fn summary(&self) -> Summary {
        self.counters.snapshot()
    }

    pub fn window(&self) -> &ReadingWindow {
        self.outlier.window()
    }

    /// Releases stage state and returns the final counters.
    pub fn finish(mut self) -> Summary {
        let summary = self.counters.snapshot();
        self.zero.cleanup();
        self.outlier.cleanup();
        self.band.cleanup();
        self.logger.record(&format!(
            "pipeline finished after {} line(s)",
            summary.lines_read
        ));
        summary
    }
}
