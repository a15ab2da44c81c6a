use crate::workflow::config::RunConfig;
use anyhow::Context;
use log::{info, warn};
use seabedcore::processing::SensorPipeline;
use seabedcore::telemetry::Summary;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Console sink that stops writing after the first failure instead of
/// aborting the run; a closed stdout does not change the outcome.
struct ConsoleReport<'a, W: Write> {
    out: &'a mut W,
    broken: bool,
}

impl<'a, W: Write> ConsoleReport<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self { out, broken: false }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        if let Err(err) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            warn!("report output failed, continuing silently: {}", err);
            self.broken = true;
        }
    }

    fn flush(&mut self) {
        if self.broken {
            return;
        }
        if let Err(err) = self.out.flush() {
            warn!("flushing report output failed: {}", err);
            self.broken = true;
        }
    }
}

#[derive(Clone)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Opens `path` and filters it; failing to open is the only fatal input error.
    pub fn run_file<W: Write>(&self, path: &Path, out: &mut W) -> anyhow::Result<Summary> {
        let file = File::open(path)
            .with_context(|| format!("Error opening file: {}", path.display()))?;
        info!("filtering {}", path.display());
        self.execute(BufReader::new(file), out)
    }

    /// Feeds every line of `reader` through a fresh pipeline, writing one
    /// message per reported line and the summary block to `out`.
    pub fn execute<R: BufRead, W: Write>(&self, mut reader: R, out: &mut W) -> anyhow::Result<Summary> {
        let mut pipeline = SensorPipeline::new(self.config.to_filter_config())
            .context("building filter pipeline")?;
        let mut report = ConsoleReport::new(out);

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        "read failed after {} line(s), stopping: {}",
                        pipeline.summary().lines_read,
                        err
                    );
                    break;
                }
            }

            let text = String::from_utf8_lossy(&buffer);
            let line = text.trim_end_matches(['\n', '\r']);
            let outcome = pipeline
                .process_line(line)
                .context("processing sensor line")?;
            if let Some(message) = outcome.describe(line) {
                report.line(format_args!("{}", message));
            }
        }

        let summary = pipeline.finish();
        report.line(format_args!(""));
        report.line(format_args!("{}", summary));
        report.flush();
        Ok(summary)
    }
}
