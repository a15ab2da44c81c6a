use crate::generator::template::{distance_line, garbled_line, status_line};
use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration for generating a synthetic descent log.
///
/// The sensor starts at `start_mm` and sinks linearly to `end_mm`, with
/// uniform jitter on every sample and occasional sensor faults mixed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub lines: usize,
    pub seed: u64,
    pub sensor: String,
    pub start_mm: i32,
    pub end_mm: i32,
    pub jitter_mm: i32,
    pub zero_rate: f64,
    pub spike_rate: f64,
    pub spike_mm: i32,
    pub malformed_rate: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            lines: 200,
            seed: 0,
            sensor: "Sensor A".to_string(),
            start_mm: 700,
            end_mm: 250,
            jitter_mm: 4,
            zero_rate: 0.05,
            spike_rate: 0.05,
            spike_mm: 250,
            malformed_rate: 0.03,
        }
    }
}

impl GeneratorConfig {
    fn check(&self) -> anyhow::Result<()> {
        for (name, rate) in [
            ("zero_rate", self.zero_rate),
            ("spike_rate", self.spike_rate),
            ("malformed_rate", self.malformed_rate),
        ] {
            ensure!(
                (0.0..=1.0).contains(&rate),
                "{} must be within 0..=1, got {}",
                name,
                rate
            );
        }
        ensure!(self.jitter_mm >= 0, "jitter_mm must not be negative");
        Ok(())
    }

    fn depth_at(&self, index: usize) -> i32 {
        if self.lines <= 1 {
            return self.start_mm;
        }
        let progress = index as f64 / (self.lines - 1) as f64;
        let span = f64::from(self.end_mm) - f64::from(self.start_mm);
        (f64::from(self.start_mm) + span * progress).round() as i32
    }
}

pub fn build_sensor_log(config: &GeneratorConfig) -> anyhow::Result<Vec<String>> {
    config.check()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut lines = Vec::with_capacity(config.lines);

    for index in 0..config.lines {
        if rng.gen_bool(config.malformed_rate) {
            let line = if rng.gen_bool(0.5) {
                status_line(&config.sensor, index)
            } else {
                garbled_line(&config.sensor)
            };
            lines.push(line);
            continue;
        }

        if rng.gen_bool(config.zero_rate) {
            lines.push(distance_line(&config.sensor, 0));
            continue;
        }

        let mut reading = config
            .depth_at(index)
            .saturating_add(rng.gen_range(-config.jitter_mm..=config.jitter_mm));
        if rng.gen_bool(config.spike_rate) {
            let direction = if rng.gen_bool(0.5) { 1 } else { -1 };
            reading = reading.saturating_add(direction * config.spike_mm);
        }
        lines.push(distance_line(&config.sensor, reading.max(1)));
    }

    Ok(lines)
}

/// Writes a synthetic log to `path`, returning how many lines were written.
pub fn write_sensor_log(path: &Path, config: &GeneratorConfig) -> anyhow::Result<usize> {
    let lines = build_sensor_log(config)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("creating synthetic log {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in &lines {
        writeln!(writer, "{}", line)
            .with_context(|| format!("writing synthetic log {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing synthetic log {}", path.display()))?;
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::RunConfig;
    use crate::workflow::runner::Runner;
    use std::io;

    #[test]
    fn generator_builds_expected_line_count() {
        let config = GeneratorConfig {
            lines: 64,
            ..Default::default()
        };
        let lines = build_sensor_log(&config).unwrap();
        assert_eq!(lines.len(), 64);
        assert!(lines.iter().all(|line| line.starts_with("Sensor A")));
    }

    #[test]
    fn same_seed_same_log() {
        let config = GeneratorConfig {
            lines: 50,
            seed: 7,
            ..Default::default()
        };
        assert_eq!(
            build_sensor_log(&config).unwrap(),
            build_sensor_log(&config).unwrap()
        );
    }

    #[test]
    fn clean_profile_descends_without_faults() {
        let config = GeneratorConfig {
            lines: 5,
            start_mm: 500,
            end_mm: 300,
            jitter_mm: 0,
            zero_rate: 0.0,
            spike_rate: 0.0,
            malformed_rate: 0.0,
            ..Default::default()
        };
        let lines = build_sensor_log(&config).unwrap();
        assert_eq!(lines[0], "Sensor A Distance:500mm");
        assert_eq!(lines[2], "Sensor A Distance:400mm");
        assert_eq!(lines[4], "Sensor A Distance:300mm");
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let config = GeneratorConfig {
            spike_rate: 1.5,
            ..Default::default()
        };
        assert!(build_sensor_log(&config).is_err());
    }

    #[test]
    fn generated_log_runs_through_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synthetic.txt");
        let config = GeneratorConfig {
            lines: 300,
            seed: 42,
            ..Default::default()
        };
        let written = write_sensor_log(&path, &config).unwrap();

        let runner = Runner::new(RunConfig::default());
        let summary = runner.run_file(&path, &mut io::sink()).unwrap();
        assert_eq!(summary.lines_read, written);
        assert!(summary.is_balanced());
    }
}
