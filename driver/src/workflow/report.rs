use anyhow::Context;
use seabedcore::telemetry::Summary;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One JSON line appended per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub threshold_mm: i32,
    pub summary: Summary,
}

pub fn append_report(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }
    let mut line = serde_json::to_string(report).context("serializing run report")?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report {}", path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("appending report {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reports_append_one_json_line_each() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/runs.jsonl");
        let report = RunReport {
            input: PathBuf::from("sensor_readings.txt"),
            threshold_mm: 50,
            summary: Summary {
                lines_read: 4,
                in_range: 2,
                outside_range: 1,
                skipped_zero: 1,
                discarded_outliers: 0,
                malformed_lines: 0,
            },
        };

        append_report(&path, &report).unwrap();
        append_report(&path, &report).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: RunReport = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, report);
    }
}
