//! Distance-reading filter core for the seabed detection sensor.
//!
//! Each log line is parsed for a millimeter reading, zero samples are
//! dropped, spikes are rejected against the median of the last three
//! accepted readings, and what remains is classified against the target
//! bands that drive the LED.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod report;
pub mod telemetry;

pub use prelude::{FilterConfig, ProcessingStage, StageInput, StageOutput, TargetBand};
pub use processing::SensorPipeline;
pub use report::LineOutcome;
pub use telemetry::Summary;
