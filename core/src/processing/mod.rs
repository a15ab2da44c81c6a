pub mod band;
pub mod outlier;
pub mod parser;
pub mod pipeline;
pub mod window;
pub mod zero;

pub use band::BandStage;
pub use outlier::OutlierStage;
pub use parser::{LineParser, ParseError};
pub use pipeline::SensorPipeline;
pub use window::ReadingWindow;
pub use zero::ZeroStage;
