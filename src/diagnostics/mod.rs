//! Structured run diagnostics shared by both pipelines.

pub mod timing;

pub use timing::{StageTiming, StageTimer, TimingBreakdown};
