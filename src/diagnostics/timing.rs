use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing entry describing a single stage of a pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn stage(&self, label: &str) -> Option<&StageTiming> {
        self.stages.iter().find(|s| s.label == label)
    }
}

/// Lap timer feeding a [`TimingBreakdown`].
pub struct StageTimer {
    start: Instant,
    lap: Instant,
    breakdown: TimingBreakdown,
}

impl StageTimer {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            lap: now,
            breakdown: TimingBreakdown::default(),
        }
    }

    /// Record the time since the previous lap under `label`.
    pub fn lap(&mut self, label: &str) {
        let now = Instant::now();
        let ms = now.duration_since(self.lap).as_secs_f64() * 1000.0;
        self.breakdown.push(label, ms);
        self.lap = now;
    }

    pub fn finish(mut self) -> TimingBreakdown {
        self.breakdown.total_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        self.breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_are_recorded_in_order() {
        let mut timer = StageTimer::start();
        timer.lap("segment");
        timer.lap("thin");
        let t = timer.finish();
        let labels: Vec<&str> = t.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["segment", "thin"]);
        assert!(t.total_ms >= t.stages.iter().map(|s| s.elapsed_ms).sum::<f64>() - 1e-9);
        assert!(t.stage("thin").is_some());
    }
}
