use std::time::{Duration, Instant};

/// Per-stage item counts and timings of one run.
pub struct StageTracker {
    last: Instant,
    stages: Vec<StageMetric>,
}

struct StageMetric {
    stage: &'static str,
    items: usize,
    elapsed: Duration,
}

impl StageTracker {
    pub fn new() -> Self {
        StageTracker {
            last: Instant::now(),
            stages: Vec::new(),
        }
    }

    /// Record a finished stage; its time is measured from the previous record.
    pub fn record(&mut self, stage: &'static str, items: usize) {
        self.stages.push(StageMetric {
            stage,
            items,
            elapsed: self.last.elapsed(),
        });
        self.last = Instant::now();
    }

    pub fn print(&self) {
        for s in &self.stages {
            println!(
                "  {:<12} {:>6} items  {:>8.1} ms",
                s.stage,
                s.items,
                s.elapsed.as_secs_f64() * 1000.0
            );
        }
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}
