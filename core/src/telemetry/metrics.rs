use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::telemetry::log::ReportObserver;

/// Counts emitted lines per keyword for end-of-run summaries.
pub struct LineTally {
    inner: Mutex<Tally>,
}

#[derive(Default)]
struct Tally {
    lines: BTreeMap<String, usize>,
    detections: usize,
    track_points: usize,
}

/// Point-in-time copy of a [`LineTally`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallySnapshot {
    pub lines: BTreeMap<String, usize>,
    pub detections: usize,
    pub track_points: usize,
}

impl TallySnapshot {
    pub fn count(&self, keyword: &str) -> usize {
        self.lines.get(keyword).copied().unwrap_or(0)
    }

    pub fn total_lines(&self) -> usize {
        self.lines.values().sum()
    }
}

impl LineTally {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Tally::default()),
        }
    }

    pub fn snapshot(&self) -> TallySnapshot {
        if let Ok(tally) = self.inner.lock() {
            TallySnapshot {
                lines: tally.lines.clone(),
                detections: tally.detections,
                track_points: tally.track_points,
            }
        } else {
            TallySnapshot::default()
        }
    }
}

impl Default for LineTally {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportObserver for LineTally {
    fn line_emitted(&self, keyword: &str) {
        if let Ok(mut tally) = self.inner.lock() {
            *tally.lines.entry(keyword.to_string()).or_insert(0) += 1;
        }
    }

    fn detection_dispatched(&self, _code: &str) {
        if let Ok(mut tally) = self.inner.lock() {
            tally.detections += 1;
        }
    }

    fn track_reduced(&self, _input: usize, output: usize) {
        if let Ok(mut tally) = self.inner.lock() {
            tally.track_points += output;
        }
    }
}
