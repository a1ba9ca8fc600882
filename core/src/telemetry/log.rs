use log::debug;

/// Receives progress notifications while a report is assembled.
///
/// The assembler holds no logger of its own; callers pass whichever
/// observer suits them.
pub trait ReportObserver {
    /// A grammar line starting with `keyword` was appended.
    fn line_emitted(&self, keyword: &str);

    /// A detection row was written using the line for `code`.
    fn detection_dispatched(&self, code: &str) {
        let _ = code;
    }

    /// Telemetry was reduced from `input` to `output` points.
    fn track_reduced(&self, input: usize, output: usize) {
        let _ = (input, output);
    }
}

/// Observer that forwards every notification to the `log` facade.
pub struct LogObserver;

impl LogObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportObserver for LogObserver {
    fn line_emitted(&self, keyword: &str) {
        debug!("emitted {} line", keyword);
    }

    fn detection_dispatched(&self, code: &str) {
        debug!("dispatched detection as {}", code);
    }

    fn track_reduced(&self, input: usize, output: usize) {
        debug!("track history reduced {} -> {} points", input, output);
    }
}

/// Observer that ignores everything.
pub struct SilentObserver;

impl ReportObserver for SilentObserver {
    fn line_emitted(&self, _keyword: &str) {}
}
