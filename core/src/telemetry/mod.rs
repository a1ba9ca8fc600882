pub mod log;
pub mod metrics;

pub use log::{LogObserver, ReportObserver, SilentObserver};
pub use metrics::{LineTally, TallySnapshot};
