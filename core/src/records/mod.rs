pub mod detection;
pub mod mission;
pub mod tables;
pub mod track;

pub use detection::{CircularError, Contact, DetectionCode, DetectionRecord, MineDetails};
pub use mission::{
    CompletionData, MineCoverageSummary, MissionReport, NarrativeTimes, ReportKind, SerialNumber,
};
pub use tables::{detection_equipment, MineCase, MineStatus};
pub use track::TrackPoint;
