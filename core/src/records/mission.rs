use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::{ReportError, ReportResult};
use crate::records::{DetectionRecord, TrackPoint};

/// Phase of the task being reported, table 1220/22 time qualifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ReportKind {
    Start,
    Interrupt,
    Resume,
    Cancel,
    Stop,
    Complete,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        Self::Start,
        Self::Interrupt,
        Self::Resume,
        Self::Cancel,
        Self::Stop,
        Self::Complete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Interrupt => "interrupt",
            Self::Resume => "resume",
            Self::Cancel => "cancel",
            Self::Stop => "stop",
            Self::Complete => "complete",
        }
    }

    /// Qualifier for `NMWREPQ`, the filename and the current half of `MTASKREP`.
    pub fn time_qualifier(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Interrupt => "INTRPT",
            Self::Resume => "RESMD",
            Self::Cancel => "CXL",
            Self::Stop => "STOP",
            Self::Complete => "CPT",
        }
    }

    /// Qualifier paired with the second `MTASKREP` timestamp.
    pub fn second_time_qualifier(self) -> &'static str {
        match self {
            Self::Start => "ETC",
            other => other.time_qualifier(),
        }
    }

    /// `MSGID` qualifier, table 1130/3.
    pub fn message_qualifier(self) -> &'static str {
        match self {
            Self::Start => "INI",
            Self::Complete => "FIN",
            Self::Interrupt | Self::Resume | Self::Cancel | Self::Stop => "UPD",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ReportError::lookup("report kind", s))
    }
}

/// Message serial number, unique per (area, task).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SerialNumber(u32);

impl SerialNumber {
    pub fn new(value: u32) -> ReportResult<Self> {
        if value == 0 {
            return Err(ReportError::domain("serial number", "must be positive"));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Mission fields shared by every report kind.
///
/// Timestamps stay in their `YYYYMMDD-HHMM` input form; they are validated
/// when the report is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionReport {
    pub kind: ReportKind,
    pub originator: String,
    pub destination: String,
    pub area: String,
    pub task: String,
    pub serial: SerialNumber,
    pub reference_time: String,
    pub start_time: String,
    /// Estimated completion for Start, otherwise the time of this report.
    pub second_time: String,
    pub comment: String,
    pub progress: u8,
}

impl MissionReport {
    /// Percentage complete written in the short coverage line.
    pub fn progress(&self) -> ReportResult<u8> {
        match self.kind {
            ReportKind::Start => Ok(0),
            _ if self.progress > 100 => Err(ReportError::domain(
                "progress",
                format!("{} exceeds 100", self.progress),
            )),
            _ => Ok(self.progress),
        }
    }
}

/// Sweep figures for the full `MCMPEDAT` line of a Complete report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineCoverageSummary {
    /// Sonar range in whole metres.
    pub characteristic_width: u32,
    pub classification_probability: f64,
    pub undetected_burial_probability: f64,
    pub undetected_seabed_probability: f64,
    pub track_count: u32,
    /// Distance between parallel tracks in metres.
    pub track_spacing: f64,
}

/// Durations in hours for the `NARR` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeTimes {
    pub time_in_water: f64,
    pub detection_processing: f64,
    pub classification_processing: f64,
    pub recovery_processing: f64,
}

/// Everything a Complete report carries beyond the shared mission fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionData {
    pub coverage: Option<MineCoverageSummary>,
    pub narrative: Option<NarrativeTimes>,
    /// Vehicle or sensor name written in each `TRCKHIST` line.
    pub track_equipment: String,
    pub track: Vec<TrackPoint>,
    pub detections: Vec<DetectionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tables_follow_qualifier_conventions() {
        assert_eq!(ReportKind::Start.second_time_qualifier(), "ETC");
        assert_eq!(ReportKind::Cancel.time_qualifier(), "CXL");
        assert_eq!(ReportKind::Cancel.second_time_qualifier(), "CXL");
        assert_eq!(ReportKind::Resume.message_qualifier(), "UPD");
        assert_eq!(ReportKind::Complete.message_qualifier(), "FIN");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Interrupt".parse::<ReportKind>().unwrap(), ReportKind::Interrupt);
        assert_eq!(" COMPLETE ".parse::<ReportKind>().unwrap(), ReportKind::Complete);
        assert_eq!(
            "abort".parse::<ReportKind>(),
            Err(ReportError::lookup("report kind", "abort"))
        );
        assert_eq!(ReportKind::Stop.to_string(), "STOP");
    }

    #[test]
    fn serial_is_padded_and_positive() {
        assert_eq!(SerialNumber::new(7).unwrap().to_string(), "007");
        assert_eq!(SerialNumber::new(1234).unwrap().to_string(), "1234");
        assert!(SerialNumber::new(0).is_err());
        assert_eq!(SerialNumber::new(u32::MAX).unwrap().value(), u32::MAX);
    }

    #[test]
    fn start_always_reports_zero_progress() {
        let mut report = MissionReport {
            kind: ReportKind::Start,
            originator: "ALPHA".into(),
            destination: "CTU".into(),
            area: "MWD".into(),
            task: "EH01".into(),
            serial: SerialNumber::new(1).unwrap(),
            reference_time: "20240709-0800".into(),
            start_time: "20240709-0900".into(),
            second_time: "20240709-1700".into(),
            comment: String::new(),
            progress: 55,
        };
        assert_eq!(report.progress().unwrap(), 0);
        report.kind = ReportKind::Stop;
        assert_eq!(report.progress().unwrap(), 55);
        report.progress = 101;
        assert!(matches!(report.progress(), Err(ReportError::Domain { .. })));
    }
}
