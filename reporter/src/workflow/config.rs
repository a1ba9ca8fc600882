use anyhow::{anyhow, bail, Context};
use app11core::records::{
    MineCoverageSummary, MissionReport, NarrativeTimes, ReportKind, SerialNumber,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mission parameter file. Each report section present selects that report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MissionConfig {
    pub general: GeneralSection,
    #[serde(default)]
    pub start: Option<StartSection>,
    #[serde(default)]
    pub interrupt: Option<PhaseSection>,
    #[serde(default)]
    pub resume: Option<PhaseSection>,
    #[serde(default)]
    pub cancel: Option<PhaseSection>,
    #[serde(default)]
    pub stop: Option<StopSection>,
    #[serde(default)]
    pub complete: Option<CompleteSection>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneralSection {
    pub originator: String,
    pub destination: String,
    pub area: String,
    pub task: String,
    /// Operational reference time, `YYYYMMDD-HHMM`.
    pub reference: String,
    /// Vehicle that ran the task, written in the track history.
    #[serde(default)]
    pub vehicle: String,
    /// Sensor name for detection logs that do not record one.
    #[serde(default)]
    pub sonar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartSection {
    pub start: String,
    /// Estimated time of completion.
    pub etc: String,
    #[serde(default)]
    pub comments: String,
}

/// Interrupt, resume and cancel share one shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseSection {
    pub time: String,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub comments: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopSection {
    pub stop: String,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub comments: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompleteSection {
    pub complete: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub coverage: Option<MineCoverageSummary>,
    #[serde(default)]
    pub narrative: Option<NarrativeTimes>,
}

impl MissionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading mission parameters {}", path_ref.display()))?;
        let config: MissionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing mission parameters {}", path_ref.display()))?;
        Ok(config)
    }

    /// Report kinds to generate, in lifecycle order.
    pub fn report_kinds(&self, only: Option<ReportKind>) -> anyhow::Result<Vec<ReportKind>> {
        let present: Vec<ReportKind> = ReportKind::ALL
            .into_iter()
            .filter(|kind| self.has_section(*kind))
            .collect();
        match only {
            Some(kind) if present.contains(&kind) => Ok(vec![kind]),
            Some(kind) => bail!("parameters have no '{}' section", kind.as_str()),
            None if present.is_empty() => bail!("parameters contain no report sections"),
            None => Ok(present),
        }
    }

    pub fn has_section(&self, kind: ReportKind) -> bool {
        match kind {
            ReportKind::Start => self.start.is_some(),
            ReportKind::Interrupt => self.interrupt.is_some(),
            ReportKind::Resume => self.resume.is_some(),
            ReportKind::Cancel => self.cancel.is_some(),
            ReportKind::Stop => self.stop.is_some(),
            ReportKind::Complete => self.complete.is_some(),
        }
    }

    /// Shared mission fields for one report.
    pub fn report(&self, kind: ReportKind, serial: SerialNumber) -> anyhow::Result<MissionReport> {
        let missing = || anyhow!("parameters have no '{}' section", kind.as_str());
        let start = self
            .start
            .as_ref()
            .ok_or_else(|| anyhow!("every report needs the 'start' section for its start time"))?;

        let (second_time, progress, comment) = match kind {
            ReportKind::Start => (&start.etc, 0, &start.comments),
            ReportKind::Interrupt | ReportKind::Resume | ReportKind::Cancel => {
                let phase = match kind {
                    ReportKind::Interrupt => self.interrupt.as_ref(),
                    ReportKind::Resume => self.resume.as_ref(),
                    _ => self.cancel.as_ref(),
                }
                .ok_or_else(missing)?;
                (&phase.time, phase.progress, &phase.comments)
            }
            ReportKind::Stop => {
                let stop = self.stop.as_ref().ok_or_else(missing)?;
                (&stop.stop, stop.progress, &stop.comments)
            }
            ReportKind::Complete => {
                let complete = self.complete.as_ref().ok_or_else(missing)?;
                (&complete.complete, 100, &complete.comments)
            }
        };

        Ok(MissionReport {
            kind,
            originator: self.general.originator.clone(),
            destination: self.general.destination.clone(),
            area: self.general.area.clone(),
            task: self.general.task.clone(),
            serial,
            reference_time: self.general.reference.clone(),
            start_time: start.start.clone(),
            second_time: second_time.clone(),
            comment: comment.clone(),
            progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PARAMETERS: &str = "\
general:
  originator: ALPHA
  destination: CTU
  area: MWD
  task: EH01
  reference: 20240709-0800
  vehicle: sonobot
start:
  start: 20240709-0900
  etc: 20240709-1700
stop:
  stop: 20240709-1600
  progress: 80
  comments: weather
complete:
  complete: 20240709-1630
  coverage:
    characteristic_width: 50
    classification_probability: 0.9
    undetected_burial_probability: 0.05
    undetected_seabed_probability: 0.1
    track_count: 4
    track_spacing: 30.0
";

    fn config() -> MissionConfig {
        serde_yaml::from_str(PARAMETERS).unwrap()
    }

    fn serial() -> SerialNumber {
        SerialNumber::new(3).unwrap()
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(PARAMETERS.as_bytes()).unwrap();
        let path = temp.into_temp_path();
        let cfg = MissionConfig::load(&path).unwrap();
        assert_eq!(cfg.general.originator, "ALPHA");
        assert_eq!(cfg.general.sonar, "");
        assert_eq!(cfg.complete.unwrap().coverage.unwrap().track_count, 4);
    }

    #[test]
    fn sections_select_kinds_in_order() {
        let cfg = config();
        assert_eq!(
            cfg.report_kinds(None).unwrap(),
            vec![ReportKind::Start, ReportKind::Stop, ReportKind::Complete]
        );
        assert_eq!(
            cfg.report_kinds(Some(ReportKind::Stop)).unwrap(),
            vec![ReportKind::Stop]
        );
        assert!(cfg.report_kinds(Some(ReportKind::Resume)).is_err());
    }

    #[test]
    fn report_fields_come_from_their_section() {
        let cfg = config();
        let stop = cfg.report(ReportKind::Stop, serial()).unwrap();
        assert_eq!(stop.second_time, "20240709-1600");
        assert_eq!(stop.start_time, "20240709-0900");
        assert_eq!(stop.progress, 80);
        assert_eq!(stop.comment, "weather");

        let start = cfg.report(ReportKind::Start, serial()).unwrap();
        assert_eq!(start.second_time, "20240709-1700");
        assert_eq!(start.progress, 0);
        assert_eq!(start.comment, "");
    }

    #[test]
    fn reports_need_a_start_time() {
        let mut cfg = config();
        cfg.start = None;
        assert!(cfg.report(ReportKind::Stop, serial()).is_err());
    }

    #[test]
    fn malformed_file_is_reported_with_path() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"general: [not, a, map]\n").unwrap();
        let path = temp.into_temp_path();
        let err = MissionConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("parsing mission parameters"));
    }
}
