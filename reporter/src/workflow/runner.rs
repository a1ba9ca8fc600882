use crate::ingest::{read_detections, read_track, DetectionSchema};
use crate::workflow::config::MissionConfig;
use crate::workflow::layout::MissionLayout;
use anyhow::Context;
use app11core::prelude::AssemblyOptions;
use app11core::processing::MessageAssembler;
use app11core::records::{CompletionData, ReportKind, SerialNumber};
use app11core::telemetry::{LineTally, LogObserver, ReportObserver, TallySnapshot};
use chrono::{DateTime, Utc};
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub struct GeneratedReport {
    pub kind: ReportKind,
    pub serial: SerialNumber,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct WorkflowResult {
    pub reports: Vec<GeneratedReport>,
    pub tally: TallySnapshot,
}

impl WorkflowResult {
    pub fn serial_numbers(&self) -> Vec<u32> {
        self.reports.iter().map(|report| report.serial.value()).collect()
    }
}

/// Forwards assembly notifications to the log and keeps a running tally.
struct RunObserver {
    log: LogObserver,
    tally: LineTally,
}

impl ReportObserver for RunObserver {
    fn line_emitted(&self, keyword: &str) {
        self.log.line_emitted(keyword);
        self.tally.line_emitted(keyword);
    }

    fn detection_dispatched(&self, code: &str) {
        self.log.detection_dispatched(code);
        self.tally.detection_dispatched(code);
    }

    fn track_reduced(&self, input: usize, output: usize) {
        self.log.track_reduced(input, output);
        self.tally.track_reduced(input, output);
    }
}

pub struct Runner {
    config: MissionConfig,
    layout: MissionLayout,
    options: AssemblyOptions,
    schema: DetectionSchema,
}

impl Runner {
    pub fn new(
        config: MissionConfig,
        layout: MissionLayout,
        options: AssemblyOptions,
        schema: DetectionSchema,
    ) -> Self {
        Self {
            config,
            layout,
            options,
            schema,
        }
    }

    /// Writes one report per numbered kind.
    pub fn execute(
        &self,
        numbered: &[(ReportKind, SerialNumber)],
        issued: &DateTime<Utc>,
    ) -> anyhow::Result<WorkflowResult> {
        let reports_dir = self.layout.reports_dir();
        fs::create_dir_all(reports_dir)
            .with_context(|| format!("creating reports directory {}", reports_dir.display()))?;

        let observer = RunObserver {
            log: LogObserver::new(),
            tally: LineTally::new(),
        };
        let assembler = MessageAssembler::new(self.options.clone(), &observer);

        let mut reports = Vec::with_capacity(numbered.len());
        for &(kind, serial) in numbered {
            info!("Generating {} report with number {}...", kind, serial);
            let report = self.config.report(kind, serial)?;
            let completion = if kind == ReportKind::Complete {
                Some(self.completion_data()?)
            } else {
                None
            };

            let message = assembler
                .assemble(&report, completion.as_ref(), issued)
                .with_context(|| format!("assembling {} report", kind))?;
            let path = reports_dir.join(&message.filename);
            fs::write(&path, message.render())
                .with_context(|| format!("writing report {}", path.display()))?;
            info!("{}", message.filename);

            reports.push(GeneratedReport { kind, serial, path });
        }

        Ok(WorkflowResult {
            reports,
            tally: observer.tally.snapshot(),
        })
    }

    fn completion_data(&self) -> anyhow::Result<CompletionData> {
        let general = &self.config.general;
        let complete = self.config.complete.as_ref();

        let detections = read_detections(self.layout.detections(), self.schema, &general.sonar)?;
        let track = if self.options.include_track_history {
            read_track(self.layout.telemetry())?
        } else {
            Vec::new()
        };

        Ok(CompletionData {
            coverage: complete.and_then(|section| section.coverage.clone()),
            narrative: complete.and_then(|section| section.narrative.clone()),
            track_equipment: general.vehicle.to_uppercase(),
            track,
            detections,
        })
    }
}
