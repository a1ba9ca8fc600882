use chrono::{DateTime, Utc};

use crate::format::{time_to_zulu, zulu};
use crate::prelude::{AssemblyOptions, ReportError, ReportMessage, ReportResult};
use crate::processing::coverage::mcmpedat;
use crate::processing::detections::DetectionWriter;
use crate::processing::downsample::TrackDownsampler;
use crate::processing::grammar::{self, keyword};
use crate::records::{CompletionData, MissionReport, ReportKind};
use crate::telemetry::log::ReportObserver;

/// Builds complete report messages from typed mission data.
pub struct MessageAssembler<'o> {
    options: AssemblyOptions,
    observer: &'o dyn ReportObserver,
}

/// Lines collected so far, mirrored to the observer as they are added.
struct Body<'o> {
    lines: Vec<String>,
    observer: &'o dyn ReportObserver,
}

impl<'o> Body<'o> {
    fn push(&mut self, line: String) {
        if !line.is_empty() {
            self.observer.line_emitted(keyword(&line));
        }
        self.lines.push(line);
    }

    fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        for line in lines {
            self.push(line);
        }
    }

    /// Appends a section and separates it from what follows, unless it is empty.
    fn section(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        self.extend(lines);
        self.lines.push(String::new());
    }
}

impl<'o> MessageAssembler<'o> {
    pub fn new(options: AssemblyOptions, observer: &'o dyn ReportObserver) -> Self {
        Self { options, observer }
    }

    /// Assembles one report.
    ///
    /// `issued` stamps the routing header. `completion` is only read for
    /// Complete reports and may be omitted when no completion section is
    /// requested.
    pub fn assemble(
        &self,
        report: &MissionReport,
        completion: Option<&CompletionData>,
        issued: &DateTime<Utc>,
    ) -> ReportResult<ReportMessage> {
        let version = self.options.grammar;
        let reference_zulu = time_to_zulu(&report.reference_time)
            .map_err(|err| err.within("reference"))?;
        let start_zulu = time_to_zulu(&report.start_time).map_err(|err| err.within("start"))?;
        let second_zulu = time_to_zulu(&report.second_time)
            .map_err(|err| err.within(report.kind.as_str()))?;

        let mut body = Body {
            lines: Vec::new(),
            observer: self.observer,
        };
        body.extend(version.routing(
            &zulu(&issued.naive_utc()),
            &report.originator,
            &report.destination,
        ));
        body.extend(grammar::begin());
        body.push(grammar::exer(version));
        body.push(version.msgid(&report.originator, report.serial, report.kind));
        body.extend(version.references(&report.originator, &reference_zulu));
        body.push(grammar::geodatum());
        body.push(grammar::nmwrepq(report.kind));
        body.push(grammar::heading());
        body.push(version.mtaskrep(
            &report.area,
            &report.task,
            &report.originator,
            report.kind,
            &start_zulu,
            &second_zulu,
        ));

        if report.kind == ReportKind::Complete {
            self.completion_sections(&mut body, report, completion)?;
        } else {
            body.push(grammar::mcmpedat_short(
                &report.area,
                &report.task,
                report.progress()?,
            ));
        }

        body.push(grammar::gentext(&report.comment));
        body.push(String::new());
        body.push(grammar::end());

        Ok(ReportMessage {
            filename: version.filename(
                report.kind,
                &report.originator,
                &report.area,
                &report.task,
                report.serial,
            ),
            lines: body.lines,
        })
    }

    fn completion_sections(
        &self,
        body: &mut Body<'_>,
        report: &MissionReport,
        completion: Option<&CompletionData>,
    ) -> ReportResult<()> {
        let empty = CompletionData::default();
        let data = completion.unwrap_or(&empty);

        if self.options.include_full_summary {
            let coverage = data
                .coverage
                .as_ref()
                .ok_or_else(|| ReportError::domain("coverage summary", "requested but missing"))?;
            body.section(mcmpedat(&report.area, &report.task, coverage)?.into_iter().collect());
        }

        if self.options.include_track_history {
            let downsampler = TrackDownsampler::new(&data.track, self.options.track_interval)?;
            let history = downsampler
                .iter()
                .map(|point| grammar::trckhist(&data.track_equipment, point))
                .collect::<ReportResult<Vec<_>>>()?;
            self.observer.track_reduced(data.track.len(), history.len());
            body.section(history);
        }

        let writer = DetectionWriter::new(self.options.image_field);
        let detections = writer.write_all(&data.detections)?;
        for record in &data.detections {
            self.observer.detection_dispatched(record.code().as_str());
        }
        body.section(detections);

        if self.options.include_narrative {
            let narrative = data
                .narrative
                .as_ref()
                .ok_or_else(|| ReportError::domain("narrative times", "requested but missing"))?;
            body.push(grammar::narr(narrative)?);
        }
        Ok(())
    }
}
